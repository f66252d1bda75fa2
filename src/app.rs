use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, tracks};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct PetrologApp {
    pub state: AppState,
}

impl eframe::App for PetrologApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: interpretation controls ----
        egui::SidePanel::left("config_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: linked track plots ----
        egui::CentralPanel::default().show(ctx, |ui| {
            match &self.state.interpretation {
                Some(interp) => tracks::track_plots(ui, &interp.plot),
                None => {
                    ui.centered_and_justified(|ui: &mut egui::Ui| {
                        let msg = if self.state.log.is_some() {
                            "Fix the configuration to see the tracks"
                        } else {
                            "Open a .las or .csv well log to begin  (File → Open…)"
                        };
                        ui.heading(msg);
                    });
                }
            }
        });
    }
}
