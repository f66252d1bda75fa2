use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Slider, Ui};

use crate::plot::render::RasterRenderer;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – interpretation controls
// ---------------------------------------------------------------------------

/// Render the configuration panel.  Every widget edits the explicit config
/// value; any change reruns the pure pipeline.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Configuration");
    ui.separator();

    let Some(log) = &state.log else {
        ui.label("No well loaded.");
        return;
    };
    let columns: Vec<String> = log.table.columns().to_vec();

    let mut changed = false;
    if let Some(config) = state.config.as_mut() {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui: &mut Ui| {
                ui.strong("Curves");
                let selections = [
                    ("Gamma Ray (GR)", &mut config.gr_curve),
                    ("Resistivity", &mut config.resistivity_curve),
                    ("Total porosity", &mut config.porosity_curve),
                ];
                for (label, slot) in selections {
                    egui::ComboBox::from_label(label)
                        .selected_text(slot.clone())
                        .show_ui(ui, |ui: &mut Ui| {
                            for col in &columns {
                                if ui.selectable_label(*slot == *col, col).clicked() {
                                    *slot = col.clone();
                                    changed = true;
                                }
                            }
                        });
                }

                ui.separator();
                ui.strong("Interpretation");
                changed |= ui
                    .add(Slider::new(&mut config.gr_cutoff, 0.0..=150.0).text("GR cutoff"))
                    .changed();
                ui.horizontal(|ui: &mut Ui| {
                    ui.label("Clean sand GR");
                    changed |= ui.add(DragValue::new(&mut config.gr_clean).speed(0.5)).changed();
                });
                ui.horizontal(|ui: &mut Ui| {
                    ui.label("Pure shale GR");
                    changed |= ui.add(DragValue::new(&mut config.gr_shale).speed(0.5)).changed();
                });

                if let Some(err) = &state.config_error {
                    ui.add_space(4.0);
                    ui.colored_label(Color32::RED, err);
                }

                if let Some(interp) = &state.interpretation {
                    ui.separator();
                    ui.strong("Interval summary");
                    let s = &interp.summary;
                    ui.label(format!("Net-to-Gross: {}", percent(Some(s.net_to_gross))));
                    ui.label(format!("Mean Vcl: {}", percent(s.mean_vcl)));
                    ui.label(format!("Mean PHIE: {}", percent(s.mean_phie)));
                    ui.label(format!("Gross thickness: {:.1}", s.thickness));
                    ui.label(format!("Sampling step: {:.3}", interp.step));
                }
            });
    }

    if changed {
        state.recompute();
    }
}

fn percent(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => "no data".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        let ready = state.interpretation.is_some();
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(ready, egui::Button::new("Export interpretation…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(ready, egui::Button::new("Save report…"))
                .clicked()
            {
                report_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(log) = &state.log {
            ui.label(format!(
                "{} — {} samples, {} curves",
                log.name,
                log.table.len(),
                log.table.columns().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open well log")
        .add_filter("Well logs", &["las", "csv"])
        .add_filter("LAS", &["las"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(log) => {
                log::info!(
                    "Loaded well '{}' with {} samples and curves {:?}",
                    log.name,
                    log.table.len(),
                    log.table.columns()
                );
                state.set_log(log);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn export_dialog(state: &mut AppState) {
    let (Some(log), Some(interp)) = (&state.log, &state.interpretation) else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export interpretation")
        .set_file_name(format!("{}_interpretation.csv", log.name))
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = file else { return };
    let outcome = crate::export::export_all(&path, log, &interp.derived, &interp.summary);
    state.status_message = Some(match outcome {
        Ok(()) => format!("Exported interpretation to {}", path.display()),
        Err(e) => {
            log::error!("Export failed: {e:#}");
            format!("Export failed: {e:#}")
        }
    });
}

fn report_dialog(state: &mut AppState) {
    let Some(interp) = &state.interpretation else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Save report")
        .set_file_name(format!("{}_report.html", interp.plot.well_name))
        .add_filter("HTML", &["html"])
        .save_file();

    let Some(path) = file else { return };
    // A rendering failure withholds only the document; the numeric results
    // stay available for the export path.
    let outcome = crate::report::build(&RasterRenderer, &interp.plot, &interp.summary)
        .map_err(anyhow::Error::from)
        .and_then(|doc| std::fs::write(&path, doc).map_err(anyhow::Error::from));

    state.status_message = Some(match outcome {
        Ok(()) => format!("Report saved to {}", path.display()),
        Err(e) => {
            log::error!("Report generation failed: {e:#}");
            format!("Report failed: {e:#}")
        }
    });
}
