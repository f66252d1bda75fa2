use crate::data::model::WellLog;
use crate::interp::config::InterpretationConfig;
use crate::interp::{interpret, Interpretation};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// All interpretation parameters live in the explicit `config` value; the
/// engine itself holds no state, so `recompute` is safe to call on every
/// widget change.
#[derive(Default)]
pub struct AppState {
    /// Loaded well log (None until the user opens a file).
    pub log: Option<WellLog>,

    /// Current interpretation parameters (None until a log is loaded).
    pub config: Option<InterpretationConfig>,

    /// Cached pipeline output for the current `(log, config)` pair.
    pub interpretation: Option<Interpretation>,

    /// Configuration error blocking the current computation run.
    pub config_error: Option<String>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded log and interpret it with default parameters.
    pub fn set_log(&mut self, log: WellLog) {
        self.config = InterpretationConfig::defaults_for(&log.table);
        self.log = Some(log);
        self.status_message = None;
        self.recompute();
    }

    /// Rerun the numeric pipeline for the current parameters.
    pub fn recompute(&mut self) {
        self.interpretation = None;
        self.config_error = None;

        let (Some(log), Some(config)) = (&self.log, &self.config) else {
            return;
        };
        match interpret(log, config) {
            Ok(interpretation) => self.interpretation = Some(interpretation),
            Err(e) => {
                log::warn!("interpretation rejected: {e}");
                self.config_error = Some(e.to_string());
            }
        }
    }
}
