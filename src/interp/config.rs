use serde::Serialize;
use thiserror::Error;

use crate::data::model::CurveTable;

/// Invalid parameter combinations.  Fatal to the computation run: surfaced
/// before any derived curve, plot, or report is attempted.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("curve '{0}' is not present in the loaded log")]
    UnknownCurve(String),
    #[error("clean-sand and shale GR endpoints must differ")]
    DegenerateShaleScale,
}

/// Interpretation parameters supplied by the host UI.
///
/// Immutable value passed into every core call; the engine keeps no state of
/// its own, so recomputing with an identical config yields identical output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpretationConfig {
    /// Column used as the shale indicator.
    pub gr_curve: String,
    /// Column shown on the log-scaled resistivity track.
    pub resistivity_curve: String,
    /// Column used as total porosity.
    pub porosity_curve: String,
    /// GR threshold separating reservoir-quality rock from shale.
    pub gr_cutoff: f64,
    /// GR reading of clean sand (0% shale volume).
    pub gr_clean: f64,
    /// GR reading of pure shale (100% shale volume).
    pub gr_shale: f64,
}

impl InterpretationConfig {
    /// Starting parameters for a freshly loaded table: the first three columns
    /// and the observed GR extremes as the shale-volume scale.
    pub fn defaults_for(table: &CurveTable) -> Option<Self> {
        let columns = table.columns();
        let first = columns.first()?.clone();
        let pick = |i: usize| columns[i.min(columns.len() - 1)].clone();
        let (gr_clean, gr_shale) = table.curve_range(&first).unwrap_or((0.0, 150.0));

        Some(InterpretationConfig {
            gr_curve: first,
            resistivity_curve: pick(1),
            porosity_curve: pick(2),
            gr_cutoff: 60.0,
            gr_clean,
            gr_shale,
        })
    }

    /// Check the config against a table before any computation.
    pub fn validate(&self, table: &CurveTable) -> Result<(), ConfigError> {
        for name in [&self.gr_curve, &self.resistivity_curve, &self.porosity_curve] {
            if !table.has_curve(name) {
                return Err(ConfigError::UnknownCurve(name.clone()));
            }
        }
        if self.gr_shale == self.gr_clean {
            return Err(ConfigError::DegenerateShaleScale);
        }
        Ok(())
    }
}
