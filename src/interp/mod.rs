/// Interpretation engine: pure stages composed by [`interpret`].
///
/// ```text
///   WellLog + InterpretationConfig
///        │ validate
///        ├── sampling_step
///        ├── derive_curves      → VCL, PHIE
///        ├── summarize          → thickness, NTG, means
///        └── compose_tracks     → TrackPlotSpec
///        ▼
///   Interpretation  (shared by the UI, the export, and the report)
/// ```
///
/// Every stage is a pure function of its inputs; the whole pipeline is rerun
/// on each parameter change and yields bit-identical results for identical
/// inputs.
pub mod config;
pub mod curves;
pub mod summary;

use crate::data::model::WellLog;
use crate::plot::spec::{compose_tracks, TrackPlotSpec};

use config::{ConfigError, InterpretationConfig};
use curves::{derive_curves, sampling_step, DerivedCurves};
use summary::{summarize, IntervalSummary};

/// Everything computed from one `(WellLog, InterpretationConfig)` pair.
///
/// Built once per parameter change and handed to all consumers (interactive
/// tracks, tabular export, report) without recomputation.
#[derive(Debug, Clone)]
pub struct Interpretation {
    pub step: f64,
    pub derived: DerivedCurves,
    pub summary: IntervalSummary,
    pub plot: TrackPlotSpec,
}

/// Run the full numeric pipeline.  Fails fast on configuration errors; never
/// touches the inputs.
pub fn interpret(log: &WellLog, config: &InterpretationConfig) -> Result<Interpretation, ConfigError> {
    config.validate(&log.table)?;

    let step = sampling_step(log.table.depths());
    let derived = derive_curves(&log.table, config)?;
    let summary = summarize(&log.table, &derived, config, step)?;
    let plot = compose_tracks(&log.table, &derived, config, &log.name);

    Ok(Interpretation {
        step,
        derived,
        summary,
        plot,
    })
}
