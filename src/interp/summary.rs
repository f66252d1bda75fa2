use serde::Serialize;

use crate::data::model::CurveTable;

use super::config::{ConfigError, InterpretationConfig};
use super::curves::DerivedCurves;

/// Interval-level aggregate statistics.
///
/// Recomputed per `(table, config)` pair, never updated in place.  `None`
/// means "no data" (an all-null source curve) and is distinct from a valid 0:
/// "no reservoir rock" is 0, "nothing measured" is not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalSummary {
    /// Gross interval thickness over the non-null GR samples.
    pub thickness: f64,
    /// Thickness classified as sand by the GR cutoff.
    pub net_sand: f64,
    /// Net-to-gross ratio in [0, 1]; 0 for a zero-thickness interval.
    pub net_to_gross: f64,
    pub mean_vcl: Option<f64>,
    pub mean_phie: Option<f64>,
}

/// Aggregate the derived curves over the logged interval.
///
/// Net sand counts non-null GR samples strictly below the cutoff, scaled by
/// the sampling step.  A full-sand interval counts one more sample than the
/// gross span has steps, so the ratio is capped at 1.
pub fn summarize(
    table: &CurveTable,
    derived: &DerivedCurves,
    config: &InterpretationConfig,
    step: f64,
) -> Result<IntervalSummary, ConfigError> {
    let gr = table
        .curve(&config.gr_curve)
        .ok_or_else(|| ConfigError::UnknownCurve(config.gr_curve.clone()))?;

    let mut span: Option<(f64, f64)> = None;
    let mut sand_samples = 0usize;
    for (depth, g) in table.depths().iter().zip(gr) {
        let Some(g) = g else { continue };
        span = Some(match span {
            Some((lo, hi)) => (lo.min(*depth), hi.max(*depth)),
            None => (*depth, *depth),
        });
        if *g < config.gr_cutoff {
            sand_samples += 1;
        }
    }

    let thickness = span.map(|(lo, hi)| hi - lo).unwrap_or(0.0);
    let net_sand = sand_samples as f64 * step;
    let net_to_gross = if thickness > 0.0 {
        (net_sand / thickness).min(1.0)
    } else {
        0.0
    };

    Ok(IntervalSummary {
        thickness,
        net_sand,
        net_to_gross,
        mean_vcl: mean(&derived.vcl),
        mean_phie: mean(&derived.phie),
    })
}

/// Arithmetic mean over the non-null samples; `None` when there are none.
fn mean(curve: &[Option<f64>]) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in curve.iter().flatten() {
        sum += v;
        n += 1;
    }
    (n > 0).then(|| sum / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::curves::{derive_curves, sampling_step};

    fn table(gr: &[Option<f64>]) -> CurveTable {
        let depths: Vec<f64> = (0..gr.len()).map(|i| 100.0 + i as f64).collect();
        CurveTable::new(
            depths,
            vec![
                ("GR".to_string(), gr.to_vec()),
                ("RT".to_string(), vec![Some(1.0); gr.len()]),
                ("NPHI".to_string(), vec![Some(0.2); gr.len()]),
            ],
        )
        .unwrap()
    }

    fn config() -> InterpretationConfig {
        InterpretationConfig {
            gr_curve: "GR".to_string(),
            resistivity_curve: "RT".to_string(),
            porosity_curve: "NPHI".to_string(),
            gr_cutoff: 60.0,
            gr_clean: 20.0,
            gr_shale: 120.0,
        }
    }

    fn run(gr: &[Option<f64>]) -> IntervalSummary {
        let t = table(gr);
        let cfg = config();
        let step = sampling_step(t.depths());
        let derived = derive_curves(&t, &cfg).unwrap();
        summarize(&t, &derived, &cfg, step).unwrap()
    }

    #[test]
    fn worked_example_netto_gross() {
        // Depths 100..=103, step 1: samples 100 and 102 are below the cutoff.
        let s = run(&[Some(20.0), Some(80.0), Some(40.0), Some(120.0)]);
        assert_eq!(s.thickness, 3.0);
        assert_eq!(s.net_sand, 2.0);
        assert!((s.net_to_gross - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn all_null_gr_yields_zero_thickness_and_zero_ntg() {
        let s = run(&[None, None, None]);
        assert_eq!(s.thickness, 0.0);
        assert_eq!(s.net_to_gross, 0.0);
        assert_eq!(s.mean_vcl, None);
        assert_eq!(s.mean_phie, None);
    }

    #[test]
    fn full_sand_interval_reports_ntg_of_exactly_one() {
        let s = run(&[Some(25.0), Some(30.0), Some(22.0), Some(28.0)]);
        assert_eq!(s.net_to_gross, 1.0);
    }

    #[test]
    fn null_gr_samples_do_not_count_as_sand() {
        let s = run(&[Some(20.0), None, Some(40.0), None, Some(120.0)]);
        // Interval spans all non-null GR depths (100..104), two sand samples.
        assert_eq!(s.thickness, 4.0);
        assert_eq!(s.net_sand, 2.0);
    }

    #[test]
    fn single_sample_uses_fallback_step_for_net_sand() {
        let t = table(&[Some(20.0)]);
        let cfg = config();
        let step = sampling_step(t.depths());
        assert_eq!(step, 0.5);
        let derived = derive_curves(&t, &cfg).unwrap();
        let s = summarize(&t, &derived, &cfg, step).unwrap();
        // One sand sample, but zero thickness → NTG is 0 by definition.
        assert_eq!(s.net_sand, 0.5);
        assert_eq!(s.net_to_gross, 0.0);
    }

    #[test]
    fn means_average_only_non_null_samples() {
        let s = run(&[Some(20.0), None, Some(120.0)]);
        // VCL = [0.0, null, 1.0]
        assert_eq!(s.mean_vcl, Some(0.5));
    }
}
