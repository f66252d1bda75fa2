use crate::data::model::CurveTable;

use super::config::{ConfigError, InterpretationConfig};

/// Sampling increment used when the depth index cannot provide one.
pub const FALLBACK_STEP: f64 = 0.5;

/// Constant depth increment of the table.
///
/// Degenerate input (fewer than two samples, or equal leading depths) yields
/// the fallback rather than an error: downstream aggregation always needs a
/// number.
pub fn sampling_step(depths: &[f64]) -> f64 {
    match depths {
        [a, b, ..] if a != b => (b - a).abs(),
        _ => FALLBACK_STEP,
    }
}

/// Interpretation curves aligned to the source depth index.
///
/// Owned by the computation that produced them; a config change produces a
/// whole new value, never an in-place edit.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedCurves {
    /// Shale volume fraction, clamped to [0, 1].  Null where GR is null.
    pub vcl: Vec<Option<f64>>,
    /// Effective porosity fraction, clamped to [0, 1].  Null where total
    /// porosity or VCL is null.
    pub phie: Vec<Option<f64>>,
}

/// Compute VCL and PHIE from the raw curves.
///
/// `VCL = clamp((GR - gr_clean) / (gr_shale - gr_clean), 0, 1)`
/// `PHIE = clamp(PHI_total * (1 - VCL), 0, 1)`
///
/// Pure function of `(table, config)`; validates the config first so a
/// degenerate shale scale never reaches the division.
pub fn derive_curves(
    table: &CurveTable,
    config: &InterpretationConfig,
) -> Result<DerivedCurves, ConfigError> {
    config.validate(table)?;

    // validate() guarantees both columns exist.
    let gr = table.curve(&config.gr_curve).unwrap();
    let phi_total = table.curve(&config.porosity_curve).unwrap();
    let span = config.gr_shale - config.gr_clean;

    let vcl: Vec<Option<f64>> = gr
        .iter()
        .map(|g| g.map(|g| ((g - config.gr_clean) / span).clamp(0.0, 1.0)))
        .collect();

    let phie: Vec<Option<f64>> = phi_total
        .iter()
        .zip(&vcl)
        .map(|(phi, vcl)| match (phi, vcl) {
            (Some(phi), Some(vcl)) => Some((phi * (1.0 - vcl)).clamp(0.0, 1.0)),
            _ => None,
        })
        .collect();

    Ok(DerivedCurves { vcl, phie })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(gr: &[Option<f64>], phi: &[Option<f64>]) -> CurveTable {
        let depths: Vec<f64> = (0..gr.len()).map(|i| 100.0 + i as f64).collect();
        CurveTable::new(
            depths,
            vec![
                ("GR".to_string(), gr.to_vec()),
                ("RT".to_string(), vec![Some(1.0); gr.len()]),
                ("NPHI".to_string(), phi.to_vec()),
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

    #[test]
    fn sampling_step_from_first_two_depths() {
        assert_eq!(sampling_step(&[1500.0, 1500.5, 1501.0]), 0.5);
        assert_eq!(sampling_step(&[1501.0, 1500.0]), 1.0);
    }

    #[test]
    fn sampling_step_falls_back_on_degenerate_input() {
        assert_eq!(sampling_step(&[]), FALLBACK_STEP);
        assert_eq!(sampling_step(&[1500.0]), FALLBACK_STEP);
        assert_eq!(sampling_step(&[1500.0, 1500.0, 1501.0]), FALLBACK_STEP);
    }

    #[test]
    fn vcl_matches_linear_scale() {
        let t = table(
            &[Some(20.0), Some(80.0), Some(40.0), Some(120.0)],
            &[Some(0.2); 4],
        );
        let d = derive_curves(&t, &config()).unwrap();
        let vcl: Vec<f64> = d.vcl.iter().map(|v| v.unwrap()).collect();
        assert_eq!(vcl, vec![0.0, 0.6, 0.2, 1.0]);
    }

    #[test]
    fn vcl_and_phie_are_clamped_to_unit_interval() {
        // GR outside the clean/shale scale, porosity above 1.
        let t = table(
            &[Some(-50.0), Some(500.0), Some(70.0)],
            &[Some(1.8), Some(0.3), Some(0.25)],
        );
        let d = derive_curves(&t, &config()).unwrap();
        for v in d.vcl.iter().chain(&d.phie).flatten() {
            assert!((0.0..=1.0).contains(v), "out of range: {v}");
        }
        assert_eq!(d.vcl[0], Some(0.0));
        assert_eq!(d.vcl[1], Some(1.0));
    }

    #[test]
    fn phie_removes_the_clay_bound_fraction() {
        let t = table(&[Some(70.0)], &[Some(0.30)]);
        let d = derive_curves(&t, &config()).unwrap();
        // VCL = 0.5 → PHIE = 0.30 * 0.5
        assert!((d.phie[0].unwrap() - 0.15).abs() < 1e-12);
    }

    #[test]
    fn nulls_propagate_and_are_never_defaulted() {
        let t = table(
            &[None, Some(80.0), Some(40.0)],
            &[Some(0.2), None, Some(0.25)],
        );
        let d = derive_curves(&t, &config()).unwrap();
        assert_eq!(d.vcl[0], None);
        assert_eq!(d.phie[0], None); // VCL null → PHIE null
        assert_eq!(d.phie[1], None); // porosity null → PHIE null
        assert!(d.vcl[1].is_some());
        assert!(d.phie[2].is_some());
    }

    #[test]
    fn recomputation_is_bit_identical() {
        let t = table(
            &[Some(33.3), None, Some(77.7)],
            &[Some(0.21), Some(0.27), None],
        );
        let cfg = config();
        assert_eq!(derive_curves(&t, &cfg).unwrap(), derive_curves(&t, &cfg).unwrap());
    }

    #[test]
    fn degenerate_scale_is_a_config_error() {
        let t = table(&[Some(50.0)], &[Some(0.2)]);
        let mut cfg = config();
        cfg.gr_clean = 80.0;
        cfg.gr_shale = 80.0;
        assert_eq!(derive_curves(&t, &cfg), Err(ConfigError::DegenerateShaleScale));
    }
}
