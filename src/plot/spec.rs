use crate::data::model::CurveTable;
use crate::interp::config::InterpretationConfig;
use crate::interp::curves::DerivedCurves;

// ---------------------------------------------------------------------------
// Renderer-agnostic track plot description
// ---------------------------------------------------------------------------

/// Horizontal value scale of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    /// Base-10 logarithmic; samples with value ≤ 0 are omitted at composition
    /// time, so renderers never see an undefined coordinate.
    Log10,
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Solid,
    Dashed,
    /// Area between the curve and the zero line of the value axis.
    FilledToZero,
}

/// One plotted series: `(value, depth)` points with fixed styling.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    /// RGBA, straight alpha.
    pub color: [u8; 4],
    pub style: SeriesStyle,
    pub width: f32,
    /// Null samples are simply absent.
    pub points: Vec<(f64, f64)>,
}

/// One vertical lane of the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub title: String,
    pub scale: AxisScale,
    pub series: Vec<Series>,
}

/// The full three-track depth plot, depth increasing downward.
///
/// Purely derived from the curve table, the derived curves, and the config;
/// shared by the interactive egui renderer and the raster renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPlotSpec {
    pub well_name: String,
    /// `(min, max)` over the table's depth index; all tracks share it.
    pub depth_range: (f64, f64),
    pub tracks: Vec<Track>,
}

// Series colors, matched across both renderers.
const GR_COLOR: [u8; 4] = [20, 20, 20, 255];
const SAND_FILL: [u8; 4] = [255, 225, 0, 100];
const RES_COLOR: [u8; 4] = [200, 30, 30, 255];
const PHI_TOTAL_COLOR: [u8; 4] = [30, 60, 200, 255];
const PHIE_COLOR: [u8; 4] = [20, 20, 20, 255];
const VCL_FILL: [u8; 4] = [139, 69, 19, 60];

// ---------------------------------------------------------------------------
// Composer
// ---------------------------------------------------------------------------

/// Lay out the three-track plot.
///
/// Track 1: raw GR plus the display-only "sand flag" (a clipped copy of GR,
/// never the curve used for computation).  Track 2: resistivity on a log
/// scale.  Track 3: total porosity (dashed), PHIE (solid), and the VCL shale
/// shading.  Inputs are borrowed and left untouched.
pub fn compose_tracks(
    table: &CurveTable,
    derived: &DerivedCurves,
    config: &InterpretationConfig,
    well_name: &str,
) -> TrackPlotSpec {
    let depths = table.depths();
    let depth_range = depths
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(*d), hi.max(*d))
        });

    // compose_tracks is only called with a validated config.
    let gr = table.curve(&config.gr_curve).unwrap_or(&[]);
    let resistivity = table.curve(&config.resistivity_curve).unwrap_or(&[]);
    let phi_total = table.curve(&config.porosity_curve).unwrap_or(&[]);

    let lithology = Track {
        title: "Lithology & Vcl".to_string(),
        scale: AxisScale::Linear,
        series: vec![
            Series {
                name: "GR".to_string(),
                color: GR_COLOR,
                style: SeriesStyle::Solid,
                width: 1.5,
                points: sampled(depths, gr),
            },
            // Display-only sand shading; unnamed so it stays out of the legend.
            Series {
                name: String::new(),
                color: SAND_FILL,
                style: SeriesStyle::FilledToZero,
                width: 0.0,
                points: clipped_to_cutoff(depths, gr, config.gr_cutoff),
            },
        ],
    };

    let resistivity = Track {
        title: "Resistivity".to_string(),
        scale: AxisScale::Log10,
        series: vec![Series {
            name: "Res".to_string(),
            color: RES_COLOR,
            style: SeriesStyle::Solid,
            width: 1.5,
            points: sampled(depths, resistivity)
                .into_iter()
                .filter(|(v, _)| *v > 0.0)
                .collect(),
        }],
    };

    let porosity = Track {
        title: "Porosities".to_string(),
        scale: AxisScale::Linear,
        series: vec![
            Series {
                name: "Phi total".to_string(),
                color: PHI_TOTAL_COLOR,
                style: SeriesStyle::Dashed,
                width: 1.5,
                points: sampled(depths, phi_total),
            },
            Series {
                name: "Phi effective".to_string(),
                color: PHIE_COLOR,
                style: SeriesStyle::Solid,
                width: 1.5,
                points: sampled(depths, &derived.phie),
            },
            Series {
                name: "Vcl".to_string(),
                color: VCL_FILL,
                style: SeriesStyle::FilledToZero,
                width: 1.0,
                points: sampled(depths, &derived.vcl),
            },
        ],
    };

    TrackPlotSpec {
        well_name: well_name.to_string(),
        depth_range,
        tracks: vec![lithology, resistivity, porosity],
    }
}

/// Pair depths with non-null values.
fn sampled(depths: &[f64], values: &[Option<f64>]) -> Vec<(f64, f64)> {
    depths
        .iter()
        .zip(values)
        .filter_map(|(d, v)| v.map(|v| (v, *d)))
        .collect()
}

/// A copy of the curve with values above the cutoff clipped down to it.
/// Display-only: the source slice is never modified.
fn clipped_to_cutoff(depths: &[f64], values: &[Option<f64>], cutoff: f64) -> Vec<(f64, f64)> {
    depths
        .iter()
        .zip(values)
        .filter_map(|(d, v)| v.map(|v| (v.min(cutoff), *d)))
        .collect()
}
