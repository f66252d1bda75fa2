use std::io::Cursor;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use thiserror::Error;

use super::spec::{AxisScale, SeriesStyle, Track, TrackPlotSpec};

/// Failures of the raster rendering collaborator.
///
/// Recoverable and isolated per artifact: the numeric pipeline has already
/// completed when rendering starts, and its results stay valid.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("figure drawing failed: {0}")]
    Draw(String),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Seam for producing an opaque raster depiction of a [`TrackPlotSpec`].
pub trait PlotRenderer {
    fn render_png(&self, spec: &TrackPlotSpec, width: u32, height: u32)
        -> Result<Vec<u8>, RenderError>;
}

/// Plotters-backed renderer drawing into an owned RGB buffer.
///
/// The buffer is the only transient resource; it is dropped (or moved into the
/// encoded PNG) on every exit path, including mid-draw failures.
pub struct RasterRenderer;

impl PlotRenderer for RasterRenderer {
    fn render_png(
        &self,
        spec: &TrackPlotSpec,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let mut rgb = vec![255u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let body = root
                .titled(
                    &format!("Well {} — quick-look interpretation", spec.well_name),
                    ("sans-serif", 22),
                )
                .map_err(draw_err)?;

            let lanes = body.split_evenly((1, spec.tracks.len().max(1)));
            for (lane, track) in lanes.iter().zip(&spec.tracks) {
                draw_track(lane, track, spec.depth_range)?;
            }
            root.present().map_err(draw_err)?;
        }

        let img = image::RgbImage::from_raw(width, height, rgb)
            .ok_or_else(|| RenderError::Encode("pixel buffer size mismatch".to_string()))?;
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        Ok(png)
    }
}

fn draw_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Draw one lane.  Depth runs top-down via a reversed y range; log tracks plot
/// `log10(value)` on a linear coordinate with power-of-ten tick labels.
fn draw_track<DB: DrawingBackend>(
    lane: &DrawingArea<DB, Shift>,
    track: &Track,
    depth_range: (f64, f64),
) -> Result<(), RenderError> {
    let (x_min, x_max) = value_range(track);
    let scale = track.scale;
    let tx = move |v: f64| match scale {
        AxisScale::Linear => v,
        AxisScale::Log10 => v.log10(),
    };

    let mut chart = ChartBuilder::on(lane)
        .caption(&track.title, ("sans-serif", 16))
        .margin(6)
        .x_label_area_size(24)
        .y_label_area_size(46)
        .build_cartesian_2d(x_min..x_max, depth_range.1..depth_range.0)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_labels(5)
        .y_labels(10)
        .x_label_formatter(&move |x: &f64| match scale {
            AxisScale::Linear => format_tick(*x),
            AxisScale::Log10 => format_tick(10f64.powf(*x)),
        })
        .y_label_formatter(&|d: &f64| format!("{d:.0}"))
        .draw()
        .map_err(draw_err)?;

    for series in &track.series {
        let [r, g, b, a] = series.color;
        let color = RGBAColor(r, g, b, a as f64 / 255.0);
        let stroke = RGBAColor(r, g, b, 1.0).stroke_width(series.width.max(1.0) as u32);
        let points: Vec<(f64, f64)> = series.points.iter().map(|&(v, d)| (tx(v), d)).collect();
        if points.is_empty() {
            continue;
        }

        let anno = match series.style {
            SeriesStyle::FilledToZero => {
                // Fill between the curve and the value-axis zero line.
                let baseline = if scale == AxisScale::Log10 { x_min } else { 0.0 };
                let mut polygon = Vec::with_capacity(points.len() + 2);
                polygon.push((baseline, points[0].1));
                polygon.extend(points.iter().copied());
                polygon.push((baseline, points[points.len() - 1].1));
                chart
                    .draw_series(std::iter::once(Polygon::new(polygon, color.filled())))
                    .map_err(draw_err)?;
                if series.width > 0.0 {
                    chart
                        .draw_series(LineSeries::new(points, stroke))
                        .map_err(draw_err)?
                } else {
                    continue;
                }
            }
            SeriesStyle::Dashed => chart
                .draw_series(DashedLineSeries::new(points.into_iter(), 6, 4, stroke))
                .map_err(draw_err)?,
            SeriesStyle::Solid => chart
                .draw_series(LineSeries::new(points, stroke))
                .map_err(draw_err)?,
        };

        if !series.name.is_empty() {
            anno.label(&series.name)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 14, y)], stroke));
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .draw()
        .map_err(draw_err)?;

    Ok(())
}

/// Horizontal range of a track: zero-based with headroom for linear tracks,
/// whole decades for log tracks.
fn value_range(track: &Track) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for series in &track.series {
        for &(v, _) in &series.points {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() {
        return (0.0, 1.0);
    }

    match track.scale {
        AxisScale::Linear => {
            let lo = lo.min(0.0);
            let span = (hi - lo).max(1e-9);
            (lo, hi + span * 0.05)
        }
        AxisScale::Log10 => {
            let lo = lo.log10().floor();
            let hi = hi.log10().ceil();
            if hi > lo { (lo, hi) } else { (lo, lo + 1.0) }
        }
    }
}

fn format_tick(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else if v.abs() >= 1.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::spec::Series;

    fn track(scale: AxisScale, points: Vec<(f64, f64)>) -> Track {
        Track {
            title: "t".to_string(),
            scale,
            series: vec![Series {
                name: "s".to_string(),
                color: [0, 0, 0, 255],
                style: SeriesStyle::Solid,
                width: 1.0,
                points,
            }],
        }
    }

    #[test]
    fn linear_range_starts_at_zero_with_headroom() {
        let (lo, hi) = value_range(&track(AxisScale::Linear, vec![(20.0, 0.0), (120.0, 1.0)]));
        assert_eq!(lo, 0.0);
        assert!(hi > 120.0);
    }

    #[test]
    fn log_range_snaps_to_whole_decades() {
        let (lo, hi) = value_range(&track(AxisScale::Log10, vec![(0.7, 0.0), (150.0, 1.0)]));
        assert_eq!(lo, -1.0);
        assert_eq!(hi, 3.0);
    }

    #[test]
    fn empty_track_gets_a_unit_range() {
        assert_eq!(value_range(&track(AxisScale::Linear, vec![])), (0.0, 1.0));
    }
}
