use eframe::egui::{Color32, Id, Stroke, Ui};
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, Polygon};

use crate::plot::spec::{AxisScale, SeriesStyle, Track, TrackPlotSpec};

// ---------------------------------------------------------------------------
// Interactive track plots (central panel)
// ---------------------------------------------------------------------------

/// Render the three tracks side by side with a shared, linked depth axis.
///
/// Depth increases downward: points are plotted at `-depth` and the axis
/// labels negate back.  Linking the y axis and cursor across the tracks makes
/// pan/zoom on one move all three identically.
pub fn track_plots(ui: &mut Ui, spec: &TrackPlotSpec) {
    let link_id = Id::new("depth_axis");
    let height = ui.available_height();

    ui.columns(spec.tracks.len(), |columns| {
        for (column, track) in columns.iter_mut().zip(&spec.tracks) {
            track_plot(column, track, spec.depth_range, link_id, height);
        }
    });
}

fn track_plot(ui: &mut Ui, track: &Track, depth_range: (f64, f64), link_id: Id, height: f32) {
    let scale = track.scale;
    let tx = move |v: f64| match scale {
        AxisScale::Linear => v,
        AxisScale::Log10 => v.log10(),
    };

    let plot = Plot::new(Id::new(track.title.as_str()))
        .height(height)
        .legend(Legend::default())
        .link_axis(link_id, [false, true])
        .link_cursor(link_id, [false, true])
        .x_axis_label(track.title.clone())
        .y_axis_label("Depth")
        .include_y(-depth_range.0)
        .include_y(-depth_range.1)
        .y_axis_formatter(|mark, _range| format!("{:.0}", -mark.value))
        .x_axis_formatter(move |mark, _range| match scale {
            AxisScale::Linear => format_value(mark.value),
            AxisScale::Log10 => format_value(10f64.powf(mark.value)),
        })
        .label_formatter(move |name, point| {
            let value = match scale {
                AxisScale::Linear => point.x,
                AxisScale::Log10 => 10f64.powf(point.x),
            };
            if name.is_empty() {
                format!("depth {:.1}\n{value:.3}", -point.y)
            } else {
                format!("{name}\ndepth {:.1}\n{value:.3}", -point.y)
            }
        });

    plot.show(ui, |plot_ui| {
        for series in &track.series {
            let [r, g, b, a] = series.color;
            let color = Color32::from_rgba_unmultiplied(r, g, b, a);
            let points: PlotPoints = series
                .points
                .iter()
                .map(|&(v, d)| [tx(v), -d])
                .collect();

            match series.style {
                SeriesStyle::FilledToZero => {
                    // Close the area back to the zero line of the value axis.
                    let mut ring: Vec<[f64; 2]> = Vec::with_capacity(series.points.len() + 2);
                    if let (Some(first), Some(last)) =
                        (series.points.first(), series.points.last())
                    {
                        ring.push([0.0, -first.1]);
                        ring.extend(series.points.iter().map(|&(v, d)| [tx(v), -d]));
                        ring.push([0.0, -last.1]);
                    }
                    let stroke = if series.width > 0.0 {
                        Stroke::new(series.width, color.to_opaque())
                    } else {
                        Stroke::NONE
                    };
                    let mut polygon = Polygon::new(PlotPoints::from(ring))
                        .fill_color(color)
                        .stroke(stroke);
                    if !series.name.is_empty() {
                        polygon = polygon.name(series.name.clone());
                    }
                    plot_ui.polygon(polygon);
                }
                SeriesStyle::Solid | SeriesStyle::Dashed => {
                    let mut line = Line::new(points)
                        .color(color)
                        .width(series.width);
                    if series.style == SeriesStyle::Dashed {
                        line = line.style(LineStyle::dashed_loose());
                    }
                    if !series.name.is_empty() {
                        line = line.name(series.name.clone());
                    }
                    plot_ui.line(line);
                }
            }
        }
    });
}

fn format_value(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else if v.abs() >= 10.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
