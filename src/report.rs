use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use maud::{html, Markup, DOCTYPE};

use crate::interp::summary::IntervalSummary;
use crate::plot::render::{PlotRenderer, RenderError};
use crate::plot::spec::TrackPlotSpec;

const FIGURE_WIDTH: u32 = 1200;
const FIGURE_HEIGHT: u32 = 900;

const STYLE: &str = "\
body { font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif; margin: 2em auto; max-width: 62em; color: #222; }
h1 { font-size: 1.4em; text-align: center; }
table.summary { border-collapse: collapse; margin: 1.2em 0; }
table.summary td { border: 1px solid #bbb; padding: 0.35em 0.9em; }
table.summary td.label { background: #f4f4f4; font-weight: 600; }
img.figure { width: 100%; border: 1px solid #ddd; }
";

/// Render the plot and assemble the one-page report.
///
/// Renderer failure is reported to the caller; the summary and derived curves
/// it was built from remain valid for the other output consumers.
pub fn build(
    renderer: &dyn PlotRenderer,
    spec: &TrackPlotSpec,
    summary: &IntervalSummary,
) -> Result<String, RenderError> {
    let png = renderer.render_png(spec, FIGURE_WIDTH, FIGURE_HEIGHT)?;
    Ok(assemble(&spec.well_name, summary, &png))
}

/// Assemble the report document around an already-rendered figure.
pub fn assemble(well_name: &str, summary: &IntervalSummary, figure_png: &[u8]) -> String {
    let figure_uri = format!("data:image/png;base64,{}", STANDARD.encode(figure_png));

    let page: Markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Petrophysical report: " (well_name) }
                style { (STYLE) }
            }
            body {
                h1 { "Petrophysical report: " (well_name) }
                h2 { "Interval summary" }
                table class="summary" {
                    tr {
                        td class="label" { "Net-to-Gross (NTG)" }
                        td { (percent(Some(summary.net_to_gross))) }
                    }
                    tr {
                        td class="label" { "Mean Vcl" }
                        td { (percent(summary.mean_vcl)) }
                    }
                    tr {
                        td class="label" { "Mean effective porosity" }
                        td { (percent(summary.mean_phie)) }
                    }
                    tr {
                        td class="label" { "Gross thickness" }
                        td { (format!("{:.1}", summary.thickness)) }
                    }
                }
                img class="figure" alt="Three-track depth plot" src=(figure_uri);
            }
        }
    };

    page.into_string()
}

/// A fraction as a percentage with two decimals; "no data" for an undefined
/// statistic.
fn percent(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => "no data".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRenderer(Vec<u8>);

    impl PlotRenderer for FixedRenderer {
        fn render_png(&self, _: &TrackPlotSpec, _: u32, _: u32) -> Result<Vec<u8>, RenderError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenRenderer;

    impl PlotRenderer for BrokenRenderer {
        fn render_png(&self, _: &TrackPlotSpec, _: u32, _: u32) -> Result<Vec<u8>, RenderError> {
            Err(RenderError::Draw("no rendering engine".to_string()))
        }
    }

    fn summary() -> IntervalSummary {
        IntervalSummary {
            thickness: 3.0,
            net_sand: 2.0,
            net_to_gross: 2.0 / 3.0,
            mean_vcl: Some(0.45),
            mean_phie: None,
        }
    }

    fn spec() -> TrackPlotSpec {
        TrackPlotSpec {
            well_name: "COYOTE-1".to_string(),
            depth_range: (100.0, 103.0),
            tracks: Vec::new(),
        }
    }

    #[test]
    fn report_carries_title_summary_and_figure() {
        let doc = assemble("COYOTE-1", &summary(), b"\x89PNG fake");
        assert!(doc.contains("Petrophysical report: COYOTE-1"));
        assert!(doc.contains("66.67%"));
        assert!(doc.contains("45.00%"));
        assert!(doc.contains("no data"));
        assert!(doc.contains("data:image/png;base64,"));
    }

    #[test]
    fn build_embeds_the_rendered_figure() {
        let doc = build(&FixedRenderer(b"abc".to_vec()), &spec(), &summary()).unwrap();
        assert!(doc.contains(&STANDARD.encode(b"abc")));
    }

    #[test]
    fn renderer_failure_surfaces_without_discarding_results() {
        let s = summary();
        let err = build(&BrokenRenderer, &spec(), &s).unwrap_err();
        assert!(matches!(err, RenderError::Draw(_)));
        // The summary the report was asked to present is untouched.
        assert_eq!(s.net_sand, 2.0);
    }

    #[test]
    fn percent_formatting_has_two_decimals() {
        assert_eq!(percent(Some(0.0)), "0.00%");
        assert_eq!(percent(Some(1.0)), "100.00%");
        assert_eq!(percent(None), "no data");
    }
}
