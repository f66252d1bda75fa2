/// Plot layer: the renderer-agnostic track layout and its raster backend.
///
/// `spec` builds the three-track description (the layout rules live there);
/// `render` turns it into a PNG for the report.  The interactive on-screen
/// rendering of the same description lives in `ui::tracks`.
pub mod render;
pub mod spec;
