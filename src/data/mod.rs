/// Data layer: core types and ingestion.
///
/// Architecture:
/// ```text
///  .las / .csv bytes
///        │  UTF-8 → Latin-1 fallback
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → WellLog
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │  WellLog    │  well name, header entries, CurveTable
///   └────────────┘
///        │
///        ▼
///   interp::interpret()  (derived curves, summary, track plot)
/// ```
pub mod loader;
pub mod model;
