/// Data layer: run-log loading, series alignment, scatter ranking.
///
/// Architecture:
/// ```text
///  runs/<name>.json | .csv | .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  one scalar per record → Vec<f64>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  align    │  smooth → rebase → truncate
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ AlignedSeriesSet  │  equal-length series, shared index axis
///   └──────────────────┘
/// ```

pub mod align;
pub mod loader;
pub mod model;
pub mod scatter;
