/// Data layer: core types, loading, and binning.
///
/// Architecture:
/// ```text
///  bundled penguins.csv / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → PenguinDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ PenguinDataset │  Vec<Record>, shared read-only behind Arc
///   └────────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ histogram │  numeric column → equal-width bins
///   └───────────┘
/// ```

pub mod histogram;
pub mod loader;
pub mod model;
