/// Data layer: core types, loading, filtering, aggregation, and export.
///
/// Architecture:
/// ```text
///  forecast_result.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → ForecastSeries (raw, read-only)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  inclusive date range → filtered ForecastSeries
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │ metrics   │   │  export   │  DLI / thresholds / stats, CSV bytes
///   └──────────┘   └──────────┘
/// ```
pub mod export;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
