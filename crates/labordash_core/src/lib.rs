//! Workforce Forecast Dashboard Core Types
//!
//! Pure data for the dashboard: the metrics snapshot, the artifact manifest,
//! and number formatting. The only I/O is reading an optional metrics file
//! and probing the asset directory.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assets;
pub mod error;
pub mod format;
pub mod metrics;

// Re-exports
pub use assets::{ASSET_ROUTE, Artifact, AssetManifest, AssetReport, AssetStatus};
pub use error::{CoreError, CoreResult};
pub use format::{group_decimal, group_thousands, plain_decimal};
pub use metrics::{MetricKey, MetricValue, MetricsSnapshot};
