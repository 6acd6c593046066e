//! spendgrid-core
//!
//! Aggregation, calendar grid, heatmap and chart dataset services.
//! Depends on spendgrid-domain. No rendering, no terminal I/O, no storage.

pub mod aggregation_service;
pub mod cache;
pub mod calendar_service;
pub mod chart_service;
pub mod error;
pub mod format;
pub mod heatmap_service;
pub mod intensity;
pub mod labels;
pub mod style;

pub use aggregation_service::*;
pub use cache::*;
pub use calendar_service::*;
pub use chart_service::*;
pub use error::ChartError;
pub use format::*;
pub use heatmap_service::*;
pub use intensity::*;
pub use labels::*;
pub use style::*;
