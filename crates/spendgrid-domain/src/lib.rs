//! spendgrid-domain
//!
//! Pure data types for the chart and heatmap engine (transactions, date keys,
//! buckets, calendar cells, chart records).
//! No I/O, no rendering, no aggregation logic.

pub mod bucket;
pub mod calendar;
pub mod chart;
pub mod common;
pub mod date_key;
pub mod transaction;

pub use bucket::*;
pub use calendar::*;
pub use chart::*;
pub use common::*;
pub use date_key::*;
pub use transaction::*;
