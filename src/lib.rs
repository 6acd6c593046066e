#![doc(test(attr(deny(warnings))))]

//! SpendGrid turns dated income and expense transactions into chart datasets
//! (pie, overview, bar and line series) and a calendar spending heatmap.
//!
//! The engine lives in the `spendgrid-core` crate; this crate adds tracing
//! setup, the settings bridge from the config file, a terminal renderer and
//! the `spendgrid_cli` front end.

pub mod cli;
pub mod config;
pub mod errors;
pub mod render;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("SpendGrid tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
