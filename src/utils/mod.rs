pub mod build_info;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Default filter directive; `RUST_LOG` adds to it.
pub const DEFAULT_DIRECTIVE: &str = "spendgrid=info";

/// Installs the global fmt subscriber, logging to stderr so JSON on stdout stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse() {
            filter = filter.add_directive(directive);
        }

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
