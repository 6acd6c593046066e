/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// One line per field, as printed by `spendgrid_cli version`.
    pub fn lines(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("version", self.version),
            ("commit", self.git_hash),
            ("tree", self.git_status),
            ("built", self.timestamp),
            ("target", self.target),
            ("profile", self.profile),
            ("rustc", self.rustc),
        ]
    }
}

/// CLI semantic version derived from the crate metadata.
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: CLI_VERSION,
        git_hash: option_env!("SPENDGRID_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("SPENDGRID_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("SPENDGRID_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("SPENDGRID_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("SPENDGRID_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("SPENDGRID_BUILD_RUSTC").unwrap_or("unknown"),
    }
}
