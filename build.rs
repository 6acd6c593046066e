use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let git_hash = git_rev_parse();
    println!("cargo:rustc-env=SPENDGRID_BUILD_HASH={git_hash}");

    let git_status = git_dirty_suffix();
    println!("cargo:rustc-env=SPENDGRID_BUILD_STATUS={git_status}");

    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    println!("cargo:rustc-env=SPENDGRID_BUILD_TIMESTAMP={timestamp}");

    let target = env::var("TARGET").unwrap_or_else(|_| "unknown-target".to_string());
    println!("cargo:rustc-env=SPENDGRID_BUILD_TARGET={target}");

    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown-profile".to_string());
    println!("cargo:rustc-env=SPENDGRID_BUILD_PROFILE={profile}");

    let rustc_version = rustc_version();
    println!("cargo:rustc-env=SPENDGRID_BUILD_RUSTC={rustc_version}");
}

/// Stdout of a successful command, trimmed; `None` if it failed or printed nothing.
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string())
}

fn git_rev_parse() -> String {
    command_stdout("git", &["rev-parse", "--short", "HEAD"])
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_dirty_suffix() -> String {
    command_stdout("git", &["status", "--porcelain"])
        .map(|changes| if changes.is_empty() { "clean" } else { "dirty" })
        .unwrap_or("unknown")
        .to_string()
}

fn rustc_version() -> String {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    command_stdout(&rustc, &["--version"]).unwrap_or_else(|| "unknown".to_string())
}
