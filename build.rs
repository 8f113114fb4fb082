use std::env;
use std::process::Command;

/// Trimmed stdout of a successful git invocation.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn main() {
    let hash = git(&["rev-parse", "--short=7", "HEAD"])
        .map_or_else(|| "gunknown".to_string(), |h| format!("g{h}"));

    // Release tags look like `v1.2.3`; fall back to the manifest version.
    let version = git(&["describe", "--tags", "--abbrev=0"])
        .map(|tag| tag.trim_start_matches('v').to_string())
        .or_else(|| env::var("CARGO_PKG_VERSION").ok())
        .unwrap_or_else(|| "0.0.0".to_string());

    for path in [".git/HEAD", ".git/refs/tags", "Cargo.toml", "resources/presets"] {
        println!("cargo::rerun-if-changed={path}");
    }
    println!("cargo::rustc-env=GIT_HASH={hash}");
    println!("cargo::rustc-env=GIT_VERSION={version}");
}
