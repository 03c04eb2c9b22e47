//! Embeds git version information at compile time.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let version = git_describe().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=KEEPER_VERSION={}", version);
}

/// `git describe --tags --always`, with a leading 'v' stripped. None
/// when git is unavailable or this is not a checkout.
fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always"])
        .output()
        .ok()
        .filter(|out| out.status.success())?;

    let version = String::from_utf8(output.stdout).ok()?;
    let version = version.trim().trim_start_matches('v');

    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}
