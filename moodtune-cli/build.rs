//! Build script for moodtune
//!
//! Exports `MOODTUNE_BUILD_ID`, shown by `moodtune --version` and logged at
//! startup, e.g. `3f2a9c1e-dirty, release, built 2026-10-19`.

use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

fn main() {
    let revision = match git(&["rev-parse", "--short=8", "HEAD"]) {
        Some(hash) => {
            // Uncommitted changes to tracked files
            let dirty = git(&["status", "--porcelain", "--untracked-files=no"])
                .is_some_and(|status| !status.is_empty());
            if dirty {
                format!("{}-dirty", hash)
            } else {
                hash
            }
        }
        None => "unknown".to_string(),
    };

    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let date = chrono::Utc::now().format("%Y-%m-%d");

    println!(
        "cargo:rustc-env=MOODTUNE_BUILD_ID={}, {}, built {}",
        revision, profile, date
    );

    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=build.rs");
}
