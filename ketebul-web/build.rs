//! Build script for ketebul-web
//!
//! Embeds build identification and a fingerprint of the browser assets:
//! - `GIT_HASH`: short commit hash, "unknown" outside a checkout
//! - `BUILD_TIMESTAMP`, `BUILD_PROFILE`
//! - `ASSET_VERSION`: hash of `ui/site.css` and `ui/site.js`, appended to
//!   their URLs so browsers refetch them only when they change

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::process::Command;

const ASSETS: &[&str] = &["ui/site.css", "ui/site.js"];

fn main() {
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let build_timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    let mut hasher = DefaultHasher::new();
    for asset in ASSETS {
        // A missing asset fails the include_str! in src/api/ui.rs with a clearer error
        std::fs::read(asset).unwrap_or_default().hash(&mut hasher);
        println!("cargo:rerun-if-changed={}", asset);
    }
    let asset_version = format!("{:08x}", hasher.finish() as u32);

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rustc-env=BUILD_PROFILE={}", profile);
    println!("cargo:rustc-env=ASSET_VERSION={}", asset_version);

    // Templates are embedded with include_str!
    println!("cargo:rerun-if-changed=templates");
}
