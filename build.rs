use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let stamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let vars = [
        ("HASH", short_commit().unwrap_or_else(|| "unknown".into())),
        ("TIMESTAMP", stamp),
        ("TARGET", env::var("TARGET").unwrap_or_else(|_| "unknown-target".into())),
        ("PROFILE", env::var("PROFILE").unwrap_or_else(|_| "unknown-profile".into())),
    ];
    for (name, value) in vars {
        println!("cargo:rustc-env=CROP_KEEPER_BUILD_{name}={value}");
    }
}

fn short_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}
