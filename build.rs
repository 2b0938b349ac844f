use std::env;
use std::process::Command;

// Metadata shown by `octo --version`.
fn main() {
    let revision = env::var("OCTO_REVISION")
        .ok()
        .filter(|value| !value.is_empty())
        .or_else(describe_head)
        .unwrap_or_else(|| "unknown".to_string());
    let build_date = chrono::Utc::now().format("%Y-%m-%d");

    println!("cargo:rustc-env=OCTO_GIT_HASH={revision}");
    println!("cargo:rustc-env=OCTO_BUILD_DATE={build_date}");
    println!(
        "cargo:rustc-env=OCTO_BUILD_TARGET={}",
        env::var("TARGET").unwrap_or_default()
    );

    println!("cargo:rerun-if-env-changed=OCTO_REVISION");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
}

/// Short commit id, suffixed with `-dirty` for uncommitted changes.
fn describe_head() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let revision = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!revision.is_empty()).then_some(revision)
}
