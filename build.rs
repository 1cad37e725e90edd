use std::env;
use std::process::Command;

fn emit(key: &str, value: &str) {
    println!("cargo:rustc-env=NIBNAB_{}={}", key, value);
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    emit(
        "TARGET",
        &env::var("TARGET").unwrap_or_else(|_| "unknown".to_string()),
    );
    emit(
        "PROFILE",
        &env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string()),
    );

    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let rustc_version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    emit("RUSTC_VERSION", &rustc_version);

    // Shown by `nibnab status`
    let build_date = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
    emit("BUILD_DATE", &build_date);
}
