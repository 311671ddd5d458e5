// Get git info and the build-time stencil radius
// make available to src as constants
// https://stackoverflow.com/questions/43753491/include-git-commit-hash-as-string-into-rust-program
use std::process::Command;

const DEFAULT_RADIUS: usize = 2;

fn git_output(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    let git_describe = git_output(&["describe", "--tags"]);
    println!("cargo:rustc-env=GIT_DESCRIBE={git_describe}");

    let git_hash = git_output(&["rev-parse", "HEAD"]);
    println!("cargo:rustc-env=GIT_HASH={git_hash}");

    println!("cargo:rerun-if-env-changed=STENCIL_RADIUS");
    let radius = match std::env::var("STENCIL_RADIUS") {
        Ok(value) => value.trim().parse::<usize>().unwrap_or_else(|_| {
            panic!("STENCIL_RADIUS must be a non-negative integer, got {value:?}")
        }),
        Err(_) => DEFAULT_RADIUS,
    };

    let out_dir = std::env::var("OUT_DIR").unwrap();
    let config_path = std::path::Path::new(&out_dir).join("build_config.rs");
    std::fs::write(
        config_path,
        format!("/// Stencil radius fixed at build time.\npub const RADIUS: usize = {radius};\n"),
    )
    .unwrap();
}
