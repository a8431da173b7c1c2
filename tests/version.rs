//! Integration test: Verify binary prints correct version

use std::process::Command;

#[test]
fn binary_prints_version() {
    // EXPECT: `--version` prints the Cargo.toml version and exits without
    // touching the terminal
    let output = Command::new(env!("CARGO_BIN_EXE_cardstack"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "Expected output to contain version '{}', but got: {}",
        env!("CARGO_PKG_VERSION"),
        stdout
    );
}

#[test]
fn binary_rejects_unknown_screen() {
    let output = Command::new(env!("CARGO_BIN_EXE_cardstack"))
        .args(["--screen", "inbox"])
        .output()
        .expect("Failed to execute binary");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("inbox"), "stderr: {}", stderr);
}
