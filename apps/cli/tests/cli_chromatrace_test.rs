//! Integration tests for the `chromatrace` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const TRACE: &str = "thread 'main' panicked at src/main.rs:12:5:\nindex out of bounds\n\
note: run with `RUST_BACKTRACE=1` environment variable to display a backtrace\n";

/// A command isolated from the user's config files and color settings.
fn chromatrace(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("chromatrace").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .env("HOME", temp_dir.path())
        .env_remove("NO_COLOR")
        .env_remove("COLORTERM")
        .env_remove("CHROMATRACE_ALWAYS")
        .env_remove("CHROMATRACE_STYLE")
        .env_remove("CHROMATRACE_COLORS")
        .env_remove("CHROMATRACE_DEBUG")
        .env_remove("CHROMATRACE_THEME_FILE")
        .env_remove("RUST_BACKTRACE");
    cmd
}

#[test]
fn test_demo_panic_is_colored() {
    let temp_dir = TempDir::new().unwrap();
    chromatrace(&temp_dir)
        .env("CHROMATRACE_COLORS", "256")
        .arg("demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("\x1b["))
        .stderr(predicate::str::contains("panicked at"))
        .stderr(predicate::str::contains("demo settings were never loaded"));
}

#[test]
fn test_demo_respects_no_color() {
    let temp_dir = TempDir::new().unwrap();
    chromatrace(&temp_dir)
        .env("CHROMATRACE_COLORS", "256")
        .env("NO_COLOR", "1")
        .arg("demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("panicked at"))
        .stderr(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_demo_debug_reports_color_count() {
    let temp_dir = TempDir::new().unwrap();
    chromatrace(&temp_dir)
        .env("CHROMATRACE_COLORS", "256")
        .env("CHROMATRACE_DEBUG", "1")
        .arg("demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Detected support for 256 colors"));
}

#[test]
fn test_demo_error_chain() {
    let temp_dir = TempDir::new().unwrap();
    chromatrace(&temp_dir)
        .env("CHROMATRACE_COLORS", "256")
        .args(["demo", "--error"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("\x1b["))
        .stderr(predicate::str::contains("Caused by"))
        .stderr(predicate::str::contains("already in use"));
}

#[test]
fn test_demo_error_chain_plain_with_no_color() {
    let temp_dir = TempDir::new().unwrap();
    chromatrace(&temp_dir)
        .env("NO_COLOR", "1")
        .args(["demo", "--error"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: failed to start demo service\n\nCaused by:\n    address 127.0.0.1:8080 already in use\n",
        ));
}

#[test]
fn test_render_file() {
    let temp_dir = TempDir::new().unwrap();
    let trace_path = temp_dir.path().join("panic.txt");
    fs::write(&trace_path, TRACE).unwrap();

    chromatrace(&temp_dir)
        .arg("render")
        .arg(&trace_path)
        .args(["--colors", "256"])
        .assert()
        .success()
        .stdout(predicate::str::contains("38;5;"))
        .stdout(predicate::str::contains("index out of bounds"));
}

#[test]
fn test_render_header_with_thread_id() {
    let temp_dir = TempDir::new().unwrap();
    chromatrace(&temp_dir)
        .args(["render", "--colors", "256"])
        .write_stdin("thread 'main' (7528) panicked at src/main.rs:12:5:\nindex out of bounds\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\x1b["))
        .stdout(predicate::str::contains("7528"));
}

#[test]
fn test_render_stdin_sixteen_colors() {
    let temp_dir = TempDir::new().unwrap();
    chromatrace(&temp_dir)
        .args(["render", "--colors", "16", "--style", "light"])
        .write_stdin(TRACE)
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b["))
        .stdout(predicate::str::contains("38;5;").not())
        .stdout(predicate::str::contains("38;2;").not());
}

#[test]
fn test_render_no_color_is_plain() {
    let temp_dir = TempDir::new().unwrap();
    chromatrace(&temp_dir)
        .env("NO_COLOR", "1")
        .args(["render", "--colors", "256"])
        .write_stdin(TRACE)
        .assert()
        .success()
        .stdout(TRACE);
}

#[test]
fn test_render_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    chromatrace(&temp_dir)
        .args(["render", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read trace file"));
}

#[test]
fn test_styles_lists_aliases_and_themes() {
    let temp_dir = TempDir::new().unwrap();
    chromatrace(&temp_dir)
        .arg("styles")
        .assert()
        .success()
        .stdout(predicate::str::contains("solarized-dark"))
        .stdout(predicate::str::contains("InspiredGitHub"))
        .stdout(predicate::str::contains("base16-ocean.dark"));
}

#[test]
fn test_probe_json_with_override() {
    let temp_dir = TempDir::new().unwrap();
    let output = chromatrace(&temp_dir)
        .env("CHROMATRACE_COLORS", "256")
        .env("CHROMATRACE_STYLE", "github")
        .args(["probe", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["probe"]["colors"], 256);
    assert_eq!(json["probe"]["source"], "override");
    assert_eq!(json["probe"]["support"], "color256");
    assert_eq!(json["profile"]["theme"]["name"], "InspiredGitHub");
    // stderr of a test process is not a terminal
    assert_eq!(json["active"], false);
}

#[test]
fn test_probe_json_no_color() {
    let temp_dir = TempDir::new().unwrap();
    let output = chromatrace(&temp_dir)
        .env("NO_COLOR", "1")
        .env("CHROMATRACE_ALWAYS", "1")
        .args(["probe", "--json"])
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["active"], false);
    assert_eq!(json["skip_reason"], "NO_COLOR is set");
}

#[test]
fn test_probe_uses_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("hook.toml");
    fs::write(&config_path, "always = true\nstyle = \"light\"\ncolors = 16\n").unwrap();

    let output = chromatrace(&temp_dir)
        .arg("--config")
        .arg(&config_path)
        .args(["probe", "--json"])
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["active"], true);
    assert_eq!(json["profile"]["background"], "light");
    assert_eq!(json["profile"]["theme"]["name"], "base16-ocean.light");
}

#[test]
fn test_local_config_is_discovered() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".chromatrace.toml"), "style = \"mocha\"\ncolors = 256\n").unwrap();

    chromatrace(&temp_dir)
        .args(["probe", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base16-mocha.dark"));
}

#[test]
fn test_probe_human_output() {
    let temp_dir = TempDir::new().unwrap();
    chromatrace(&temp_dir)
        .env("CHROMATRACE_COLORS", "16")
        .arg("probe")
        .assert()
        .success()
        .stdout(predicate::str::contains("Activation:"))
        .stdout(predicate::str::contains("16-color"));
}
