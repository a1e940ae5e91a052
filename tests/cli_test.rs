//! Runs the built binary to check exit codes and what lands on stderr

use std::fs;
use std::process::{Command, Output};

fn run_binary(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chapter-thumbnails"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_runtime_error_is_one_stderr_line() {
    let temp = tempfile::tempdir().unwrap();
    let settings = temp.path().join("settings.json");
    fs::write(
        &settings,
        r#"{ "ffmpeg_path": "/nonexistent/definitely-not-ffmpeg" }"#,
    )
    .unwrap();
    let out_dir = temp.path().join("out");

    let output = run_binary(&[
        "--config",
        settings.to_str().unwrap(),
        "/nonexistent.mkv",
        out_dir.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(lines.len(), 1, "stderr was: {stderr}");
    assert!(lines[0].contains("error:"));
    assert!(lines[0].contains("failed to run"));
    assert!(!out_dir.exists());
}

#[test]
fn test_wrong_argument_count_exits_with_usage() {
    let output = run_binary(&["only-a-video.mkv"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}
