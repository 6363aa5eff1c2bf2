use std::process::Command;

use serde_json::Value;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gesture_volume"))
}

fn status_lines(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8(stdout.to_vec())
        .expect("stdout utf8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("status JSON line"))
        .collect()
}

#[test]
fn simulate_prints_one_status_per_frame() {
    let output = cli()
        .args(["--config", "does/not/exist.json", "simulate", "--frames", "30"])
        .output()
        .expect("simulate command");

    assert!(
        output.status.success(),
        "simulate exited with {:?}",
        output.status.code()
    );
    let lines = status_lines(&output.stdout);
    assert_eq!(lines.len(), 30);
    for line in &lines {
        let volume = line["volume"].as_u64().expect("volume field");
        assert!(volume <= 100);
        assert_eq!(line["min"], 20);
        assert_eq!(line["max"], 200);
    }
}

#[test]
fn simulate_with_calibration_reports_learned_range() {
    let output = cli()
        .args([
            "simulate",
            "--frames",
            "60",
            "--calibrate-frames",
            "45",
            "--every",
            "5",
        ])
        .output()
        .expect("simulate command");

    assert!(output.status.success());
    let lines = status_lines(&output.stdout);
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0]["calibrating"], true);

    let last = lines.last().expect("final status");
    assert_eq!(last["calibrating"], false);
    let (min, max) = (last["min"].as_u64().unwrap(), last["max"].as_u64().unwrap());
    assert!(min < max);
}

#[test]
fn unknown_subcommand_fails() {
    let output = cli().arg("bogus").output().expect("cli invocation");
    assert!(!output.status.success());
}
