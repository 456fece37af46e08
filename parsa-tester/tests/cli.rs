use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "parsa-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_parsa-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("overlay-gate"));
}

#[test]
fn cli_runs_all_scenarios_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_parsa-tester");
    let output_path = temp_path("all");
    let output = Command::new(exe)
        .args(["--scenarios", "all", "--report", "json", "--output"])
        .arg(&output_path)
        .output()
        .expect("run cli");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "tester failed: {stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Parsa Scenario Tester"));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output_path).expect("read report"))
            .expect("json report");
    assert_eq!(report["failed"], 0);
    assert_eq!(report["fixture"], "builtin");
    assert!(report["results"].as_array().is_some_and(|r| r.len() >= 10));
}

#[test]
fn cli_fails_on_unknown_scenario() {
    let exe = env!("CARGO_BIN_EXE_parsa-tester");
    let output = Command::new(exe)
        .args(["--scenarios", "smoke,does-not-exist", "--report", "markdown"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("### ❌ does-not-exist"));
    assert!(stdout.contains("### ✅ smoke"));
}

#[test]
fn cli_accepts_a_fixture_file() {
    let exe = env!("CARGO_BIN_EXE_parsa-tester");
    let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/catalog.json");
    let output = Command::new(exe)
        .args(["--fixture", fixture, "--scenarios", "smoke,deep-link", "--report", "json"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("catalog.json"));
}

#[test]
fn cli_rejects_a_broken_fixture() {
    let exe = env!("CARGO_BIN_EXE_parsa-tester");
    let path = temp_path("broken.json");
    std::fs::write(&path, "{not json").expect("write fixture");
    let output = Command::new(exe)
        .arg("--fixture")
        .arg(&path)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loading fixture"));
}
