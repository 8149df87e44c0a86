use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "mathrun-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn quick_run(extra: &[&str], output: &std::path::Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_mathrun-tester"))
        .args(["--sessions", "3", "--seed", "42", "--delay-ms", "0", "--no-save"])
        .args(extra)
        .arg("--output")
        .arg(output)
        .output()
        .expect("run cli")
}

#[test]
fn cli_writes_json_report_for_seeded_run() {
    let output_path = temp_path("json");
    let output = quick_run(&["--report", "json"], &output_path);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Mathrun User Testing Simulator"));
    assert!(stdout.contains("42"));

    let content = std::fs::read_to_string(output_path).expect("read output");
    let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(value["rawData"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["results"]["total_sessions"], 3);
}

#[test]
fn cli_same_seed_gives_same_sessions() {
    let first_path = temp_path("seed-a");
    let second_path = temp_path("seed-b");
    assert!(quick_run(&["--report", "json", "--variant", "mobile"], &first_path).status.success());
    assert!(quick_run(&["--report", "json", "--variant", "mobile"], &second_path).status.success());

    let first: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(first_path).unwrap()).unwrap();
    let second: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(second_path).unwrap()).unwrap();
    assert_eq!(first["rawData"], second["rawData"]);
}

#[test]
fn cli_writes_markdown_for_both_variants() {
    let output_path = temp_path("markdown");
    let output = quick_run(&["--report", "markdown", "--variant", "both"], &output_path);
    assert!(output.status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("# Mathrun Desktop User Testing Report"));
    assert!(content.contains("# Mathrun Mobile User Testing Report"));
}

#[test]
fn cli_saves_results_files() {
    let save_dir = temp_path("saved");
    let output = Command::new(env!("CARGO_BIN_EXE_mathrun-tester"))
        .args(["--sessions", "2", "--seed", "7", "--delay-ms", "0", "--save-dir"])
        .arg(&save_dir)
        .args(["--output"])
        .arg(temp_path("saved-report"))
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let names: Vec<String> = std::fs::read_dir(&save_dir)
        .expect("save dir exists")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("test_results_") && names[0].ends_with(".json"));
}

#[test]
fn cli_rejects_invalid_profile_override() {
    let profiles = temp_path("bad-profiles.json");
    std::fs::write(&profiles, r#"[{ "type": "expert", "skill": 3.5 }]"#).unwrap();
    let output = quick_run(
        &["--profiles", profiles.to_str().unwrap()],
        &temp_path("bad-report"),
    );
    assert!(!output.status.success());
}
