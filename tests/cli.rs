use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/pou_small.csv")
}

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("pou_explorer").unwrap();
    cmd.env_remove("POU_DATA").env("RUST_LOG", "warn");
    cmd
}

fn read_json(path: PathBuf) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn outputs_tool_name() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pou_explorer 0.1.0"));
}

#[test]
fn headless_writes_both_series() {
    let out = tempfile::tempdir().unwrap();

    cmd()
        .arg(fixture())
        .args(["--headless", "--no-charts"])
        .args(["--country", "Indonesia", "--country", "Egypt"])
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("4 country rows, 4 regional means"));

    let countries = read_json(out.path().join("country_series.json"));
    assert_eq!(countries.as_array().unwrap().len(), 4);
    assert_eq!(countries[0]["area"], "Indonesia");
    assert_eq!(countries[0]["year"], 2010);

    let regions = read_json(out.path().join("region_series.json"));
    assert_eq!(regions.as_array().unwrap().len(), 4);
    assert_eq!(regions[0]["region"], "MENA");
    assert_eq!(regions[0]["mean"], 5.0);
}

#[test]
fn data_path_can_come_from_env() {
    let out = tempfile::tempdir().unwrap();

    cmd()
        .env("POU_DATA", fixture())
        .args(["--headless", "--no-charts", "--country", "Egypt"])
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 country rows, 2 regional means"));
}

#[test]
fn config_file_extends_region_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(
        &config,
        r#"{ "regions": { "France": "Western Europe" }, "default_countries": ["France"] }"#,
    )
    .unwrap();
    let out = dir.path().join("out");

    cmd()
        .arg(fixture())
        .args(["--headless", "--no-charts", "--config"])
        .arg(&config)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 country rows, 1 regional means"));

    let regions = read_json(out.join("region_series.json"));
    assert_eq!(regions[0]["region"], "Western Europe");
    assert_eq!(regions[0]["qualified"], 1);
}

#[test]
fn headless_warns_about_absent_countries() {
    let out = tempfile::tempdir().unwrap();

    cmd()
        .arg(fixture())
        .args(["--headless", "--no-charts", "--country", "Egypt", "--country", "Atlantis"])
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 country rows, 2 regional means"))
        .stderr(predicate::str::contains("default countries not present in data"))
        .stderr(predicate::str::contains("Atlantis"));
}

#[test]
fn missing_data_file_is_fatal() {
    let out = tempfile::tempdir().unwrap();

    cmd()
        .args(["nonexistent_file.csv", "--headless", "--no-charts"])
        .arg("--out")
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Data file not found"));

    assert!(!out.path().join("country_series.json").exists());
}

#[test]
fn headless_without_data_fails() {
    cmd()
        .args(["--headless", "--no-charts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input file"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{ not json").unwrap();

    cmd()
        .arg(fixture())
        .args(["--headless", "--no-charts", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}
