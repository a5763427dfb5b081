use assert_cmd::prelude::*;
use assert_fs::prelude::*;

use predicates::prelude::*;
use predicates::str::contains;
use serial_test::serial;
use std::process::Command;

/// Helper to create a Command for the `motodex` binary running inside `dir`
fn motodex_cmd(dir: &assert_fs::TempDir) -> Command {
  let mut cmd = Command::cargo_bin("motodex").expect("binary exists");
  cmd.current_dir(dir.path());
  cmd.env("NO_COLOR", "1");
  cmd.env_remove("RUST_LOG");
  cmd
}

fn generate(dir: &assert_fs::TempDir) {
  motodex_cmd(dir).args(["generate", "--seed", "7"]).assert().success();
}

#[test]
#[serial]
fn test_generate_writes_default_file() {
  let temp = assert_fs::TempDir::new().unwrap();

  motodex_cmd(&temp)
    .args(["generate", "--seed", "7"])
    .assert()
    .success()
    .stdout(contains("Brand distribution").and(contains("GOGORO")))
    .stderr(contains("Generated 2000 entries"));

  temp.child("taiwan_specific_motorcycles.json").assert(predicate::path::exists());
  temp.close().unwrap();
}

#[test]
#[serial]
fn test_same_seed_same_file() {
  let temp = assert_fs::TempDir::new().unwrap();

  motodex_cmd(&temp).args(["generate", "--seed", "3", "--file", "a.json"]).assert().success();
  motodex_cmd(&temp).args(["generate", "--seed", "3", "--file", "b.json"]).assert().success();

  let a = std::fs::read_to_string(temp.path().join("a.json")).unwrap();
  let b = std::fs::read_to_string(temp.path().join("b.json")).unwrap();
  assert_eq!(a, b);
  temp.close().unwrap();
}

#[test]
#[serial]
fn test_validate_fresh_catalog_passes() {
  let temp = assert_fs::TempDir::new().unwrap();
  generate(&temp);

  motodex_cmd(&temp)
    .arg("validate")
    .assert()
    .success()
    .stdout(contains("PASSED").and(contains("100.0%")));

  temp.close().unwrap();
}

#[test]
#[serial]
fn test_validate_small_catalog_exits_two() {
  let temp = assert_fs::TempDir::new().unwrap();
  temp
    .child("motodex.json")
    .write_str(r#"{"generator": {"brands": [{"brand": "SYM", "count": 20}]}}"#)
    .unwrap();
  generate(&temp);

  motodex_cmd(&temp).arg("validate").assert().code(2).stdout(contains("FAILED"));
  temp.close().unwrap();
}

#[test]
#[serial]
fn test_query_filters_and_counts() {
  let temp = assert_fs::TempDir::new().unwrap();
  generate(&temp);

  motodex_cmd(&temp)
    .args(["query", "--brand", "gogoro", "--limit", "3"])
    .assert()
    .success()
    .stdout(contains("of 2000 records match").and(contains("Electric Motor")));

  motodex_cmd(&temp)
    .args(["query", "--brand", "gogoro", "--min-cc", "50"])
    .assert()
    .success()
    .stdout(contains("0 of 2000 records match"));

  temp.close().unwrap();
}

#[test]
#[serial]
fn test_query_by_category() {
  let temp = assert_fs::TempDir::new().unwrap();
  generate(&temp);

  motodex_cmd(&temp)
    .args(["query", "--category", "Electric", "--limit", "2000"])
    .assert()
    .success()
    .stdout(contains("Electric Motor").and(contains("cc - NT$").not()));

  motodex_cmd(&temp)
    .args(["query", "-c", "Heavy Bike", "--electric"])
    .assert()
    .success()
    .stdout(contains("0 of 2000 records match"));

  temp.close().unwrap();
}

#[test]
#[serial]
fn test_query_by_availability() {
  let temp = assert_fs::TempDir::new().unwrap();
  generate(&temp);

  // Model years from 2023 on are always on sale
  motodex_cmd(&temp)
    .args(["query", "--availability", "Discontinued", "--min-year", "2023"])
    .assert()
    .success()
    .stdout(contains("0 of 2000 records match"));

  motodex_cmd(&temp)
    .args(["query", "--availability", "Available", "--limit", "1"])
    .assert()
    .success()
    .stdout(contains("  • ").and(contains("... and")).and(contains("of 2000 records match")));

  temp.close().unwrap();
}

#[test]
#[serial]
fn test_report_sections() {
  let temp = assert_fs::TempDir::new().unwrap();
  generate(&temp);

  motodex_cmd(&temp)
    .arg("report")
    .assert()
    .success()
    .stdout(
      contains("Brand Distribution")
        .and(contains("Displacement Classes"))
        .and(contains("Example Queries"))
        .and(contains("Currently available models (2022+)"))
        .and(contains("Detailed Examples")),
    );

  temp.close().unwrap();
}

#[test]
#[serial]
fn test_missing_catalog_suggests_generate() {
  let temp = assert_fs::TempDir::new().unwrap();

  for command in ["report", "validate", "query"] {
    motodex_cmd(&temp)
      .arg(command)
      .assert()
      .success()
      .stderr(contains("not found").and(contains("motodex generate")));
  }

  temp.close().unwrap();
}

#[test]
#[serial]
fn test_malformed_catalog_reports_parse_error() {
  let temp = assert_fs::TempDir::new().unwrap();
  temp.child("broken.json").write_str("{\"motorcycles\": [").unwrap();

  motodex_cmd(&temp)
    .args(["report", "--file", "broken.json"])
    .assert()
    .failure()
    .stderr(contains("Malformed catalog document"));

  temp.close().unwrap();
}

#[test]
#[serial]
fn test_missing_config_file_is_an_error() {
  let temp = assert_fs::TempDir::new().unwrap();

  motodex_cmd(&temp)
    .args(["--config", "nope.json", "validate"])
    .assert()
    .failure()
    .stderr(contains("config file does not exist"));

  temp.close().unwrap();
}
