use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn dbferry() -> Command {
    Command::cargo_bin("dbferry").unwrap()
}

fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let backup_dir = dir.path().join("backups");
    fs::create_dir_all(&backup_dir).unwrap();

    let config_path = dir.path().join("config.toml");
    let text = format!(
        r#"
[database]
host = "localhost"
user = "postgres"
password = "pw"
dbname = "appdb"

[backup]
tables = ["events"]
time_column = "created_at"
dir = "{}"

[sftp]
host = "127.0.0.1"
port = 1
username = "u"
password = "pw"
remote_dir = "/srv"
fallback_path = "{}"
"#,
        backup_dir.display(),
        dir.path().join("failed/backup.tar.gz").display()
    );
    fs::write(&config_path, text).unwrap();
    config_path
}

#[test]
fn test_missing_config_is_a_clean_error() {
    let dir = TempDir::new().unwrap();
    dbferry()
        .args(["--config", dir.path().join("absent.toml").to_str().unwrap()])
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_init_writes_a_loadable_config() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");

    dbferry()
        .args(["--config", config_path.to_str().unwrap()])
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote sample config"));

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[database]"));
    assert!(content.contains("[sftp]"));
}

#[test]
fn test_init_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");

    dbferry()
        .args(["--config", config_path.to_str().unwrap()])
        .arg("init")
        .assert()
        .success();

    dbferry()
        .args(["--config", config_path.to_str().unwrap()])
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    dbferry()
        .args(["--config", config_path.to_str().unwrap()])
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_init_without_config_flag_uses_home_default() {
    let home = TempDir::new().unwrap();

    dbferry()
        .env("HOME", home.path())
        .arg("init")
        .assert()
        .success();

    assert!(home.path().join(".dbferry").join("config.toml").exists());
}

#[test]
fn test_status_on_empty_backup_dir() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir);

    dbferry()
        .args(["--config", config_path.to_str().unwrap()])
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Latest recorded backup: none"));
}

#[test]
fn test_status_reports_pending_days_without_deleting() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir);

    let today = chrono::Local::now().date_naive();
    let recorded = today - chrono::Duration::days(3);
    let archive = dir
        .path()
        .join("backups")
        .join(format!("backup_{}.tar.gz", recorded.format("%Y-%m-%d")));
    fs::write(&archive, b"x").unwrap();

    dbferry()
        .args(["--config", config_path.to_str().unwrap()])
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Latest recorded backup: {}",
            recorded
        )))
        .stdout(predicate::str::contains("Pending days:"));

    // status is read-only
    assert!(archive.exists());
}

#[test]
fn test_status_json_output() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir);

    let output = dbferry()
        .args(["--config", config_path.to_str().unwrap()])
        .args(["--format", "json"])
        .arg("status")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let status: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(status["latest_recorded"].is_null());
    assert!(status["pending_days"].is_array());
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir);
    let broken = fs::read_to_string(&config_path)
        .unwrap()
        .replace("tables = [\"events\"]", "tables = []");
    fs::write(&config_path, broken).unwrap();

    dbferry()
        .args(["--config", config_path.to_str().unwrap()])
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("backup.tables"));
}
