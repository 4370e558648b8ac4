use assert_cmd::Command;
use serde_json::json;
use std::path::Path;

fn write_trace(dir: &Path, engine: &str) -> std::path::PathBuf {
    let path = dir.join("trace.json");
    let doc = json!({"traceEvents": [
        {"ph": "M", "name": "thread_name", "tid": 1, "args": {"name": engine}},
        {"ph": "B", "name": "add", "tid": 1, "id": 5, "cat": "Hardware event", "ts": 100},
        {"ph": "E", "name": "add", "tid": 1, "id": 5, "cat": "Hardware event", "ts": 150}
    ]});
    std::fs::write(&path, doc.to_string()).unwrap();
    path
}

#[test]
fn help_works() {
    Command::cargo_bin("trace-csv")
        .unwrap()
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn missing_filename_exits_with_one() {
    Command::cargo_bin("trace-csv")
        .unwrap()
        .assert()
        .code(1);
}

#[test]
fn non_json_filename_exits_with_one() {
    Command::cargo_bin("trace-csv")
        .unwrap()
        .arg("trace.txt")
        .assert()
        .code(1);
}

#[test]
fn missing_input_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("trace-csv")
        .unwrap()
        .arg(temp_dir.path().join("absent.json"))
        .assert()
        .failure();
}

#[test]
fn writes_default_output_path() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = write_trace(temp_dir.path(), "TPC0");

    Command::cargo_bin("trace-csv")
        .unwrap()
        .arg(&input)
        .assert()
        .success();

    let csv = std::fs::read_to_string(temp_dir.path().join("trace.csv")).unwrap();
    assert!(csv.ends_with("add,,1,50,50,50,50.0,50\r\n"));
}

#[test]
fn legacy_single_dash_flags() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = write_trace(temp_dir.path(), "DMA0");
    let output = temp_dir.path().join("dma.csv");

    // Default filter skips DMA engines: success, but no file
    Command::cargo_bin("trace-csv")
        .unwrap()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();
    assert!(!output.exists());

    Command::cargo_bin("trace-csv")
        .unwrap()
        .arg(&input)
        .args(["-o"])
        .arg(&output)
        .args(["-dma", "-group_by_name", "--log_level", "6"])
        .assert()
        .success();
    assert!(output.exists());
}

#[test]
fn stdout_flag_prints_report() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = write_trace(temp_dir.path(), "nic0");

    let out = Command::cargo_bin("trace-csv")
        .unwrap()
        .arg(&input)
        .args(["-include", "NIC", "--stdout"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let s = String::from_utf8(out).unwrap();

    assert!(s.starts_with("All measurements in microseconds (us)\r\n"));
    assert!(s.contains("ALL_NODES,-,-,-,-,-,-,50"));
}
