use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::Path;
use trace_csv::aggregator::{AggregatorConfig, GroupBy};
use trace_csv::commands::{execute_convert, ConvertArgs};

fn write_trace(dir: &Path, file_name: &str, doc: serde_json::Value) -> String {
    let path = dir.join(file_name);
    std::fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();
    path.display().to_string()
}

fn sample_trace() -> serde_json::Value {
    json!({"traceEvents": [
        {"ph": "M", "name": "process_name", "pid": 0, "args": {"name": "HPU"}},
        {"ph": "M", "name": "thread_name", "pid": 0, "tid": 1, "args": {"name": "TPC0"}},
        {"ph": "M", "name": "thread_name", "pid": 0, "tid": 2, "args": {"name": "MME0"}},
        {"ph": "B", "cat": "Hardware event", "name": "relu", "tid": 1, "id": 5, "ts": 100,
         "args": {"op": "0x5"}},
        {"ph": "E", "cat": "Hardware event", "name": "relu", "tid": 1, "id": 5, "ts": 150},
        {"ph": "B", "cat": "Hardware event", "name": "gemm, fused", "tid": 2, "id": 6, "ts": 120},
        {"ph": "E", "cat": "Hardware event", "name": "gemm, fused", "tid": 2, "id": 6, "ts": 140},
        {"ph": "B", "cat": "Hardware event", "name": "relu", "tid": 1, "id": 5, "ts": 200},
        {"ph": "E", "cat": "Hardware event", "name": "relu", "tid": 1, "id": 5, "ts": 220},
        {"ph": "B", "cat": "Hardware event", "name": "relu", "tid": 2, "id": 5, "ts": 300},
        {"ph": "E", "cat": "Hardware event", "name": "relu", "tid": 2, "id": 5, "ts": 301}
    ]})
}

#[test]
fn test_round_trip_csv() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = write_trace(
        temp_dir.path(),
        "scenario.json",
        json!({"traceEvents": [
            {"ph": "M", "name": "thread_name", "tid": 1, "args": {"name": "TPC0"}},
            {"ph": "B", "name": "", "tid": 1, "id": 5, "cat": "Hardware event", "ts": 100},
            {"ph": "E", "name": "", "tid": 1, "id": 5, "cat": "Hardware event", "ts": 150}
        ]}),
    );

    let written = execute_convert(ConvertArgs {
        input,
        ..Default::default()
    })
    .unwrap()
    .unwrap();

    assert_eq!(written, temp_dir.path().join("scenario.csv"));
    let csv = std::fs::read_to_string(written).unwrap();
    assert_eq!(
        csv,
        "All measurements in microseconds (us)\r\n\
         Node,Guid,Total count,Self time,Min,Max,Avg,Wall time\r\n\
         ALL_NODES,-,-,-,-,-,-,50\r\n\
         ,,1,50,50,50,50.0,50\r\n"
    );
}

#[test]
fn test_full_report_by_id() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = write_trace(temp_dir.path(), "run.json", sample_trace());
    let output = temp_dir.path().join("out/report.csv");

    execute_convert(ConvertArgs {
        input,
        output: Some(output.clone()),
        ..Default::default()
    })
    .unwrap();

    let csv = std::fs::read_to_string(output).unwrap();
    assert_eq!(
        csv,
        "All measurements in microseconds (us)\r\n\
         Node,Guid,Total count,Self time,Min,Max,Avg,Wall time\r\n\
         ALL_NODES,-,-,-,-,-,-,201\r\n\
         relu,0x5,3,71,1,50,23.667,201\r\n\
         \"gemm, fused\",,1,20,20,20,20.0,20\r\n"
    );
}

#[test]
fn test_float_timestamps_print_as_floats() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = write_trace(
        temp_dir.path(),
        "float.json",
        json!({"traceEvents": [
            {"ph": "M", "name": "thread_name", "tid": 1, "args": {"name": "TPC0"}},
            {"ph": "B", "name": "relu", "tid": 1, "id": "0x5", "cat": "Hardware event", "ts": 100.5},
            {"ph": "E", "name": "relu", "tid": 1, "id": "0x5", "cat": "Hardware event", "ts": 150.5}
        ]}),
    );

    let written = execute_convert(ConvertArgs {
        input,
        ..Default::default()
    })
    .unwrap()
    .unwrap();

    let csv = std::fs::read_to_string(written).unwrap();
    assert_eq!(
        csv,
        "All measurements in microseconds (us)\r\n\
         Node,Guid,Total count,Self time,Min,Max,Avg,Wall time\r\n\
         ALL_NODES,-,-,-,-,-,-,50.0\r\n\
         relu,,1,50.0,50.0,50.0,50.0,50.0\r\n"
    );
}

#[test]
fn test_full_report_by_name() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = write_trace(temp_dir.path(), "run.json", sample_trace());

    let written = execute_convert(ConvertArgs {
        input,
        config: AggregatorConfig::default().with_group_by(GroupBy::Name),
        ..Default::default()
    })
    .unwrap()
    .unwrap();

    let csv = std::fs::read_to_string(written).unwrap();
    let rows: Vec<&str> = csv.split("\r\n").skip(3).filter(|l| !l.is_empty()).collect();
    assert_eq!(
        rows,
        vec![
            "relu,0x5,3,71,1,50,23.667,201",
            "\"gemm, fused\",,1,20,20,20,20.0,20",
        ]
    );
}

#[test]
fn test_no_matching_events_writes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = write_trace(
        temp_dir.path(),
        "dma.json",
        json!({"traceEvents": [
            {"ph": "M", "name": "thread_name", "tid": 1, "args": {"name": "DMA0"}},
            {"ph": "B", "name": "", "tid": 1, "id": 5, "cat": "Hardware event", "ts": 100},
            {"ph": "E", "name": "", "tid": 1, "id": 5, "cat": "Hardware event", "ts": 150}
        ]}),
    );

    let written = execute_convert(ConvertArgs {
        input,
        ..Default::default()
    })
    .unwrap();

    assert!(written.is_none());
    assert!(!temp_dir.path().join("dma.csv").exists());
}

#[test]
fn test_empty_trace_writes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = write_trace(temp_dir.path(), "empty.json", json!({"traceEvents": []}));

    assert!(execute_convert(ConvertArgs {
        input,
        ..Default::default()
    })
    .unwrap()
    .is_none());
    assert!(!temp_dir.path().join("empty.csv").exists());
}

#[test]
fn test_malformed_input_writes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = write_trace(temp_dir.path(), "bad.json", json!({"events": []}));

    assert!(execute_convert(ConvertArgs {
        input,
        ..Default::default()
    })
    .is_err());
    assert!(!temp_dir.path().join("bad.csv").exists());
}

#[test]
fn test_output_is_idempotent() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = write_trace(temp_dir.path(), "run.json", sample_trace());
    let first = temp_dir.path().join("first.csv");
    let second = temp_dir.path().join("second.csv");

    for output in [&first, &second] {
        execute_convert(ConvertArgs {
            input: input.clone(),
            output: Some(output.clone()),
            ..Default::default()
        })
        .unwrap();
    }

    assert_eq!(
        std::fs::read(first).unwrap(),
        std::fs::read(second).unwrap()
    );
}
