//! End-to-end tests driving the `burrows` binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run(args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_burrows"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn burrows");

    let mut stdin = child.stdin.take().expect("stdin not piped");
    stdin.write_all(input).expect("failed to write stdin");
    drop(stdin);

    child.wait_with_output().expect("failed to wait for burrows")
}

fn run_ok(args: &[&str], input: &[u8]) -> Vec<u8> {
    let output = run(args, input);
    assert!(
        output.status.success(),
        "burrows {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    output.stdout
}

#[test]
fn test_bwt_abra() {
    let out = run_ok(&["bwt", "-"], b"ABRACADABRA!");
    let mut expected = vec![0, 0, 0, 3];
    expected.extend_from_slice(b"ARD!RCAAAABB");
    assert_eq!(out, expected);

    assert_eq!(run_ok(&["bwt", "+"], &out), b"ABRACADABRA!");
}

#[test]
fn test_mtf_abra() {
    let out = run_ok(&["mtf", "-"], b"ABRACADABRA!");
    assert_eq!(
        out,
        [0x41, 0x42, 0x52, 0x02, 0x44, 0x01, 0x45, 0x01, 0x04, 0x04, 0x02, 0x26]
    );
    assert_eq!(run_ok(&["mtf", "+"], &out), b"ABRACADABRA!");
}

#[test]
fn test_huffman_abra() {
    let out = run_ok(&["huffman", "-"], b"ABRACADABRA!");
    assert_eq!(out.len(), 15);
    assert_eq!(run_ok(&["huffman", "+"], &out), b"ABRACADABRA!");
}

#[test]
fn test_stages_chain() {
    let input = b"it was the best of times, it was the worst of times".to_vec();

    let transformed = run_ok(&["bwt", "-"], &input);
    let ranked = run_ok(&["mtf", "-"], &transformed);
    let compressed = run_ok(&["huffman", "-"], &ranked);

    assert_eq!(run_ok(&["pipeline", "-"], &input), compressed);

    let ranked = run_ok(&["huffman", "+"], &compressed);
    let transformed = run_ok(&["mtf", "+"], &ranked);
    assert_eq!(run_ok(&["bwt", "+"], &transformed), input);
    assert_eq!(run_ok(&["pipeline", "+"], &compressed), input);
}

#[test]
fn test_pipeline_empty() {
    let compressed = run_ok(&["pipeline", "-"], b"");
    assert!(run_ok(&["pipeline", "+"], &compressed).is_empty());
}

#[test]
fn test_hexdump() {
    let out = run_ok(&["hexdump", "3"], b"foobar");
    assert_eq!(out, b"66 6f 6f\n62 61 72\n48 bits\n");

    let out = run_ok(&["hexdump"], b"");
    assert_eq!(out, b"\n0 bits\n");
}

#[test]
fn test_stats_json() {
    let out = run_ok(&["stats", "--json"], b"ABRACADABRA!");
    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["bytes"], 12);
    assert_eq!(report["distinct"], 6);
    assert_eq!(report["encoded_bits"], 28);
}

#[test]
fn test_stats_text() {
    let out = String::from_utf8(run_ok(&["stats"], b"aab")).unwrap();
    assert!(out.contains("3 bytes, 2 distinct"));
}

#[test]
fn test_invalid_mode_is_usage_error() {
    let output = run(&["bwt", "x"], b"");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("(forward)"));
}

#[test]
fn test_missing_mode_is_usage_error() {
    let output = run(&["huffman"], b"");
    assert!(!output.status.success());
}

#[test]
fn test_malformed_input_reports_error() {
    let output = run(&["huffman", "+"], &[0x80]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error: "));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let output = run(&["-vv", "mtf", "-"], b"abc");
    assert!(output.status.success());
    assert_eq!(output.stdout, [b'a', b'b', b'c']);
    assert!(String::from_utf8_lossy(&output.stderr).contains("mtf"));
}

#[test]
fn test_completions() {
    let out = String::from_utf8(run_ok(&["completions", "bash"], b"")).unwrap();
    assert!(out.contains("burrows"));
}
