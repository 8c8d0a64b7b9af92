//! End-to-end runs of the depgraph binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use indoc::indoc;

const SAMPLE: &str = indoc! {r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <dependencies>
        <package confirmed="yes">
            <name>a</name>
            <class confirmed="yes">
                <name>a.A</name>
                <feature confirmed="yes">
                    <name>a.A.a</name>
                    <outbound type="feature" confirmed="no">b.B.b</outbound>
                </feature>
            </class>
        </package>
    </dependencies>
"#};

fn depgraph() -> Command {
    Command::cargo_bin("depgraph").expect("binary builds")
}

fn write_sample(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("graph.xml");
    fs::write(&path, SAMPLE).expect("fixture written");
    path
}

fn stdout_of(assert: assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

fn stderr_of(assert: assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}

#[test]
fn metrics_reports_counts() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir);

    let assert = depgraph().arg("metrics").arg(&path).assert().success();
    let stdout = stdout_of(assert);
    assert!(stdout.contains("packages: 2 (1 confirmed)"), "{stdout}");
    assert!(stdout.contains("features: 2 (1 confirmed)"), "{stdout}");
}

#[test]
fn closure_follows_outbound_edges() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir);

    let assert = depgraph()
        .arg("closure")
        .arg(&path)
        .args(["--start", "a\\.A\\.a", "--outbound-depth", "1"])
        .assert()
        .success();
    let stdout = stdout_of(assert);
    assert!(stdout.contains("feature a.A.a"), "{stdout}");
    assert!(stdout.contains("feature b.B.b"), "{stdout}");
}

#[test]
fn closure_without_depths_yields_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir);

    let assert = depgraph()
        .arg("closure")
        .arg(&path)
        .args(["--start", "a\\.A\\.a"])
        .assert()
        .success();
    assert!(stdout_of(assert).trim().is_empty());
}

#[test]
fn minimize_writes_the_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir);
    let out = dir.path().join("minimized.xml");

    depgraph()
        .arg("minimize")
        .arg(&path)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("<?xml"));
    assert!(written.contains("<name>a.A.a</name>"));
}

#[test]
fn missing_file_fails_with_context() {
    let assert = depgraph()
        .arg("metrics")
        .arg("no-such-file.xml")
        .assert()
        .failure();
    assert!(stderr_of(assert).contains("no-such-file.xml"));
}

#[test]
fn invalid_start_pattern_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir);

    let assert = depgraph()
        .arg("closure")
        .arg(&path)
        .args(["--start", "("])
        .assert()
        .failure();
    assert!(stderr_of(assert).contains("start pattern"));
}
