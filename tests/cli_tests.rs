// tests/cli_tests.rs
use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_reformat_stdin_to_stdout() {
    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.arg("%a: %m")
        .write_stdin("I/Net ( 100): connected\n")
        .assert()
        .success()
        .stdout("Net: connected\n");
}

#[test]
fn test_default_format_applies() {
    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.write_stdin("12-28 18:54:07.180  1234  5678 W GCM     : dropped\n")
        .assert()
        .success()
        .stdout("12-28 18:54:07.180 W/GCM(1234): dropped\n");
}

#[test]
fn test_unparseable_lines_are_skipped_quietly() {
    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.arg("%a: %m")
        .write_stdin("--------- beginning of main\nI/Net ( 100): up\n")
        .assert()
        .success()
        .stdout("Net: up\n")
        .stderr("");
}

#[test]
fn test_debug_reports_parse_failures() {
    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.arg("--debug")
        .arg("%a: %m")
        .write_stdin("--------- beginning of main\n")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("no known logcat syntax"))
        .stderr(predicate::str::contains("lcfmt: lines read: 1"));
}

#[test]
fn test_csv_output_with_quoting() {
    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.arg("--to-csv")
        .arg("%p,%a,%m")
        .write_stdin("E/Net ( 321): a,b\n")
        .assert()
        .success()
        .stdout("E,Net,\"a,b\"\n");
}

#[test]
fn test_csv_default_is_all_fields() {
    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.arg("--to-csv")
        .write_stdin("E/Net ( 321): up\n")
        .assert()
        .success()
        .stdout(",321,,E,Net,up\n");
}

#[test]
fn test_color_wraps_output() {
    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.arg("--color")
        .arg("%m")
        .write_stdin("E/Net ( 321): boom\n")
        .assert()
        .success()
        .stdout("\u{1b}[31mboom\u{1b}[0m\n");
}

#[test]
fn test_color_override_per_level() {
    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.arg("--color")
        .arg("--color-e")
        .arg("magenta")
        .arg("%m")
        .write_stdin("E/Net ( 321): boom\n")
        .assert()
        .success()
        .stdout("\u{1b}[35mboom\u{1b}[0m\n");
}

#[test]
fn test_color_placeholders_in_format() {
    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.arg("--color")
        .arg("%{cyan}%a%{reset} %m")
        .write_stdin("I/Net ( 100): up\n")
        .assert()
        .success()
        .stdout("\u{1b}[32m\u{1b}[36mNet\u{1b}[0m up\u{1b}[0m\n");
}

#[test]
fn test_color_placeholders_stripped_without_color() {
    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.arg("%{cyan}%a%{reset} %m")
        .write_stdin("I/Net ( 100): up\n")
        .assert()
        .success()
        .stdout("Net up\n");
}

#[test]
fn test_unknown_format_field_fails_startup() {
    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.arg("%z %m")
        .write_stdin("I/Net ( 100): up\n")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("unknown field '%z'"));
}

#[test]
fn test_unknown_color_name_fails_startup() {
    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.arg("%{sparkly}%m")
        .write_stdin("I/Net ( 100): up\n")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("unknown color 'sparkly'"));
}

#[test]
fn test_trigger_command_count_mismatch_fails_startup() {
    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.arg("--on")
        .arg("ERROR")
        .arg("--on")
        .arg("WARN")
        .arg("--command")
        .arg("echo hit")
        .write_stdin("I/Net ( 100): up\n")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("does not match"));
}

#[test]
fn test_bad_trigger_pattern_fails_startup() {
    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.arg("--on")
        .arg("(")
        .arg("--command")
        .arg("echo hit")
        .write_stdin("I/Net ( 100): up\n")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("invalid trigger pattern"));
}

#[test]
fn test_input_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "W/Audio ( 22): underrun").unwrap();
    writeln!(file, "I/Audio ( 22): resumed").unwrap();

    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.arg("%p %m")
        .arg("-i")
        .arg(file.path())
        .assert()
        .success()
        .stdout("W underrun\nI resumed\n");
}

#[test]
fn test_missing_input_file_fails() {
    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.arg("-i")
        .arg("nonexistent_file.log")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open input file"));
}

#[test]
fn test_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let mut cmd = Command::cargo_bin("lcfmt").unwrap();
    cmd.arg("%a: %m")
        .arg("--output")
        .arg(&path)
        .write_stdin("I/Net ( 100): connected\n")
        .assert()
        .success()
        .stdout("");

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Net: connected\n");
}
