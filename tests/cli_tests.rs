#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains as str_contains;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("roster").expect("roster binary");
    cmd.write_stdin(script.to_string()).assert()
}

#[test]
fn cli_lists_holidays_for_a_year() {
    run_cli("holidays 2025\nquit\n")
        .success()
        .stdout(str_contains("2025-04-18"))
        .stdout(str_contains("Good Friday"))
        .stdout(str_contains("Corpus Christi"));
}

#[test]
fn cli_resolves_status_with_priority() {
    let script = "add ana 1,2,3,4,5 Ana Silva\n\
                  status ana 2025-12-25\n\
                  override ana 2025-12-25 Absent\n\
                  status ana 2025-12-25\n\
                  vacation ana 2025-12-22 2025-12-31\n\
                  status ana 2025-12-25\n\
                  quit\n";
    run_cli(script)
        .success()
        .stdout(str_contains("Ana Silva on 2025-12-25: Off (holiday)"))
        .stdout(str_contains("Ana Silva on 2025-12-25: Absent (override)"))
        .stdout(str_contains("Ana Silva on 2025-12-25: On Vacation (vacation)"));
}

#[test]
fn cli_reports_unknown_employee() {
    run_cli("status nobody 2025-01-02\nquit\n")
        .success()
        .stdout(str_contains("unknown employee 'nobody'"));
}

#[test]
fn cli_save_and_load_json_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let script = format!(
        "add rui 0,6 Rui\nsave {path}\nadd temp 1 Temp\nload {path}\nemployees\nquit\n"
    );
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Roster loaded from"));
    let after_reload = output.split("Roster loaded from").last().unwrap_or_default();
    assert!(after_reload.contains("rui"));
    assert!(
        !after_reload.contains("Temp"),
        "temporary employee should not appear after reload:\n{after_reload}"
    );
}

#[test]
fn cli_balance_counts_vacation_weekdays() {
    run_cli("add ana 1,2,3,4,5 Ana\nvacation ana 2025-06-09 2025-06-15\nbalance ana 2025\nquit\n")
        .success()
        .stdout(str_contains("2025: vacation used 5 of 22 (remaining 17)"));
}

#[test]
fn cli_month_grid_marks_holidays() {
    run_cli("add ana 1,2,3,4,5 Ana\nmonth 2025-12\nquit\n")
        .success()
        .stdout(str_contains("| ana "))
        .stdout(str_contains("W=Working H=Holiday"));
}

#[test]
fn cli_add_rejects_out_of_range_weekdays() {
    run_cli("add x 1,7 Xavier\nemployees\nquit\n")
        .success()
        .stdout(str_contains("Invalid weekday 7 (0=Sun .. 6=Sat)"))
        .stdout(str_contains("Added employee x.").not())
        .stdout(str_contains("Xavier").not());
}
