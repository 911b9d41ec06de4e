use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const NOW: &str = "2024-03-13T17:42:31Z";

fn datemath() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("datemath"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn resolve_now_rounded_to_day() {
    datemath()
        .args(["resolve", "now+1d/d", "--now", NOW])
        .assert()
        .success()
        .stdout("2024-03-14T00:00:00Z\n");
}

#[test]
fn resolve_several_expressions() {
    datemath()
        .args(["resolve", "now/d", "2024.01.31||+1M", "2024.03.01||+1M/M", "--now", NOW])
        .assert()
        .success()
        .stdout("2024-03-13T00:00:00Z\n2024-02-29T00:00:00Z\n2024-04-01T00:00:00Z\n");
}

#[test]
fn resolve_in_zone_with_custom_format() {
    datemath()
        .args([
            "resolve",
            "01/03/2024||+1d",
            "--format",
            "dd/MM/yyyy",
            "--zone",
            "Europe/Berlin",
        ])
        .assert()
        .success()
        .stdout("2024-03-02T00:00:00+01:00\n");
}

#[test]
fn resolve_custom_now_token() {
    datemath()
        .args(["resolve", "NOW-1h/h", "--now-token", "NOW", "--now", NOW])
        .assert()
        .success()
        .stdout("2024-03-13T16:00:00Z\n");
}

#[test]
fn resolve_json_output() {
    let output = datemath()
        .args(["--json", "resolve", "now/M", "--now", NOW])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["expression"], "now/M");
    assert_eq!(value["instant"], "2024-03-01T00:00:00Z");
    assert_eq!(value["epoch_millis"], 1_709_251_200_000_i64);
    assert_eq!(value["zone"], "UTC");
}

#[test]
fn resolve_reports_bad_operator() {
    datemath()
        .args(["resolve", "now*1d", "--now", NOW])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to resolve 'now*1d'"))
        .stderr(predicate::str::contains("operator '*' not supported"));
}

#[test]
fn resolve_reports_unparsable_anchor() {
    datemath()
        .args(["resolve", "2024-03-01||+1d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY.MM.dd"));
}

#[test]
fn resolve_rejects_unknown_zone() {
    datemath()
        .args(["resolve", "now", "--zone", "Nowhere/Special"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown time zone"));
}

#[test]
fn analyze_day_pattern() {
    datemath()
        .args(["analyze", "YYYY.MM.dd"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lowest:  d (DayOfMonth, Days)"))
        .stdout(predicate::str::contains("symbols: d M Y"));
}

#[test]
fn analyze_json_output() {
    let output = datemath()
        .args(["analyze", "'logs-'yyyy.MM", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["lowest"]["letter"], "M");
    assert_eq!(value["lowest"]["symbol"], "MonthOfYear");
    assert_eq!(value["lowest"]["unit"], "Months");
    assert_eq!(value["symbols"].as_array().unwrap().len(), 2);
}

#[test]
fn analyze_rejects_unanchored_day() {
    datemath()
        .args(["analyze", "MM.dd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not have all of its dependencies"));
}

#[test]
fn patterns_between_rfc3339_instants() {
    datemath()
        .args([
            "patterns",
            "'logs-'yyyy.MM.dd",
            "--start",
            "2024-02-27T08:00:00Z",
            "--end",
            "2024-03-01T12:00:00Z",
        ])
        .assert()
        .success()
        .stdout("logs-2024.02.27\nlogs-2024.02.28\nlogs-2024.02.29\nlogs-2024.03.01\n");
}

#[test]
fn patterns_between_date_math_bounds() {
    datemath()
        .args([
            "--json",
            "patterns",
            "yyyy.MM",
            "--start",
            "now-2M",
            "--end",
            "now",
            "--now",
            NOW,
        ])
        .assert()
        .success()
        .stdout("[\"2024.01\",\"2024.02\",\"2024.03\"]\n");
}

#[test]
fn patterns_empty_when_start_after_end() {
    datemath()
        .args(["patterns", "yyyy.MM.dd", "--start", "now", "--end", "now-1d", "--now", NOW])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn patterns_reports_bad_bound() {
    datemath()
        .args(["patterns", "yyyy.MM.dd", "--start", "yesterday", "--end", "now"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --start"));
}
