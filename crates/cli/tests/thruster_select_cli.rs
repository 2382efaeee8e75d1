use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn sample_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data/thrusters.json")
        .canonicalize()
        .expect("sample catalog present")
}

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("thruster_select").expect("thruster_select bin");
    cmd.env_remove("THRUSTER_CATALOG").env_remove("RUST_LOG");
    cmd
}

fn run_stdout(args: &[&str]) -> String {
    let output = cli()
        .arg("--catalog")
        .arg(sample_catalog())
        .args(args)
        .output()
        .expect("run thruster_select");
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout).expect("utf8 stdout")
}

#[test]
fn text_report_ranks_lightest_first() {
    let stdout = run_stdout(&["--dv", "500", "--power", "100", "--mass", "50"]);

    assert!(stdout.contains("--- MISSION ANALYSIS ---"));
    assert!(stdout.contains("Target Delta-V: 500 m/s | Satellite Dry Mass: 50 kg | Power Limit: 100 W"));
    assert!(stdout.contains("- The IFM Nano FEEP needs 0.641 kg of fuel."));
    assert!(stdout.contains(
        "  Calculation: 50 kg (Sat) + 0.9 kg (Thruster) + 0.641 kg (Fuel) = 51.54 kg"
    ));

    let table = stdout
        .split("--- RANKED RECOMMENDATIONS ---")
        .nth(1)
        .expect("ranked table");
    let rows: Vec<&str> = table.lines().skip(3).filter(|l| !l.is_empty()).collect();
    assert_eq!(rows.len(), 7);
    assert!(rows[0].starts_with("IFM Nano FEEP"));
    assert!(rows[0].ends_with("| 51.54"));
    assert!(rows[1].starts_with("NPT30-I2 Iodine Ion"));
    assert!(rows[6].starts_with("NANOPROP 3U Cold Gas"));
    assert!(!stdout.contains("BHT-200"));
    assert!(!stdout.contains("Legacy Resistojet"));
}

#[test]
fn json_report_lists_exclusions() {
    let stdout = run_stdout(&[
        "--dv", "2000", "--power", "10", "--mass", "100", "--format", "json",
    ]);
    let value: Value = serde_json::from_str(&stdout).expect("json report");

    let names: Vec<&str> = value["ranked"]
        .as_array()
        .expect("ranked array")
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        [
            "PPTCUP Pulsed Plasma",
            "MR-103G Monoprop",
            "NANOPROP 3U Cold Gas"
        ]
    );
    assert_eq!(value["ranked"][0]["fuel_kg"], 36.529);
    assert_eq!(value["ranked"][0]["total_mass_kg"], 136.81);

    let excluded = value["excluded"].as_array().expect("excluded array");
    assert_eq!(excluded.len(), 7);
    let legacy = excluded
        .iter()
        .find(|e| e["name"] == "Legacy Resistojet (retired)")
        .expect("legacy resistojet excluded");
    assert_eq!(legacy["reason"], "power_exceeded");
}

#[test]
fn zero_isp_entry_is_reported_as_infeasible() {
    let stdout = run_stdout(&[
        "--dv",
        "300",
        "--power",
        "50",
        "--mass",
        "20",
        "--show-excluded",
    ]);
    assert!(stdout.contains("--- EXCLUDED ---"));
    assert!(stdout.contains(
        "- Legacy Resistojet (retired): non-positive Isp (0 s) cannot deliver the maneuver"
    ));
    assert!(stdout.contains("- BHT-200 Hall Thruster: draws 200 W, above the 50 W limit"));
}

#[test]
fn zero_delta_v_needs_no_fuel() {
    let stdout = run_stdout(&["--dv", "0", "--power", "10", "--mass", "12"]);
    assert!(stdout.contains("- The PPTCUP Pulsed Plasma needs 0.000 kg of fuel."));
    assert!(stdout.contains(
        "  Calculation: 12 kg (Sat) + 0.28 kg (Thruster) + 0.000 kg (Fuel) = 12.28 kg"
    ));
}

#[test]
fn power_budget_below_every_thruster_prints_notice() {
    let stdout = run_stdout(&["--dv", "500", "--power", "1", "--mass", "50"]);
    assert!(stdout.contains("No feasible thrusters found for these constraints."));
    assert!(!stdout.contains("RANKED RECOMMENDATIONS"));
}

#[test]
fn missing_catalog_warns_and_reports_no_feasible_thruster() {
    let dir = tempfile::tempdir().expect("tempdir");
    cli()
        .current_dir(dir.path())
        .args(["--dv", "500", "--power", "100", "--mass", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No feasible thrusters found for these constraints.",
        ))
        .stderr(predicate::str::contains("thruster catalog unavailable"));
}

#[test]
fn catalog_path_can_come_from_environment() {
    cli()
        .env("THRUSTER_CATALOG", sample_catalog())
        .args(["--dv", "500", "--power", "100", "--mass", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("IFM Nano FEEP"));
}

#[test]
fn malformed_catalog_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("thrusters.json");
    fs::write(
        &path,
        r#"[{"name": "X", "type": "Ion", "power_W": "high", "isp_s": 900, "mass_kg": 1}]"#,
    )
    .expect("write catalog");

    cli()
        .arg("--catalog")
        .arg(&path)
        .args(["--dv", "500", "--power", "100", "--mass", "50"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to load thruster catalog"));
}

#[test]
fn non_numeric_arguments_are_rejected() {
    cli()
        .arg("--catalog")
        .arg(sample_catalog())
        .args(["--dv", "fast", "--power", "100", "--mass", "50"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("'fast' is not a number"));

    cli()
        .arg("--catalog")
        .arg(sample_catalog())
        .args(["--dv", "500", "--power", "inf", "--mass", "50"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("not a finite number"));
}

#[test]
fn missing_required_argument_is_rejected() {
    cli()
        .args(["--dv", "500", "--power", "100"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--mass"));
}

#[test]
fn negative_delta_v_is_accepted() {
    run_stdout(&["--dv", "-250", "--power", "100", "--mass", "50"]);
}

#[test]
fn csv_export_writes_to_output_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("reports/ranking.csv");

    cli()
        .arg("--catalog")
        .arg(sample_catalog())
        .args(["--dv", "2000", "--power", "10", "--mass", "100", "--format", "csv"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let contents = fs::read_to_string(&out).expect("csv output");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines[0],
        "name,type,power_w,thruster_mass_kg,fuel_kg,total_mass_kg"
    );
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("PPTCUP Pulsed Plasma,Pulsed Plasma,2.0,0.28,36.529,136.81"));
}
