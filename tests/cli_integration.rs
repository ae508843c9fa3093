//! Runs the `pick-plan` binary end to end.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pick-plan"))
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pick-plan-cli-{}-{name}", std::process::id()))
}

#[test]
fn demo_run_prints_summary() {
    let output = bin().arg("--quiet").output().expect("binary should run");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--- Plan Summary ---"));
    assert!(stdout.contains("Days planned:          28"));
}

#[test]
fn writes_plan_file_from_inputs() {
    let demand = temp_path("demand.csv");
    let capacity = temp_path("capacity.csv");
    let plan = temp_path("plan.csv");
    fs::write(&demand, "date;quantity\n2024-03-04;100\n2024-03-05;50\n").expect("write demand");
    fs::write(
        &capacity,
        "date;picking_capacity;packing_capacity\n2024-03-04;10;10\n2024-03-05;10;10\n",
    )
    .expect("write capacity");

    let output = bin()
        .args(["--demand", demand.to_str().unwrap_or_default()])
        .args(["--capacity", capacity.to_str().unwrap_or_default()])
        .args(["--plan-out", plan.to_str().unwrap_or_default()])
        .output()
        .expect("binary should run");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let written = fs::read_to_string(&plan).expect("plan file exists");
    // header + 2 days
    assert_eq!(written.lines().count(), 3);
    assert!(written.starts_with("date;iso_year;week_number"));

    for p in [demand, capacity, plan] {
        let _ = fs::remove_file(p);
    }
}

#[test]
fn engine_errors_exit_non_zero() {
    let demand = temp_path("bad-demand.csv");
    let capacity = temp_path("bad-capacity.csv");
    fs::write(&demand, "date;quantity\n2024-03-04;100\n").expect("write demand");
    fs::write(
        &capacity,
        "date;picking_capacity;packing_capacity;forecast_addition_pct\n2024-03-04;10;10;150\n",
    )
    .expect("write capacity");

    let output = bin()
        .args(["--demand", demand.to_str().unwrap_or_default()])
        .args(["--capacity", capacity.to_str().unwrap_or_default()])
        .output()
        .expect("binary should run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("forecast_addition_pct"));

    for p in [demand, capacity] {
        let _ = fs::remove_file(p);
    }
}

#[test]
fn unknown_preset_is_reported() {
    let output = bin()
        .args(["--preset", "nope"])
        .output()
        .expect("binary should run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown preset"));
}

#[test]
fn capacity_overlay_layers_file_over_defaults() {
    let demand = temp_path("overlay-demand.csv");
    let capacity = temp_path("overlay-capacity.csv");
    let mut lines = String::from("date;quantity\n");
    for d in 4..=10 {
        lines.push_str(&format!("2024-03-{d:02};100\n"));
    }
    fs::write(&demand, lines).expect("write demand");
    // Wednesday holiday, everything else from the template
    fs::write(
        &capacity,
        "date;picking_capacity;packing_capacity\n2024-03-06;0;0\n",
    )
    .expect("write capacity");

    let output = bin()
        .args(["--demand", demand.to_str().unwrap_or_default()])
        .args(["--capacity", capacity.to_str().unwrap_or_default()])
        .arg("--capacity-overlay")
        .arg("--quiet")
        .output()
        .expect("binary should run");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Days planned:          7"));
    assert!(stdout.contains("Working days:          4"));

    for p in [demand, capacity] {
        let _ = fs::remove_file(p);
    }
}
