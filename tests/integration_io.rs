//! Import → plan → export round trip through files.

mod common;

use std::fs;
use std::path::PathBuf;

use pick_plan::config::ExportConfig;
use pick_plan::io::export::{HEADER, export_csv, export_json};
use pick_plan::io::import::{read_capacity_file, read_demand_file};
use pick_plan::plan::PlanEngine;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pick-plan-io-{}-{name}", std::process::id()))
}

fn write_inputs(tag: &str) -> (PathBuf, PathBuf) {
    let demand_path = temp_path(&format!("{tag}-demand.csv"));
    let capacity_path = temp_path(&format!("{tag}-capacity.csv"));
    fs::write(
        &demand_path,
        "date;quantity\n\
         04.03.2024;120\n05.03.2024;80\n06.03.2024;100\n07.03.2024;90\n\
         08.03.2024;110\n09.03.2024;30\n10.03.2024;20\n11.03.2024;130\n",
    )
    .expect("write demand");
    fs::write(
        &capacity_path,
        "date;picking_capacity;packing_capacity;forecast_addition_pct\n\
         2024-03-04;500;500;0\n2024-03-05;500;500;10\n2024-03-06;500;500;0\n\
         2024-03-07;500;500;0\n2024-03-08;500;500;0\n2024-03-09;0;0;0\n\
         2024-03-10;0;0;0\n2024-03-11;500;500;0\n",
    )
    .expect("write capacity");
    (demand_path, capacity_path)
}

#[test]
fn files_round_trip_to_csv_plan() {
    let (demand_path, capacity_path) = write_inputs("csv");
    let demand = read_demand_file(&demand_path, b';').expect("demand import");
    let capacity = read_capacity_file(&capacity_path, b';').expect("capacity import");
    assert_eq!(demand.len(), 8);
    assert_eq!(capacity.len(), 8);

    let rows = PlanEngine::default().plan(&demand, &capacity).expect("plan");
    assert_eq!(rows[1].adjusted_demand, 88);
    assert_eq!(rows[7].cumulative_demand, 180);

    let out = temp_path("plan.csv");
    export_csv(&rows, &ExportConfig::default(), &out).expect("export");

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_path(&out)
        .expect("plan csv readable");
    let headers = rdr.headers().cloned().expect("header");
    assert_eq!(headers.len(), HEADER.len());

    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.expect("row")).collect();
    assert_eq!(records.len(), 8);
    for rec in &records {
        let final_qty: f64 = rec[12].replace(',', ".").parse().expect("decimal comma number");
        assert!(final_qty >= 0.0);
    }
    assert_eq!(&records[5][3], "false");

    for p in [demand_path, capacity_path, out] {
        let _ = fs::remove_file(p);
    }
}

#[test]
fn json_export_lists_every_day() {
    let (demand_path, capacity_path) = write_inputs("json");
    let demand = read_demand_file(&demand_path, b';').expect("demand import");
    let capacity = read_capacity_file(&capacity_path, b';').expect("capacity import");
    let rows = PlanEngine::default().plan(&demand, &capacity).expect("plan");

    let out = temp_path("plan.json");
    export_json(&rows, &out).expect("export");
    let text = fs::read_to_string(&out).expect("read back");
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    let records = value.as_array().expect("array");
    assert_eq!(records.len(), rows.len());
    assert_eq!(records[0]["is_working_day"], true);
    assert_eq!(records[0]["week_number"], 10);

    for p in [demand_path, capacity_path, out] {
        let _ = fs::remove_file(p);
    }
}
