//! pick-plan entry point: CLI wiring, input assembly and plan export.

use std::process;

use pick_plan::capacity::overlay;
use pick_plan::cli::{self, CliOptions, OutputFormat};
use pick_plan::config::PlanConfig;
use pick_plan::demo::DemandGenerator;
use pick_plan::io::export::{export_csv, export_json};
use pick_plan::io::import::{read_capacity_file, read_demand_file};
use pick_plan::logging;
use pick_plan::plan::{CapacityRecord, DemandRecord, PlanEngine, PlanSummary};

/// Config source priority: `--config`, then `--preset`, then the standard preset.
fn load_config(cli: &CliOptions) -> PlanConfig {
    let loaded = if let Some(ref path) = cli.config {
        PlanConfig::from_toml_file(path)
    } else if let Some(ref name) = cli.preset {
        PlanConfig::from_preset(name)
    } else {
        Ok(PlanConfig::standard())
    };
    match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

fn load_demand(cli: &CliOptions, config: &PlanConfig) -> Vec<DemandRecord> {
    let Some(ref path) = cli.demand else {
        tracing::info!(
            start = %config.demo.start_date,
            days = config.demo.days,
            seed = config.demo.seed,
            "no demand file given, generating demo demand"
        );
        return DemandGenerator::new(&config.demo).generate();
    };
    match read_demand_file(path, cli.input_delimiter) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("error: {}: {e}", path.display());
            process::exit(1);
        }
    }
}

/// Capacity from file, the configured template propagated over the demand
/// range, or the file layered over that template with `--capacity-overlay`.
fn load_capacity(
    cli: &CliOptions,
    config: &PlanConfig,
    demand: &[DemandRecord],
) -> Vec<CapacityRecord> {
    let explicit = cli.capacity.as_ref().map(|path| {
        match read_capacity_file(path, cli.input_delimiter) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("error: {}: {e}", path.display());
                process::exit(1);
            }
        }
    });
    if !cli.capacity_overlay {
        if let Some(rows) = explicit {
            return rows;
        }
    }

    let propagated = match (demand.first(), demand.last()) {
        (Some(first), Some(last)) => {
            tracing::info!(
                start = %first.date,
                end = %last.date,
                "propagating capacity defaults"
            );
            config.capacity_defaults.propagate(first.date, last.date)
        }
        _ => Vec::new(),
    };
    match explicit {
        Some(rows) => {
            tracing::info!(explicit = rows.len(), "overlaying capacity file on defaults");
            overlay(propagated, &rows)
        }
        None => propagated,
    }
}

fn main() {
    logging::init();

    let cli = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(2);
        }
    };

    let config = load_config(&cli);
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let demand = load_demand(&cli, &config);
    let capacity = load_capacity(&cli, &config, &demand);

    let engine = PlanEngine::new(config.engine.clone());
    let rows = match engine.plan(&demand, &capacity) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    if !cli.quiet {
        for r in &rows {
            println!("{r}");
        }
    }

    let summary = PlanSummary::from_rows(&rows);
    tracing::info!(
        days = summary.days,
        working_days = summary.working_days,
        longest_closure = summary.longest_closure,
        "plan ready"
    );
    println!("\n{summary}");

    if let Some(ref path) = cli.plan_out {
        let written = match cli.format {
            OutputFormat::Csv => export_csv(&rows, &config.export, path),
            OutputFormat::Json => export_json(&rows, path),
        };
        if let Err(e) = written {
            eprintln!("error: failed to write plan: {e}");
            process::exit(1);
        }
        eprintln!("Plan written to {}", path.display());
    }
}
