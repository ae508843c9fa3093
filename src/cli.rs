use std::env;
use std::path::PathBuf;

/// Plan export format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

pub struct CliOptions {
    pub demand: Option<PathBuf>,
    pub capacity: Option<PathBuf>,
    /// Layer the capacity file over propagated defaults.
    pub capacity_overlay: bool,
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub plan_out: Option<PathBuf>,
    pub format: OutputFormat,
    pub input_delimiter: u8,
    pub quiet: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut demand = None;
    let mut capacity = None;
    let mut config = None;
    let mut preset = None;
    let mut plan_out = None;
    let mut format = None;
    let mut input_delimiter = None;
    let mut capacity_overlay = false;
    let mut quiet = false;

    while i < args.len() {
        match args[i].as_str() {
            "--demand" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --demand (expected a file path)")?;
                if demand.replace(PathBuf::from(path)).is_some() {
                    return Err("--demand provided more than once".to_string());
                }
            }
            "--capacity" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --capacity (expected a file path)")?;
                if capacity.replace(PathBuf::from(path)).is_some() {
                    return Err("--capacity provided more than once".to_string());
                }
            }
            "--config" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --config (expected a TOML file path)",
                )?;
                if config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--plan-out" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --plan-out (expected a file path)")?;
                if plan_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--plan-out provided more than once".to_string());
                }
            }
            "--format" => {
                i += 1;
                let value = args.next_or_err(i, "missing value for --format (csv or json)")?;
                let parsed = match value {
                    "csv" => OutputFormat::Csv,
                    "json" => OutputFormat::Json,
                    other => {
                        return Err(format!("unknown format \"{other}\", expected csv or json"));
                    }
                };
                if format.replace(parsed).is_some() {
                    return Err("--format provided more than once".to_string());
                }
            }
            "--input-delimiter" => {
                i += 1;
                let value = args.next_or_err(
                    i,
                    "missing value for --input-delimiter (expected one ASCII character)",
                )?;
                let byte = match value.as_bytes() {
                    [b] if b.is_ascii() => *b,
                    _ => {
                        return Err(format!(
                            "invalid --input-delimiter \"{value}\", expected one ASCII character"
                        ));
                    }
                };
                if input_delimiter.replace(byte).is_some() {
                    return Err("--input-delimiter provided more than once".to_string());
                }
            }
            "--capacity-overlay" => capacity_overlay = true,
            "--quiet" | "-q" => quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if config.is_some() && preset.is_some() {
        return Err(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if capacity_overlay && capacity.is_none() {
        return Err("`--capacity-overlay` requires `--capacity`".to_string());
    }

    Ok(CliOptions {
        demand,
        capacity,
        capacity_overlay,
        config,
        preset,
        plan_out,
        format: format.unwrap_or_default(),
        input_delimiter: input_delimiter.unwrap_or(b';'),
        quiet,
    })
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("pick-plan: daily pick plan from a demand forecast and capacity calendar");
    eprintln!();
    eprintln!("Usage: pick-plan [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --demand <path>           Demand file (date;quantity). Demo data if omitted");
    eprintln!("  --capacity <path>         Capacity file. Propagated defaults if omitted");
    eprintln!("  --capacity-overlay        Apply the capacity file over propagated defaults");
    eprintln!("  --config <path>           Load configuration from a TOML file");
    eprintln!("  --preset <name>           Use a built-in preset (standard, lenient)");
    eprintln!("  --plan-out <path>         Write the plan to a file");
    eprintln!("  --format <csv|json>       Plan file format (default: csv)");
    eprintln!("  --input-delimiter <char>  Delimiter of input files (default: ;)");
    eprintln!("  --quiet, -q               Do not print the per-day plan");
    eprintln!("  --help, -h                Show this help message");
}
