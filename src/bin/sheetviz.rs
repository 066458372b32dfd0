use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sheetviz::{Client, ThemeMode, pipeline, storage};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "sheetviz",
    version,
    about = "Upload a spreadsheet for analysis and compose presentation-ready chart specs"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a spreadsheet, print the cleaning report, and optionally
    /// save composed chart specs.
    Analyze(AnalyzeArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ThemeOption {
    Light,
    Dark,
}

impl From<ThemeOption> for ThemeMode {
    fn from(t: ThemeOption) -> Self {
        match t {
            ThemeOption::Light => ThemeMode::Light,
            ThemeOption::Dark => ThemeMode::Dark,
        }
    }
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Spreadsheet to analyze (.xlsx or .xls, 10 MB soft limit).
    #[arg(short, long)]
    file: PathBuf,
    /// Analysis service endpoint.
    #[arg(long, default_value = sheetviz::api::DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Theme used when composing chart layouts.
    #[arg(long, value_enum, default_value_t = ThemeOption::Light)]
    theme: ThemeOption,
    /// Write composed chart specs to this JSON file. A directory gets a
    /// timestamped file name inside it.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Write the cleaning breakdown as CSV.
    #[arg(long)]
    report_csv: Option<PathBuf>,
    /// Print the raw analysis payload as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Analyze(args) => cmd_analyze(args),
    }
}

fn cmd_analyze(args: AnalyzeArgs) -> Result<()> {
    let client = Client::new(args.endpoint);
    let result = client.analyze(&args.file)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let report = &result.report;
        println!("Rows before cleaning: {}", report.rows_before);
        println!("Rows after cleaning:  {}", report.rows_after);
        println!(
            "Rows removed:         {} ({}%)",
            report.rows_removed(),
            report.removed_percent()
        );
        println!();
        for row in report.summary_rows() {
            println!("{:<20} {:>8} {:>6}%", row.label(), row.count, row.percent);
        }
        println!();
    }

    let charts = pipeline::present_all(&result, args.theme.into());
    if !args.json {
        for (title, presentation) in &charts {
            match presentation.spec() {
                Some(spec) => println!("chart '{title}': ready ({} traces)", spec.data.len()),
                None => println!("chart '{title}': no data"),
            }
        }
    }

    if let Some(out) = args.out.as_ref() {
        let path = resolve_out_path(out);
        storage::save_specs_json(&charts, &path)?;
        eprintln!("wrote chart specs to {}", path.display());
    }
    if let Some(path) = args.report_csv.as_ref() {
        storage::save_report_csv(&result.report, path)?;
        eprintln!("wrote cleaning report to {}", path.display());
    }

    Ok(())
}

/// `--out somedir/` picks a timestamped file name inside it.
fn resolve_out_path(out: &Path) -> PathBuf {
    if out.is_dir() {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        out.join(format!("sheetviz-{stamp}.json"))
    } else {
        out.to_path_buf()
    }
}
