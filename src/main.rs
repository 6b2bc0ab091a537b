use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use warehouse_routing::config::Settings;
use warehouse_routing::labels::{self, layout};
use warehouse_routing::{Result, ToolError, aggregate, pipeline};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(cli.verbose).and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_directive = if verbose {
        "warehouse_routing=debug"
    } else {
        "warehouse_routing=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let generated_at = Local::now().naive_local();
    match cli.command {
        Command::Process(args) => execute_process(args, generated_at),
        Command::Labels(args) => execute_labels(args, generated_at),
        Command::Summary(args) => execute_summary(args, generated_at),
        Command::Run(args) => execute_run(args, generated_at),
    }
}

fn execute_process(args: SourceArgs, generated_at: NaiveDateTime) -> Result<()> {
    let settings = args.resolve_settings()?;
    let assigned = pipeline::load_and_assign(&settings)?;
    let path = pipeline::export_processed(&assigned, &settings.output_dir, generated_at)?;
    println!("{} subscribers assigned, saved to {}", assigned.len(), path.display());
    Ok(())
}

fn execute_labels(args: LabelArgs, generated_at: NaiveDateTime) -> Result<()> {
    let settings = args.sources.resolve_settings()?;
    let assigned = pipeline::load_and_assign(&settings)?;
    let records = labels::build_labels(&assigned, generated_at);

    let output = args.output.unwrap_or_else(|| {
        pipeline::default_output_path(
            &settings.output_dir,
            pipeline::LABELS_FILE_PREFIX,
            generated_at,
        )
    });
    pipeline::export_labels(&records, &output)?;

    if args.layout {
        let measure = layout::AverageGlyphMeasure {
            glyph_width: settings.labels.glyph_width,
        };
        let pages = layout::layout_pages(&records, &settings.labels, &measure);
        println!("{}", serde_json::to_string_pretty(&pages)?);
    } else {
        println!("{} labels exported to {}", records.len(), output.display());
    }
    Ok(())
}

fn execute_summary(args: SummaryArgs, generated_at: NaiveDateTime) -> Result<()> {
    let settings = args.sources.resolve_settings()?;
    let assigned = pipeline::load_and_assign(&settings)?;
    let summary = aggregate::summarize(&assigned);

    let output = args.output.unwrap_or_else(|| {
        pipeline::default_output_path(
            &settings.output_dir,
            pipeline::SUMMARY_FILE_PREFIX,
            generated_at,
        )
    });
    pipeline::export_summary(&summary, &output, generated_at)?;

    let rows = aggregate::report_rows(&summary);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Total Suppliers: {}", summary.len());
    println!("Total Items: {}", aggregate::total_items(&summary));
    for row in &rows {
        println!(
            "{:<24} {:>6} {:>7.2}%  {}",
            row.supplier_name, row.total_items, row.percentage, row.countries_served
        );
    }
    println!("Report saved to {}", output.display());
    Ok(())
}

fn execute_run(args: SourceArgs, generated_at: NaiveDateTime) -> Result<()> {
    let settings = args.resolve_settings()?;
    let outputs = pipeline::run_all(&settings, generated_at)?;
    println!("Processed data: {}", outputs.processed.display());
    println!("Carrier labels: {}", outputs.labels.display());
    println!("Summary report: {}", outputs.summary.display());
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Route subscribers to suppliers by country and produce labels and reports."
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assign suppliers and save the processed roster.
    Process(SourceArgs),
    /// Generate carrier labels and export them.
    Labels(LabelArgs),
    /// Build the per-supplier summary report.
    Summary(SummaryArgs),
    /// Produce the processed roster, labels, and summary in one pass.
    Run(SourceArgs),
}

#[derive(clap::Args)]
struct SourceArgs {
    /// TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Subscriber roster workbook.
    #[arg(long)]
    subscribers: Option<PathBuf>,

    /// Country routing guide workbook.
    #[arg(long)]
    routing: Option<PathBuf>,

    /// Directory receiving generated files.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[derive(clap::Args)]
struct LabelArgs {
    #[command(flatten)]
    sources: SourceArgs,

    /// Label workbook path; defaults to a timestamped file in the output directory.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the page layout as JSON.
    #[arg(long)]
    layout: bool,
}

#[derive(clap::Args)]
struct SummaryArgs {
    #[command(flatten)]
    sources: SourceArgs,

    /// Report workbook path; defaults to a timestamped file in the output directory.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the report rows as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

impl SourceArgs {
    fn resolve_settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) if !path.exists() => return Err(ToolError::SourceNotFound(path.clone())),
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        if let Some(path) = &self.subscribers {
            settings.sources.subscribers = path.clone();
        }
        if let Some(path) = &self.routing {
            settings.sources.routing = path.clone();
        }
        if let Some(dir) = &self.output_dir {
            settings.output_dir = dir.clone();
        }
        settings.validate()?;
        Ok(settings)
    }
}
