//! datasweep - Clean and convert tabular data files

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use datasweep::output::render_preview;
use datasweep::parser::ParserFactory;
use datasweep::transform::CleaningReport;
use datasweep::{process, ConvertOptions, Format};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Csv,
    Excel,
    Markdown,
    Html,
}

impl From<CliFormat> for Format {
    fn from(f: CliFormat) -> Self {
        match f {
            CliFormat::Csv => Format::Csv,
            CliFormat::Excel => Format::Xlsx,
            CliFormat::Markdown => Format::Markdown,
            CliFormat::Html => Format::Html,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Clean and convert tabular data files (CSV, Excel, HTML, Markdown)
#[derive(Parser, Debug)]
#[command(name = "datasweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overrides DATASWEEP_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clean files and write them in another format
    Convert(ConvertArgs),
    /// Show file details and a preview of the data
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Input files (.csv, .xlsx, .html, .htm, .md)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    to: CliFormat,

    /// Remove duplicate rows
    #[arg(long)]
    dedup: bool,

    /// Fill missing numeric values with the column mean
    #[arg(long)]
    fill: bool,

    /// Only fill these columns (comma-separated; implies --fill)
    #[arg(long, value_delimiter = ',')]
    fill_columns: Vec<String>,

    /// Column(s) to keep, in output order (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    keep: Vec<String>,

    /// Directory for converted files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Summary format
    #[arg(long, value_enum, default_value = "text")]
    report: ReportFormat,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Input files (.csv, .xlsx, .html, .htm, .md)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Number of rows to preview
    #[arg(short = 'n', long, default_value_t = 5)]
    rows: usize,
}

/// Outcome of one file in `convert`, as printed in the summary
#[derive(Debug, Serialize)]
struct FileSummary {
    file: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    columns: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<CleaningReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl FileSummary {
    fn failed(file: String, error: &anyhow::Error) -> Self {
        Self {
            file,
            ok: false,
            output: None,
            mime_type: None,
            rows: None,
            columns: None,
            report: None,
            error: Some(format!("{:#}", error)),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Convert(args) => run_convert(args),
        Command::Inspect(args) => run_inspect(args),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1), // At least one file failed
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("DATASWEEP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_convert(args: ConvertArgs) -> Result<bool> {
    let mut options = ConvertOptions::new(args.to.into())
        .with_remove_duplicates(args.dedup)
        .with_fill_missing(args.fill || !args.fill_columns.is_empty());
    if !args.fill_columns.is_empty() {
        options = options.with_fill_columns(args.fill_columns);
    }
    if !args.keep.is_empty() {
        options = options.with_keep_columns(args.keep);
    }

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create output directory: {}", args.out_dir.display()))?;
    let mut targets = OutputTargets::new(&args.out_dir, &args.files)?;

    let summaries: Vec<FileSummary> = args
        .files
        .iter()
        .map(|path| {
            let file = display_name(path);
            convert_one(path, &file, &options, &mut targets)
                .unwrap_or_else(|e| FileSummary::failed(file, &e))
        })
        .collect();

    match args.report {
        ReportFormat::Text => {
            for summary in &summaries {
                print_summary(summary);
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
    }

    Ok(summaries.iter().all(|s| s.ok))
}

/// Output paths claimed during one `convert` run.
///
/// A target may be written once, and never over one of the inputs.
struct OutputTargets {
    out_dir: PathBuf,
    resolved_dir: PathBuf,
    inputs: FxHashSet<PathBuf>,
    claimed: FxHashSet<PathBuf>,
}

impl OutputTargets {
    fn new(out_dir: &Path, inputs: &[PathBuf]) -> Result<Self> {
        let resolved_dir = fs::canonicalize(out_dir)
            .with_context(|| format!("Failed to resolve output directory: {}", out_dir.display()))?;
        Ok(Self {
            out_dir: out_dir.to_path_buf(),
            resolved_dir,
            inputs: inputs.iter().filter_map(|p| fs::canonicalize(p).ok()).collect(),
            claimed: FxHashSet::default(),
        })
    }

    fn claim(&mut self, file: &str, output_file_name: &str) -> Result<PathBuf> {
        let output_path = self.out_dir.join(output_file_name);
        let resolved = self.resolved_dir.join(output_file_name);

        if self.inputs.contains(&resolved) {
            bail!(
                "{}: refusing to overwrite input file {} (choose another --out-dir)",
                file,
                output_path.display()
            );
        }
        if !self.claimed.insert(resolved) {
            bail!(
                "{}: output {} was already written by an earlier file in this run",
                file,
                output_path.display()
            );
        }

        Ok(output_path)
    }
}

fn convert_one(path: &Path, file: &str, options: &ConvertOptions, targets: &mut OutputTargets) -> Result<FileSummary> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let conversion = process(&bytes, file, options)?;

    let output_path = targets.claim(file, &conversion.output_file_name)?;
    fs::write(&output_path, &conversion.output.bytes)
        .with_context(|| format!("Failed to write file: {}", output_path.display()))?;

    Ok(FileSummary {
        file: file.to_string(),
        ok: true,
        output: Some(output_path),
        mime_type: Some(conversion.output.mime_type),
        rows: Some(conversion.table.row_count()),
        columns: Some(conversion.table.column_count()),
        report: Some(conversion.report),
        error: None,
    })
}

fn print_summary(summary: &FileSummary) {
    if !summary.ok {
        eprintln!("✘ {}", summary.error.as_deref().unwrap_or("unknown error"));
        return;
    }

    let output = summary
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    println!(
        "✔ {} → {} ({} rows, {} columns)",
        summary.file,
        output,
        summary.rows.unwrap_or(0),
        summary.columns.unwrap_or(0)
    );

    if let Some(report) = &summary.report {
        if report.duplicates_removed > 0 {
            println!("    duplicates removed: {}", report.duplicates_removed);
        }
        for (column, count) in &report.filled {
            println!("    filled {} missing value(s) in {}", count, column);
        }
        for column in &report.mean_undefined {
            println!("    {}: no values to average, left unchanged", column);
        }
    }
}

fn run_inspect(args: InspectArgs) -> Result<bool> {
    let factory = ParserFactory::new();
    let mut all_ok = true;

    for path in &args.files {
        let file = display_name(path);
        if let Err(e) = inspect_one(&factory, path, &file, args.rows) {
            eprintln!("✘ {}: {:#}", file, e);
            all_ok = false;
        }
    }

    Ok(all_ok)
}

fn inspect_one(factory: &ParserFactory, path: &Path, file: &str, preview_rows: usize) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let format = Format::detect(file)?;
    let table = factory.parse(&bytes, format)?;

    println!("File Name: {}", file);
    println!("File Type: .{} ({})", format.extension(), format);
    println!("File Size: {:.2} KB", bytes.len() as f64 / 1024.0);
    println!("Rows: {}, Columns: {}", table.row_count(), table.column_count());
    println!();

    println!("Columns:");
    for column in &table.columns {
        println!("  {}: {}", column.name, column.inferred_type);
    }

    let numeric = table.numeric_column_names();
    if !numeric.is_empty() {
        let chart: Vec<_> = numeric.iter().take(2).copied().collect();
        println!("Chart columns: {}", chart.join(", "));
    }
    println!();

    println!("Preview (first {} rows):", preview_rows);
    println!("{}", render_preview(&table.head(preview_rows)));
    println!();

    Ok(())
}

/// File name used for format detection and output naming
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
