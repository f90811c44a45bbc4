//! perpetuum - compare two tabular datasets keyed by a line identifier

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use perpetuum_comparer::compare::{build_reports, Comparer, Reports};
use perpetuum_comparer::config::{Config, LogLevel, OutputFormat, DEFAULT_COMPARISON_NAME};
use perpetuum_comparer::error::ComparerError;
use perpetuum_comparer::export::export_report;
use perpetuum_comparer::logging::LogSink;
use perpetuum_comparer::output::{render_to_stdout, RenderContext};
use perpetuum_comparer::parser::load_dataset;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl From<CliLogLevel> for LogLevel {
    fn from(l: CliLogLevel) -> Self {
        match l {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
        }
    }
}

/// Compare a primary and a secondary dataset, structurally and by content
#[derive(Parser, Debug)]
#[command(name = "perpetuum")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Primary dataset to compare
    primary_file: PathBuf,

    /// Secondary dataset to compare
    secondary_file: PathBuf,

    /// Line identifier column (unique and not null)
    #[arg(short, long)]
    line_id: String,

    /// Comparison name, used in reports and export file names
    #[arg(short, long, default_value = DEFAULT_COMPARISON_NAME)]
    name: String,

    /// Show the detailed difference tables
    #[arg(short = 'd', long)]
    show_details: bool,

    /// Export the difference report as CSV into this directory
    #[arg(short, long)]
    export_path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// Logging level
    #[arg(long, value_enum, default_value = "error")]
    log_level: CliLogLevel,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::new(cli.primary_file, cli.secondary_file)
        .with_line_id(cli.line_id)
        .with_comparison_name(cli.name)
        .with_show_details(cli.show_details)
        .with_output_format(cli.format.into())
        .with_log_level(cli.log_level.into());
    if let Some(dir) = cli.export_path {
        config = config.with_export_dir(dir);
    }

    env_logger::Builder::from_default_env()
        .filter_level(config.log_level.to_level_filter())
        .init();

    // An unusable export destination is the one fatal condition
    if let Some(dir) = &config.export_dir {
        if !dir.is_dir() {
            return Err(ComparerError::ExportDirectory { path: dir.clone() })
                .context("cannot export the comparison report");
        }
    }

    let sink = LogSink::global();
    let primary = load_dataset(&config.primary_file, sink);
    let secondary = load_dataset(&config.secondary_file, sink);

    let comparer = Comparer::new(config.comparison_name.as_str(), config.line_id.as_str());
    let structural = match comparer.run_structure(&primary, &secondary) {
        Ok(result) => result,
        Err(e) => {
            println!("The comparison could not run: {} ❌", e);
            return Ok(());
        }
    };
    let (result, content_error) = if structural.content_compared() {
        match comparer.run_content(&structural, &primary, &secondary) {
            Ok(result) => (result, None),
            Err(e) => {
                sink.error(format_args!("Content comparison failed: {}", e));
                (structural, Some(e))
            }
        }
    } else {
        (structural, None)
    };

    let reports = if result.content_compared() && content_error.is_none() {
        build_reports(&primary, &secondary, &result)
    } else {
        Reports::default()
    };

    let ctx = RenderContext {
        result: &result,
        reports: &reports,
        primary_path: &config.primary_file,
        secondary_path: &config.secondary_file,
        show_details: config.show_details,
        content_error: content_error.as_ref(),
    };
    if let Err(e) = render_to_stdout(&ctx, config.output_format) {
        sink.error(format_args!("Failed to render the comparison: {:#}", e));
    }

    if let Some(dir) = &config.export_dir {
        if result.has_differences() {
            let written = export_report(&reports.export, dir, &config.comparison_name, sink)
                .context("cannot export the comparison report")?;
            if let (Some(path), OutputFormat::Terminal) = (written, config.output_format) {
                println!("Report exported to {}", path.display());
            }
        }
    }

    Ok(())
}
