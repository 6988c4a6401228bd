use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use memo_pipeline::config::{Config, DataSourceConfig};
use memo_pipeline::logging;
use memo_pipeline::pipeline::{FailurePolicy, Pipeline, RunSummary};
use memo_pipeline::sink::{FsSink, MemorySink};
use memo_pipeline::source::{CsvFileSource, GSheetSource, RowSource};

#[derive(Parser)]
#[command(name = "memo_pipeline")]
#[command(about = "Builds memobuch digital objects from the project sheets")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load both sheets, link persons to events and write all digital objects
    Run {
        /// Abort on the first invalid row instead of skipping it
        #[arg(long)]
        strict: bool,
        /// Keep whatever a previous run left in the output directory
        #[arg(long)]
        keep_output: bool,
        /// Write digital objects here instead of the configured output root
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate the sheets and report what a run would do, writing nothing
    Check {
        /// Abort on the first invalid row instead of skipping it
        #[arg(long)]
        strict: bool,
    },
}

fn build_source(config: &Config) -> Result<Box<dyn RowSource>, Box<dyn std::error::Error>> {
    match &config.data_source {
        DataSourceConfig::Sheet {
            sheet_id,
            persons_sheet,
            events_sheet,
        } => Ok(Box::new(GSheetSource::new(
            sheet_id.clone(),
            persons_sheet.clone(),
            events_sheet.clone(),
        ))),
        DataSourceConfig::Csv {
            persons_path,
            events_path,
            delimiter,
        } => {
            if !delimiter.is_ascii() {
                return Err(format!("CSV delimiter '{delimiter}' is not ASCII").into());
            }
            Ok(Box::new(CsvFileSource::new(
                persons_path.clone(),
                events_path.clone(),
                *delimiter as u8,
            )))
        }
    }
}

fn policy_from_flag(strict: bool) -> FailurePolicy {
    if strict {
        FailurePolicy::Strict
    } else {
        FailurePolicy::SkipRow
    }
}

fn print_summary(summary: &RunSummary) {
    println!("\n📊 Pipeline results:");
    println!("   Persons loaded: {}", summary.persons_loaded);
    println!("   Events loaded: {}", summary.events_loaded);
    println!("   Objects written: {}", summary.objects_written);
    println!("   Objects failed: {}", summary.objects_failed);
    println!("   Link warnings: {}", summary.link_warnings);

    if !summary.row_errors.is_empty() {
        println!("\n⚠️  Skipped rows:");
        for error in &summary.row_errors {
            println!("   - {}", error);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    info!(
        "Loaded configuration for project '{}'",
        config.project.abbreviation
    );

    match cli.command {
        Commands::Run {
            strict,
            keep_output,
            output,
        } => {
            println!("🔄 Running memobuch pipeline...");

            let output_root = output.unwrap_or_else(|| config.output.root.clone());
            let source = build_source(&config)?;
            let sink = FsSink::new(output_root.clone());
            if !keep_output {
                sink.clear_root()?;
            }

            let pipeline = Pipeline::new(config.project.abbreviation.clone(), source, Arc::new(sink))
                .with_policy(policy_from_flag(strict));
            match pipeline.run() {
                Ok(summary) => {
                    println!(
                        "✅ Wrote {} digital object(s) to {}",
                        summary.objects_written,
                        output_root.display()
                    );
                    print_summary(&summary);
                }
                Err(e) => {
                    error!("Pipeline run failed: {}", e);
                    println!("❌ Pipeline run failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        Commands::Check { strict } => {
            println!("🔍 Checking sheet data...");

            let source = build_source(&config)?;
            let pipeline = Pipeline::new(
                config.project.abbreviation.clone(),
                source,
                Arc::new(MemorySink::new()),
            )
            .with_policy(policy_from_flag(strict));
            match pipeline.check() {
                Ok(summary) => {
                    if summary.rows_skipped == 0 && summary.link_warnings == 0 {
                        println!("✅ All rows valid");
                    }
                    print_summary(&summary);
                }
                Err(e) => {
                    error!("Check failed: {}", e);
                    println!("❌ Check failed: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}
