//! pdf-sections CLI - rank the sections of a folder of PDFs

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_sections::rank::DEFAULT_EMBEDDING_MODEL;
use pdf_sections::{ErrorMode, JsonFormat, Pipeline, PipelineConfig};

#[derive(Parser)]
#[command(name = "pdf-sections")]
#[command(version)]
#[command(
    about = "Rebuild PDF outlines and rank their sections for an inferred persona",
    long_about = None
)]
struct Cli {
    /// Folder containing the input PDFs
    #[arg(long = "input_folder", value_name = "DIR")]
    input_folder: PathBuf,

    /// Path of the JSON file to write
    #[arg(long, value_name = "FILE")]
    output: PathBuf,

    /// Location of a PDF rasterizer (accepted for compatibility, unused)
    #[arg(long = "poppler_path", value_name = "DIR")]
    poppler_path: Option<PathBuf>,

    /// Number of sections to keep
    #[arg(long = "top_k", default_value_t = 10)]
    top_k: usize,

    /// Embedding model identifier
    #[arg(long, default_value = DEFAULT_EMBEDDING_MODEL)]
    model: String,

    /// Skip documents that fail to parse instead of aborting
    #[arg(long)]
    lenient: bool,

    /// Parse documents one at a time
    #[arg(long)]
    sequential: bool,

    /// Write compact JSON
    #[arg(long)]
    compact: bool,
}

impl Cli {
    fn config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::new()
            .with_embedding_model(self.model.as_str())
            .with_top_k(self.top_k)
            .with_parallel(!self.sequential);

        if let Some(path) = &self.poppler_path {
            config = config.with_rasterizer_path(path);
        }
        if self.lenient {
            config = config.with_error_mode(ErrorMode::Lenient);
        }
        if self.compact {
            config = config.with_json_format(JsonFormat::Compact);
        }
        config
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = cmd_run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    let config = cli.config();
    log::debug!("Resolved configuration: {:?}", config);

    pb.set_message(format!("Loading model {}...", cli.model));
    let pipeline = Pipeline::from_config(config)?;

    pb.set_message(format!("Processing {}...", cli.input_folder.display()));
    let record = pipeline.run(&cli.input_folder);
    pb.finish_and_clear();

    let Some(record) = record? else {
        println!("{}", "No sections found.".yellow());
        return Ok(());
    };

    pipeline.write(&record, &cli.output)?;

    println!("{} {}", "Persona:".cyan().bold(), record.metadata.persona);
    println!("{} {}", "Job:".cyan().bold(), record.metadata.job);
    println!(
        "{} {} ({} sections)",
        "Output saved to".green().bold(),
        cli.output.display(),
        record.extracted_sections.len()
    );

    Ok(())
}
