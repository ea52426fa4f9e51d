//! mtpgen CLI - Command-line tool for MTP label printer project files.
//!
//! This is the main entry point for the mtpgen command-line application.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use mtpgen::prelude::*;

/// mtpgen - MTP label printer project generator
#[derive(Parser)]
#[command(name = "mtpgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an MTP container from a label list
    Generate {
        /// Label source (.csv, .tsv, .txt or .xlsx) with a `Labels` column
        #[arg(short, long, env = "MTPGEN_LABELS")]
        labels: PathBuf,

        /// Material definition asset to embed
        #[arg(short, long, env = "MTPGEN_MATERIAL")]
        material: PathBuf,

        /// Output file
        #[arg(short, long, conflicts_with = "output_dir")]
        output: Option<PathBuf>,

        /// Output directory (file named after `output_file_name`)
        #[arg(short = 'd', long)]
        output_dir: Option<PathBuf>,

        /// JSON configuration file
        #[arg(short, long, env = "MTPGEN_CONFIG")]
        config: Option<PathBuf>,

        /// Label slots per material sheet
        #[arg(long)]
        chunk_size: Option<usize>,
    },

    /// Extract the archive embedded in an MTP container
    Extract {
        /// MTP container
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the materials and labels stored in an MTP container
    Inspect {
        /// MTP container
        #[arg(short, long)]
        input: PathBuf,

        /// JSON configuration file
        #[arg(short, long, env = "MTPGEN_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            labels,
            material,
            output,
            output_dir,
            config,
            chunk_size,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(chunk_size) = chunk_size {
                config = config.with_chunk_size(chunk_size);
            }
            let output = output
                .or(output_dir)
                .unwrap_or_else(|| PathBuf::from("."));
            cmd_generate(&labels, &material, &output, &config)?;
        }
        Commands::Extract { input, output } => {
            cmd_extract(&input, &output)?;
        }
        Commands::Inspect { input, config } => {
            let config = load_config(config.as_deref())?;
            cmd_inspect(&input, &config)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => GeneratorConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(GeneratorConfig::default()),
    }
}

fn cmd_generate(labels: &Path, material: &Path, output: &Path, config: &GeneratorConfig) -> Result<()> {
    println!("Reading labels: {}", labels.display());

    let start = Instant::now();
    let report = generate_with_config(labels, material, output, config)
        .context("Failed to generate MTP container")?;

    println!(
        "Wrote {} labels on {} material sheets to {} in {:?}",
        report.labels,
        report.materials,
        report.output.display(),
        start.elapsed()
    );

    match &report.verification {
        Verification::Passed { entries } => {
            println!("Verified: {}", entries.join(", "));
        }
        Verification::Failed(reason) => {
            eprintln!("Warning: verification failed: {}", reason);
        }
    }

    Ok(())
}

fn cmd_extract(input: &Path, output: &Path) -> Result<()> {
    println!("Extracting {} -> {}", input.display(), output.display());

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let written = extract_mtp(input, output, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    })
    .context("Failed to extract MTP container")?;
    pb.set_position(written.len() as u64);
    pb.finish_with_message("Done");

    for path in &written {
        println!("  {}", path.display());
    }
    println!("Extracted {} entries in {:?}", written.len(), start.elapsed());

    Ok(())
}

fn cmd_inspect(input: &Path, config: &GeneratorConfig) -> Result<()> {
    let document = inspect_mtp(input, config).context("Failed to read MTP container")?;

    println!("Created:  {}", document.created);
    println!("Modified: {}", document.modified);
    println!("Copies:   {}", document.copy_count);
    println!("Root:     {}", document.logic_node.name);

    for (i, material) in document.materials.iter().enumerate() {
        println!("\nMaterial {} ({})", i + 1, material.profile.name);
        for label in &material.labels {
            if label.is_padding() {
                println!("  {:>3}  -", label.index);
            } else {
                println!("  {:>3}  {}", label.index, label.text);
            }
        }
    }

    println!(
        "\nTotal: {} labels in {} slots",
        document.label_texts().filter(|t| *t != mtpgen::project::PADDING_TEXT).count(),
        document.slot_count()
    );

    Ok(())
}
