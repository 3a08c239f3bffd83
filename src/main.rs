//! Morphtable CLI
//!
//! Command-line interface for the Morphtable wavetable renderer.

use anyhow::{bail, Context};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};

use morphtable::cli::{commands, Cli, Commands};
use morphtable::config::WavetableConfig;
use morphtable::generators::GeneratorCatalog;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("Morphtable v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Morphtable v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    let catalog = GeneratorCatalog::with_defaults().context("failed to build generator catalog")?;

    match cmd {
        Commands::Generate {
            name,
            frames,
            rate,
            bits,
            output,
            frame_size,
            float,
            align_zero_crossing,
        } => {
            let config = WavetableConfig {
                frames,
                frame_size,
                sample_rate: rate,
                bit_depth: bits,
                output_dir: output,
                waveform_name: name,
                float_samples: float,
                align_zero_crossing,
            };
            if let Err(e) = commands::generate(&catalog, &config) {
                for hint in e.recovery_suggestions() {
                    info!("hint: {}", hint);
                }
                return Err(e).with_context(|| format!("could not render '{}'", config.waveform_name));
            }
        }
        Commands::List => commands::list(&catalog)?,
        Commands::Validate => {
            let failed = commands::validate(&catalog)?;
            if failed > 0 {
                bail!("{} generator(s) failed validation", failed);
            }
        }
        Commands::Batch { output, plan } => {
            let summary = commands::batch(&catalog, &output, plan.as_deref())?;
            if !summary.is_success() {
                bail!(
                    "{} of {} renders failed",
                    summary.failures.len(),
                    summary.attempted
                );
            }
        }
        Commands::Inspect { file, frame_size } => commands::inspect(&file, frame_size)
            .with_context(|| format!("could not inspect {}", file.display()))?,
        Commands::Clean { output } => {
            commands::clean(&output)?;
        }
    }

    Ok(())
}
