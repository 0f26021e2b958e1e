//! `nfc-gen`: print factory-default images of NXP NFC tags
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::OptionExt;
use nexum_nfc_core::NfcDeviceData;
use nexum_nfc_generator::{GeneratorType, fill_data, fill_data_with_rng, get_name};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

mod config;
mod render;

use config::{OutputFormat, load_config};
use render::Dump;

#[derive(Parser)]
#[command(version, about = "Generate factory-default NFC tag images")]
struct Cli {
    /// Config file (defaults to ~/.nxm/nfc-gen.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug level output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available generators
    List,

    /// Generate a factory image and print it
    Generate {
        /// Generator identifier or display name, e.g. `ntag215` (falls back to the config)
        generator: Option<GeneratorType>,

        /// Seed the UID generator for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    debug!(?config, "config loaded");

    match cli.command {
        Commands::List => list_command(),
        Commands::Generate {
            generator,
            seed,
            format,
        } => {
            let generator = match generator {
                Some(generator) => generator,
                None => config
                    .generator
                    .as_deref()
                    .ok_or_eyre("no generator given and none configured")?
                    .parse()?,
            };
            let seed = seed.or(config.seed);
            let format = format.unwrap_or(config.format);
            generate_command(generator, seed, format);
        }
    }

    Ok(())
}

fn list_command() {
    println!("{:<22} {}", "ID".bold(), "NAME".bold());
    for generator in GeneratorType::ALL {
        println!("{:<22} {}", generator.id().cyan(), get_name(generator));
    }
}

fn generate_command(generator: GeneratorType, seed: Option<u64>, format: OutputFormat) {
    info!("Generating {}", get_name(generator));

    let mut data = NfcDeviceData::default();
    match seed {
        Some(seed) => fill_data_with_rng(generator, &mut data, &mut StdRng::seed_from_u64(seed)),
        None => fill_data(generator, &mut data),
    }

    print!("{}", Dump::new(&data, format));
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .init();
}

/// `RUST_LOG` directives on top of `level` as the default
fn env_filter(level: tracing::Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy()
}
