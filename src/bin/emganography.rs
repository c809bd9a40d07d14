// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Command-line front end.
//!
//! ```bash
//! emganography embed -i cover.png -o stego.png -m "hello"
//! emganography extract -i stego.png
//! emganography capacity -i cover.png
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;

use emganography::stego::config::{DEFAULT_DELTA, DEFAULT_MIN_GAP, DEFAULT_QUALITY};
use emganography::{EccScheme, EmbedConfig, EmbedOptions, OutputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Hide data in the luminance of PNG and JPEG images", long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Embed a message into a cover image
    #[command(group(ArgGroup::new("payload").required(true).args(["message", "file"])))]
    Embed {
        /// Cover image (PNG or JPEG)
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the stego image
        #[arg(short, long)]
        output: PathBuf,

        /// Message text
        #[arg(short, long)]
        message: Option<String>,

        /// Read the message from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Coefficient adjustment magnitude
        #[arg(long, default_value_t = DEFAULT_DELTA)]
        delta: f64,

        /// Minimum gap between the carrier coefficients
        #[arg(long, default_value_t = DEFAULT_MIN_GAP)]
        min_gap: f64,

        /// Output format (png or jpeg); defaults to the output extension, then the input format
        #[arg(long, value_parser = parse_format)]
        format: Option<OutputFormat>,

        /// JPEG quality (1-100)
        #[arg(long, default_value_t = DEFAULT_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: u8,
    },
    /// Extract a message from a stego image
    Extract {
        /// Stego image
        #[arg(short, long)]
        input: PathBuf,

        /// Write the message here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show how much an image can carry
    Capacity {
        /// Cover image
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn parse_format(name: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_name(name).ok_or_else(|| format!("unknown format '{name}', expected png or jpeg"))
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Format implied by the output path's extension, if recognised.
fn format_from_extension(path: &Path) -> Option<OutputFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(OutputFormat::from_name)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    match args.command {
        Command::Embed { input, output, message, file, delta, min_gap, format, quality } => {
            let payload = match (message, file) {
                (Some(text), None) => text.into_bytes(),
                (None, Some(path)) => std::fs::read(&path)
                    .with_context(|| format!("failed to read message file {}", path.display()))?,
                _ => bail!("exactly one of --message or --file is required"),
            };

            let options = EmbedOptions {
                config: EmbedConfig { ecc: EccScheme::default(), delta, min_gap },
                output_format: format.or_else(|| format_from_extension(&output)),
                quality,
            };
            emganography::embed_file(&input, &output, &payload, &options)
                .with_context(|| format!("failed to embed into {}", input.display()))?;
            log::info!("embedded {} bytes into {}", payload.len(), output.display());
        }
        Command::Extract { input, output } => {
            let payload = emganography::extract_file(&input)
                .with_context(|| format!("failed to extract from {}", input.display()))?;
            match output {
                Some(path) => std::fs::write(&path, &payload)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&payload)?;
                    stdout.flush()?;
                }
            }
        }
        Command::Capacity { input } => {
            let info = emganography::capacity_info_file(&input, EccScheme::default())
                .with_context(|| format!("failed to read {}", input.display()))?;
            println!("dimensions:        {}x{}", info.width, info.height);
            println!("blocks:            {}x{}", info.blocks_across, info.blocks_down);
            println!("capacity (bits):   {}", info.capacity_bits);
            println!("max payload bytes: {}", info.max_payload_bytes);
            println!("max UTF-8 chars:   {}", info.max_utf8_chars);
        }
    }

    Ok(())
}
