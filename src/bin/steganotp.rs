//! # steganotp Binary Entry Point
//!
//! Thin wrapper around the library: reads files, runs the encoder or decoder
//! and writes the result.
//!
//! ## Usage
//!
//! ```bash
//! steganotp capacity cover.png
//! steganotp encode --key cover.png --data secret.txt --output lock.png
//! steganotp decode --lock lock.png --key cover.png --output secret.txt
//! ```
//!
//! An optional `--config steganotp.toml` sets the worker thread count and
//! the log level.

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::{error, info, LevelFilter};
use std::io::Write;
use std::path::PathBuf;

use steganotp::common::config::{load_config, StegoConfig};
use steganotp::common::io::{file_to_bytes, open_image, save_image};
use steganotp::{decode, decode_exact, encode, image_capacity};

/// Command-line arguments for the steganotp binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log at debug level regardless of the configuration
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print how many bytes an image can hide
    Capacity {
        /// Cover image (PNG)
        image: PathBuf,

        /// Print a JSON report instead of a bare number
        #[arg(long)]
        json: bool,
    },

    /// Hide a file inside a cover image
    Encode {
        /// Cover image (PNG); keep it, it is needed to decode
        #[arg(short, long)]
        key: PathBuf,

        /// File whose bytes are hidden
        #[arg(short, long)]
        data: PathBuf,

        /// Where to write the lock image (always PNG)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Recover hidden bytes from a lock image and its key
    Decode {
        /// Lock image produced by `encode`
        #[arg(short, long)]
        lock: PathBuf,

        /// Original cover image
        #[arg(short, long)]
        key: PathBuf,

        /// Where to write the payload; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exact payload length, keeps trailing zero bytes
        #[arg(long)]
        length: Option<usize>,
    },
}

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// Format: `[HH:MM:SS] [LEVEL] message`
fn init_logger(level: LevelFilter) {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .init();
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Capacity { image, json } => {
            let cover = open_image(&image)?;
            let (width, height) = cover.dimensions();
            let capacity = image_capacity(&cover);

            if json {
                let report = serde_json::json!({
                    "image": image.display().to_string(),
                    "width": width,
                    "height": height,
                    "capacity": capacity,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", capacity);
            }
        }

        Command::Encode { key, data, output } => {
            let cover = open_image(&key)?;
            let payload = file_to_bytes(&data)?;
            info!(
                "Hiding {} bytes from {} in {}",
                payload.len(),
                data.display(),
                key.display()
            );

            let lock = encode(&cover, &payload)
                .with_context(|| format!("encoding {} into {}", data.display(), key.display()))?;
            save_image(&lock, &output)?;
            info!("Lock image written to {}", output.display());
        }

        Command::Decode {
            lock,
            key,
            output,
            length,
        } => {
            let lock_image = open_image(&lock)?;
            let key_image = open_image(&key)?;

            let payload = match length {
                Some(len) => decode_exact(&lock_image, &key_image, len),
                None => decode(&lock_image, &key_image),
            }
            .with_context(|| format!("decoding {} with key {}", lock.display(), key.display()))?;
            info!("Recovered {} bytes", payload.len());

            match output {
                Some(path) => {
                    std::fs::write(&path, &payload)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!("Payload written to {}", path.display());
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&payload)?;
                    stdout.flush()?;
                }
            }
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration, falling back to defaults without a file
    let config: StegoConfig = match &args.config {
        Some(path) => load_config(path)?,
        None => StegoConfig::default(),
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        config.logging.level_filter()?
    };
    init_logger(level);

    if config.processing.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.processing.threads)
            .build_global()?;
        info!("Using {} worker threads", config.processing.threads);
    }

    if let Err(e) = run(args.command) {
        error!("{:#}", e);
        return Err(e);
    }

    Ok(())
}
