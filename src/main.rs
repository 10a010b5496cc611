use anyhow::Context;
use clap::{Parser, Subcommand};
use neuropod_config::{RawTensorSpec, canonicalize, read_config_file, read_neuropod_config};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "neuropod-config")]
#[command(about = "Validate, inspect and write neuropod package configs", long_about = None)]
struct Cli {
    /// Log filter, e.g. "debug" or "neuropod_config=debug". Overrides RUST_LOG.
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read and validate the config of a neuropod package, then print it.
    Show {
        /// Package directory containing config.json.
        dir: PathBuf,
    },

    /// Validate a standalone config document.
    Validate {
        file: PathBuf,
    },

    /// Write config.json into a package directory.
    Write {
        /// Package directory.
        dir: PathBuf,

        #[arg(long)]
        name: String,

        /// Model type (python, torchscript, tensorflow, ...).
        #[arg(long)]
        platform: String,

        /// JSON file holding a list of {name, dtype, shape} items.
        #[arg(long)]
        input_spec: PathBuf,

        /// JSON file holding a list of {name, dtype, shape} items.
        #[arg(long)]
        output_spec: PathBuf,
    },

    /// Print the canonical name of each dtype alias.
    Canonicalize {
        #[arg(required = true)]
        dtypes: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log.as_deref());

    match cli.cmd {
        Commands::Show { dir } => {
            let config = read_neuropod_config(&dir)
                .with_context(|| format!("load neuropod config from {}", dir.display()))?;
            println!("{}", String::from_utf8_lossy(&config.to_pretty_json()?));
        }
        Commands::Validate { file } => {
            read_config_file(&file)
                .with_context(|| format!("validate {}", file.display()))?;
            println!("ok");
        }
        Commands::Write {
            dir,
            name,
            platform,
            input_spec,
            output_spec,
        } => {
            let inputs = load_spec_file(&input_spec)?;
            let outputs = load_spec_file(&output_spec)?;
            neuropod_config::write_neuropod_config(&dir, name, platform, &inputs, &outputs)
                .with_context(|| format!("write neuropod config into {}", dir.display()))?;
            println!("Wrote {}", neuropod_config::serialize::config_path(&dir).display());
        }
        Commands::Canonicalize { dtypes } => {
            for dtype in &dtypes {
                println!("{}\t{}", dtype, canonicalize(dtype)?);
            }
        }
    }

    Ok(())
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_spec_file(path: &Path) -> Result<Vec<RawTensorSpec>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read spec file {}", path.display()))?;
    let spec = serde_json::from_str(&text)
        .with_context(|| format!("parse spec file {}", path.display()))?;
    Ok(spec)
}
