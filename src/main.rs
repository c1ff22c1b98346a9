use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use jsonb_rs::{DecoderOptions, Document};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Convert JSON documents to the jsonb binary format and back
#[derive(Parser, Debug)]
#[command(name = "jsonb", version, about)]
#[command(group(ArgGroup::new("mode").required(true).args(["binarize", "textify"])))]
struct Cli {
    /// Encode a JSON file to binary
    #[arg(short = 'b', long, num_args = 2, value_names = ["IN_JSON", "OUT_JSONB"])]
    binarize: Option<Vec<PathBuf>>,

    /// Decode a binary file back to JSON text
    #[arg(short = 't', long, num_args = 2, value_names = ["IN_JSONB", "OUT_JSON"])]
    textify: Option<Vec<PathBuf>>,

    /// Accept non-0/1 bool bytes and ignore trailing bytes when decoding
    #[arg(long)]
    lenient: bool,

    /// Maximum nesting of objects and arrays when decoding
    #[arg(long, default_value_t = 512)]
    max_depth: usize,
}

fn main() -> Result<()> {
    init_tracing();

    // Malformed invocations print usage and still exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            return Ok(());
        }
    };

    if let Some(paths) = &cli.binarize {
        binarize(&paths[0], &paths[1])?;
    } else if let Some(paths) = &cli.textify {
        let options = DecoderOptions {
            strict: !cli.lenient,
            max_depth: cli.max_depth,
        };
        textify(&paths[0], &paths[1], &options)?;
    }

    Ok(())
}

fn binarize(input: &Path, output: &Path) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let doc = Document::load_from_json(&text)
        .with_context(|| format!("Failed to parse JSON from {}", input.display()))?;

    fs::write(output, doc.to_binary())
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        bytes = doc.binary_size(),
        "binarized"
    );
    Ok(())
}

fn textify(input: &Path, output: &Path, options: &DecoderOptions) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let doc = Document::load_from_binary_with_options(&bytes, options)
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    let mut json = doc.to_json().context("Failed to print JSON")?;
    json.push('\n');
    fs::write(output, json).with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        bytes = bytes.len(),
        "textified"
    );
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: warn)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(filter),
        )
        .init();
}
