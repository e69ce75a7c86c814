//! CLI tool for generating presentation documents from slide content JSON.

use anyhow::{Context, Result};
use clap::Parser;
use deckgen_engine::{Assembler, IconStore, PexelsClient};
use std::fs;
use std::path::{Path, PathBuf};

/// Generate a presentation document from LLM-authored slide content.
#[derive(Parser, Debug)]
#[command(name = "deckgen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input JSON file: {"title": "...", "slides": [...]}
    input: PathBuf,

    /// Template identifier (basic, ion-boardroom, minimalist-sales-pitch,
    /// urban-monochrome)
    #[arg(short, long, default_value = "basic")]
    template: String,

    /// Output file (default: input path with a .deck.json extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory of PNG icon assets
    #[arg(long, default_value = "icons")]
    icons_dir: PathBuf,

    /// RNG seed for reproducible decoration choices
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    // A .env file may carry the photo search API key
    let _ = dotenvy::dotenv();

    if args.verbose {
        eprintln!("Processing: {}", args.input.display());
    }

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let content: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", args.input.display()))?;

    let mut assembler = Assembler::new().with_icon_store(IconStore::new(&args.icons_dir));
    if let Some(seed) = args.seed {
        assembler = assembler.with_seed(seed);
    }
    match PexelsClient::from_env() {
        Some(client) => assembler = assembler.with_photo_search(client),
        None => log::warn!("PEXELS_API_KEY not set; generating without photo decoration"),
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    let headers = assembler
        .generate(&content, &args.template, &output)
        .with_context(|| format!("Failed to generate deck from {}", args.input.display()))?;

    if args.verbose {
        eprintln!("  Generated {} content slides", headers.len() - 1);
        for header in &headers[1..] {
            eprintln!("    {header}");
        }
    }
    eprintln!("Written to: {}", output.display());

    Ok(())
}

/// Output path next to the input: content.json becomes content.deck.json.
fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("deck.json")
}
