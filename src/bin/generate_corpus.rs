//! Writes every built-in scenario plus `manifest.json` to an output directory
//!
//! Usage: generate-corpus [OUTPUT_DIR] [CONFIG.toml]
//!
//! Set `RUST_LOG=debug` to see per-segment offsets.

use anyhow::Context;
use corpus_forge::{generate_all, FileSink, GeneratorConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_OUTPUT_DIR: &str = "test_files";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let output_dir = args.next().unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());

    let config = match args.next() {
        Some(path) => GeneratorConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => GeneratorConfig::default(),
    };

    let sink = FileSink::create(&output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir))?;

    let manifest = generate_all(&config, &sink).context("corpus generation failed")?;

    for file in &manifest.files {
        tracing::info!(
            file = %file.name,
            size = file.size,
            entropy = %format!("{:.3}", file.entropy),
            "ground truth recorded"
        );
    }

    Ok(())
}
