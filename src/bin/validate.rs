//! Document validation CLI
//!
//! Validates a candidate JSON document against a named record shape and
//! prints either the normalized instance or every failed constraint.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pictiv_schemas::{SchemaConfig, SchemaError, ShapeRegistry};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-validate")]
#[command(about = "Validate a JSON document against a declared record shape")]
struct Cli {
    /// Shape name to validate against (e.g. "Booking")
    #[arg(short, long)]
    shape: String,

    /// Input JSON file (stdin when omitted)
    input: Option<PathBuf>,

    /// Path to a config file (schemas.toml)
    #[arg(short, long)]
    config: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = SchemaConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    let registry = ShapeRegistry::builtin()?.with_validation(config.validation);

    let text = match &cli.input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => std::io::read_to_string(std::io::stdin()).context("reading stdin")?,
    };
    let document: Value = serde_json::from_str(&text).context("parsing input as JSON")?;

    match registry.validate(&cli.shape, &document) {
        Ok(instance) => {
            println!("{}", serde_json::to_string_pretty(&instance)?);
            println!("✅ Valid {} document", cli.shape);
            Ok(true)
        }
        Err(SchemaError::Rejected { shape, failures }) => {
            println!("❌ Document rejected by shape {shape}:");
            for failure in &failures {
                println!("  └─ {failure}");
            }
            Ok(false)
        }
        Err(SchemaError::UnknownRecordShape { name, suggestion }) => {
            println!("❌ Unknown record shape: {name}");
            if let Some(suggestion) = suggestion {
                println!("   Did you mean {suggestion}?");
            }
            Ok(false)
        }
        Err(other) => Err(other.into()),
    }
}
