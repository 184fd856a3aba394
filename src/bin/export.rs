//! Shape listing export CLI
//!
//! Dumps the declared record shapes in the form the database browser
//! consumes: native descriptors or draft-07 JSON Schemas.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use pictiv_schemas::{registry, OutputFormat, SchemaConfig};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-export")]
#[command(about = "Export the declared record shapes for the database browser")]
struct Cli {
    /// Path to a config file (schemas.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Payload form
    #[arg(short, long, value_enum, default_value = "descriptors")]
    format: Form,

    /// Compact JSON output
    #[arg(long)]
    compact: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Form {
    /// Native shape descriptors with listing metadata
    Descriptors,
    /// One draft-07 JSON Schema per shape
    JsonSchema,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SchemaConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    let registry = registry();

    let payload = match cli.format {
        Form::Descriptors => {
            let mut value = serde_json::to_value(registry.listing())?;
            if !config.export.include_checksum {
                if let Some(object) = value.as_object_mut() {
                    object.remove("checksum");
                }
            }
            value
        }
        Form::JsonSchema => {
            let schemas: serde_json::Map<String, Value> = registry
                .shapes()
                .iter()
                .map(|shape| (shape.name.clone(), shape.json_schema()))
                .collect();
            Value::Object(schemas)
        }
    };

    let compact = cli.compact || config.export.output_format == OutputFormat::Compact;
    let text = if compact {
        serde_json::to_string(&payload)?
    } else {
        serde_json::to_string_pretty(&payload)?
    };

    match cli.output {
        Some(path) => {
            fs::write(&path, &text).with_context(|| format!("writing {}", path.display()))?;
            println!("✅ Listing written to {:?}", path);
        }
        None => println!("{text}"),
    }

    Ok(())
}
