//! calldecode CLI — decode EVM function call data from the terminal.
//!
//! # Commands
//! ```text
//! calldecode decode   --data <hex> [--registry <file.json>] [--json]
//! calldecode batch    --file <payloads.txt> [--registry <file.json>]
//! calldecode types    --signature <sig>
//! calldecode selector --signature <sig>
//! calldecode registry [--registry <file.json>]
//! ```

use anyhow::{bail, Context, Result};
use calldecode_core::registry::selector_hex;
use calldecode_core::{
    extract_types, selector_of, CallDecoder, DecodedCall, MemorySelectorRegistry, TypeTree,
};
use calldecode_evm::{bundled, decode_batch, BatchSummary, EvmCallDecoder};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod logging;

use logging::{init_tracing, LogConfig};

#[derive(Parser)]
#[command(
    name = "calldecode",
    about = "EVM call-data decoder — resolve selectors and render arguments",
    long_about = "
calldecode: split the 4-byte selector off EVM call data, look it up in a
bundled table of DeFi and token signatures (optionally extended from a JSON
file), and render the ABI-decoded arguments as JSON-friendly values.

REGISTRY FILE FORMAT:
  { \"0xa9059cbb\": { \"name\": \"transfer\", \"signature\": \"transfer(address,uint256)\" } }

ENVIRONMENT VARIABLES:
  RUST_LOG    tracing filter, overrides --log-level
",
    version
)]
struct Cli {
    /// Global log level: trace | debug | info | warn | error
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Per-crate log level override, e.g. calldecode-evm=debug (repeatable)
    #[arg(long = "log-component", global = true, value_name = "CRATE=LEVEL")]
    log_components: Vec<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a single call-data payload
    Decode {
        /// Raw call data (hex, `0x` optional)
        #[arg(long)]
        data: String,
        /// JSON file of extra selectors, merged over the bundled table
        #[arg(long)]
        registry: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode one payload per line, emitting one JSON record per line
    Batch {
        /// File with one hex payload per line; blank lines are skipped
        #[arg(long)]
        file: PathBuf,
        /// JSON file of extra selectors, merged over the bundled table
        #[arg(long)]
        registry: Option<PathBuf>,
    },

    /// Show the top-level argument types of a signature and their structure
    Types {
        /// Function signature, e.g. "swap((address,address),bytes)"
        #[arg(long)]
        signature: String,
    },

    /// Compute the 4-byte selector of a signature
    Selector {
        /// Canonical function signature, e.g. "transfer(address,uint256)"
        #[arg(long)]
        signature: String,
    },

    /// List every known selector
    Registry {
        /// JSON file of extra selectors, merged over the bundled table
        #[arg(long)]
        registry: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_config = match log_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    };
    init_tracing(&log_config);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Decode { data, registry, json } => cmd_decode(&data, registry.as_deref(), json),
        Commands::Batch { file, registry } => cmd_batch(&file, registry.as_deref()),
        Commands::Types { signature } => cmd_types(&signature),
        Commands::Selector { signature } => cmd_selector(&signature),
        Commands::Registry { registry } => cmd_registry(registry.as_deref()),
    }
}

fn log_config(cli: &Cli) -> Result<LogConfig> {
    let mut config = LogConfig {
        level: cli.log_level.clone(),
        json: cli.log_json,
        ..LogConfig::default()
    };
    for entry in &cli.log_components {
        let (component, level) = entry
            .split_once('=')
            .with_context(|| format!("invalid --log-component '{entry}', expected CRATE=LEVEL"))?;
        config.components.insert(component.to_string(), level.to_string());
    }
    Ok(config)
}

// ─── Registry loading ────────────────────────────────────────────────────────

/// Bundled table, extended with the entries from `path` when given.
fn load_registry(path: Option<&Path>) -> Result<MemorySelectorRegistry> {
    let mut registry = bundled::build();
    if let Some(path) = path {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read registry file '{}'", path.display()))?;
        let added = registry
            .load_json(&json)
            .with_context(|| format!("load registry file '{}'", path.display()))?;
        tracing::info!(path = %path.display(), added, "registry file loaded");
    }
    Ok(registry)
}

fn decoder_for(path: Option<&Path>) -> Result<EvmCallDecoder> {
    match path {
        None => Ok(EvmCallDecoder::new()),
        Some(_) => Ok(EvmCallDecoder::with_registry(Arc::new(load_registry(path)?))),
    }
}

// ─── Command implementations ─────────────────────────────────────────────────

fn cmd_decode(data: &str, registry: Option<&Path>, as_json: bool) -> Result<()> {
    let decoder = decoder_for(registry)?;
    let call = decoder.decode_hex(data).context("decode call data")?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&call)?);
    } else {
        print_call(&call);
    }
    Ok(())
}

fn print_call(call: &DecodedCall) {
    println!("Selector:  {}", call.selector);
    if !call.known {
        println!("Status:    {}", call.error.as_deref().unwrap_or_default());
        return;
    }
    println!("Function:  {}", call.signature.as_deref().unwrap_or_default());
    let types = call.arg_types.as_deref().unwrap_or_default();
    if types.is_empty() {
        println!("Inputs:    (none)");
        return;
    }
    println!("Inputs:");
    for (i, (ty, val)) in types.iter().zip(call.args()).enumerate() {
        println!("  [{i}] {ty}: {val}");
    }
}

fn cmd_batch(file: &Path, registry: Option<&Path>) -> Result<()> {
    let decoder = decoder_for(registry)?;
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("read batch file '{}'", file.display()))?;
    let inputs: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let results = decode_batch(&decoder, &inputs);
    for (input, result) in inputs.iter().zip(&results) {
        let line = match result {
            Ok(call) => serde_json::to_string(call)?,
            Err(e) => serde_json::json!({ "input": input, "error": e.to_string() }).to_string(),
        };
        println!("{line}");
    }

    let summary = BatchSummary::from_results(&results);
    if summary.failed > 0 {
        tracing::warn!(failed = summary.failed, total = summary.total, "some payloads failed to decode");
    }
    Ok(())
}

fn cmd_types(signature: &str) -> Result<()> {
    for line in type_outline(signature)? {
        println!("{line}");
    }
    Ok(())
}

/// One header line per top-level argument, followed by the indented tree of
/// any composite type.
fn type_outline(signature: &str) -> Result<Vec<String>> {
    let types = extract_types(signature).context("extract argument types")?;
    if types.is_empty() {
        return Ok(vec!["(no arguments)".to_string()]);
    }

    let mut lines = Vec::new();
    for (i, ty) in types.iter().enumerate() {
        let tree: TypeTree = ty.parse().with_context(|| format!("parse argument {i} '{ty}'"))?;
        if tree.is_elementary() {
            lines.push(format!("[{i}] {ty}"));
            continue;
        }
        lines.push(format!("[{i}] {ty}  (depth {})", tree.depth()));
        outline_tree(&tree, 1, &mut lines);
    }
    Ok(lines)
}

fn outline_tree(tree: &TypeTree, indent: usize, lines: &mut Vec<String>) {
    let pad = "  ".repeat(indent);
    match tree {
        TypeTree::Elementary(name) => lines.push(format!("{pad}{name}")),
        TypeTree::Tuple(members) => {
            lines.push(format!("{pad}tuple ({} members)", members.len()));
            for m in members {
                outline_tree(m, indent + 1, lines);
            }
        }
        TypeTree::Array { elem, len } => {
            match len {
                Some(n) => lines.push(format!("{pad}array [{n}] of")),
                None => lines.push(format!("{pad}array [] of")),
            }
            outline_tree(elem, indent + 1, lines);
        }
    }
}

fn cmd_selector(signature: &str) -> Result<()> {
    let signature = signature.trim();
    if signature.is_empty() {
        bail!("empty signature");
    }
    extract_types(signature).context("validate signature")?;
    println!("{}", selector_hex(selector_of(signature)));
    Ok(())
}

fn cmd_registry(registry: Option<&Path>) -> Result<()> {
    let registry = load_registry(registry)?;
    let mut entries: Vec<_> = registry.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (selector, entry) in &entries {
        println!("{}  {}", selector_hex(**selector), entry.signature);
    }
    println!("\n{} selectors", entries.len());
    Ok(())
}
