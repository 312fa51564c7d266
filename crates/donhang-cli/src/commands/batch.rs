//! Batch command - extract fields from a file of messages.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{info, warn};

use donhang_core::ParsedOrder;

use super::PolicyArg;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input file, one message per line
    #[arg(required = true)]
    input: PathBuf,

    /// Extraction policy
    #[arg(short, long, value_enum)]
    policy: Option<PolicyArg>,

    /// Include the raw matched substrings in each record
    #[arg(long)]
    raw: bool,
}

#[derive(Serialize)]
struct BatchRecord<'a> {
    line: usize,
    #[serde(flatten)]
    parsed: &'a ParsedOrder,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("input file not found: {}", args.input.display());
    }

    let parser = super::build_parser(config_path, args.policy)?;
    let content = fs::read_to_string(&args.input)?;

    let mut parsed_count = 0usize;
    let mut skipped = 0usize;

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parser.parse(line) {
            Ok(parsed) => {
                let json = if args.raw {
                    serde_json::to_string(&BatchRecord {
                        line: index + 1,
                        parsed: &parsed,
                    })?
                } else {
                    serde_json::to_string(&parsed.order)?
                };
                println!("{json}");
                parsed_count += 1;
            }
            Err(err) => {
                warn!("line {}: {}", index + 1, err);
                skipped += 1;
            }
        }
    }

    info!("parsed {} messages, skipped {}", parsed_count, skipped);
    eprintln!(
        "{} {} parsed, {} skipped",
        style("done:").bold().green(),
        parsed_count,
        skipped
    );

    Ok(())
}
