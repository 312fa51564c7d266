//! Parse command - extract fields from a single message.

use std::io::Read;

use clap::Args;
use console::style;
use tracing::debug;

use donhang_core::ParsedOrder;

use super::PolicyArg;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// The message text (reads stdin when omitted)
    message: Option<String>,

    /// Extraction policy
    #[arg(short, long, value_enum)]
    policy: Option<PolicyArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Include the raw matched substrings in the output
    #[arg(long)]
    raw: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let message = match args.message {
        Some(message) => message,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let parser = super::build_parser(config_path, args.policy)?;
    let parsed = parser.parse(&message)?;
    debug!("extracted {} byte message", message.len());

    match args.format {
        OutputFormat::Json => print_json(&parsed, args.raw)?,
        OutputFormat::Text => print_text(&parsed, args.raw),
    }

    Ok(())
}

fn print_json(parsed: &ParsedOrder, include_raw: bool) -> anyhow::Result<()> {
    let json = if include_raw {
        serde_json::to_string_pretty(parsed)?
    } else {
        serde_json::to_string_pretty(&parsed.order)?
    };
    println!("{json}");
    Ok(())
}

fn print_text(parsed: &ParsedOrder, include_raw: bool) {
    let order = &parsed.order;

    let line = |label: &str, value: Option<String>| {
        let value = value.unwrap_or_else(|| style("-").dim().to_string());
        println!("{:12} {}", style(label).bold(), value);
    };

    line("name", order.name.clone());
    line("phone", order.phone.clone());
    line("cod", order.cod.map(|v| format!("{v} đ")));
    line("value", order.value.map(|v| format!("{v} đ")));
    line("weight", order.weight.map(|v| format!("{v} g")));
    line("address", order.address.clone());
    line("product", order.product.clone());

    if include_raw {
        println!();
        println!("{}", style("raw matches").bold().underlined());
        let raw = &parsed.raw;
        line("name", raw.name.clone());
        line("phone", raw.phone.clone());
        line("cod", raw.cod.clone());
        line("value", raw.value.clone());
        line("weight", raw.weight.clone());
        line("address", raw.address.clone());
        line("product", raw.product.clone());
    }
}
