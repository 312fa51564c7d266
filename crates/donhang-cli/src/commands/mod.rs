//! CLI subcommands.

pub mod batch;
pub mod parse;

use std::path::Path;

use donhang_core::{ExtractorConfig, OrderParser, Policy};

/// Policy flag shared by the subcommands.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum PolicyArg {
    Basic,
    Advanced,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Basic => Policy::Basic,
            PolicyArg::Advanced => Policy::Advanced,
        }
    }
}

/// Build a parser from the optional config file, with the policy flag
/// taking precedence over the file.
pub fn build_parser(
    config_path: Option<&str>,
    policy: Option<PolicyArg>,
) -> anyhow::Result<OrderParser> {
    let mut config = match config_path {
        Some(path) => ExtractorConfig::from_file(Path::new(path))?,
        None => ExtractorConfig::default(),
    };

    if let Some(policy) = policy {
        config.policy = policy.into();
    }

    Ok(OrderParser::from_config(&config))
}
