//! Shipping-order field extraction module.

mod parser;
pub mod rules;

pub use parser::{extract_order, OrderParser};

use serde::{Deserialize, Serialize};

/// Extraction policy preset.
///
/// One pipeline serves both presets; the policy selects keyword lexicons,
/// cascade ordering and validation strictness per field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Conservative lexicons and ordering.
    #[default]
    Basic,
    /// Wider lexicons, filler-phrase filtering, earliest-phone preference.
    Advanced,
}
