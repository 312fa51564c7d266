//! Order-message parsing pipeline.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info};

use crate::error::{ExtractError, Result};
use crate::models::config::ExtractorConfig;
use crate::models::order::{OrderDraft, OrderDraftRaw, ParsedOrder};
use crate::order::rules::{
    AddressExtractor, CodExtractor, DeclaredValueExtractor, FieldExtractor, NameExtractor,
    PhoneExtractor, ProductExtractor, WeightExtractor,
};
use crate::order::Policy;

lazy_static! {
    // Leftover weight keywords swept from the residual once a weight was
    // consumed ("nặng" with its number gone is pure noise).
    static ref WEIGHT_KEYWORD_SWEEP: Regex =
        Regex::new(r"(?i)(?:khối lượng:|khối lượng|cân nặng|nặng|kl)").unwrap();
}

/// Order-message parser.
///
/// Stages run in a fixed order over one residual text: phone, COD,
/// declared value, name, product, weight, address. Every stage runs
/// unconditionally; a stage that finds nothing passes the residual through
/// untouched. The parser is immutable after construction and reusable
/// across calls.
pub struct OrderParser {
    policy: Policy,
    weight_prefix_guard: bool,
    max_input_len: Option<usize>,
    phone: PhoneExtractor,
    cod: CodExtractor,
    declared_value: DeclaredValueExtractor,
    name: NameExtractor,
    product: ProductExtractor,
    weight: WeightExtractor,
    address: AddressExtractor,
}

impl OrderParser {
    /// Create a parser with the `Basic` policy, no guard and no length cap.
    pub fn new() -> Self {
        Self::build(Policy::Basic, false, None)
    }

    fn build(policy: Policy, weight_prefix_guard: bool, max_input_len: Option<usize>) -> Self {
        Self {
            policy,
            weight_prefix_guard,
            max_input_len,
            phone: PhoneExtractor::new(policy),
            cod: CodExtractor::new(policy),
            declared_value: DeclaredValueExtractor::new(policy),
            name: NameExtractor::new(policy),
            product: ProductExtractor::new(policy),
            weight: WeightExtractor::new(policy).with_prefix_guard(weight_prefix_guard),
            address: AddressExtractor::new(policy),
        }
    }

    /// Set the extraction policy.
    pub fn with_policy(self, policy: Policy) -> Self {
        Self::build(policy, self.weight_prefix_guard, self.max_input_len)
    }

    /// Enable or disable the weight address-prefix guard.
    pub fn with_weight_prefix_guard(self, enabled: bool) -> Self {
        Self::build(self.policy, enabled, self.max_input_len)
    }

    /// Cap accepted input length; longer inputs are rejected before any
    /// pattern runs.
    pub fn with_max_input_len(self, max: usize) -> Self {
        Self::build(self.policy, self.weight_prefix_guard, Some(max))
    }

    /// Build a parser from a configuration value.
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::build(
            config.policy,
            config.weight_prefix_guard,
            config.max_input_len,
        )
    }

    /// Parse one message into the canonical record and its raw mirror.
    pub fn parse(&self, text: &str) -> Result<ParsedOrder> {
        if let Some(max) = self.max_input_len {
            let len = text.chars().count();
            if len > max {
                return Err(ExtractError::InputTooLong { len, max });
            }
        }
        Ok(self.run(text))
    }

    fn run(&self, text: &str) -> ParsedOrder {
        info!("parsing order message of {} characters", text.len());

        let mut order = OrderDraft::default();
        let mut raw = OrderDraftRaw::default();
        let mut residual = text.to_string();

        let out = self.phone.extract(&residual);
        if out.value.is_some() {
            order.phone = out.value;
            raw.phone = out.raw;
        }
        residual = out.residual;
        debug!("phone stage: {:?}", order.phone);

        let out = self.cod.extract(&residual);
        if out.value.is_some() {
            order.cod = out.value;
            residual = out.residual;
        }
        raw.cod = out.raw;
        debug!("cod stage: {:?}", order.cod);

        let out = self.declared_value.extract(&residual);
        if out.value.is_some() {
            order.value = out.value;
            residual = out.residual;
        }
        raw.value = out.raw;
        debug!("declared-value stage: {:?}", order.value);

        let out = self.name.extract(&residual);
        if out.value.is_some() {
            order.name = out.value;
            raw.name = out.raw;
        }
        residual = out.residual;
        debug!("name stage: {:?}", order.name);

        let out = self.product.extract(&residual);
        if out.value.is_some() {
            order.product = out.value;
            raw.product = out.raw;
        }
        residual = out.residual;
        debug!("product stage: {:?}", order.product);

        let out = self.weight.extract(&residual);
        if out.value.is_some() {
            order.weight = out.value;
            residual = WEIGHT_KEYWORD_SWEEP
                .replace_all(&out.residual, "")
                .trim()
                .to_string();
        }
        raw.weight = out.raw;
        debug!("weight stage: {:?}", order.weight);

        let out = self.address.extract(&residual);
        order.address = out.value;
        raw.address = out.raw;
        debug!("address stage: {:?}", order.address);

        ParsedOrder { order, raw }
    }
}

impl Default for OrderParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse one message with the default (`Basic`, uncapped) parser.
///
/// This is the pure never-fails surface: every field of the returned pair
/// is defined, possibly empty.
pub fn extract_order(text: &str) -> ParsedOrder {
    OrderParser::new().run(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_field_defined_on_empty_input() {
        let parsed = extract_order("");
        assert!(parsed.order.is_empty());
        assert_eq!(parsed.raw, OrderDraftRaw::default());
    }

    #[test]
    fn test_stages_share_residual() {
        let parsed = extract_order("sđt 0922.001.100 thu hộ 200k nặng 2kg");

        assert_eq!(parsed.order.phone.as_deref(), Some("0922001100"));
        assert_eq!(parsed.order.cod, Some(200_000));
        assert_eq!(parsed.order.weight, Some(2_000));
        assert_eq!(parsed.raw.cod.as_deref(), Some("200k"));
        assert_eq!(parsed.raw.weight.as_deref(), Some("2kg"));
    }

    #[test]
    fn test_cod_defers_to_declared_value() {
        let parsed = extract_order("hàng dễ vỡ, giá trị 500k");

        assert_eq!(parsed.order.cod, None);
        assert_eq!(parsed.order.value, Some(500_000));
    }

    #[test]
    fn test_input_length_cap() {
        let parser = OrderParser::new().with_max_input_len(10);
        let err = parser.parse("một tin nhắn quá dài cho giới hạn").unwrap_err();

        match err {
            ExtractError::InputTooLong { len, max } => {
                assert!(len > 10);
                assert_eq!(max, 10);
            }
        }

        assert!(parser.parse("ngắn").is_ok());
    }

    #[test]
    fn test_parser_reusable() {
        let parser = OrderParser::new();
        let a = parser.parse("thu hộ 200k").unwrap();
        let b = parser.parse("thu hộ 200k").unwrap();
        assert_eq!(a, b);
    }
}
