//! Weight extraction.

use regex::Regex;

use super::lexicon::{weight_keywords, weight_units};
use super::money::normalize_amount;
use super::{FieldExtractor, FieldOutcome};
use crate::order::rules::cascade::excise;
use crate::order::Policy;

/// Address-fragment abbreviations that can precede a number+unit pair
/// ("P. 3 kg..." is a ward, not three kilograms).
const ADDRESS_PREFIXES: [&str; 5] = ["P.", "Q.", "H.", "/", "\\"];

/// Weight field extractor.
///
/// Keyword-anchored rules run first, then a bare `<number><unit>` rule.
/// The bare rule carries an optional look-behind guard against address
/// fragments; it is off by default, matching the observed behavior of the
/// system this replaces, where the guard was computed but had no effect.
pub struct WeightExtractor {
    keyword_rules: Vec<Regex>,
    bare_rules: Vec<Regex>,
    prefix_guard: bool,
}

impl WeightExtractor {
    pub fn new(policy: Policy) -> Self {
        let units = weight_units().alternation();

        let keyword_rules = weight_keywords(policy)
            .iter()
            .map(|kw| {
                Regex::new(&format!(
                    r"(?i)\b{kw}[^\d]*(\d+(?:[.,]\d+)?)(\s?(?:{units}))?\b"
                ))
                .expect("invalid weight keyword pattern")
            })
            .collect();

        let mut bare_rules = vec![Regex::new(&format!(
            r"(?i)(?:^|\s)(\d+(?:[.,]\d+)?)(\s?(?:{units}))\b"
        ))
        .expect("invalid bare weight pattern")];
        if policy == Policy::Advanced {
            bare_rules.push(
                Regex::new(&format!(
                    r"(?i)\b(?:giao|ship|gửi|chuyển|mua|bán)\s+(\d+(?:[.,]\d+)?)(\s?(?:{units}))\b"
                ))
                .expect("invalid verb weight pattern"),
            );
        }

        Self {
            keyword_rules,
            bare_rules,
            prefix_guard: false,
        }
    }

    /// Enable rejection of bare matches preceded by an address fragment.
    pub fn with_prefix_guard(mut self, enabled: bool) -> Self {
        self.prefix_guard = enabled;
        self
    }

    fn address_prefixed(text: &str, match_start: usize) -> bool {
        let before: String = text[..match_start]
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        let before = before.trim_end();
        ADDRESS_PREFIXES.iter().any(|p| before.ends_with(p))
    }

    fn hit(text: &str, caps: &regex::Captures) -> FieldOutcome<i64> {
        let full = caps.get(0).expect("group 0 always participates");
        let raw = format!("{}{}", &caps[1], caps.get(2).map_or("", |m| m.as_str()));
        FieldOutcome {
            value: normalize_amount(&raw),
            raw: Some(raw),
            residual: excise(text, (full.start(), full.end())),
        }
    }
}

impl FieldExtractor for WeightExtractor {
    type Value = i64;

    fn extract(&self, text: &str) -> FieldOutcome<i64> {
        for rule in &self.keyword_rules {
            if let Some(caps) = rule.captures(text) {
                return Self::hit(text, &caps);
            }
        }

        for rule in &self.bare_rules {
            if let Some(caps) = rule.captures(text) {
                let start = caps.get(0).expect("group 0 always participates").start();
                if self.prefix_guard && Self::address_prefixed(text, start) {
                    continue;
                }
                return Self::hit(text, &caps);
            }
        }

        FieldOutcome {
            raw: None,
            value: None,
            residual: text.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keyword_anchored_weight() {
        let extractor = WeightExtractor::new(Policy::Basic);
        let out = extractor.extract("hàng nặng 2kg gửi gấp");

        assert_eq!(out.value, Some(2_000));
        assert_eq!(out.raw.as_deref(), Some("2kg"));
        assert!(!out.residual.contains("2kg"));
    }

    #[test]
    fn test_bare_weight() {
        let extractor = WeightExtractor::new(Policy::Basic);
        let out = extractor.extract("gửi 3,5 kg về Huế");

        assert_eq!(out.value, Some(3_500));
        assert_eq!(out.raw.as_deref(), Some("3,5 kg"));
    }

    #[test]
    fn test_gram_unit() {
        let extractor = WeightExtractor::new(Policy::Basic);
        let out = extractor.extract("khối lượng 500g");

        assert_eq!(out.value, Some(500));
    }

    #[test]
    fn test_prefix_guard_configurable() {
        let text = "giao về P. 3 kg Bình Thạnh";

        let extractor = WeightExtractor::new(Policy::Basic);
        let out = extractor.extract(text);
        assert_eq!(out.value, Some(3_000));

        let extractor = WeightExtractor::new(Policy::Basic).with_prefix_guard(true);
        let out = extractor.extract(text);
        assert_eq!(out.value, None);
        assert_eq!(out.residual, text);
    }

    #[test]
    fn test_bare_ky_unit_matched_but_not_scaled() {
        // "ký" is matched as a unit; the normalizer has no rule for it and
        // falls through to the bare number.
        let extractor = WeightExtractor::new(Policy::Advanced);
        let out = extractor.extract("chuyển 2 ký hành tây");

        assert_eq!(out.value, Some(2));
        assert_eq!(out.raw.as_deref(), Some("2 ký"));
    }

    #[test]
    fn test_no_weight() {
        let extractor = WeightExtractor::new(Policy::Basic);
        let out = extractor.extract("giao cho chị Lan ở quận 3");

        assert_eq!(out.value, None);
        assert_eq!(out.raw, None);
    }
}
