//! Phone number extraction.

use lazy_static::lazy_static;
use regex::Regex;

use super::{FieldExtractor, FieldOutcome};
use crate::order::rules::cascade::excise;
use crate::order::Policy;

lazy_static! {
    // Keyword-anchored run: keyword, a non-digit gap, then a digit run
    // starting with 0. Separators and the obfuscation characters *, x, X
    // are tolerated inside the run.
    static ref PHONE_WITH_KEYWORD: Regex = Regex::new(
        r"(?i)(?:sđt|số điện thoại|điện thoại|phone|so dien thoai|dien thoai|sdt|dthoai|gửi tới số điện thoại|ship giúp)[^\d]*(0[\d.\-\s*xX]{6,})"
    ).unwrap();

    static ref PHONE_BARE: Regex = Regex::new(r"\b(0[\d.\-\s*xX]{6,})\b").unwrap();

    static ref PHONE_SEPARATORS: Regex = Regex::new(r"[.\-\s]").unwrap();
}

/// Phone field extractor.
///
/// `Basic` prefers the keyword-anchored match; `Advanced` prefers the
/// earliest bare digit run and only then falls back to the keyword form.
/// The normalized phone keeps `*`/`x`/`X` exactly as typed.
pub struct PhoneExtractor {
    policy: Policy,
}

impl PhoneExtractor {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    fn keyword_hit(&self, text: &str) -> Option<FieldOutcome<String>> {
        let caps = PHONE_WITH_KEYWORD.captures(text)?;
        Some(self.finish(text, &caps))
    }

    fn bare_hit(&self, text: &str) -> Option<FieldOutcome<String>> {
        let caps = PHONE_BARE.captures(text)?;
        Some(self.finish(text, &caps))
    }

    fn finish(&self, text: &str, caps: &regex::Captures) -> FieldOutcome<String> {
        let full = caps.get(0).expect("group 0 always participates");
        let run = caps.get(1).expect("digit run group");
        let normalized = PHONE_SEPARATORS.replace_all(run.as_str(), "").into_owned();
        FieldOutcome {
            raw: Some(run.as_str().trim().to_string()),
            value: Some(normalized),
            residual: excise(text, (full.start(), full.end())),
        }
    }
}

impl FieldExtractor for PhoneExtractor {
    type Value = String;

    fn extract(&self, text: &str) -> FieldOutcome<String> {
        let hit = match self.policy {
            Policy::Basic => self.keyword_hit(text).or_else(|| self.bare_hit(text)),
            Policy::Advanced => self.bare_hit(text).or_else(|| self.keyword_hit(text)),
        };
        hit.unwrap_or_else(|| FieldOutcome {
            raw: None,
            value: None,
            residual: text.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keyword_anchored() {
        let extractor = PhoneExtractor::new(Policy::Basic);
        let out = extractor.extract("sđt 0922.001.100 giao hàng");

        assert_eq!(out.value.as_deref(), Some("0922001100"));
        assert_eq!(out.residual, "giao hàng");
    }

    #[test]
    fn test_bare_run() {
        let extractor = PhoneExtractor::new(Policy::Basic);
        let out = extractor.extract("giao cho Lan 0909 123 456, quận 3");

        assert_eq!(out.value.as_deref(), Some("0909123456"));
        assert!(out.residual.contains("quận 3"));
        assert!(!out.residual.contains("0909"));
    }

    #[test]
    fn test_obfuscation_characters_survive() {
        let extractor = PhoneExtractor::new(Policy::Basic);
        let out = extractor.extract("sdt 09xx.xxx.100 nhé");

        assert_eq!(out.value.as_deref(), Some("09xxxxx100"));
    }

    #[test]
    fn test_advanced_prefers_earliest_bare_run() {
        let extractor = PhoneExtractor::new(Policy::Advanced);
        let out = extractor.extract("gọi 0111222333 hoặc sđt 0444555666");
        assert_eq!(out.value.as_deref(), Some("0111222333"));

        let extractor = PhoneExtractor::new(Policy::Basic);
        let out = extractor.extract("gọi 0111222333 hoặc sđt 0444555666");
        assert_eq!(out.value.as_deref(), Some("0444555666"));
    }

    #[test]
    fn test_no_phone() {
        let extractor = PhoneExtractor::new(Policy::Basic);
        let out = extractor.extract("gửi 2 hộp bánh cho chị Lan");

        assert_eq!(out.value, None);
        assert_eq!(out.raw, None);
        assert_eq!(out.residual, "gửi 2 hộp bánh cho chị Lan");
    }
}
