//! Shipping-address extraction.
//!
//! The address stage runs last and anchors on context keywords. `Basic`
//! takes everything after the last keyword occurrence as the candidate
//! zone; `Advanced` probes the text after every occurrence in order and
//! accepts the first zone that looks like an address. When the accepted
//! address contains a comma, the canonical value stops at the first comma
//! while the raw value keeps the full match.

use lazy_static::lazy_static;
use regex::Regex;

use super::lexicon::address_keywords;
use super::patterns::{NO_COD_CLAUSE, TRAILING_PARTICLES};
use super::{FieldExtractor, FieldOutcome};
use crate::order::rules::cascade::excise;
use crate::order::Policy;

lazy_static! {
    static ref LEADING_SEPARATORS: Regex = Regex::new(r"^[:.,\s]+").unwrap();
    static ref EDGE_SEPARATORS_HEAD: Regex = Regex::new(r"^[,.\s]+").unwrap();
    static ref EDGE_SEPARATORS_TAIL: Regex = Regex::new(r"[,.\s]+$").unwrap();

    static ref LEADING_PUNCTUATION: Regex =
        Regex::new(r#"^[–—\-_~`!@#$%^&*()+=\[\]{}|\\:;"'<>?,./\s]+"#).unwrap();
    static ref DASH_RUN: Regex = Regex::new(r"^[–—\-]+\s*[–—\-]+\s*").unwrap();

    // Everything from the first trailing-noise token (phone-like runs,
    // field keywords, currency/weight units) to the end of the candidate.
    static ref TRAILING_NOISE: Regex = Regex::new(
        r"(?is)\b(?:sđt|sdt|phone|số điện thoại|điện thoại|giá trị|sản phẩm|kg\b|vnđ\b|đ\b|₫|\d{9,11}).*$"
    )
    .unwrap();

    static ref NATURAL_ENDING: Regex = Regex::new(
        r"(?i)\s*(?:sdt|với nha|nhanh nha|nha a|nha bạn|ạ nha|ạ nhé|nhé a|nhe a|nhé anh|nhe anh|nha|nhé|nhe|ạ|à|nhanh|chậm|lâu)[.,!]*$"
    )
    .unwrap();

    static ref TRAILING_CLAUSE: Regex = Regex::new(
        r"(?i)\.*\s*(?:giao cho|cho|giao|không thu hộ|không thu tiền|không lấy tiền|nha a|nha bạn|với nha|nha|nhé|ạ|à)\s*\.?$"
    )
    .unwrap();
}

const ADMIN_DIVISIONS: &str =
    r"quận|q\.?|phường|p\.?|tp\.?|thành phố|hcm|hà nội|huế|cần thơ|sài gòn";
const ADMIN_DIVISIONS_WIDE: &str = r"quận|q\.?|phường|p\.?|tp\.?|thành phố|hcm|hà nội|huế|cần thơ|sài gòn|bình thạnh|đà nẵng|tân bình|tân phú|gò vấp";

/// Address field extractor.
pub struct AddressExtractor {
    policy: Policy,
    keywords: Regex,
    admin_zone: Regex,
    bare_zone: Regex,
    admin_after: Regex,
    bare_after: Regex,
    admin_global: Regex,
    bare_global: Regex,
}

impl AddressExtractor {
    pub fn new(policy: Policy) -> Self {
        let keywords = Regex::new(&format!(
            "(?i)(?:{})",
            address_keywords(policy).alternation()
        ))
        .expect("invalid address keyword pattern");

        Self {
            policy,
            keywords,
            admin_zone: Regex::new(&format!(
                r"(?i)(\d{{1,4}}[/\d\s\p{{L}},.\-]*?(?:{ADMIN_DIVISIONS})[\p{{L}}\d\s,./\-]*)"
            ))
            .unwrap(),
            bare_zone: Regex::new(r"(\d{1,4}[/\d\s\p{L},.\-]{3,})").unwrap(),
            admin_after: Regex::new(&format!(
                r"(?i)^[:.,\s]*(\d{{1,4}}[/\d\s\p{{L}},.\-]*?(?:{ADMIN_DIVISIONS_WIDE})[\p{{L}}\d\s,./\-]*)"
            ))
            .unwrap(),
            bare_after: Regex::new(r"^[:.,\s]*(\d{1,4}[/\d\s\p{L},.\-]{5,})").unwrap(),
            admin_global: Regex::new(
                r"(?i)\d{1,4}[\s\p{L}\d/\\.,\-]{3,}(?:quận\s*\d+|q\.?\s*\d+|q\d+|phường\s*\d+|p\.?\s*\d+|p\d+|tp\.?|thành phố|hcm|tân phú|tân bình|gò vấp|hà nội|đà nẵng|huế|cần thơ|sài gòn)",
            )
            .unwrap(),
            bare_global: Regex::new(r"\d{1,4}[/\d\s\p{L},.\\\-]+").unwrap(),
        }
    }

    /// Canonical form: stop at the first comma, shed the politeness tail.
    fn canonical(value: &str) -> String {
        let head = value.split(',').next().unwrap_or(value);
        NATURAL_ENDING.replace(head, "").trim().to_string()
    }

    fn strip_edges(value: &str) -> String {
        let value = EDGE_SEPARATORS_TAIL.replace(value, "");
        let value = EDGE_SEPARATORS_HEAD.replace(&value, "");
        let value = LEADING_PUNCTUATION.replace(&value, "");
        DASH_RUN.replace(&value, "").trim().to_string()
    }

    fn clean_zone(&self, zone: &str) -> String {
        let value = self.keywords.replace_all(zone, "");
        let value = NO_COD_CLAUSE.replace(&value, "");
        let value = TRAILING_PARTICLES.replace(&value, "");
        Self::strip_edges(&value)
    }

    fn clean_candidate(value: &str) -> String {
        let value = TRAILING_CLAUSE.replace(value, "");
        let value = Self::strip_edges(&value);
        NATURAL_ENDING.replace(&value, "").trim().to_string()
    }

    fn extract_basic(&self, text: &str) -> FieldOutcome<String> {
        let zone = match self.keywords.find_iter(text).last() {
            Some(last) => LEADING_SEPARATORS
                .replace(&text[last.end()..], "")
                .trim()
                .to_string(),
            None => text.to_string(),
        };

        let matched = self
            .admin_zone
            .captures(&zone)
            .or_else(|| self.bare_zone.captures(&zone));

        if let Some(caps) = matched {
            let span = caps.get(1).expect("address group");
            let raw = self.clean_zone(&zone);
            return FieldOutcome {
                value: Some(Self::canonical(&raw)),
                raw: Some(raw),
                residual: excise(&zone, (span.start(), span.end())),
            };
        }

        if let Some(m) = self.bare_global.find(&zone) {
            let raw = self.clean_zone(m.as_str());
            return FieldOutcome {
                value: Some(Self::canonical(&raw)),
                raw: Some(raw),
                residual: zone.clone(),
            };
        }

        FieldOutcome {
            raw: None,
            value: None,
            residual: zone,
        }
    }

    fn extract_advanced(&self, text: &str) -> FieldOutcome<String> {
        for kw in self.keywords.find_iter(text) {
            let after = &text[kw.end()..];
            let caps = self
                .admin_after
                .captures(after)
                .or_else(|| self.bare_after.captures(after));

            if let Some(caps) = caps {
                let candidate = caps.get(1).expect("address group").as_str();
                let raw = TRAILING_NOISE.replace(candidate, "").trim().to_string();
                if raw.is_empty() {
                    continue;
                }
                let cleaned = Self::clean_candidate(&raw);
                let residual = text.replacen(&raw, "", 1).trim().to_string();
                return FieldOutcome {
                    value: Some(Self::canonical(&cleaned)),
                    raw: Some(raw),
                    residual,
                };
            }
        }

        let matched = self
            .admin_global
            .find(text)
            .or_else(|| self.bare_global.find(text));

        if let Some(m) = matched {
            let raw = TRAILING_NOISE.replace(m.as_str(), "").trim().to_string();
            if !raw.is_empty() {
                let cleaned = self.keywords.replace_all(&raw, "");
                let cleaned = NATURAL_ENDING.replace(&cleaned, "");
                let cleaned = Self::strip_edges(&cleaned);
                let residual = text.replacen(&raw, "", 1).trim().to_string();
                return FieldOutcome {
                    value: Some(Self::canonical(&cleaned)),
                    raw: Some(raw),
                    residual,
                };
            }
        }

        FieldOutcome::miss(text)
    }
}

impl FieldExtractor for AddressExtractor {
    type Value = String;

    fn extract(&self, text: &str) -> FieldOutcome<String> {
        match self.policy {
            Policy::Basic => self.extract_basic(text),
            Policy::Advanced => self.extract_advanced(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_last_keyword_zone() {
        let extractor = AddressExtractor::new(Policy::Basic);
        let out = extractor.extract("giao về 103A Nguyễn Hữu Cảnh, Q. Bình Thạnh");

        assert_eq!(out.value.as_deref(), Some("103A Nguyễn Hữu Cảnh"));
        assert!(out.raw.as_deref().unwrap().contains("Q. Bình Thạnh"));
    }

    #[test]
    fn test_advanced_keyword_probe() {
        let extractor = AddressExtractor::new(Policy::Advanced);
        let out = extractor.extract("ship tới 25 Lê Lợi, phường 7, quận 3 nhé");

        assert_eq!(out.value.as_deref(), Some("25 Lê Lợi"));
        let raw = out.raw.as_deref().unwrap();
        assert!(raw.contains("phường 7"));
        assert!(raw.contains("quận 3"));
    }

    #[test]
    fn test_advanced_trailing_noise_cut() {
        let extractor = AddressExtractor::new(Policy::Advanced);
        let out = extractor.extract("về 12 Hàng Bài sdt 0911222333");

        assert_eq!(out.raw.as_deref(), Some("12 Hàng Bài"));
        assert_eq!(out.value.as_deref(), Some("12 Hàng Bài"));
    }

    #[test]
    fn test_duong_not_cut_as_currency() {
        let extractor = AddressExtractor::new(Policy::Advanced);
        let out = extractor.extract("giao tại 5 đường Trần Phú, Huế");

        assert!(out.raw.as_deref().unwrap().contains("đường Trần Phú"));
    }

    #[test]
    fn test_no_address() {
        let extractor = AddressExtractor::new(Policy::Advanced);
        let out = extractor.extract("chưa rõ nơi nhận");

        assert_eq!(out.value, None);
        assert_eq!(out.raw, None);
    }
}
