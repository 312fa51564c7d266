//! COD and declared-value extraction.
//!
//! Two mirror extractors separated only by their keyword lexicons. COD runs
//! first; the declared-value extractor consumes its residual. The bare-token
//! fallback belongs to COD alone and defers to the declared-value extractor
//! when a value keyword sits within 20 characters of the only amount token.

use regex::Regex;

use super::money::{fraction_word_value, normalize_amount, positional_tail};
use super::patterns::{BARE_AMOUNT_TOKEN, VALUE_KEYWORD};
use super::{FieldExtractor, FieldOutcome};
use crate::order::rules::cascade::excise;
use crate::order::rules::lexicon::{cod_keywords, value_keywords, Lexicon};
use crate::order::Policy;

const FRACTION_WORDS: &str = "rưỡi|mốt|hai|ba|bốn|năm|sáu|bảy|tám|chín";

/// How close (in bytes) a declared-value keyword must be to reserve the
/// only bare amount token for the declared-value extractor.
const VALUE_KEYWORD_RADIUS: usize = 20;

fn special_pattern(keywords: &Lexicon, keyword_required: bool, fraction_required: bool) -> Regex {
    let kw = keywords.alternation();
    let opt_kw = if keyword_required { "" } else { "?" };
    let opt_frac = if fraction_required { "" } else { "?" };
    Regex::new(&format!(
        r"(?i)(?:{kw}){opt_kw}\s*(\d+)\s*triệu\s*({FRACTION_WORDS}){opt_frac}"
    ))
    .expect("invalid special amount pattern")
}

fn shorthand_pattern(keywords: &Lexicon) -> Regex {
    Regex::new(&format!(
        r"(?i)(?:{})[^\d]*(\d+)\s*tr(?:iệu)?\s*(\d{{1,3}})?",
        keywords.alternation()
    ))
    .expect("invalid shorthand amount pattern")
}

fn million_fraction_value(base: &str, word: Option<&str>) -> i64 {
    let base: f64 = base.parse().unwrap_or(0.0);
    let extra = word.map_or(0.0, fraction_word_value);
    ((base + extra) * 1_000_000.0).round() as i64
}

fn shorthand_value(base: &str, tail: Option<&str>) -> i64 {
    let base: f64 = base.parse().unwrap_or(0.0);
    let extra = tail.map_or(0.0, |t| positional_tail(t, 100_000.0));
    (base * 1_000_000.0 + extra).round() as i64
}

/// COD field extractor.
pub struct CodExtractor {
    special: Regex,
    shorthand: Regex,
    unit_rules: Vec<Regex>,
    keyword_prefix: String,
}

impl CodExtractor {
    pub fn new(policy: Policy) -> Self {
        let keywords = cod_keywords(policy);
        let unit_rules = keywords
            .iter()
            .map(|kw| {
                Regex::new(&format!(
                    r"(?i){kw}\s{{0,5}}(\d+(?:[.,]\d{{3}})*|\d+)(\s?(?:đ|vnđ|k|nghìn|ngàn|tr|triệu))\b"
                ))
                .expect("invalid keyword amount pattern")
            })
            .collect();

        Self {
            special: special_pattern(&keywords, false, true),
            shorthand: shorthand_pattern(&keywords),
            unit_rules,
            keyword_prefix: keywords.alternation(),
        }
    }

    /// Exactly-one-bare-token fallback: an unlabeled amount is read as COD
    /// unless a declared-value keyword claims it. Two or more candidates
    /// stay ambiguous and are left for manual entry.
    fn bare_token(&self, text: &str) -> Option<FieldOutcome<i64>> {
        let tokens: Vec<_> = BARE_AMOUNT_TOKEN.captures_iter(text).collect();
        if tokens.len() != 1 {
            return None;
        }

        let caps = &tokens[0];
        let full = caps.get(0).expect("group 0 always participates");

        let reserved = VALUE_KEYWORD.find_iter(text).any(|kw| {
            kw.start().abs_diff(full.start()) < VALUE_KEYWORD_RADIUS
        });
        if reserved {
            return None;
        }

        let raw = format!("{}{}", &caps[1], caps.get(2).map_or("", |m| m.as_str()));
        let value = normalize_amount(&raw);

        // Take a directly preceding COD keyword out with the token.
        let with_keyword = Regex::new(&format!(
            r"(?i)(?:{})\s{{0,10}}{}",
            self.keyword_prefix,
            regex::escape(full.as_str())
        ))
        .expect("invalid keyword removal pattern");

        let residual = match with_keyword.find(text) {
            Some(m) => excise(text, (m.start(), m.end())),
            None => excise(text, (full.start(), full.end())),
        };

        Some(FieldOutcome {
            raw: Some(raw),
            value,
            residual,
        })
    }
}

impl FieldExtractor for CodExtractor {
    type Value = i64;

    fn extract(&self, text: &str) -> FieldOutcome<i64> {
        if let Some(caps) = self.special.captures(text) {
            let full = caps.get(0).expect("group 0 always participates");
            let value = million_fraction_value(&caps[1], caps.get(2).map(|m| m.as_str()));
            return FieldOutcome::hit(
                format!("{} triệu {}", &caps[1], &caps[2]),
                value,
                excise(text, (full.start(), full.end())),
            );
        }

        if let Some(caps) = self.shorthand.captures(text) {
            let full = caps.get(0).expect("group 0 always participates");
            let tail = caps.get(2).map(|m| m.as_str());
            return FieldOutcome::hit(
                format!("{}tr{}", &caps[1], tail.unwrap_or("")),
                shorthand_value(&caps[1], tail),
                excise(text, (full.start(), full.end())),
            );
        }

        for rule in &self.unit_rules {
            if let Some(caps) = rule.captures(text) {
                let full = caps.get(0).expect("group 0 always participates");
                let raw = format!("{}{}", &caps[1], caps.get(2).map_or("", |m| m.as_str()));
                return FieldOutcome {
                    value: normalize_amount(&raw),
                    raw: Some(raw),
                    residual: excise(text, (full.start(), full.end())),
                };
            }
        }

        self.bare_token(text)
            .unwrap_or_else(|| FieldOutcome::miss(text))
    }
}

/// Declared-value field extractor.
pub struct DeclaredValueExtractor {
    special: Regex,
    shorthand: Regex,
    unit_rules: Vec<Regex>,
}

impl DeclaredValueExtractor {
    pub fn new(_policy: Policy) -> Self {
        let keywords = value_keywords();
        // The keyword is mandatory here; an unlabeled amount never becomes
        // a declared value on its own. The unit may be missing.
        let unit_rules = keywords
            .iter()
            .map(|kw| {
                Regex::new(&format!(
                    r"(?i){kw}[^\d]*(\d+(?:[.,]?\d{{0,3}})?)\s*(tr(?:iệu)?|k|nghìn|ngàn|đ|vnđ)?"
                ))
                .expect("invalid keyword amount pattern")
            })
            .collect();

        Self {
            special: special_pattern(&keywords, true, false),
            shorthand: shorthand_pattern(&keywords),
            unit_rules,
        }
    }
}

impl FieldExtractor for DeclaredValueExtractor {
    type Value = i64;

    fn extract(&self, text: &str) -> FieldOutcome<i64> {
        if let Some(caps) = self.special.captures(text) {
            let full = caps.get(0).expect("group 0 always participates");
            let word = caps.get(2).map(|m| m.as_str());
            let raw = match word {
                Some(w) => format!("{} triệu {w}", &caps[1]),
                None => format!("{} triệu", &caps[1]),
            };
            return FieldOutcome::hit(
                raw,
                million_fraction_value(&caps[1], word),
                excise(text, (full.start(), full.end())),
            );
        }

        if let Some(caps) = self.shorthand.captures(text) {
            let full = caps.get(0).expect("group 0 always participates");
            let tail = caps.get(2).map(|m| m.as_str());
            return FieldOutcome::hit(
                format!("{}tr{}", &caps[1], tail.unwrap_or("")),
                shorthand_value(&caps[1], tail),
                excise(text, (full.start(), full.end())),
            );
        }

        for rule in &self.unit_rules {
            if let Some(caps) = rule.captures(text) {
                let full = caps.get(0).expect("group 0 always participates");
                let unit = caps.get(2).map(|m| m.as_str().to_lowercase());
                let raw = match unit.as_deref() {
                    Some("nghìn") | Some("ngàn") => {
                        format!("{} {}", &caps[1], unit.as_deref().unwrap())
                    }
                    Some(u) => format!("{}{u}", &caps[1]),
                    None => caps[1].to_string(),
                };
                return FieldOutcome {
                    value: normalize_amount(&raw),
                    raw: Some(raw),
                    residual: excise(text, (full.start(), full.end())),
                };
            }
        }

        FieldOutcome::miss(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cod_million_fraction() {
        let extractor = CodExtractor::new(Policy::Basic);
        let out = extractor.extract("thu 2 triệu rưỡi nha chị");

        assert_eq!(out.value, Some(2_500_000));
        assert_eq!(out.raw.as_deref(), Some("2 triệu rưỡi"));
        assert_eq!(out.residual, "nha chị");
    }

    #[test]
    fn test_cod_shorthand_tail() {
        let extractor = CodExtractor::new(Policy::Basic);
        let out = extractor.extract("cod 2tr5 nhé");

        assert_eq!(out.value, Some(2_500_000));
        assert_eq!(out.raw.as_deref(), Some("2tr5"));
        assert_eq!(out.residual, "nhé");
    }

    #[test]
    fn test_cod_keyword_with_unit() {
        let extractor = CodExtractor::new(Policy::Basic);
        let out = extractor.extract("thu hộ 200k cho chị Lan");

        assert_eq!(out.value, Some(200_000));
        assert_eq!(out.raw.as_deref(), Some("200k"));
        assert_eq!(out.residual, "cho chị Lan");
    }

    #[test]
    fn test_cod_single_bare_token() {
        let extractor = CodExtractor::new(Policy::Basic);
        let out = extractor.extract("gửi hàng 350k giúp em");

        assert_eq!(out.value, Some(350_000));
        assert_eq!(out.raw.as_deref(), Some("350k"));
        assert!(!out.residual.contains("350k"));
    }

    #[test]
    fn test_bare_token_reserved_for_declared_value() {
        let extractor = CodExtractor::new(Policy::Basic);
        let out = extractor.extract("hàng dễ vỡ, giá trị 500k");

        assert_eq!(out.value, None);
        assert_eq!(out.raw, None);
        assert_eq!(out.residual, "hàng dễ vỡ, giá trị 500k");

        let value = DeclaredValueExtractor::new(Policy::Basic);
        let out = value.extract(&out.residual);
        assert_eq!(out.value, Some(500_000));
    }

    #[test]
    fn test_ambiguous_tokens_left_alone() {
        let extractor = CodExtractor::new(Policy::Basic);
        let out = extractor.extract("khoảng 200k hay 300k gì đó");

        assert_eq!(out.value, None);
        assert_eq!(out.residual, "khoảng 200k hay 300k gì đó");
    }

    #[test]
    fn test_declared_value_without_unit() {
        let extractor = DeclaredValueExtractor::new(Policy::Basic);
        let out = extractor.extract("tiền hàng 500 nghìn nha");

        assert_eq!(out.value, Some(500_000));
        assert_eq!(out.raw.as_deref(), Some("500 nghìn"));
    }
}
