//! Colloquial Vietnamese number, money and weight normalization.
//!
//! Canonicalizes numeric idioms like "2 triệu rưỡi", "1tr5", "150k",
//! "1.200.000đ" or "2kg" into one integer: đồng for money, grams for
//! weight. Rules are tried in a fixed order; the first applicable rule
//! decides the semantics and no other rule runs.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "N triệu <fraction-word>" — matched against the uncleaned input.
    static ref MILLION_FRACTION: Regex = Regex::new(
        r"(\d+)\s*triệu\s*(mốt|rưỡi|hai|ba|bốn|năm|sáu|bảy|tám|chín)"
    ).unwrap();

    // Grouped-thousands numeral with optional currency suffix.
    static ref GROUPED_THOUSANDS: Regex = Regex::new(
        r"^(\d{1,3}(?:[.,]\d{3})+)(?:\s?(?:đ|₫|vnđ|vnd|đồng))?$"
    ).unwrap();

    // Shorthand "Ntr5" / "Nty5" with a positional digit tail.
    static ref SHORTHAND_MILLION: Regex =
        Regex::new(r"^(\d+(?:[.,]?\d*)?)\s*tr(?:iệu)?(\d{1,3})?$").unwrap();
    static ref SHORTHAND_BILLION: Regex =
        Regex::new(r"^(\d+(?:[.,]?\d*)?)\s*t(?:ỷ|y)(\d{1,3})?$").unwrap();

    // Bare weight suffixes.
    static ref WEIGHT_KG: Regex = Regex::new(r"^(\d+(?:[.,]?\d*)?)\s*kg$").unwrap();
    static ref WEIGHT_G: Regex = Regex::new(r"^(\d+(?:[.,]?\d*)?)\s*g$").unwrap();

    // "N triệu [M [nghìn|ngàn|k]]" with an inferred remainder scale.
    static ref MILLION_REMAINDER: Regex = Regex::new(
        r"(\d+(?:[.,]\d+)?)\s*triệu(?:\s+(\d+(?:[.,]\d+)?)(?:\s*(nghìn|ngàn|k))?)?"
    ).unwrap();

    // "N tỷ [M]".
    static ref BILLION_REMAINDER: Regex =
        Regex::new(r"(\d+(?:[.,]\d+)?)\s*t[ỷy](?:\s+(\d+(?:[.,]\d+)?))?").unwrap();

    // Bare "Nk".
    static ref SHORT_K: Regex = Regex::new(r"(\d+(?:[.,]?\d*)?)\s*k\b").unwrap();

    // Scale words for the last-resort fallback.
    static ref MILLION_WORD: Regex = Regex::new(r"\b(?:triệu|trieu|tr)\b").unwrap();
    static ref BILLION_WORD: Regex = Regex::new(r"tỷ").unwrap();
    static ref THOUSAND_WORD: Regex =
        Regex::new(r"\b(?:k|nghin|ngan|nghìn|ngàn)\b").unwrap();

    // parseFloat-style numeric prefix of a cleaned string.
    static ref FLOAT_PREFIX: Regex = Regex::new(r"^(?:\d+\.?\d*|\.\d+)").unwrap();
}

/// Fixed decimal value of a fractional-million word.
pub(crate) fn fraction_word_value(word: &str) -> f64 {
    match word {
        "mốt" => 0.1,
        "hai" => 0.2,
        "ba" => 0.3,
        "bốn" => 0.4,
        "rưỡi" | "năm" => 0.5,
        "sáu" => 0.6,
        "bảy" => 0.7,
        "tám" => 0.8,
        "chín" => 0.9,
        _ => 0.0,
    }
}

/// Positional value of a 1-3 digit shorthand tail ("1tr5" = 1.5 million).
pub(crate) fn positional_tail(tail: &str, hundred_scale: f64) -> f64 {
    let digits: f64 = tail.parse().unwrap_or(0.0);
    match tail.len() {
        1 => digits * hundred_scale,
        2 => digits * hundred_scale / 10.0,
        3 => digits,
        _ => 0.0,
    }
}

fn parse_decimal(s: &str) -> f64 {
    s.replace(',', ".").parse().unwrap_or(0.0)
}

/// Normalize a numeric-idiom substring into an integer amount.
///
/// Money resolves to đồng, weight to grams. Returns `None` when no digits
/// can be parsed.
pub fn normalize_amount(input: &str) -> Option<i64> {
    // Million + fraction word wins over everything else.
    if let Some(caps) = MILLION_FRACTION.captures(input) {
        let base: f64 = caps[1].parse().unwrap_or(0.0);
        let extra = fraction_word_value(&caps[2]);
        return Some(((base + extra) * 1_000_000.0).round() as i64);
    }

    let raw = clean(input);

    if let Some(caps) = GROUPED_THOUSANDS.captures(&raw) {
        let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
        return digits.parse().ok();
    }

    if let Some(caps) = SHORTHAND_MILLION.captures(&raw) {
        let million = parse_decimal(&caps[1]);
        let extra = caps.get(2).map_or(0.0, |t| positional_tail(t.as_str(), 100_000.0));
        return Some((million * 1_000_000.0 + extra).round() as i64);
    }

    if let Some(caps) = SHORTHAND_BILLION.captures(&raw) {
        let billion = parse_decimal(&caps[1]);
        let extra = caps
            .get(2)
            .map_or(0.0, |t| positional_tail(t.as_str(), 100_000_000.0));
        return Some((billion * 1_000_000_000.0 + extra).round() as i64);
    }

    if let Some(caps) = WEIGHT_KG.captures(&raw) {
        return Some((parse_decimal(&caps[1]) * 1000.0).round() as i64);
    }

    if let Some(caps) = WEIGHT_G.captures(&raw) {
        return Some(parse_decimal(&caps[1]).round() as i64);
    }

    if let Some(caps) = MILLION_REMAINDER.captures(&raw) {
        let millions = parse_decimal(&caps[1]);
        let extra = caps.get(2).map_or(0.0, |m| parse_decimal(m.as_str()));
        // Explicit nghìn/ngàn/k marks thousands; otherwise a small remainder
        // reads as hundred-thousands ("2 triệu 5" = 2.5 million).
        let scale = if caps.get(3).is_some() {
            1_000.0
        } else if extra < 100.0 {
            100_000.0
        } else {
            1_000.0
        };
        return Some((millions * 1_000_000.0 + extra * scale).round() as i64);
    }

    if let Some(caps) = BILLION_REMAINDER.captures(&raw) {
        let billions = parse_decimal(&caps[1]);
        let extra = caps.get(2).map_or(0.0, |m| parse_decimal(m.as_str()));
        let remainder = if extra > 0.0 { extra * 100_000_000.0 } else { 0.0 };
        return Some((billions * 1_000_000_000.0 + remainder).round() as i64);
    }

    if let Some(caps) = SHORT_K.captures(&raw) {
        return Some((parse_decimal(&caps[1]) * 1_000.0).round() as i64);
    }

    // Last resort: take the leading number and scale it by whichever scale
    // word appears anywhere in the text.
    let cleaned: String = raw
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let mut num = FLOAT_PREFIX
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())?;

    if MILLION_WORD.is_match(&raw) {
        num *= 1_000_000.0;
    } else if BILLION_WORD.is_match(&raw) {
        num *= 1_000_000_000.0;
    } else if THOUSAND_WORD.is_match(input) {
        num *= 1_000.0;
    }

    Some(num.round() as i64)
}

/// Lowercase and drop everything except letters, digits, whitespace,
/// separators and currency marks.
fn clean(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| {
            c.is_alphanumeric() || c.is_whitespace() || matches!(c, '.' | ',' | '_' | '₫')
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_million_with_fraction_word() {
        assert_eq!(normalize_amount("2 triệu rưỡi"), Some(2_500_000));
        assert_eq!(normalize_amount("1 triệu mốt"), Some(1_100_000));
        assert_eq!(normalize_amount("3 triệu tám"), Some(3_800_000));
    }

    #[test]
    fn test_grouped_thousands() {
        assert_eq!(normalize_amount("1.200.000"), Some(1_200_000));
        assert_eq!(normalize_amount("1.200.000đ"), Some(1_200_000));
        assert_eq!(normalize_amount("250,000 vnđ"), Some(250_000));
    }

    #[test]
    fn test_shorthand_million_tails() {
        assert_eq!(normalize_amount("1tr5"), Some(1_500_000));
        assert_eq!(normalize_amount("1tr50"), Some(1_500_000));
        assert_eq!(normalize_amount("1tr500"), Some(1_000_500));
        assert_eq!(normalize_amount("2tr"), Some(2_000_000));
        assert_eq!(normalize_amount("2,5tr"), Some(2_500_000));
    }

    #[test]
    fn test_shorthand_billion() {
        assert_eq!(normalize_amount("1tỷ"), Some(1_000_000_000));
        assert_eq!(normalize_amount("2ty5"), Some(2_500_000_000));
    }

    #[test]
    fn test_weight_suffixes() {
        assert_eq!(normalize_amount("2kg"), Some(2_000));
        assert_eq!(normalize_amount("2,5kg"), Some(2_500));
        assert_eq!(normalize_amount("500g"), Some(500));
    }

    #[test]
    fn test_million_with_remainder() {
        assert_eq!(normalize_amount("2 triệu 300 nghìn"), Some(2_300_000));
        assert_eq!(normalize_amount("2 triệu 5"), Some(2_500_000));
        assert_eq!(normalize_amount("1 triệu 500"), Some(1_500_000));
    }

    #[test]
    fn test_short_k() {
        assert_eq!(normalize_amount("150k"), Some(150_000));
        assert_eq!(normalize_amount("99 k"), Some(99_000));
    }

    #[test]
    fn test_fallback_scaling() {
        assert_eq!(normalize_amount("500 nghìn"), Some(500_000));
        assert_eq!(normalize_amount("25"), Some(25));
    }

    #[test]
    fn test_no_digits() {
        assert_eq!(normalize_amount("không có gì"), None);
        assert_eq!(normalize_amount(""), None);
    }

    #[test]
    fn test_pure_function() {
        for _ in 0..3 {
            assert_eq!(normalize_amount("2 triệu rưỡi"), Some(2_500_000));
        }
    }
}
