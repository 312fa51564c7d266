//! Recipient-name extraction.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::cascade::{excise, Cascade, PatternRule};
use super::lexicon::location_prefixes;
use super::{FieldExtractor, FieldOutcome};
use crate::order::Policy;

lazy_static! {
    static ref LOCATION_PREFIX: Regex = Regex::new(&format!(
        "(?i)^(?:{})",
        location_prefixes().alternation()
    ))
    .unwrap();

    static ref LEADING_DIGIT: Regex = Regex::new(r"^\d+[a-zA-Z]?\s").unwrap();

    // ASCII on purpose: an accented Vietnamese name in lowercase ("thuỷ")
    // must not be mistaken for a descriptive phrase.
    static ref ASCII_LOWERCASE_ONLY: Regex = Regex::new(r"^[a-z\s]+$").unwrap();

    static ref TRAILING_PARTICLE: Regex =
        Regex::new(r"(?i)\s+(?:nha|nhé|ạ|à|vậy|đó|này|tại|nè|ở|sdt)$").unwrap();

    static ref INNER_STOPWORDS: Regex = Regex::new(r"(?i)\b(?:cho|với)\b").unwrap();

    static ref TRAILING_PREPOSITION: Regex =
        Regex::new(r"(?i)\s*(?:ở|tại|tới|đến)\s*$").unwrap();

    static ref INNER_PREPOSITIONS: Regex =
        Regex::new(r"(?i)\b(?:ở|tại|tới|đến)\b").unwrap();

    static ref ADMIN_AFTER: Regex = Regex::new(
        r"(?i)^\s*(?:quận|huyện|phường|tp|tỉnh|thành phố|xã|ấp|đường|số|ngõ|hẻm)"
    )
    .unwrap();

    static ref FALLBACK_LEADING_NAME: Regex =
        Regex::new(r"^([\p{L}\s]{2,20}),").unwrap();

    // Urgency/politeness filler that looks like a name capture but is not.
    static ref NEGATIVE_FILLERS: Vec<Regex> = [
        r"(?i)nhanh.*(?:giúp|giùm)",
        r"(?i)giúp.*(?:em|e|mình)",
        r"(?i)(?:em|e|mình)\s*(?:nha|nhé|vs|với|giúp|giùm)",
        r"(?i)ship\s+(?:nhanh|luôn|sớm)",
        r"(?i)(?:giao|ship)\s+(?:nhanh|liền)",
        r"(?i)mình\s+(?:nhé|nha|vs|với)",
        r"(?i)(?:giùm|giúp)\s+(?:e|em|mình)",
        r"(?i)với\s+(?:mình|em|e)",
        r"(?i)gấp\s+giúp",
        r"(?i)\b(?:ok|vs|với|nha|nhé)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
}

const NAME_BLACKLIST: [&str; 4] = ["tới", "đến", "ở", "tại"];

/// Candidates that start with a product noun are keyword-matching noise,
/// not a name ("gửi chị áo dài đỏ").
fn not_product_start(caps: &Captures, _text: &str) -> bool {
    const PRODUCT_NOUNS: [&str; 10] = [
        "cái", "chiếc", "áo dài", "áo", "váy", "quần", "đầm", "bộ", "giày", "dép",
    ];
    let candidate = caps.get(1).map_or("", |m| m.as_str()).to_lowercase();
    !PRODUCT_NOUNS
        .iter()
        .any(|noun| candidate.starts_with(noun))
}

/// An honorific capture directly followed by an administrative word is an
/// address, not a name.
fn not_followed_by_admin(caps: &Captures, text: &str) -> bool {
    let end = caps.get(1).map_or(0, |m| m.end());
    !ADMIN_AFTER.is_match(&text[end..])
}

/// Recipient-name field extractor.
pub struct NameExtractor {
    policy: Policy,
    cascade: Cascade,
}

impl NameExtractor {
    pub fn new(policy: Policy) -> Self {
        let boundary = r"(\s*(?:sản phẩm|sp|áo|quần|mã|địa chỉ|gửi|ship|sđt|sdt|đt|số|tại|[0-9,.:–—\-\n])|$)";

        let rules = vec![
            PatternRule::new(
                &format!(
                    r"(?i)(?:^|\s)(?:tên:|tên|ship|khách quen|người nhận|giao cho|ship cho|chuyển cho|cho|gửi cho|(?:cho|giao|gửi)?\s*(?:ông|bà|anh|chị|em|chú|cô|bác))\s+([\p{{L}}\s]{{2,30}}?){boundary}"
                ),
                1,
            )
            .with_boundary(2)
            .with_guard(not_product_start),
            PatternRule::new(
                r"(?i)(?:^|\s)(?:gửi tới|tên[:\s]*)([\p{L}\s]{2,30}?)(\s*[,:.\n–—-]|$)",
                1,
            )
            .with_boundary(2),
            PatternRule::new(
                r"(?i)(?:^|\s)(?:giao tới|ship tới|chuyển tới|gửi tới)\s+((?:ông|bà|anh|chị|em|chú|cô|bác)\s+[\p{L}\s]{2,25}?)(\s*[,.:0-9\n–—-]|$)",
                1,
            )
            .with_boundary(2)
            .with_guard(not_followed_by_admin),
            PatternRule::new(
                r"(?i)(?:^|\s)(?:ship tới|giao tới|chuyển tới|gửi tới)\s+((?:ông|bà|anh|chị|em|chú|cô|bác)\s+\p{L}{2,20})(\s*[,.:\n–—-]|$)",
                1,
            )
            .with_boundary(2),
            PatternRule::new(
                r"(?i)(?:^|\s)(?:cho|gửi cho|giao cho|ship cho)\s+([\p{L}\s]{1,30}?)(\s*[,:.\n–—-])",
                1,
            )
            .with_boundary(2),
        ];

        Self {
            policy,
            cascade: Cascade::new(rules),
        }
    }

    fn clean_candidate(&self, raw: &str) -> String {
        let name = raw.trim();
        let name = TRAILING_PARTICLE.replace(name, "");
        INNER_STOPWORDS.replace_all(&name, "").trim().to_string()
    }

    fn is_address_like(name: &str) -> bool {
        LOCATION_PREFIX.is_match(name) || LEADING_DIGIT.is_match(name)
    }

    fn fallback(&self, text: &str) -> FieldOutcome<String> {
        let Some(caps) = FALLBACK_LEADING_NAME.captures(text) else {
            return FieldOutcome::miss(text);
        };
        let full = caps.get(0).expect("group 0 always participates");

        let mut name = self.clean_candidate(&caps[1]);
        if Self::is_address_like(&name) {
            return FieldOutcome::miss(text);
        }
        if self.policy == Policy::Advanced {
            name = INNER_PREPOSITIONS.replace_all(&name, "").trim().to_string();
        }

        let residual = excise(text, (full.start(), full.end()));
        FieldOutcome::hit(name.clone(), name, residual)
    }
}

impl FieldExtractor for NameExtractor {
    type Value = String;

    fn extract(&self, text: &str) -> FieldOutcome<String> {
        let Some(hit) = self.cascade.first_hit(text) else {
            return self.fallback(text);
        };

        let name = self.clean_candidate(&hit.value);

        let blacklisted = NAME_BLACKLIST.contains(&name.to_lowercase().as_str());
        let filler = self.policy == Policy::Advanced
            && NEGATIVE_FILLERS.iter().any(|re| re.is_match(&name));

        if filler {
            // Strip the filler span so it cannot confuse later stages.
            return FieldOutcome {
                raw: None,
                value: None,
                residual: excise(text, hit.consumed),
            };
        }

        if blacklisted || ASCII_LOWERCASE_ONLY.is_match(&name) || Self::is_address_like(&name)
        {
            return FieldOutcome::miss(text);
        }

        let name = TRAILING_PREPOSITION.replace(&name, "").trim().to_string();

        let residual = match self.policy {
            Policy::Basic => excise(text, hit.consumed),
            Policy::Advanced => {
                // Keep the anchor keyword in the residual; the address stage
                // may still need it. Only the name itself is removed.
                let (c_start, c_end) = hit.consumed;
                let (v_start, v_end) = hit.value_span;
                let segment =
                    format!("{}{}", &text[c_start..v_start], &text[v_end..c_end]);
                let mut out = String::with_capacity(text.len());
                out.push_str(&text[..c_start]);
                out.push_str(segment.trim());
                out.push_str(&text[c_end..]);
                out.trim().to_string()
            }
        };

        FieldOutcome::hit(name.clone(), name, residual)
    }
}
