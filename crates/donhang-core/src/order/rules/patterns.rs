//! Regex patterns shared across extraction rules.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A bare amount-like token: grouped-thousands numeral or decimal,
    /// suffixed with a currency/scale unit.
    pub static ref BARE_AMOUNT_TOKEN: Regex = Regex::new(
        r"(?i)\b(\d{1,3}(?:[.,]\d{3})+|\d+(?:[.,]\d+)?)(\s?(?:k|nghìn|ngàn|triệu|tr\b|đ|vnđ))\b"
    ).unwrap();

    /// Declared-value keyword occurrence, for COD/value disambiguation.
    pub static ref VALUE_KEYWORD: Regex = Regex::new(
        r"(?i)\b(?:giá trị|value|giatri|gt|gtri|tiền hàng|tien hang)\b"
    ).unwrap();

    /// Trailing "no COD" clauses stripped from product and address values.
    pub static ref NO_COD_CLAUSE: Regex = Regex::new(
        r"(?i)\.*\s*không thu hộ|không thu tiền|không lấy tiền"
    ).unwrap();

    /// Trailing politeness particles.
    pub static ref TRAILING_PARTICLES: Regex = Regex::new(
        r"(?i)\s*(?:với nha|nha|nhé|ạ|à)$"
    ).unwrap();

    /// Politeness filler removed before product matching.
    pub static ref POLITE_FILLER: Regex = Regex::new(
        r"(?i)\b(?:giúp em|nhờ|làm ơn|xin|vui lòng)\b"
    ).unwrap();
}
