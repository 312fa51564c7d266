//! Keyword lexicons backing the extraction rules.
//!
//! Each lexicon is an immutable, ordered list of keyword entries, built per
//! [`Policy`] preset and injected into its extractor at construction.
//! Ordering matters twice: keyword-loop extractors try entries top to
//! bottom, and alternations preserve entry order. Entries are regex-ready;
//! the few non-literal ones (`q\.`, `q[0-9]`, …) carry their own escaping.

use crate::order::Policy;

/// An ordered, immutable keyword list.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<&'static str>,
}

impl Lexicon {
    pub fn new(entries: Vec<&'static str>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().copied()
    }

    /// Join the entries into a regex alternation, preserving order.
    pub fn alternation(&self) -> String {
        self.entries.join("|")
    }

    /// Case-insensitive exact membership.
    pub fn contains(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.entries.iter().any(|e| e.to_lowercase() == lower)
    }
}

/// Phone-context keywords.
pub fn phone_keywords() -> Lexicon {
    Lexicon::new(vec![
        "sđt",
        "số điện thoại",
        "điện thoại",
        "phone",
        "so dien thoai",
        "dien thoai",
        "sdt",
        "dthoai",
        "gửi tới số điện thoại",
        "ship giúp",
    ])
}

/// COD-context keywords. Case folding makes the Advanced preset's extra
/// lowercase spellings redundant, so one list serves both policies.
pub fn cod_keywords(_policy: Policy) -> Lexicon {
    Lexicon::new(vec![
        "thu hộ",
        "thu",
        "cod",
        "tiền thu",
        "tiền thu hộ",
        "cần thu",
        "khách trả",
        "khách thanh toán",
        "giá tiền",
        "tổng tiền",
        "thành tiền",
        "th",
    ])
}

/// Declared-value keywords.
pub fn value_keywords() -> Lexicon {
    Lexicon::new(vec![
        "giá trị",
        "value",
        "giatri",
        "gt",
        "gtri",
        "tiền hàng",
        "tien hang",
    ])
}

/// Weight-context keywords.
pub fn weight_keywords(policy: Policy) -> Lexicon {
    let mut entries = vec!["khối lượng", "trọng lượng", "cân nặng", "kl", "nặng"];
    if policy == Policy::Basic {
        entries.extend(["ký", "cân"]);
    }
    Lexicon::new(entries)
}

/// Units accepted by the weight extractor itself.
pub fn weight_units() -> Lexicon {
    Lexicon::new(vec!["kg", "g", "gram", "gam", "gr", "ký", "cân", "lạng"])
}

/// Units-of-measure the product extractor must not mistake for a product.
pub fn measure_units(policy: Policy) -> Lexicon {
    let mut entries = vec![
        "kg", "kilogram", "g", "gram", "l", "lit", "lít", "tấn", "yến", "lạng",
    ];
    if policy == Policy::Advanced {
        entries.extend(["ký", "kilo", "gam", "cân"]);
    }
    Lexicon::new(entries)
}

/// Countable product-unit nouns (thùng bia, hộp bánh, …).
pub fn product_units(policy: Policy) -> Lexicon {
    let mut entries = vec![
        "thùng", "hộp", "chai", "bịch", "cây", "cục", "lọ", "gói", "bó", "túi",
        "thẻ", "vỉ", "kiện", "xấp", "đôi", "cái", "chiếc", "quả", "hạt", "trái",
    ];
    if policy == Policy::Advanced {
        entries.extend(["quần", "áo", "khăn", "thúng"]);
    }
    Lexicon::new(entries)
}

/// Field-boundary keywords that terminate a product phrase.
pub fn product_boundary_keywords() -> Lexicon {
    Lexicon::new(vec![
        "về",
        "cho",
        "tới",
        "địa chỉ",
        "gửi về",
        "đến",
        "giao tại",
        "ship về",
        "người nhận",
        "số điện thoại",
        "thu hộ",
        "khối lượng",
        "mã đơn",
        "mã vận đơn",
        "với nha",
        "nha",
        "nhé",
        "ạ",
        "ship tới",
    ])
}

/// Generic order-reference phrases that are never a product by themselves.
pub fn excluded_order_phrases() -> Lexicon {
    Lexicon::new(vec![
        "đơn hàng này",
        "đơn hàng đó",
        "đơn này",
        "đơn đó",
        "đơn hàng",
        "kiện hàng này",
        "kiện hàng đó",
        "kiện này",
        "kiện đó",
        "package này",
        "package đó",
        "hàng này",
        "hàng đó",
        "món này",
        "món đó",
        "cái này",
        "cái đó",
        "thứ này",
        "thứ đó",
    ])
}

/// Filler words carrying no product content.
pub fn generic_filler_words() -> Lexicon {
    Lexicon::new(vec!["này", "đó", "đây", "kia", "đơn", "hàng", "kiện"])
}

/// Conversational tail phrases that cannot be a product (Advanced only).
pub fn natural_phrases() -> Lexicon {
    Lexicon::new(vec![
        "nhe", "nhé", "ạ", "à", "với nha", "nha", "nhe a", "nhé a", "nhe anh",
        "nhé anh", "nhanh", "lâu", "chậm", "luôn", "luôn nha", "đó",
    ])
}

/// Administrative/location prefixes that disqualify a name candidate.
/// Entries are regex fragments, anchored by the caller.
pub fn location_prefixes() -> Lexicon {
    Lexicon::new(vec![
        "số",
        "đường",
        "phường",
        "quận",
        "huyện",
        "thành phố",
        "tỉnh",
        "khu",
        "tòa",
        "lầu",
        "tầng",
        "căn",
        "chung cư",
        "kdc",
        "kcn",
        r"q\.",
        r"p\.",
        r"tp\.",
        "q[0-9]",
        "p[0-9]",
        "f[0-9]",
        r"[0-9]+[a-zA-Z]?\s*(?:đường|phố)",
    ])
}

/// Address-context keywords, scanned for anchor occurrences.
pub fn address_keywords(policy: Policy) -> Lexicon {
    let mut entries = Vec::new();
    if policy == Policy::Advanced {
        entries.extend(["nhà", "ở"]);
    }
    entries.extend([
        "địa chỉ:",
        "địa chỉ",
        "dc",
        "dia chi",
        "gửi về",
        "giao đến",
        "giao tại",
        "tới",
        "về",
        "giao gấp",
        "chuyển tới",
        "gửi tới địa chỉ",
        "gửi",
        "tại",
        "ở",
        "đến",
        "giao hàng",
        "đơn",
        "em",
        "cho",
        "ship",
        "hàng này",
        "cũ",
    ]);
    if policy == Policy::Advanced {
        entries.push(r"số\s*");
    }
    Lexicon::new(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_preserved_in_alternation() {
        let lex = cod_keywords(Policy::Basic);
        assert!(lex.alternation().starts_with("thu hộ|thu|cod"));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let lex = value_keywords();
        assert!(lex.contains("GT"));
        assert!(!lex.contains("cod"));
    }

    #[test]
    fn test_policy_widens_product_units() {
        assert!(!product_units(Policy::Basic).contains("áo"));
        assert!(product_units(Policy::Advanced).contains("áo"));
    }
}
