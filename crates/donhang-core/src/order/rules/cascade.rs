//! Shared first-match-wins pattern-cascade engine.
//!
//! Every extractor describes its candidate patterns as an ordered list of
//! [`PatternRule`]s and evaluates them through one [`Cascade`]. A rule may
//! name a *boundary* capture group: text the pattern must see after the
//! value but must not consume. The engine excises only the span up to the
//! boundary start, so boundary text stays in the residual for later stages.

use regex::{Captures, Regex};

/// Position-level guard applied to each candidate occurrence. Returning
/// `false` rejects the occurrence and lets the engine try the next one.
pub type RuleGuard = fn(&Captures, &str) -> bool;

/// One candidate pattern in a cascade.
pub struct PatternRule {
    regex: Regex,
    value_group: usize,
    boundary_group: Option<usize>,
    guard: Option<RuleGuard>,
}

impl PatternRule {
    /// Compile a rule whose `value_group` capture is the field value.
    pub fn new(pattern: &str, value_group: usize) -> Self {
        Self {
            regex: Regex::new(pattern).expect("invalid cascade pattern"),
            value_group,
            boundary_group: None,
            guard: None,
        }
    }

    /// Mark a capture group as the non-consumed trailing boundary.
    pub fn with_boundary(mut self, group: usize) -> Self {
        self.boundary_group = Some(group);
        self
    }

    /// Attach an occurrence guard.
    pub fn with_guard(mut self, guard: RuleGuard) -> Self {
        self.guard = Some(guard);
        self
    }
}

/// A successful cascade evaluation.
#[derive(Debug, Clone)]
pub struct RuleHit {
    /// Index of the rule that matched, in cascade order.
    pub rule_index: usize,
    /// The captured field value.
    pub value: String,
    /// Byte span of the captured value.
    pub value_span: (usize, usize),
    /// Byte span consumed from the text (match minus boundary).
    pub consumed: (usize, usize),
}

/// Ordered list of candidate patterns, evaluated first-match-wins.
pub struct Cascade {
    rules: Vec<PatternRule>,
}

impl Cascade {
    pub fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    /// Evaluate the cascade over `text`. Rules are tried top to bottom; for
    /// each rule, occurrences are tried left to right until the guard (if
    /// any) accepts one.
    pub fn first_hit(&self, text: &str) -> Option<RuleHit> {
        for (rule_index, rule) in self.rules.iter().enumerate() {
            for caps in rule.regex.captures_iter(text) {
                if let Some(guard) = rule.guard {
                    if !guard(&caps, text) {
                        continue;
                    }
                }

                let full = caps.get(0).expect("group 0 always participates");
                let value = caps
                    .get(rule.value_group)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                let value_span = caps
                    .get(rule.value_group)
                    .map(|m| (m.start(), m.end()))
                    .unwrap_or((full.start(), full.start()));

                let consumed_end = rule
                    .boundary_group
                    .and_then(|g| caps.get(g))
                    .map(|b| b.start())
                    .unwrap_or_else(|| full.end());

                return Some(RuleHit {
                    rule_index,
                    value,
                    value_span,
                    consumed: (full.start(), consumed_end),
                });
            }
        }
        None
    }
}

/// Remove a byte span from `text` and trim the result.
pub fn excise(text: &str, span: (usize, usize)) -> String {
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..span.0]);
    out.push_str(&text[span.1..]);
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_boundary_group_not_consumed() {
        let cascade = Cascade::new(vec![PatternRule::new(
            r"(?i)gửi\s+([^\d,]{2,30}?)(\s*(?:về|cho)|$)",
            1,
        )
        .with_boundary(2)]);

        let hit = cascade.first_hit("gửi bánh kem về 12 Hàng Bài").unwrap();
        assert_eq!(hit.value, "bánh kem");

        let residual = excise("gửi bánh kem về 12 Hàng Bài", hit.consumed);
        assert_eq!(residual, "về 12 Hàng Bài");
    }

    #[test]
    fn test_rules_tried_in_order() {
        let cascade = Cascade::new(vec![
            PatternRule::new(r"first (\w+)", 1),
            PatternRule::new(r"second (\w+)", 1),
        ]);

        let hit = cascade.first_hit("second a first b").unwrap();
        assert_eq!(hit.rule_index, 0);
        assert_eq!(hit.value, "b");
    }

    #[test]
    fn test_guard_rejects_occurrence() {
        fn not_x(caps: &Captures, _text: &str) -> bool {
            &caps[1] != "x"
        }

        let cascade =
            Cascade::new(vec![PatternRule::new(r"item (\w+)", 1).with_guard(not_x)]);

        let hit = cascade.first_hit("item x item y").unwrap();
        assert_eq!(hit.value, "y");
    }
}
