//! Product-description extraction.
//!
//! The widest cascade in the pipeline: explicit keywords, sending verbs,
//! quantity+unit phrases, size suffixes, sentence-initial phrases and a
//! weight-adjacent fallback evaluated up to three times with different
//! post-filters. A candidate that survives the cascade must still prove it
//! carries specific content before it is accepted.

use lazy_static::lazy_static;
use regex::Regex;

use super::cascade::{excise, Cascade, PatternRule, RuleHit};
use super::lexicon::{
    excluded_order_phrases, generic_filler_words, measure_units, natural_phrases,
    product_boundary_keywords, product_units, Lexicon,
};
use super::patterns::{NO_COD_CLAUSE, POLITE_FILLER, TRAILING_PARTICLES};
use super::{FieldExtractor, FieldOutcome};
use crate::order::Policy;

lazy_static! {
    // Short filler shapes that cannot be a product name.
    static ref INVALID_PHRASES: Vec<Regex> = [
        r"(?i)^nha\s+\w+$",
        r"(?i)^\w+\s+nha$",
        r"(?i)^nha$",
        r"(?i)^ạ$",
        r"^[a-z]{1,3}$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref SHORT_PREPOSITION: Regex =
        Regex::new(r"(?i)^(?:cho|của|với|từ|tới|về)$").unwrap();
}

/// The weight-adjacent fallback runs in three passes with different filters.
#[derive(Clone, Copy, PartialEq)]
enum AfterWeightPass {
    /// Reject phrases that contain a field-boundary keyword.
    KeywordFiltered,
    /// Particle-stripped (Advanced also rejects short filler phrases).
    ParticleStripped,
    /// Last resort: takes the unit capture as the candidate value.
    UnitValue,
}

/// Product field extractor.
pub struct ProductExtractor {
    policy: Policy,
    main_cascade: Cascade,
    late_cascade: Cascade,
    after_weight: Regex,
    boundary_keyword: Regex,
    weight_only: Regex,
    final_particles: Regex,
    no_cod: Regex,
    excluded: Lexicon,
    generic: Lexicon,
    natural: Lexicon,
}

impl ProductExtractor {
    pub fn new(policy: Policy) -> Self {
        let boundary_kw = product_boundary_keywords().alternation();
        let bound = format!(r"(\s*(?:{boundary_kw}|,|\.|$))");
        let units = product_units(policy).alternation();
        let wunits = measure_units(policy).alternation();

        let primary = PatternRule::new(
            &format!(r"(?i)(?:sp|tên sản phẩm|sản phẩm)\s+([^\d,.]{{2,100}}?){bound}"),
            1,
        )
        .with_boundary(2);
        let verb = PatternRule::new(
            &format!(
                r"(?i)(?:gửi|ship|khách lấy)\s*(?:\d+|một|vài|mấy)?\s+([^\d,.]{{2,100}}?){bound}"
            ),
            1,
        )
        .with_boundary(2);
        let unit = PatternRule::new(
            &format!(r"(?i)(\d+\s*(?:{units})\s+[a-zA-ZÀ-ỹ\s]+?){bound}"),
            1,
        )
        .with_boundary(2);
        let unit_no_number = PatternRule::new(
            &format!(r"(?i)\b((?:{units})\s+[a-zA-ZÀ-ỹ\s]{{2,50}}?){bound}"),
            1,
        )
        .with_boundary(2);
        let after_period = PatternRule::new(
            &format!(
                r"(?i)\.\s*([A-ZÀ-Ỹ][a-zA-ZÀ-ỹ\s]*(?:{units})[a-zA-ZÀ-ỹ\s]*){bound}"
            ),
            1,
        )
        .with_boundary(2);

        let main_cascade = match policy {
            Policy::Basic => Cascade::new(vec![primary, verb, unit, unit_no_number, after_period]),
            Policy::Advanced => {
                Cascade::new(vec![unit, unit_no_number, primary, verb, after_period])
            }
        };

        let late_cascade = Cascade::new(vec![
            PatternRule::new(
                &format!(r"(?i)chuyển\s*(?:\d+|một|vài|mấy)?\s+([^\d,.]{{2,100}}?){bound}"),
                1,
            )
            .with_boundary(2),
            PatternRule::new(
                &format!(r"(?i)\b([^\d,.]{{2,100}}?\s*size\s*\d+){bound}"),
                1,
            )
            .with_boundary(2),
        ]);

        let final_particles = match policy {
            Policy::Basic => Regex::new(r"(?i)\s*(?:với nha|nha|nhé|ạ|à)$").unwrap(),
            Policy::Advanced => Regex::new(r"(?i)\s*(?:với nha|nha|nhé|ạ|à|ship)$").unwrap(),
        };

        let no_cod = match policy {
            Policy::Basic => NO_COD_CLAUSE.clone(),
            Policy::Advanced => Regex::new(
                r"(?i)\.*\s*không thu hộ|không thu tiền|không lấy tiền|giúp đơn\s*\.?$",
            )
            .unwrap(),
        };

        Self {
            policy,
            main_cascade,
            late_cascade,
            after_weight: Regex::new(&format!(
                r"(?i)\b\d+(?:\.\d+)?\s*({wunits})\s+([a-zA-ZÀ-ỹ\s]{{2,50}}?){bound}"
            ))
            .unwrap(),
            boundary_keyword: Regex::new(&format!(r"(?i)\b(?:{boundary_kw})\b")).unwrap(),
            weight_only: Regex::new(&format!(r"(?i)^\d+(?:\.\d+)?\s*(?:{wunits})$")).unwrap(),
            final_particles,
            no_cod,
            excluded: excluded_order_phrases(),
            generic: generic_filler_words(),
            natural: natural_phrases(),
        }
    }

    /// A phrase is a product only if some word outside the generic filler
    /// set carries actual content.
    fn is_valid_product(&self, text: &str) -> bool {
        let trimmed = text.trim();
        let lower = trimmed.to_lowercase();

        if self.weight_only.is_match(&lower) {
            return false;
        }

        let excluded = self
            .excluded
            .iter()
            .any(|p| lower == p || lower.contains(p));
        match self.policy {
            Policy::Basic if excluded => return false,
            Policy::Advanced if excluded && lower.split_whitespace().count() <= 2 => {
                return false
            }
            _ => {}
        }

        lower.split_whitespace().any(|word| {
            !self.generic.contains(word)
                && word.chars().count() > 2
                && !SHORT_PREPOSITION.is_match(word)
        })
    }

    fn finish(&self, original: &str, working: &str, hit: &RuleHit) -> FieldOutcome<String> {
        let value = self
            .final_particles
            .replace(hit.value.trim(), "")
            .trim()
            .to_string();

        if !self.is_valid_product(&value) {
            return FieldOutcome::miss(original);
        }

        let value = self.no_cod.replace(&value, "").trim().to_string();
        FieldOutcome {
            raw: Some(value.clone()),
            value: Some(value),
            residual: excise(working, hit.consumed),
        }
    }

    fn after_weight_pass(
        &self,
        working: &str,
        pass: AfterWeightPass,
    ) -> Option<FieldOutcome<String>> {
        let caps = self.after_weight.captures(working)?;
        let full = caps.get(0).expect("group 0 always participates");
        let consumed_end = caps.get(3).map_or(full.end(), |b| b.start());
        let full_str = &working[full.start()..consumed_end];
        let phrase = caps[2].trim().to_string();

        let name = match pass {
            AfterWeightPass::KeywordFiltered => {
                if !self.is_valid_product(&phrase)
                    || self.boundary_keyword.is_match(&phrase)
                    || (self.policy == Policy::Advanced && self.natural.contains(&phrase))
                {
                    return None;
                }
                phrase
            }
            AfterWeightPass::ParticleStripped => {
                let stripped = TRAILING_PARTICLES.replace(&phrase, "").trim().to_string();
                let candidate = match self.policy {
                    Policy::Basic => phrase,
                    Policy::Advanced => stripped,
                };
                if !self.is_valid_product(&candidate) {
                    return None;
                }
                if self.policy == Policy::Advanced
                    && INVALID_PHRASES.iter().any(|re| re.is_match(&candidate))
                {
                    return None;
                }
                candidate
            }
            AfterWeightPass::UnitValue => {
                let unit = TRAILING_PARTICLES.replace(caps[1].trim(), "").trim().to_string();
                if !self.is_valid_product(&unit) {
                    return None;
                }
                let residual = working.replacen(full_str, "", 1).trim().to_string();
                return Some(FieldOutcome {
                    raw: Some(unit.clone()),
                    value: Some(unit),
                    residual,
                });
            }
        };

        // Keep the weight portion in place for the weight stage.
        let weight_info = full_str.replacen(&name, "", 1).trim().to_string();
        let residual = working.replacen(full_str, &weight_info, 1);
        Some(FieldOutcome {
            raw: Some(name.clone()),
            value: Some(name),
            residual,
        })
    }
}

impl FieldExtractor for ProductExtractor {
    type Value = String;

    fn extract(&self, text: &str) -> FieldOutcome<String> {
        let working = POLITE_FILLER.replace_all(text, "").into_owned();

        if let Some(hit) = self.main_cascade.first_hit(&working) {
            return self.finish(text, &working, &hit);
        }

        let mut candidate = self.after_weight_pass(&working, AfterWeightPass::KeywordFiltered);

        if let Some(hit) = self.late_cascade.first_hit(&working) {
            return self.finish(text, &working, &hit);
        }

        if let Some(out) = self.after_weight_pass(&working, AfterWeightPass::ParticleStripped) {
            candidate = Some(out);
        }
        if let Some(out) = self.after_weight_pass(&working, AfterWeightPass::UnitValue) {
            candidate = Some(out);
        }

        candidate.unwrap_or_else(|| FieldOutcome::miss(text))
    }
}
