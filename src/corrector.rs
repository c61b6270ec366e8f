use crate::grammar::{apply_corrections, GrammarCheck};
use crate::numerals::transliterate_outside_tokens;
use crate::pii::{extract_pii, mask_pii, unmask_pii, PII_TOKEN_RE};
use crate::progress::ConsoleProgress;
use crate::rules::{apply_rules, CorrectionRule};

/// Post-processes translated text: regex substitution rules, numeral
/// localization, grammar correction, all under a PII mask so the original
/// values come back out verbatim at the end.
///
/// The checker is injected so callers (and tests) pick the session; one
/// instance is expected to be built at startup and reused for every call.
pub struct TranslationCorrector {
    rules: Vec<CorrectionRule>,
    checker: Box<dyn GrammarCheck>,
}

impl TranslationCorrector {
    pub fn new(rules: Vec<CorrectionRule>, checker: Box<dyn GrammarCheck>) -> Self {
        Self { rules, checker }
    }

    pub fn correct(&self, text: &str, progress: &ConsoleProgress) -> anyhow::Result<String> {
        let snapshot = extract_pii(text);
        if !snapshot.is_empty() {
            progress.info(format!("PII found: {}", snapshot.summary()));
        }

        let masked = mask_pii(text);
        let substituted = apply_rules(&masked.text, &self.rules, progress);
        let localized = transliterate_outside_tokens(&substituted);

        let matches = self.checker.check(&localized)?;
        let corrected = apply_corrections(&localized, &matches);

        let surviving = PII_TOKEN_RE
            .find_iter(&corrected)
            .filter(|m| masked.map.contains_key(m.as_str()))
            .count();
        if surviving < masked.map.len() {
            progress.warn(format!(
                "{} of {} PII placeholder(s) lost during correction",
                masked.map.len() - surviving,
                masked.map.len()
            ));
        }

        Ok(unmask_pii(&corrected, &masked.map))
    }
}
