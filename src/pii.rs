use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

pub const PII_ID_WIDTH: usize = 4;

/// Fixed PII categories, in masking precedence order: an earlier category
/// claims overlapping text before a later one gets to see it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PiiCategory {
    Email,
    Phone,
    CreditCard,
    Ssn,
}

impl PiiCategory {
    pub const ALL: [PiiCategory; 4] = [
        PiiCategory::Email,
        PiiCategory::Phone,
        PiiCategory::CreditCard,
        PiiCategory::Ssn,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PiiCategory::Email => "email",
            PiiCategory::Phone => "phone",
            PiiCategory::CreditCard => "credit_card",
            PiiCategory::Ssn => "ssn",
        }
    }

    #[must_use]
    pub fn pattern(self) -> &'static Regex {
        match self {
            PiiCategory::Email => &EMAIL_RE,
            PiiCategory::Phone => &PHONE_RE,
            PiiCategory::CreditCard => &CREDIT_CARD_RE,
            PiiCategory::Ssn => &SSN_RE,
        }
    }
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("email regex")
});

// International format: leading '+' then exactly 11 digits.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+\d{11}").expect("phone regex"));

static CREDIT_CARD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}-\d{4}-\d{4}-\d{4}").expect("credit card regex"));

static SSN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{3}-\d{2}-\d{4}").expect("ssn regex"));

pub static PII_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<<PII:\d{4}>>").expect("pii token regex"));

pub fn pii_token(id: usize) -> String {
    format!("<<PII:{id:0PII_ID_WIDTH$}>>")
}

/// Per-category PII values found in a text, left-to-right, captured before
/// any correction step runs. Built fresh per call and discarded after use.
#[derive(Clone, Debug, Default)]
pub struct PiiSnapshot {
    values: HashMap<PiiCategory, Vec<String>>,
}

impl PiiSnapshot {
    #[must_use]
    pub fn for_category(&self, category: PiiCategory) -> &[String] {
        self.values.get(&category).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.values.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        for cat in PiiCategory::ALL {
            let n = self.for_category(cat).len();
            if n > 0 {
                parts.push(format!("{}={n}", cat.name()));
            }
        }
        parts.join(" ")
    }
}

pub fn extract_pii(text: &str) -> PiiSnapshot {
    let mut values: HashMap<PiiCategory, Vec<String>> = HashMap::new();
    for cat in PiiCategory::ALL {
        let found: Vec<String> = cat
            .pattern()
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
        if !found.is_empty() {
            values.insert(cat, found);
        }
    }
    PiiSnapshot { values }
}

#[derive(Clone, Debug)]
pub struct PiiSpan {
    pub category: PiiCategory,
    pub token: String,
    pub original: String,
}

#[derive(Clone, Debug)]
pub struct MaskResult {
    pub text: String,
    pub map: HashMap<String, String>,
    pub spans: Vec<PiiSpan>,
}

/// Replaces every PII match with a unique placeholder token. Restoration is
/// exact token lookup, so later pipeline stages may reshape the surrounding
/// text freely as long as they leave the tokens themselves alone.
pub fn mask_pii(text: &str) -> MaskResult {
    let mut map: HashMap<String, String> = HashMap::new();
    let mut spans: Vec<PiiSpan> = Vec::new();
    let mut next_id: usize = 1;

    let mut masked = text.to_string();
    for cat in PiiCategory::ALL {
        masked = mask_category(&masked, cat, &mut next_id, &mut map, &mut spans);
    }

    MaskResult {
        text: masked,
        map,
        spans,
    }
}

// One category pass. Already-inserted tokens are carried through verbatim so
// a pattern can never match inside them.
fn mask_category(
    text: &str,
    category: PiiCategory,
    next_id: &mut usize,
    map: &mut HashMap<String, String>,
    spans: &mut Vec<PiiSpan>,
) -> String {
    let mask_plain = |plain: &str,
                      next_id: &mut usize,
                      map: &mut HashMap<String, String>,
                      spans: &mut Vec<PiiSpan>|
     -> String {
        if plain.is_empty() {
            return String::new();
        }
        let mut out = String::with_capacity(plain.len());
        let mut pos = 0usize;
        for m in category.pattern().find_iter(plain) {
            out.push_str(&plain[pos..m.start()]);
            let token = pii_token(*next_id);
            *next_id += 1;
            map.insert(token.clone(), m.as_str().to_string());
            spans.push(PiiSpan {
                category,
                token: token.clone(),
                original: m.as_str().to_string(),
            });
            out.push_str(&token);
            pos = m.end();
        }
        out.push_str(&plain[pos..]);
        out
    };

    let mut pieces: Vec<String> = Vec::new();
    let mut pos = 0usize;
    for m in PII_TOKEN_RE.find_iter(text) {
        pieces.push(mask_plain(&text[pos..m.start()], next_id, map, spans));
        pieces.push(m.as_str().to_string());
        pos = m.end();
    }
    pieces.push(mask_plain(&text[pos..], next_id, map, spans));
    pieces.concat()
}

pub fn unmask_pii(text: &str, map: &HashMap<String, String>) -> String {
    if map.is_empty() || text.is_empty() {
        return text.to_string();
    }
    PII_TOKEN_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let tok = caps.get(0).map_or("", |m| m.as_str());
            map.get(tok).cloned().unwrap_or_else(|| tok.to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Mail a@b.com, call +12345678901, card 1234-5678-9012-3456, ssn 321-54-9876.";

    #[test]
    fn extraction_is_category_scoped_and_ordered() {
        let snap = extract_pii(SAMPLE);
        assert_eq!(snap.for_category(PiiCategory::Email), ["a@b.com"]);
        assert_eq!(snap.for_category(PiiCategory::Phone), ["+12345678901"]);
        assert_eq!(
            snap.for_category(PiiCategory::CreditCard),
            ["1234-5678-9012-3456"]
        );
        assert_eq!(snap.for_category(PiiCategory::Ssn), ["321-54-9876"]);
        assert_eq!(snap.total(), 4);
    }

    #[test]
    fn extraction_preserves_left_to_right_order_within_category() {
        let snap = extract_pii("first a@b.com then c@d.org");
        assert_eq!(snap.for_category(PiiCategory::Email), ["a@b.com", "c@d.org"]);
    }

    #[test]
    fn mask_replaces_every_value_with_a_unique_token() {
        let masked = mask_pii(SAMPLE);
        assert_eq!(masked.spans.len(), 4);
        assert!(!masked.text.contains("a@b.com"));
        assert!(!masked.text.contains("+12345678901"));
        assert!(!masked.text.contains("1234-5678-9012-3456"));
        assert!(!masked.text.contains("321-54-9876"));
        assert_eq!(PII_TOKEN_RE.find_iter(&masked.text).count(), 4);
        let mut tokens: Vec<&str> = masked.spans.iter().map(|s| s.token.as_str()).collect();
        tokens.dedup();
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn mask_then_unmask_round_trips() {
        let masked = mask_pii(SAMPLE);
        assert_eq!(unmask_pii(&masked.text, &masked.map), SAMPLE);
    }

    #[test]
    fn unmask_leaves_unknown_tokens_in_place() {
        let map = HashMap::new();
        assert_eq!(unmask_pii("x <<PII:0042>> y", &map), "x <<PII:0042>> y");
    }

    #[test]
    fn text_without_pii_is_untouched() {
        let masked = mask_pii("nothing sensitive here");
        assert_eq!(masked.text, "nothing sensitive here");
        assert!(masked.map.is_empty());
        assert!(extract_pii("nothing sensitive here").is_empty());
    }

    #[test]
    fn snapshot_summary_lists_nonzero_categories() {
        let snap = extract_pii("a@b.com and +12345678901");
        assert_eq!(snap.summary(), "email=1 phone=1");
    }
}
