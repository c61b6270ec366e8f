use crate::pii::PII_TOKEN_RE;

const ARABIC_INDIC: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

#[inline]
fn arabic_indic(ch: char) -> char {
    match ch.to_digit(10) {
        Some(d) => ARABIC_INDIC[d as usize],
        None => ch,
    }
}

/// Converts ASCII digits 0-9 to Arabic-Indic glyphs, character by character.
/// Every other character passes through unchanged.
pub fn english_to_arabic_numerals(text: &str) -> String {
    text.chars().map(arabic_indic).collect()
}

/// Same conversion, but spans matching the PII placeholder pattern are kept
/// verbatim so their numeric ids stay resolvable at unmask time.
pub fn transliterate_outside_tokens(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(text.len());
    let mut pos = 0usize;
    for m in PII_TOKEN_RE.find_iter(text) {
        out.push_str(&english_to_arabic_numerals(&text[pos..m.start()]));
        out.push_str(m.as_str());
        pos = m.end();
    }
    out.push_str(&english_to_arabic_numerals(&text[pos..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_in_order() {
        assert_eq!(english_to_arabic_numerals("0123456789"), "٠١٢٣٤٥٦٧٨٩");
    }

    #[test]
    fn non_digits_pass_through() {
        assert_eq!(
            english_to_arabic_numerals("room 42, floor 7"),
            "room ٤٢, floor ٧"
        );
    }

    #[test]
    fn second_application_is_a_noop() {
        let once = english_to_arabic_numerals("price: 1999");
        let twice = english_to_arabic_numerals(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn placeholder_tokens_keep_ascii_ids() {
        let text = "call 911 or <<PII:0001>> now";
        assert_eq!(
            transliterate_outside_tokens(text),
            "call ٩١١ or <<PII:0001>> now"
        );
    }

    #[test]
    fn adjacent_tokens_survive() {
        let text = "<<PII:0001>><<PII:0002>>";
        assert_eq!(transliterate_outside_tokens(text), text);
    }
}
