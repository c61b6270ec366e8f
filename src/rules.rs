use std::path::Path;

use regex::Regex;

use crate::progress::ConsoleProgress;

/// One substitution rule from the correction file. `original` is a regex
/// pattern, not a literal: authors must escape metacharacters themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorrectionRule {
    pub original: String,
    pub replacement: String,
}

/// Reads `tag=original=replacement` lines into an ordered rule list.
///
/// Comment lines (`#`) and lines without exactly two `=` separators are
/// skipped without comment. A missing file is a warning, not an error: the
/// pipeline runs with no rules.
pub fn load_correction_rules(path: &Path, progress: &ConsoleProgress) -> Vec<CorrectionRule> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => {
            progress.warn(format!("rules file not found: {}", path.display()));
            return Vec::new();
        }
    };

    let mut rules = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split('=').collect();
        if parts.len() != 3 {
            continue;
        }
        // parts[0] is the rule tag, kept only for file readability.
        rules.push(CorrectionRule {
            original: parts[1].trim().to_string(),
            replacement: parts[2].trim().to_string(),
        });
    }
    rules
}

/// Applies the rules in list order, each as a global regex substitution over
/// the output of the previous one. A pattern that fails to compile is skipped
/// with a warning.
pub fn apply_rules(text: &str, rules: &[CorrectionRule], progress: &ConsoleProgress) -> String {
    let mut out = text.to_string();
    for rule in rules {
        match Regex::new(&rule.original) {
            Ok(re) => out = re.replace_all(&out, rule.replacement.as_str()).into_owned(),
            Err(err) => progress.warn(format!("skip rule '{}': {err}", rule.original)),
        }
    }
    out
}
