use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Boundary contract for the grammar-checking service. Suggestions come back
/// as character-indexed spans; `apply_corrections` splices them in.
pub trait GrammarCheck {
    fn check(&self, text: &str) -> anyhow::Result<Vec<GrammarMatch>>;
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Replacement {
    #[serde(default)]
    pub value: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MatchRule {
    #[serde(default)]
    pub id: String,
}

/// One correction suggested by the checker. `offset` and `length` are in
/// characters, not bytes.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GrammarMatch {
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub length: usize,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub rule: MatchRule,
}

#[derive(Deserialize, Default)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<GrammarMatch>,
}

/// Blocking client for a LanguageTool-compatible server (`POST
/// {base}/v2/check`). One session, constructed once at startup and reused
/// sequentially; the constructor probes the server so a dead endpoint fails
/// before any translation work starts. Not meant for concurrent callers.
pub struct LanguageToolClient {
    http: reqwest::blocking::Client,
    base_url: String,
    language: String,
}

impl LanguageToolClient {
    pub fn connect(base_url: &str, language: &str) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("build http client")?;
        let client = Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        };
        client
            .request(" ")
            .with_context(|| format!("grammar checker unreachable: {}", client.base_url))?;
        Ok(client)
    }

    fn request(&self, text: &str) -> anyhow::Result<CheckResponse> {
        let url = format!("{}/v2/check", self.base_url);
        let resp = self
            .http
            .post(&url)
            .form(&[("text", text), ("language", self.language.as_str())])
            .send()
            .with_context(|| format!("post grammar check: {url}"))?
            .error_for_status()
            .context("grammar check status")?;
        resp.json().context("parse grammar check response")
    }
}

impl GrammarCheck for LanguageToolClient {
    fn check(&self, text: &str) -> anyhow::Result<Vec<GrammarMatch>> {
        Ok(self.request(text)?.matches)
    }
}

/// Checker that suggests nothing. Used for offline runs.
pub struct NoopChecker;

impl GrammarCheck for NoopChecker {
    fn check(&self, _text: &str) -> anyhow::Result<Vec<GrammarMatch>> {
        Ok(Vec::new())
    }
}

/// Applies every suggestion, first replacement wins. Matches are taken in
/// offset order; a match overlapping an already-applied one is dropped, as is
/// anything out of range or without a replacement.
pub fn apply_corrections(text: &str, matches: &[GrammarMatch]) -> String {
    if matches.is_empty() {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    let mut ordered: Vec<&GrammarMatch> = matches
        .iter()
        .filter(|m| m.length > 0 && !m.replacements.is_empty())
        .collect();
    ordered.sort_by_key(|m| (m.offset, m.length));

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for m in ordered {
        let end = m.offset.saturating_add(m.length);
        if m.offset < cursor || end > chars.len() {
            continue;
        }
        out.extend(&chars[cursor..m.offset]);
        out.push_str(&m.replacements[0].value);
        cursor = end;
    }
    out.extend(&chars[cursor..]);
    out
}
