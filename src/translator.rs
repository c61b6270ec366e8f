use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Boundary contract for the machine-translation service. One string in, one
/// string out; the first candidate is used even when the backend could return
/// several.
pub trait Translate {
    fn translate(&self, text: &str, source_lang: &str, target_lang: &str)
        -> anyhow::Result<String>;
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize, Default)]
struct TranslateResponse {
    #[serde(rename = "translatedText", default)]
    translated_text: String,
}

/// Blocking client for a LibreTranslate-compatible endpoint
/// (`POST {base}/translate`).
pub struct HttpTranslator {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTranslator {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Translate for HttpTranslator {
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> anyhow::Result<String> {
        let url = format!("{}/translate", self.base_url);
        let body = TranslateRequest {
            q: text,
            source: source_lang,
            target: target_lang,
            format: "text",
        };
        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .with_context(|| format!("post translate: {url}"))?
            .error_for_status()
            .context("translate status")?;
        let parsed: TranslateResponse = resp.json().context("parse translate response")?;
        Ok(parsed.translated_text)
    }
}
