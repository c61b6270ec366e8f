use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::Deserialize;

pub const CONFIG_FILENAME: &str = "tarjoman.toml";

pub const DEFAULT_TRANSLATOR_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_GRAMMAR_URL: &str = "http://127.0.0.1:8010";
pub const DEFAULT_SOURCE_LANG: &str = "en";
pub const DEFAULT_TARGET_LANG: &str = "ar";
/// Default rules location when neither config nor CLI provide one.
pub const DEFAULT_RULES_PATH: &str = "datasets/correction-rules.txt";

const DEFAULT_CONFIG_TOML: &str = r#"# tarjoman configuration

[translator]
# LibreTranslate-compatible endpoint.
url = "http://127.0.0.1:5000"
source_lang = "en"
target_lang = "ar"

[grammar]
# LanguageTool-compatible endpoint.
url = "http://127.0.0.1:8010"
language = "ar"

[rules]
# Correction rules file, one `tag=original=replacement` per line.
path = "datasets/correction-rules.txt"
"#;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub translator: TranslatorSection,
    #[serde(default)]
    pub grammar: GrammarSection,
    #[serde(default)]
    pub rules: RulesSection,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct TranslatorSection {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub source_lang: Option<String>,
    #[serde(default)]
    pub target_lang: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct GrammarSection {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct RulesSection {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Effective settings after layering CLI arguments over the config file over
/// built-in defaults.
#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub translator_url: String,
    pub source_lang: String,
    pub target_lang: String,
    pub grammar_url: String,
    pub grammar_language: String,
    pub rules_path: PathBuf,
}

impl ResolvedConfig {
    pub fn from_config_and_args(
        cfg: &AppConfig,
        translator_url: Option<String>,
        source_lang: Option<String>,
        target_lang: Option<String>,
        grammar_url: Option<String>,
        rules_path: Option<PathBuf>,
    ) -> Self {
        let target_lang = target_lang
            .or_else(|| cfg.translator.target_lang.clone())
            .unwrap_or_else(|| DEFAULT_TARGET_LANG.to_string());
        // The grammar checker follows the translation target unless pinned.
        let grammar_language = cfg.grammar.language.clone().unwrap_or_else(|| target_lang.clone());
        Self {
            translator_url: translator_url
                .or_else(|| cfg.translator.url.clone())
                .unwrap_or_else(|| DEFAULT_TRANSLATOR_URL.to_string()),
            source_lang: source_lang
                .or_else(|| cfg.translator.source_lang.clone())
                .unwrap_or_else(|| DEFAULT_SOURCE_LANG.to_string()),
            target_lang,
            grammar_url: grammar_url
                .or_else(|| cfg.grammar.url.clone())
                .unwrap_or_else(|| DEFAULT_GRAMMAR_URL.to_string()),
            grammar_language,
            rules_path: rules_path
                .or_else(|| cfg.rules.path.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RULES_PATH)),
        }
    }
}

pub fn find_file_upwards(start_dir: &Path, filename: &str, max_levels: usize) -> Option<PathBuf> {
    let mut dir = start_dir;
    for _ in 0..=max_levels {
        let candidate = dir.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
    None
}

pub fn find_default_config(filename: &str) -> Option<PathBuf> {
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(p) = find_file_upwards(&cwd, filename, 8) {
            return Some(p);
        }
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            if let Some(p) = find_file_upwards(dir, filename, 8) {
                return Some(p);
            }
        }
    }
    None
}

pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: AppConfig = toml::from_str(&text).context("parse config toml")?;
    Ok(cfg)
}

pub fn init_default_config(dir: &Path, force: bool) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create config dir: {}", dir.display()))?;
    let cfg_path = dir.join(CONFIG_FILENAME);
    if cfg_path.exists() && !force {
        return Err(anyhow!(
            "config already exists: {} (use --force to overwrite)",
            cfg_path.display()
        ));
    }
    std::fs::write(&cfg_path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("write config: {}", cfg_path.display()))?;
    Ok(cfg_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_resolves_to_defaults() {
        let resolved =
            ResolvedConfig::from_config_and_args(&AppConfig::default(), None, None, None, None, None);
        assert_eq!(resolved.translator_url, DEFAULT_TRANSLATOR_URL);
        assert_eq!(resolved.source_lang, "en");
        assert_eq!(resolved.target_lang, "ar");
        assert_eq!(resolved.grammar_language, "ar");
        assert_eq!(resolved.rules_path, PathBuf::from(DEFAULT_RULES_PATH));
    }

    #[test]
    fn cli_args_override_config_file() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [translator]
            url = "http://cfg:1"
            target_lang = "fr"
            "#,
        )
        .expect("parse");
        let resolved = ResolvedConfig::from_config_and_args(
            &cfg,
            Some("http://cli:2".to_string()),
            None,
            None,
            None,
            None,
        );
        assert_eq!(resolved.translator_url, "http://cli:2");
        assert_eq!(resolved.target_lang, "fr");
    }

    #[test]
    fn grammar_language_follows_target_lang_unless_set() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [grammar]
            language = "ar-SA"
            "#,
        )
        .expect("parse");
        let resolved = ResolvedConfig::from_config_and_args(
            &cfg,
            None,
            None,
            Some("ar-EG".to_string()),
            None,
            None,
        );
        assert_eq!(resolved.grammar_language, "ar-SA");

        let resolved = ResolvedConfig::from_config_and_args(
            &AppConfig::default(),
            None,
            None,
            Some("ar-EG".to_string()),
            None,
            None,
        );
        assert_eq!(resolved.grammar_language, "ar-EG");
    }

    #[test]
    fn default_config_template_parses() {
        let cfg: AppConfig = toml::from_str(DEFAULT_CONFIG_TOML).expect("parse default toml");
        assert_eq!(cfg.translator.source_lang.as_deref(), Some("en"));
        assert_eq!(cfg.grammar.language.as_deref(), Some("ar"));
    }
}
