use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use tarjoman::config::{
    find_default_config, init_default_config, load_config, AppConfig, ResolvedConfig,
    CONFIG_FILENAME,
};
use tarjoman::corrector::TranslationCorrector;
use tarjoman::grammar::{GrammarCheck, LanguageToolClient, NoopChecker};
use tarjoman::progress::ConsoleProgress;
use tarjoman::rules::load_correction_rules;
use tarjoman::translator::{HttpTranslator, Translate};

const EXAMPLE_TEXT: &str = "Michael Johnson is a software engineer at Google. \
His email is michael.johnson@example.com, and his phone number is +14155552678. \
His website is www.michaeljohnson.dev. His credit card number is 1234-5678-9012-3456, \
and his social security number is 321-54-9876.";

#[derive(Parser, Debug)]
#[command(name = "tarjoman")]
#[command(about = "English to Arabic translator with PII-safe post-correction", long_about = None)]
struct Args {
    /// Generate a default config file, then exit
    #[arg(long)]
    init_config: bool,

    /// Directory to write the config file (default: current directory)
    #[arg(long, value_name = "DIR")]
    init_config_dir: Option<PathBuf>,

    /// Overwrite an existing config file when used with --init-config
    #[arg(long)]
    force: bool,

    /// Text to translate (default: built-in example sentence)
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Config file path (default: search for tarjoman.toml upwards)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Correction rules file (`tag=original=replacement` lines)
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Source language code (e.g. en)
    #[arg(long)]
    source_lang: Option<String>,

    /// Target language code (e.g. ar)
    #[arg(long)]
    target_lang: Option<String>,

    /// Translation service base URL
    #[arg(long, value_name = "URL")]
    translator_url: Option<String>,

    /// Grammar checker base URL
    #[arg(long, value_name = "URL")]
    grammar_url: Option<String>,

    /// Skip grammar checking (no checker connection required)
    #[arg(long)]
    skip_grammar: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let progress = ConsoleProgress::new(true);

    if args.init_config {
        let dir = args
            .init_config_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let cfg_path = init_default_config(&dir, args.force).context("init default config")?;
        eprintln!("Wrote config: {}", cfg_path.display());
        return Ok(());
    }

    let cfg = match args.config.clone().or_else(|| find_default_config(CONFIG_FILENAME)) {
        Some(path) => {
            progress.info(format!("Config: {}", path.display()));
            load_config(&path)?
        }
        None => AppConfig::default(),
    };
    let resolved = ResolvedConfig::from_config_and_args(
        &cfg,
        args.translator_url,
        args.source_lang,
        args.target_lang,
        args.grammar_url,
        args.rules,
    );

    // A dead checker endpoint is fatal before any translation work starts.
    let checker: Box<dyn GrammarCheck> = if args.skip_grammar {
        Box::new(NoopChecker)
    } else {
        match LanguageToolClient::connect(&resolved.grammar_url, &resolved.grammar_language) {
            Ok(client) => Box::new(client),
            Err(err) => {
                eprintln!("Error initializing grammar checker: {err:#}");
                std::process::exit(1);
            }
        }
    };

    let rules = load_correction_rules(&resolved.rules_path, &progress);
    progress.info(format!("Loaded {} correction rule(s)", rules.len()));

    let input_text = args.text.unwrap_or_else(|| EXAMPLE_TEXT.to_string());

    let translator = HttpTranslator::new(&resolved.translator_url)?;
    progress.info(format!(
        "Translate: {} -> {} via {}",
        resolved.source_lang, resolved.target_lang, resolved.translator_url
    ));
    let translated =
        translator.translate(&input_text, &resolved.source_lang, &resolved.target_lang)?;

    let corrector = TranslationCorrector::new(rules, checker);
    let corrected = corrector.correct(&translated, &progress)?;

    println!("Original: {input_text}");
    println!("Translated: {translated}");
    println!("Corrected: {corrected}");
    Ok(())
}
