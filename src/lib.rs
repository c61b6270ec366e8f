pub mod config;
pub mod corrector;
pub mod grammar;
pub mod numerals;
pub mod pii;
pub mod progress;
pub mod rules;
pub mod translator;
