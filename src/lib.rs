// Copyright 2025 the bmfontrender Authors
// SPDX-License-Identifier: Apache-2.0

//! bmfontrender: text rendering with fixed-width and variable-width bitmap
//! fonts, plus the `demowords` letter scoring report.

use anyhow::{Context, Result, bail};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

pub mod data;
pub mod font;
pub mod render;
pub mod settings;
pub mod words;

use data::AppState;
use words::config::ScorerConfig;

const RENDER_USAGE: &str = "Usage: bmfontrender FONT.foni OUTPUT [TEXT...]";
const WORDS_USAGE: &str = "Usage: demowords [--config FILE] [DICTIONARY]";

/// Initialize the tracing subscriber (can be controlled via RUST_LOG env var)
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bmfontrender=info,demowords=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ============================================================================
// BMFONTRENDER
// ============================================================================

/// Parsed `bmfontrender` command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderArgs {
    pub font: PathBuf,
    pub output: PathBuf,
    /// Text from the command line; `None` means read stdin
    pub text: Option<String>,
}

impl RenderArgs {
    pub fn parse(args: &[String]) -> Result<Self> {
        if args.iter().any(|a| a == "-h" || a == "--help") || args.len() < 2 {
            bail!(RENDER_USAGE);
        }
        let text = (args.len() > 2).then(|| args[2..].join(" "));
        Ok(Self {
            font: PathBuf::from(&args[0]),
            output: PathBuf::from(&args[1]),
            text,
        })
    }
}

/// Render text to an image file.
///
/// Without text on the command line, text is read from stdin unless stdin
/// is a terminal. Empty text writes the font's preview instead.
pub fn run(args: &[String]) -> Result<()> {
    let args = RenderArgs::parse(args)?;

    let mut state = AppState::new();
    state.try_choose_font(&args.font)?;

    let text = match args.text {
        Some(text) => text,
        None if std::io::stdin().is_terminal() => String::new(),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read text from stdin")?;
            text
        }
    };

    state.set_text(text);
    if !state.save_as(&args.output)? {
        tracing::info!("No text given, writing preview");
        state.save_preview(&args.output)?;
    }
    Ok(())
}

// ============================================================================
// DEMOWORDS
// ============================================================================

/// Parsed `demowords` command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordsArgs {
    pub config: Option<PathBuf>,
    pub dictionary: Option<PathBuf>,
}

impl WordsArgs {
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" => bail!(WORDS_USAGE),
                "-c" | "--config" => {
                    let Some(path) = iter.next() else {
                        bail!("--config needs a file\n{WORDS_USAGE}");
                    };
                    parsed.config = Some(PathBuf::from(path));
                }
                _ if parsed.dictionary.is_none() => parsed.dictionary = Some(PathBuf::from(arg)),
                _ => bail!("Unexpected argument {arg:?}\n{WORDS_USAGE}"),
            }
        }
        Ok(parsed)
    }
}

/// Score a word list with every configured table and return the report.
pub fn run_word_report(args: &[String]) -> Result<String> {
    let args = WordsArgs::parse(args)?;
    let config = match &args.config {
        Some(path) => ScorerConfig::load(path)?,
        None => ScorerConfig::default(),
    };
    let dictionary = args.dictionary.unwrap_or_else(|| config.dictionary_path());

    let text = std::fs::read_to_string(&dictionary)
        .with_context(|| format!("Failed to read word list {}", dictionary.display()))?;
    let word_list: Vec<&str> = text.lines().collect();
    tracing::info!("Scoring {} words from {}", word_list.len(), dictionary.display());

    let mut report = String::new();
    for table in config.value_tables()? {
        let groups = words::words_by_score(&word_list, &table.values);
        report.push_str(&words::report::format_groups(&table.name, &groups));
    }
    Ok(report)
}
