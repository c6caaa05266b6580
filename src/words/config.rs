// Copyright 2025 the bmfontrender Authors
// SPDX-License-Identifier: Apache-2.0

//! Optional TOML configuration for the word scorer.
//!
//! ```toml
//! dictionary = "/usr/share/dict/words"
//!
//! [[table]]
//! name = "Insular"
//! values = { a = 1, d = 2, f = 2 }
//! ```

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{LetterValue, ValueTable, builtin_tables};
use crate::settings;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScorerConfig {
    /// Word list to score
    pub dictionary: Option<PathBuf>,

    /// Letter tables; the built-in ones are used when empty
    #[serde(default, rename = "table")]
    pub tables: Vec<TableConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    pub name: String,
    pub values: BTreeMap<String, u32>,
}

impl ScorerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        // Surface bad letter keys now rather than when scoring
        config.value_tables()?;
        Ok(config)
    }

    /// Word list path, falling back to the system dictionary.
    pub fn dictionary_path(&self) -> PathBuf {
        self.dictionary
            .clone()
            .unwrap_or_else(|| PathBuf::from(settings::report::DEFAULT_DICTIONARY))
    }

    /// The tables to score with.
    pub fn value_tables(&self) -> Result<Vec<ValueTable>> {
        if self.tables.is_empty() {
            return Ok(builtin_tables());
        }
        self.tables.iter().map(TableConfig::to_value_table).collect()
    }
}

impl TableConfig {
    fn to_value_table(&self) -> Result<ValueTable> {
        let mut values = Vec::with_capacity(self.values.len());
        for (key, &weight) in &self.values {
            let mut chars = key.chars();
            let (Some(letter), None) = (chars.next(), chars.next()) else {
                bail!("table {:?}: key {key:?} is not a single letter", self.name);
            };
            values.push(LetterValue::new(letter, weight));
        }
        Ok(ValueTable {
            name: self.name.clone(),
            values,
        })
    }
}
