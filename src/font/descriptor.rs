// Copyright 2025 the bmfontrender Authors
// SPDX-License-Identifier: Apache-2.0

//! `.foni` font descriptor parsing.
//!
//! A descriptor is a plain text file of `key = value` lines naming the
//! atlas image and its metrics. `chars` may repeat and every occurrence is
//! kept; for any other key the last line wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::error::FontError;
use crate::settings;

#[derive(Debug, Clone, Default)]
pub struct FontDescriptor {
    /// Directory the descriptor was read from; `image` resolves against it
    pub base_dir: PathBuf,
    values: HashMap<String, String>,
    chars: Vec<String>,
}

impl FontDescriptor {
    /// Read and parse a descriptor file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FontError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self::parse(&text, base_dir))
    }

    /// Parse descriptor text. Lines without `=` and lines whose key starts
    /// with `#` are skipped.
    pub fn parse(text: &str, base_dir: PathBuf) -> Self {
        let mut values = HashMap::new();
        let mut chars = Vec::new();

        for line in text.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            let key = key.trim_end();
            if key.starts_with('#') {
                continue;
            }
            let value = value.trim_start();

            if key == "chars" {
                chars.push(value.to_string());
            }
            values.insert(key.to_string(), value.to_string());
        }

        Self {
            base_dir,
            values,
            chars,
        }
    }

    /// Raw value of any key, including ones this crate doesn't interpret.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Every `chars` value in file order.
    pub fn chars(&self) -> &[String] {
        &self.chars
    }

    /// Atlas image path, resolved against the descriptor's directory.
    pub fn image_path(&self) -> Result<PathBuf, FontError> {
        let image = self.get("image").ok_or(FontError::MissingKey("image"))?;
        Ok(self.base_dir.join(image))
    }

    /// Row height shared by every glyph.
    pub fn height(&self) -> Result<u32, FontError> {
        let value = self.get("height").ok_or(FontError::MissingKey("height"))?;
        parse_decimal("height", value)
    }

    /// Cell width of a fixed-width font, `None` for a proportional one.
    pub fn width(&self) -> Result<Option<u32>, FontError> {
        self.get("width")
            .map(|value| parse_decimal("width", value))
            .transpose()
    }

    /// First codepoint of an implicit single range.
    pub fn first_codepoint(&self) -> Result<u32, FontError> {
        match self.get("firstcp") {
            Some(value) => parse_int_auto("firstcp", value),
            None => Ok(settings::descriptor::DEFAULT_FIRST_CODEPOINT),
        }
    }

    /// Widest a proportional glyph may be, `None` meaning the image width.
    pub fn max_width(&self) -> Result<Option<u32>, FontError> {
        self.get("maxwidth")
            .map(|value| parse_int_auto("maxwidth", value))
            .transpose()
    }

    /// Background color code, unparsed.
    pub fn bgcolor(&self) -> &str {
        self.get("bgcolor")
            .unwrap_or(settings::descriptor::DEFAULT_BGCOLOR)
    }
}

fn bad_integer(key: &'static str, value: &str) -> FontError {
    FontError::BadInteger {
        key,
        value: value.to_string(),
    }
}

fn parse_decimal(key: &'static str, value: &str) -> Result<u32, FontError> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    digits.parse().map_err(|_| bad_integer(key, value))
}

/// Parse an integer, picking the base from a `0x`, `0o` or `0b` prefix.
///
/// Without a prefix the number is decimal and may not have leading zeros
/// (other than `0` itself). `_` may separate digits.
fn parse_int_auto(key: &'static str, value: &str) -> Result<u32, FontError> {
    let trimmed = value.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let lower = unsigned.to_ascii_lowercase();
    let (radix, digits) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest)
    } else {
        (10, lower.as_str())
    };

    // A single `_` may follow a base prefix
    let digits = match radix {
        10 => digits,
        _ => digits.strip_prefix('_').unwrap_or(digits),
    };
    let well_formed = !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !digits.starts_with('_')
        && !digits.ends_with('_')
        && !digits.contains("__");
    let leading_zero = radix == 10 && digits.starts_with('0') && digits.chars().any(|c| c != '0' && c != '_');
    if !well_formed || leading_zero {
        return Err(bad_integer(key, value));
    }

    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    u32::from_str_radix(&digits, radix).map_err(|_| bad_integer(key, value))
}
