// Copyright 2025 the bmfontrender Authors
// SPDX-License-Identifier: Apache-2.0

//! Rendering session state (`AppState`).
//!
//! `AppState` owns the currently chosen font, its background color, the
//! text to render, and the preview of the last font loaded. Loading a new
//! font replaces all font-related fields at once; a failed load leaves
//! them untouched. File I/O methods live in `file_io`.

mod file_io;

use anyhow::Result;
use image::{Rgb, RgbImage};

use crate::font::BitmapFont;
use crate::render::render_text;
use crate::settings;

/// Main application state
#[derive(Debug)]
pub struct AppState {
    /// The loaded font, if any
    pub font: Option<BitmapFont>,

    /// Canvas color for the loaded font, from its `bgcolor` key
    pub bgcolor: Rgb<u8>,

    /// Text the user wants rendered
    pub text: String,

    /// Sample rendering of the loaded font
    pub preview: Option<RgbImage>,

    /// Last load or save error, if any
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            font: None,
            bgcolor: Rgb([0, 0, 0]),
            text: String::new(),
            preview: None,
            error_message: None,
        }
    }

    pub fn has_font_loaded(&self) -> bool {
        self.font.is_some()
    }

    /// Replace the text to render.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Render the current text with the current font.
    ///
    /// Trailing whitespace is dropped first. Returns `None` when there is
    /// no font or nothing left to render.
    pub fn render_current_text(&self) -> Result<Option<RgbImage>> {
        let Some(font) = &self.font else {
            return Ok(None);
        };
        let text = self.text.trim_end();
        if text.is_empty() {
            return Ok(None);
        }
        render_text(font, text, self.bgcolor).map(Some)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample text for a font's preview.
///
/// Fonts without lowercase get the sample in capitals.
pub fn preview_text(font: &BitmapFont) -> String {
    let sample = settings::preview::SAMPLE_TEXT;
    if font.contains(settings::preview::LOWERCASE_PROBE) {
        sample.to_string()
    } else {
        sample.to_uppercase()
    }
}
