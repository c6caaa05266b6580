// Copyright 2025 the bmfontrender Authors
// SPDX-License-Identifier: Apache-2.0

//! File I/O operations for AppState (choose font, save rendering)

use super::{AppState, preview_text};
use crate::font::{BitmapFont, parse_color};
use crate::render::render_text;
use anyhow::{Context, Result, anyhow};
use image::{Rgb, RgbImage};
use std::path::Path;

impl AppState {
    /// Load a font from a `.foni` descriptor and render its preview.
    ///
    /// On failure the error is logged and kept in `error_message`, and the
    /// previously loaded font stays active. Returns whether the load
    /// succeeded.
    pub fn choose_font(&mut self, path: &Path) -> bool {
        match self.try_choose_font(path) {
            Ok(()) => true,
            Err(e) => {
                let error = format!("{e:#}");
                tracing::error!("{}", error);
                self.error_message = Some(error);
                false
            }
        }
    }

    /// Load a font like [`choose_font`](Self::choose_font), but hand any
    /// error back to the caller instead of logging it.
    pub fn try_choose_font(&mut self, path: &Path) -> Result<()> {
        let (font, bgcolor, preview) = load_font(path).context("Failed to load font")?;
        tracing::info!(
            "Loaded font: {} ({} glyphs)",
            path.display(),
            font.num_glyphs()
        );
        self.font = Some(font);
        self.bgcolor = bgcolor;
        self.preview = Some(preview);
        self.error_message = None;
        Ok(())
    }

    /// Render the current text and save it.
    ///
    /// The image format follows the file extension. Returns `Ok(false)`
    /// when there was nothing to render.
    pub fn save_as(&self, path: &Path) -> Result<bool> {
        let Some(image) = self.render_current_text()? else {
            return Ok(false);
        };
        save_image(&image, path)?;
        tracing::info!("Saved: {}", path.display());
        Ok(true)
    }

    /// Save the preview of the loaded font.
    pub fn save_preview(&self, path: &Path) -> Result<()> {
        let preview = self
            .preview
            .as_ref()
            .ok_or_else(|| anyhow!("No font loaded"))?;
        save_image(preview, path)?;
        tracing::info!("Saved preview: {}", path.display());
        Ok(())
    }
}

fn load_font(path: &Path) -> Result<(BitmapFont, Rgb<u8>, RgbImage)> {
    let (font, desc) = BitmapFont::from_foni_file(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let code = desc.bgcolor();
    let bgcolor = parse_color(code)
        .ok_or_else(|| anyhow!("{}: bad color for bgcolor: {code}", path.display()))?;

    let preview = render_text(&font, &preview_text(&font), bgcolor)
        .context("Failed to render preview")?;
    Ok((font, bgcolor, preview))
}

fn save_image(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("Failed to save {}", path.display()))
}
