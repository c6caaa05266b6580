// Copyright 2025 the bmfontrender Authors
// SPDX-License-Identifier: Apache-2.0

//! Multi-line text rendering onto a solid background.

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};

use crate::font::BitmapFont;

/// Render `text` with `font`, one atlas row per `\n`-separated line.
///
/// The canvas is as wide as the widest line, as tall as all lines
/// together, and filled with `background` before drawing.
pub fn render_text(font: &BitmapFont, text: &str, background: Rgb<u8>) -> Result<RgbImage> {
    let lines: Vec<&str> = text.split('\n').collect();
    let sizes = lines
        .iter()
        .map(|line| font.text_size(line))
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to measure text")?;

    let width = sizes.iter().map(|&(w, _)| w).max().unwrap_or(0);
    let height = sizes.iter().map(|&(_, h)| h).sum();
    let mut canvas = RgbImage::from_pixel(width, height, background);

    let mut y = 0;
    for (line, (_, line_height)) in lines.iter().zip(&sizes) {
        font.textout(&mut canvas, line, 0, y)
            .with_context(|| format!("Failed to draw line {line:?}"))?;
        y += line_height;
    }
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::CodepointMap;
    use image::DynamicImage;

    /// 2 glyphs of 4×6: glyph 0 white, glyph 1 gray.
    fn font() -> BitmapFont {
        let atlas = RgbImage::from_fn(8, 6, |x, _| {
            if x < 4 { Rgb([255, 255, 255]) } else { Rgb([128, 128, 128]) }
        });
        BitmapFont::new(
            &DynamicImage::ImageRgb8(atlas),
            Some(4),
            6,
            None,
            CodepointMap::FirstCodepoint('a' as u32),
        )
        .unwrap()
    }

    #[test]
    fn test_canvas_size() {
        let canvas = render_text(&font(), "ab\nbab\n", Rgb([1, 2, 3])).unwrap();
        // three lines, the last one empty
        assert_eq!(canvas.dimensions(), (12, 18));
    }

    #[test]
    fn test_background_and_glyphs() {
        let canvas = render_text(&font(), "b\nab", Rgb([1, 2, 3])).unwrap();
        assert_eq!(canvas.get_pixel(0, 0), &Rgb([128, 128, 128]));
        // right of the short first line stays background
        assert_eq!(canvas.get_pixel(5, 0), &Rgb([1, 2, 3]));
        assert_eq!(canvas.get_pixel(0, 6), &Rgb([255, 255, 255]));
        assert_eq!(canvas.get_pixel(7, 11), &Rgb([128, 128, 128]));
    }
}
