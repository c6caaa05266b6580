// Copyright 2025 the bmfontrender Authors
// SPDX-License-Identifier: Apache-2.0

//! Glyph discovery for variable-width fonts.
//!
//! A VWF atlas has no per-glyph metrics. Glyphs sit side by side in strips
//! of `glyph_height` rows, separated by columns painted in a reserved
//! separator color. Scanning the top row of each strip for runs of
//! non-separator pixels recovers every glyph's left and right edge.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{DynamicImage, ImageBuffer, Luma, RgbImage};

use super::GlyphBox;
use super::error::FontError;
use crate::settings;

/// A horizontal run of non-separator pixels, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: u32,
    pub end: u32,
}

/// Split a row of pixels into runs of anything other than `separator`.
///
/// A run ends at the first separator pixel, or once it is `max_width`
/// pixels wide, whichever comes first. A run still open at the end of the
/// row ends at the row's width.
pub fn scan_separated_runs<I, P>(row: I, separator: &P, max_width: u32) -> Vec<Run>
where
    I: IntoIterator<Item = P>,
    P: PartialEq,
{
    let mut runs = Vec::new();
    let mut open: Option<u32> = None;
    let mut width = 0u32;

    for (x, pixel) in (0u32..).zip(row) {
        width = x + 1;
        let opaque = pixel != *separator;

        let ending = open.is_some_and(|start| !opaque || start.saturating_add(max_width) <= x);
        if ending && let Some(start) = open.take() {
            runs.push(Run { start, end: x });
        }
        if opaque && open.is_none() {
            open = Some(x);
        }
    }

    if let Some(start) = open {
        runs.push(Run { start, end: width });
    }
    runs
}

/// The pixel value that separates glyphs in this atlas.
///
/// Color atlases use pure magenta. Grayscale and 1-bit atlases have no
/// magenta, so the brighter of the two extremes acts as separator and the
/// darker one as the transparent background. Palette atlases are handled
/// by [`indexed_png_separator`], since decoding drops the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Rgb([u8; 3]),
    Luma(u16),
}

impl Separator {
    pub fn detect(image: &DynamicImage) -> Self {
        match image {
            DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_) => {
                let max = image
                    .to_luma16()
                    .pixels()
                    .map(|p| p.0[0])
                    .max()
                    .unwrap_or(u16::MAX);
                Separator::Luma(max)
            }
            _ => Separator::Rgb(settings::vwf::SEPARATOR_RGB),
        }
    }
}

/// Separator of a palette-indexed PNG: the color of the highest palette
/// index the image uses.
///
/// Returns `None` when the PNG isn't indexed.
pub fn indexed_png_separator(path: &Path) -> Result<Option<Separator>, FontError> {
    let io_error = |source: std::io::Error| FontError::Io {
        path: path.to_path_buf(),
        source,
    };
    let png_error = |source: png::DecodingError| FontError::Png {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().map_err(png_error)?;

    let info = reader.info();
    if info.color_type != png::ColorType::Indexed || info.width == 0 || info.height == 0 {
        return Ok(None);
    }
    let Some(palette) = info.palette.as_ref().map(|p| p.to_vec()) else {
        return Ok(None);
    };
    let width = info.width;
    let bits = info.bit_depth as u8 as usize;
    let line_size = (width as usize * bits).div_ceil(8);

    let mut indices = vec![0; line_size * info.height as usize];
    let frame = reader.next_frame(&mut indices).map_err(png_error)?;
    let highest = max_palette_index(&indices, frame.line_size, width, bits) as usize;

    let separator = palette
        .get(highest * 3..highest * 3 + 3)
        .map(|rgb| Separator::Rgb([rgb[0], rgb[1], rgb[2]]));
    tracing::debug!(highest, ?separator, "indexed atlas separator");
    Ok(separator)
}

/// Highest index in packed rows of `bits`-per-pixel palette indices.
fn max_palette_index(data: &[u8], line_size: usize, width: u32, bits: usize) -> u8 {
    let per_byte = 8 / bits;
    let mask = ((1u16 << bits) - 1) as u8;
    data.chunks(line_size)
        .flat_map(|row| {
            (0..width as usize).map(move |x| {
                let shift = 8 - bits * (x % per_byte + 1);
                (row[x / per_byte] >> shift) & mask
            })
        })
        .max()
        .unwrap_or(0)
}

/// Scan row `y` of `image` and return one glyph box per run.
pub fn vwfscan_line(image: &DynamicImage, y: u32, max_width: u32) -> Vec<GlyphBox> {
    ScanSource::new(image, Separator::detect(image)).scan_row(y, max_width)
}

/// Scan every strip of `glyph_height` rows and concatenate the runs.
///
/// Glyph N of the font is the Nth run found, reading strips top to bottom
/// and runs left to right.
pub fn build_vwf_table(
    image: &DynamicImage,
    separator: Separator,
    glyph_height: u32,
    max_width: u32,
) -> Vec<GlyphBox> {
    let source = ScanSource::new(image, separator);
    tracing::debug!(glyph_height, max_width, ?separator, "scanning vwf atlas");

    (0..image.height())
        .step_by(glyph_height.max(1) as usize)
        .flat_map(|y| source.scan_row(y, max_width))
        .collect()
}

/// Atlas pixels converted once into the form the separator is compared in.
enum ScanSource {
    Rgb {
        pixels: RgbImage,
        separator: [u8; 3],
    },
    Luma {
        pixels: ImageBuffer<Luma<u16>, Vec<u16>>,
        separator: u16,
    },
}

impl ScanSource {
    fn new(image: &DynamicImage, separator: Separator) -> Self {
        match separator {
            Separator::Rgb(separator) => ScanSource::Rgb {
                pixels: image.to_rgb8(),
                separator,
            },
            Separator::Luma(separator) => ScanSource::Luma {
                pixels: image.to_luma16(),
                separator,
            },
        }
    }

    fn scan_row(&self, y: u32, max_width: u32) -> Vec<GlyphBox> {
        let runs = match self {
            ScanSource::Rgb { pixels, separator } => {
                let row = (0..pixels.width()).map(|x| pixels.get_pixel(x, y).0);
                scan_separated_runs(row, separator, max_width)
            }
            ScanSource::Luma { pixels, separator } => {
                let row = (0..pixels.width()).map(|x| pixels.get_pixel(x, y).0[0]);
                scan_separated_runs(row, separator, max_width)
            }
        };

        runs.into_iter()
            .map(|run| GlyphBox {
                left: run.start,
                top: y,
                right: run.end,
            })
            .collect()
    }
}
