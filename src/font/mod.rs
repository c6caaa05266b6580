// Copyright 2025 the bmfontrender Authors
// SPDX-License-Identifier: Apache-2.0

//! Bitmap fonts stored as an atlas image plus a `.foni` descriptor.
//!
//! A font is built once from its descriptor and image and never changes
//! afterwards. Two layouts are supported:
//!
//! - **Fixed width**: every glyph occupies a `width × height` cell, cells
//!   laid out left to right, top to bottom. Glyph boxes are computed.
//! - **Proportional**: glyphs are packed into strips of `height` rows and
//!   delimited by a separator color. Boxes are discovered by scanning the
//!   atlas when the font loads (see [`scan`]).
//!
//! Codepoints map to glyph indices through a [`RangeTable`]; anything the
//! table doesn't cover is drawn as glyph 0.

pub mod color;
pub mod descriptor;
pub mod error;
pub mod ranges;
pub mod scan;

use std::path::Path;

use image::{DynamicImage, RgbImage, imageops};

pub use color::parse_color;
pub use descriptor::FontDescriptor;
pub use error::FontError;
pub use ranges::{CodepointRange, RangeTable};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Horizontal extent and top row of one glyph in the atlas.
///
/// All glyphs of a font share the same height, so the bottom edge is
/// `top + glyph_height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
}

impl GlyphBox {
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }
}

/// Area covered by a line of drawn text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

/// How glyph boxes are found in the atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphLayout {
    /// Fixed-width cells, each glyph left-aligned in its cell
    Fixed { cell_width: u32 },
    /// Scanned glyph boxes indexed by glyph id
    Proportional { table: Vec<GlyphBox> },
}

/// A loaded bitmap font.
#[derive(Debug, Clone)]
pub struct BitmapFont {
    image: RgbImage,
    glyph_height: u32,
    layout: GlyphLayout,
    ranges: RangeTable,
}

/// Where a font's codepoint mapping comes from.
#[derive(Debug, Clone)]
pub enum CodepointMap {
    /// Explicit ranges from `chars` lines
    Ranges(RangeTable),
    /// All glyphs in atlas order, starting at this codepoint
    FirstCodepoint(u32),
}

// ============================================================================
// LOADING
// ============================================================================

impl BitmapFont {
    /// Build a font from a decoded atlas.
    ///
    /// `cell_width` is `None` for a proportional font. `max_width` bounds
    /// how wide a scanned glyph may get before it is split, and defaults to
    /// the atlas width.
    pub fn new(
        atlas: &DynamicImage,
        cell_width: Option<u32>,
        glyph_height: u32,
        max_width: Option<u32>,
        map: CodepointMap,
    ) -> Result<Self, FontError> {
        let separator = scan::Separator::detect(atlas);
        Self::build(atlas, cell_width, glyph_height, max_width, map, separator)
    }

    fn build(
        atlas: &DynamicImage,
        cell_width: Option<u32>,
        glyph_height: u32,
        max_width: Option<u32>,
        map: CodepointMap,
        separator: scan::Separator,
    ) -> Result<Self, FontError> {
        if glyph_height == 0 {
            return Err(FontError::InvalidMetrics("height must be positive".into()));
        }

        let layout = match cell_width {
            Some(0) => {
                return Err(FontError::InvalidMetrics("width must be positive".into()));
            }
            Some(w) if w > atlas.width() => {
                return Err(FontError::InvalidMetrics(format!(
                    "cell width {w} is wider than the {} px atlas",
                    atlas.width()
                )));
            }
            Some(cell_width) => GlyphLayout::Fixed { cell_width },
            None => {
                let max_width = max_width.unwrap_or(atlas.width());
                GlyphLayout::Proportional {
                    table: scan::build_vwf_table(atlas, separator, glyph_height, max_width),
                }
            }
        };

        let mut font = Self {
            image: atlas.to_rgb8(),
            glyph_height,
            layout,
            ranges: RangeTable::default(),
        };
        font.ranges = match map {
            CodepointMap::Ranges(ranges) => ranges,
            CodepointMap::FirstCodepoint(first) => {
                RangeTable::from_first_codepoint(first, font.num_glyphs())
            }
        };
        Ok(font)
    }

    /// Load the font a parsed descriptor points at.
    pub fn from_descriptor(desc: &FontDescriptor) -> Result<Self, FontError> {
        let ranges = RangeTable::parse_chars(desc.chars())?;
        let image_path = desc.image_path()?;
        let atlas = image::open(&image_path).map_err(|source| FontError::Image {
            path: image_path.clone(),
            source,
        })?;
        let glyph_height = desc.height()?;
        let cell_width = desc.width()?;

        let map = if ranges.is_empty() {
            CodepointMap::FirstCodepoint(desc.first_codepoint()?)
        } else {
            CodepointMap::Ranges(ranges)
        };
        let max_width = desc.max_width()?;

        let is_png = image_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        let indexed = match cell_width {
            None if is_png => scan::indexed_png_separator(&image_path)?,
            _ => None,
        };
        let separator = indexed.unwrap_or_else(|| scan::Separator::detect(&atlas));

        let font = Self::build(&atlas, cell_width, glyph_height, max_width, map, separator)?;
        tracing::debug!(
            image = %image_path.display(),
            glyphs = font.num_glyphs(),
            coverage = ?font.codepoint_range(),
            "loaded bitmap font"
        );
        Ok(font)
    }

    /// Read a `.foni` file and load its font.
    ///
    /// The descriptor is returned too, since callers still need keys such
    /// as `bgcolor` that the font itself ignores.
    pub fn from_foni_file<P: AsRef<Path>>(path: P) -> Result<(Self, FontDescriptor), FontError> {
        let desc = FontDescriptor::load(path)?;
        let font = Self::from_descriptor(&desc)?;
        Ok((font, desc))
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Number of glyphs in the atlas.
    pub fn num_glyphs(&self) -> usize {
        match &self.layout {
            GlyphLayout::Proportional { table } => table.len(),
            GlyphLayout::Fixed { cell_width } => {
                let columns = self.image.width() / cell_width;
                let rows = self.image.height() / self.glyph_height;
                (columns * rows) as usize
            }
        }
    }

    pub fn glyph_height(&self) -> u32 {
        self.glyph_height
    }

    pub fn layout(&self) -> &GlyphLayout {
        &self.layout
    }

    pub fn ranges(&self) -> &RangeTable {
        &self.ranges
    }

    /// Lowest and one-past-highest codepoint the font maps.
    pub fn codepoint_range(&self) -> Option<(u32, u32)> {
        self.ranges.codepoint_range()
    }

    /// Glyph index for a character, if the font has one.
    pub fn glyph_index(&self, c: char) -> Option<usize> {
        self.ranges.lookup(c as u32)
    }

    /// Whether the font has a glyph for `c`.
    pub fn contains(&self, c: char) -> bool {
        self.glyph_index(c).is_some()
    }

    /// Glyph indices for a line of text, unmapped characters becoming 0.
    fn glyph_ids(&self, text: &str) -> Vec<usize> {
        text.chars()
            .map(|c| self.glyph_index(c).unwrap_or(0))
            .collect()
    }

    /// Box of a glyph in the atlas.
    ///
    /// Returns `Ok(None)` for a fixed-width glyph whose cell lies below the
    /// atlas, and an error for a proportional glyph past the scanned table.
    pub fn glyph_box(&self, index: usize) -> Result<Option<GlyphBox>, FontError> {
        match &self.layout {
            GlyphLayout::Proportional { table } => table
                .get(index)
                .copied()
                .map(Some)
                .ok_or(FontError::GlyphOutOfRange {
                    index,
                    len: table.len(),
                }),
            GlyphLayout::Fixed { cell_width } => {
                let columns = (self.image.width() / cell_width) as usize;
                let top = (index / columns) as u64 * self.glyph_height as u64;
                if top >= self.image.height() as u64 {
                    return Ok(None);
                }
                let left = (index % columns) as u32 * cell_width;
                Ok(Some(GlyphBox {
                    left,
                    top: top as u32,
                    right: left + cell_width,
                }))
            }
        }
    }

    // ========================================================================
    // DRAWING
    // ========================================================================

    /// Width and height of a single line of text.
    pub fn text_size(&self, text: &str) -> Result<(u32, u32), FontError> {
        let ids = self.glyph_ids(text);
        let width = match &self.layout {
            _ if ids.is_empty() => 0,
            GlyphLayout::Proportional { table } => {
                if let Some(&index) = ids.iter().max()
                    && index >= table.len()
                {
                    return Err(FontError::GlyphOutOfRange {
                        index,
                        len: table.len(),
                    });
                }
                ids.iter().map(|&i| table[i].width()).sum()
            }
            GlyphLayout::Fixed { cell_width } => cell_width * ids.len() as u32,
        };
        Ok((width, self.glyph_height))
    }

    /// Draw a line of text into `dst` with its top-left corner at `(x, y)`.
    ///
    /// Glyph pixels are copied as-is, clipped to `dst`. Cell rows that lie
    /// below the atlas are drawn black. Returns the area the text advanced
    /// over.
    pub fn textout(
        &self,
        dst: &mut RgbImage,
        text: &str,
        x: u32,
        y: u32,
    ) -> Result<TextBounds, FontError> {
        let mut cursor = x;
        for index in self.glyph_ids(text) {
            let Some(glyph) = self.glyph_box(index)? else {
                continue;
            };
            let src = imageops::crop_imm(
                &self.image,
                glyph.left,
                glyph.top,
                glyph.width(),
                self.glyph_height,
            )
            .to_image();
            let mut cell = RgbImage::new(glyph.width(), self.glyph_height);
            imageops::replace(&mut cell, &src, 0, 0);
            imageops::replace(dst, &cell, i64::from(cursor), i64::from(y));
            cursor += glyph.width();
        }

        Ok(TextBounds {
            left: x,
            top: y,
            right: cursor,
            bottom: y + self.glyph_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const MAGENTA: Rgb<u8> = Rgb(crate::settings::vwf::SEPARATOR_RGB);

    /// A 4×2 grid of 8×12 cells, each cell filled with a shade equal to
    /// its glyph index times 10.
    fn fixed_atlas() -> DynamicImage {
        let img = RgbImage::from_fn(32, 24, |x, y| {
            let index = (y / 12) * 4 + x / 8;
            let shade = index as u8 * 10;
            Rgb([shade, shade, shade])
        });
        DynamicImage::ImageRgb8(img)
    }

    fn fixed_font() -> BitmapFont {
        BitmapFont::new(&fixed_atlas(), Some(8), 12, None, CodepointMap::FirstCodepoint(0x41))
            .unwrap()
    }

    /// One strip, three glyphs of widths 2, 3 and 1 separated by magenta.
    /// Glyph pixels are colored (glyph index + 1) * 50 in the red channel.
    fn vwf_font(map: CodepointMap) -> BitmapFont {
        let mut img = RgbImage::from_pixel(9, 4, MAGENTA);
        for (index, (start, end)) in [(0u32, 2u32), (3, 6), (7, 8)].into_iter().enumerate() {
            for x in start..end {
                for y in 0..4 {
                    img.put_pixel(x, y, Rgb([(index as u8 + 1) * 50, 0, 0]));
                }
            }
        }
        BitmapFont::new(&DynamicImage::ImageRgb8(img), None, 4, None, map).unwrap()
    }

    #[test]
    fn test_fixed_glyph_count_and_range() {
        let font = fixed_font();
        assert_eq!(font.num_glyphs(), 8);
        assert_eq!(font.codepoint_range(), Some((0x41, 0x49)));
        assert!(font.contains('A'));
        assert!(font.contains('H'));
        assert!(!font.contains('I'));
    }

    #[test]
    fn test_fixed_text_size() {
        let font = fixed_font();
        assert_eq!(font.text_size("ABC").unwrap(), (24, 12));
        assert_eq!(font.text_size("").unwrap(), (0, 12));
        // Unmapped characters still take a cell
        assert_eq!(font.text_size("a!").unwrap(), (16, 12));
    }

    #[test]
    fn test_fixed_glyph_box() {
        let font = fixed_font();
        assert_eq!(
            font.glyph_box(5).unwrap(),
            Some(GlyphBox { left: 8, top: 12, right: 16 })
        );
        assert_eq!(font.glyph_box(8).unwrap(), None);
    }

    #[test]
    fn test_fixed_textout_copies_cells() {
        let font = fixed_font();
        let mut dst = RgbImage::new(40, 20);
        let bounds = font.textout(&mut dst, "BF", 2, 3).unwrap();
        assert_eq!(bounds, TextBounds { left: 2, top: 3, right: 18, bottom: 15 });
        assert_eq!(dst.get_pixel(2, 3), &Rgb([10, 10, 10]));
        assert_eq!(dst.get_pixel(9, 14), &Rgb([10, 10, 10]));
        assert_eq!(dst.get_pixel(10, 3), &Rgb([50, 50, 50]));
        assert_eq!(dst.get_pixel(1, 3), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_textout_clips_to_destination() {
        let font = fixed_font();
        let mut dst = RgbImage::new(10, 5);
        let bounds = font.textout(&mut dst, "BB", 0, 0).unwrap();
        assert_eq!(bounds.right, 16);
        assert_eq!(dst.get_pixel(9, 4), &Rgb([10, 10, 10]));
    }

    #[test]
    fn test_cell_below_atlas_drawn_black() {
        // 10 rows of atlas, 6-row cells: glyph 1 has only 4 rows of pixels
        let atlas = RgbImage::from_pixel(4, 10, Rgb([200, 200, 200]));
        let ranges = RangeTable::parse_chars(&["41-42"]).unwrap();
        let font = BitmapFont::new(
            &DynamicImage::ImageRgb8(atlas),
            Some(4),
            6,
            None,
            CodepointMap::Ranges(ranges),
        )
        .unwrap();

        let mut dst = RgbImage::from_pixel(4, 6, Rgb([9, 9, 9]));
        font.textout(&mut dst, "B", 0, 0).unwrap();
        assert_eq!(dst.get_pixel(0, 3), &Rgb([200, 200, 200]));
        assert_eq!(dst.get_pixel(0, 4), &Rgb([0, 0, 0]));
        assert_eq!(dst.get_pixel(3, 5), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_unmapped_falls_back_to_glyph_zero() {
        let font = fixed_font();
        let mut dst = RgbImage::new(8, 12);
        font.textout(&mut dst, "\u{263a}", 0, 0).unwrap();
        assert_eq!(dst.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(font.glyph_index('\u{263a}'), None);
    }

    #[test]
    fn test_cell_wider_than_atlas() {
        let err = BitmapFont::new(&fixed_atlas(), Some(64), 12, None, CodepointMap::FirstCodepoint(32))
            .unwrap_err();
        assert!(matches!(err, FontError::InvalidMetrics(_)));
    }

    #[test]
    fn test_zero_height() {
        let err = BitmapFont::new(&fixed_atlas(), Some(8), 0, None, CodepointMap::FirstCodepoint(32))
            .unwrap_err();
        assert!(matches!(err, FontError::InvalidMetrics(_)));
    }

    #[test]
    fn test_vwf_sizes_sum_box_widths() {
        let font = vwf_font(CodepointMap::FirstCodepoint(0x61));
        assert_eq!(font.num_glyphs(), 3);
        assert_eq!(font.text_size("abc").unwrap(), (6, 4));
        assert_eq!(font.text_size("bb").unwrap(), (6, 4));
    }

    #[test]
    fn test_vwf_textout() {
        let font = vwf_font(CodepointMap::FirstCodepoint(0x61));
        let mut dst = RgbImage::new(10, 4);
        let bounds = font.textout(&mut dst, "cb", 0, 0).unwrap();
        assert_eq!(bounds.right, 4);
        assert_eq!(dst.get_pixel(0, 0), &Rgb([150, 0, 0]));
        assert_eq!(dst.get_pixel(1, 2), &Rgb([100, 0, 0]));
        assert_eq!(dst.get_pixel(3, 3), &Rgb([100, 0, 0]));
        assert_eq!(dst.get_pixel(4, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_vwf_range_past_table() {
        // Declares 26 glyphs, atlas only has 3
        let ranges = RangeTable::parse_chars(&["61-7A"]).unwrap();
        let font = vwf_font(CodepointMap::Ranges(ranges));
        assert_eq!(font.text_size("abc").unwrap(), (6, 4));

        let err = font.text_size("az").unwrap_err();
        assert!(matches!(err, FontError::GlyphOutOfRange { index: 25, len: 3 }));
        assert!(err.to_string().contains("25"));
        assert!(err.to_string().contains("3"));

        let mut dst = RgbImage::new(10, 4);
        assert!(font.textout(&mut dst, "z", 0, 0).is_err());
    }

    #[test]
    fn test_vwf_max_width_splits() {
        let img = RgbImage::from_pixel(10, 2, Rgb([0, 0, 0]));
        let font = BitmapFont::new(
            &DynamicImage::ImageRgb8(img),
            None,
            2,
            Some(3),
            CodepointMap::FirstCodepoint(32),
        )
        .unwrap();
        let GlyphLayout::Proportional { table } = font.layout() else {
            panic!("expected proportional layout");
        };
        let widths: Vec<u32> = table.iter().map(GlyphBox::width).collect();
        assert_eq!(widths, vec![3, 3, 3, 1]);
    }

    #[test]
    fn test_load_from_foni_file() {
        let dir = tempfile::tempdir().unwrap();
        let atlas = fixed_atlas().to_rgb8();
        atlas.save(dir.path().join("grid.png")).unwrap();
        let foni = dir.path().join("grid.foni");
        std::fs::write(
            &foni,
            "# test grid\nimage = grid.png\nheight = 12\nwidth = 8\nchars = 30-33\nchars = 41-44\nbgcolor = #fff\n",
        )
        .unwrap();

        let (font, desc) = BitmapFont::from_foni_file(&foni).unwrap();
        assert_eq!(desc.bgcolor(), "#fff");
        assert_eq!(font.glyph_index('0'), Some(0));
        assert_eq!(font.glyph_index('A'), Some(4));
        assert_eq!(font.glyph_index('D'), Some(7));
        assert!(!font.contains('E'));
    }

    #[test]
    fn test_load_indexed_png_uses_highest_palette_index() {
        let dir = tempfile::tempdir().unwrap();
        {
            let file = std::fs::File::create(dir.path().join("pal.png")).unwrap();
            let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), 8, 1);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_palette(vec![0, 0, 0, 255, 255, 255]);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 0, 1, 0, 0, 1, 0, 0]).unwrap();
            writer.finish().unwrap();
        }
        let foni = dir.path().join("pal.foni");
        std::fs::write(&foni, "image = pal.png
height = 1
").unwrap();

        let (font, _) = BitmapFont::from_foni_file(&foni).unwrap();
        let GlyphLayout::Proportional { table } = font.layout() else {
            panic!("expected proportional layout");
        };
        let spans: Vec<(u32, u32)> = table.iter().map(|g| (g.left, g.right)).collect();
        assert_eq!(spans, vec![(0, 2), (3, 5), (6, 8)]);
    }

    #[test]
    fn test_load_missing_image() {
        let dir = tempfile::tempdir().unwrap();
        let foni = dir.path().join("broken.foni");
        std::fs::write(&foni, "image = nowhere.png\nheight = 12\n").unwrap();
        let err = BitmapFont::from_foni_file(&foni).unwrap_err();
        assert!(matches!(err, FontError::Image { .. }));
    }
}
