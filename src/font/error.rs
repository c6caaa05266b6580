// Copyright 2025 the bmfontrender Authors
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while loading or drawing with a bitmap font.

use std::path::PathBuf;

/// Everything that can go wrong inside the atlas layer.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("descriptor is missing required key `{0}`")]
    MissingKey(&'static str),

    #[error("bad integer for `{key}`: {value:?}")]
    BadInteger { key: &'static str, value: String },

    #[error("bad codepoint range token: {0:?}")]
    BadCodepoint(String),

    #[error("failed to load image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to decode png {}: {source}", path.display())]
    Png {
        path: PathBuf,
        #[source]
        source: png::DecodingError,
    },

    #[error("invalid font metrics: {0}")]
    InvalidMetrics(String),

    #[error("glyph id {index} >= vwf table length {len}; malformed font?")]
    GlyphOutOfRange { index: usize, len: usize },
}
