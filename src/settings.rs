// Copyright 2025 the bmfontrender Authors
// SPDX-License-Identifier: Apache-2.0

//! Application settings and configuration constants.
//!
//! Defaults for the font descriptor format, the preview renderer and the
//! word score report. User-editable scorer configuration lives in
//! `words::config`.

// ============================================================================
// FONT DESCRIPTOR DEFAULTS
// ============================================================================
/// First codepoint when a descriptor has neither `chars` nor `firstcp`
const DEFAULT_FIRST_CODEPOINT: u32 = 32;

/// Background color when a descriptor has no `bgcolor`
const DEFAULT_BGCOLOR: &str = "#000000";

// ============================================================================
// VARIABLE-WIDTH FONT SETTINGS
// ============================================================================
/// Separator color between glyphs in color atlases (magenta)
const VWF_SEPARATOR_RGB: [u8; 3] = [255, 0, 255];

// ============================================================================
// PREVIEW SETTINGS
// ============================================================================
/// Sample rendered right after a font is chosen
const PREVIEW_SAMPLE_TEXT: &str = "A quick brown fox";

/// Lowercase letter probed to decide whether the sample needs uppercasing
const PREVIEW_LOWERCASE_PROBE: char = 'r';

// ============================================================================
// WORD REPORT SETTINGS
// ============================================================================
/// Groups after the first with more words than this are not printed, and
/// no group prints more than this many words
const REPORT_MAX_WORDS: usize = 100;

/// Column at which the word list wraps
const REPORT_WRAP_WIDTH: usize = 70;

/// Word list used when none is given
const DEFAULT_DICTIONARY: &str = "/usr/share/dict/words";

// ============================================================================
// PUBLIC API
// ============================================================================

/// Font descriptor defaults
pub mod descriptor {
    pub const DEFAULT_FIRST_CODEPOINT: u32 = super::DEFAULT_FIRST_CODEPOINT;
    pub const DEFAULT_BGCOLOR: &str = super::DEFAULT_BGCOLOR;
}

/// Variable-width font scanning
pub mod vwf {
    pub const SEPARATOR_RGB: [u8; 3] = super::VWF_SEPARATOR_RGB;
}

/// Preview rendering after a font loads
pub mod preview {
    pub const SAMPLE_TEXT: &str = super::PREVIEW_SAMPLE_TEXT;
    pub const LOWERCASE_PROBE: char = super::PREVIEW_LOWERCASE_PROBE;
}

/// Word score report layout
pub mod report {
    pub const MAX_WORDS: usize = super::REPORT_MAX_WORDS;
    pub const WRAP_WIDTH: usize = super::REPORT_WRAP_WIDTH;
    pub const DEFAULT_DICTIONARY: &str = super::DEFAULT_DICTIONARY;
}
