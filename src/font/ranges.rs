// Copyright 2025 the bmfontrender Authors
// SPDX-License-Identifier: Apache-2.0

//! Codepoint to glyph index mapping.
//!
//! A font's glyphs are numbered in atlas order. The `chars` lines of a
//! descriptor say which codepoints those glyphs stand for, as a list of
//! inclusive hex intervals. Each interval takes the next block of glyph
//! indices in file order; the table is then sorted by first codepoint so
//! lookups can binary search.

use super::error::FontError;

/// A half-open codepoint interval `[first, end)` mapped onto consecutive
/// glyph indices starting at `glyph_base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CodepointRange {
    pub first: u32,
    pub end: u32,
    pub glyph_base: usize,
}

impl CodepointRange {
    /// Number of glyphs covered by this range.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.first) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.first
    }
}

/// Sorted, non-overlapping list of codepoint ranges.
///
/// Overlapping ranges are not rejected, but which one wins a lookup is
/// unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeTable {
    ranges: Vec<CodepointRange>,
}

impl RangeTable {
    /// Build a table from raw ranges, sorting them for lookup.
    pub fn new(mut ranges: Vec<CodepointRange>) -> Self {
        ranges.sort();
        Self { ranges }
    }

    /// Build the table from the values of every `chars` line.
    ///
    /// Each line holds comma-separated tokens of the form `41-5A` or `20`
    /// (hex, inclusive). Glyph bases accumulate in the order the tokens
    /// appear, before sorting.
    pub fn parse_chars<S: AsRef<str>>(lines: &[S]) -> Result<Self, FontError> {
        let mut ranges = Vec::new();
        let mut glyph_base = 0usize;

        for line in lines {
            for token in line.as_ref().split(',') {
                let token = token.trim();
                let (first, last) = match token.split_once('-') {
                    Some((first, last)) => (first, last),
                    None => (token, token),
                };
                let first = parse_hex(first).ok_or_else(|| bad_token(token))?;
                let last = parse_hex(last).ok_or_else(|| bad_token(token))?;
                let end = last.checked_add(1).ok_or_else(|| bad_token(token))?;
                if end <= first {
                    return Err(bad_token(token));
                }

                ranges.push(CodepointRange {
                    first,
                    end,
                    glyph_base,
                });
                glyph_base += (end - first) as usize;
            }
        }

        Ok(Self::new(ranges))
    }

    /// A single contiguous range starting at `first_codepoint` and covering
    /// `num_glyphs` glyphs.
    pub fn from_first_codepoint(first_codepoint: u32, num_glyphs: usize) -> Self {
        let count = u32::try_from(num_glyphs).unwrap_or(u32::MAX);
        Self {
            ranges: vec![CodepointRange {
                first: first_codepoint,
                end: first_codepoint.saturating_add(count),
                glyph_base: 0,
            }],
        }
    }

    /// Glyph index for a codepoint, or `None` when no range contains it.
    pub fn lookup(&self, cp: u32) -> Option<usize> {
        // Index of the first range starting after `cp`
        let idx = self.ranges.partition_point(|r| r.first <= cp);
        let range = self.ranges.get(idx.checked_sub(1)?)?;
        (cp < range.end).then(|| range.glyph_base + (cp - range.first) as usize)
    }

    /// Lowest first codepoint and highest end over all ranges.
    pub fn codepoint_range(&self) -> Option<(u32, u32)> {
        let low = self.ranges.iter().map(|r| r.first).min()?;
        let high = self.ranges.iter().map(|r| r.end).max()?;
        Some((low, high))
    }

    /// Total number of glyph indices the table refers to.
    pub fn glyph_count(&self) -> usize {
        self.ranges.iter().map(CodepointRange::len).sum()
    }

    pub fn ranges(&self) -> &[CodepointRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

fn parse_hex(s: &str) -> Option<u32> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

fn bad_token(token: &str) -> FontError {
    FontError::BadCodepoint(token.to_string())
}
