// Copyright 2025 the bmfontrender Authors
// SPDX-License-Identifier: Apache-2.0

//! Hex color parsing for the descriptor's `bgcolor` key.

use image::Rgb;

/// Parse `#RGB` or `#RRGGBB` into an RGB triple.
///
/// Short form duplicates each digit (`#f80` is `#ff8800`). Any other
/// shape, including a missing `#`, returns `None`.
pub fn parse_color(s: &str) -> Option<Rgb<u8>> {
    let digits = s.strip_prefix('#')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    match digits.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (channel, c) in rgb.iter_mut().zip(digits.chars()) {
                // A single hex digit times 17 spreads 0..=15 over 0..=255
                *channel = c.to_digit(16)? as u8 * 17;
            }
            Some(Rgb(rgb))
        }
        6 => {
            let mut rgb = [0u8; 3];
            for (i, channel) in rgb.iter_mut().enumerate() {
                *channel = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).ok()?;
            }
            Some(Rgb(rgb))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_form() {
        assert_eq!(parse_color("#fff"), Some(Rgb([255, 255, 255])));
        assert_eq!(parse_color("#f80"), Some(Rgb([255, 136, 0])));
        assert_eq!(parse_color("#000"), Some(Rgb([0, 0, 0])));
    }

    #[test]
    fn test_long_form() {
        assert_eq!(parse_color("#FF00ff"), Some(Rgb([255, 0, 255])));
        assert_eq!(parse_color("#123456"), Some(Rgb([0x12, 0x34, 0x56])));
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert_eq!(parse_color("fff"), None);
        assert_eq!(parse_color("#"), None);
        assert_eq!(parse_color("#ffff"), None);
        assert_eq!(parse_color("#1234567"), None);
        assert_eq!(parse_color("#ggg"), None);
        assert_eq!(parse_color("#12 456"), None);
    }
}
