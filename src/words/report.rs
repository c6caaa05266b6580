// Copyright 2025 the bmfontrender Authors
// SPDX-License-Identifier: Apache-2.0

//! Text report of score groups.
//!
//! Highest score first. Only the top group may be arbitrarily large; any
//! later group with more than [`MAX_WORDS`] words is left out, and no
//! group lists more than that many words.

use super::ScoreGroups;
use crate::settings::report::{MAX_WORDS, WRAP_WIDTH};

/// Format every shown group of `groups` under the table name `name`.
pub fn format_groups(name: &str, groups: &ScoreGroups) -> String {
    let mut out = String::new();

    for (row, (score, words)) in groups.iter().rev().enumerate() {
        if row > 0 && words.len() > MAX_WORDS {
            continue;
        }

        // BTreeSet iterates alphabetically, so the stable sort keeps
        // same-length words in alphabetical order
        let mut words: Vec<&str> = words.iter().map(String::as_str).collect();
        words.sort_by_key(|w| w.chars().count());

        let noun = if words.len() > 1 { "words" } else { "word" };
        out.push_str(&format!("{name} score {score}: {} {noun}\n", words.len()));

        let shown = words[..words.len().min(MAX_WORDS)].join(", ");
        for line in wrap(&shown, WRAP_WIDTH) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Greedy word wrap on spaces. A single word longer than `width` gets a
/// line to itself.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
