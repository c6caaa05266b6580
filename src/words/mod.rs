// Copyright 2025 the bmfontrender Authors
// SPDX-License-Identifier: Apache-2.0

//! Word scoring by letter composition.
//!
//! Each letter in a table carries a weight. A word scores the sum of the
//! weights of the distinct table letters it contains, so repeating a
//! letter adds nothing. Words are grouped by score; how groups are shown
//! is up to [`report`].

pub mod config;
pub mod report;

use std::collections::{BTreeMap, BTreeSet, HashSet};

/// One letter and its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterValue {
    pub letter: char,
    pub weight: u32,
}

impl LetterValue {
    pub const fn new(letter: char, weight: u32) -> Self {
        Self { letter, weight }
    }
}

/// A named letter table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueTable {
    pub name: String,
    pub values: Vec<LetterValue>,
}

/// Words grouped by score.
pub type ScoreGroups = BTreeMap<u32, BTreeSet<String>>;

/// How distinctive each letter's insular form is (not counting long r or
/// long s).
pub const INSULAR_VALUES: &[LetterValue] = &[
    LetterValue::new('a', 1),
    LetterValue::new('d', 2),
    LetterValue::new('f', 2),
    LetterValue::new('g', 2),
    LetterValue::new('l', 1),
    LetterValue::new('r', 1),
    LetterValue::new('t', 2),
    LetterValue::new('v', 1),
];

pub const UV_VALUES: &[LetterValue] = &[LetterValue::new('u', 1), LetterValue::new('v', 1)];

/// The tables scored when no config says otherwise.
pub fn builtin_tables() -> Vec<ValueTable> {
    vec![
        ValueTable {
            name: "Insular".to_string(),
            values: INSULAR_VALUES.to_vec(),
        },
        ValueTable {
            name: "U and V".to_string(),
            values: UV_VALUES.to_vec(),
        },
    ]
}

/// Score of one word under a letter table.
pub fn word_score(word: &str, values: &[LetterValue]) -> u32 {
    let letters: HashSet<char> = word.chars().collect();
    values
        .iter()
        .filter(|v| letters.contains(&v.letter))
        .map(|v| v.weight)
        .sum()
}

/// Score every word and group the words by score.
///
/// Words are trimmed first; blank lines are skipped.
pub fn words_by_score<I, S>(words: I, values: &[LetterValue]) -> ScoreGroups
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut groups = ScoreGroups::new();
    for word in words {
        let word = word.as_ref().trim();
        if word.is_empty() {
            continue;
        }
        groups
            .entry(word_score(word, values))
            .or_default()
            .insert(word.to_string());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab_table() -> Vec<LetterValue> {
        vec![LetterValue::new('a', 1), LetterValue::new('b', 2)]
    }

    #[test]
    fn test_group_by_score() {
        let groups = words_by_score(["ab", "a", "c"], &ab_table());
        let expected: ScoreGroups = [
            (3, BTreeSet::from(["ab".to_string()])),
            (1, BTreeSet::from(["a".to_string()])),
            (0, BTreeSet::from(["c".to_string()])),
        ]
        .into_iter()
        .collect();
        assert_eq!(groups, expected);
    }

    #[test]
    fn test_repeated_letters_count_once() {
        let table = ab_table();
        assert_eq!(word_score("aaa", &table), word_score("a", &table));
        assert_eq!(word_score("abba", &table), 3);
    }

    #[test]
    fn test_trims_and_dedups() {
        let groups = words_by_score(["ab\n", "  ab", "", "   \n"], &ab_table());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&3].len(), 1);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(word_score("AB", &ab_table()), 0);
    }

    #[test]
    fn test_builtin_tables() {
        let tables = builtin_tables();
        assert_eq!(tables[0].name, "Insular");
        // a + d + r + t
        assert_eq!(word_score("dart", &tables[0].values), 6);
        assert_eq!(word_score("vulva", &tables[1].values), 2);
    }
}
