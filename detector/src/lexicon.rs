// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Marker phrases and structural patterns used by the scorer

use once_cell::sync::Lazy;
use regex::Regex;

/// Phrases associated with sensationalist or fabricated content
pub const FAKE_INDICATORS: [&str; 10] = [
    // Sensationalism
    "shocking",
    "breaking",
    "miracle",
    "scientists hate",
    "doctors shocked",
    // Conspiracy / clickbait
    "government doesn't want",
    "click here",
    "amazing discovery",
    "you won't believe",
    "this will change everything",
];

/// Phrases associated with attributed, sourced reporting
pub const REAL_INDICATORS: [&str; 9] = [
    // Attribution
    "according to",
    "research shows",
    "study published",
    "data indicates",
    "experts say",
    // Institutions
    "university",
    "journal",
    "peer-reviewed",
    "evidence suggests",
];

/// Texts shorter than this (in characters) count as "very short"
pub const SHORT_CONTENT_CHARS: usize = 100;

static EXCLAMATION_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!{2,}").unwrap());

static CAPITAL_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]{3,}").unwrap());

/// Fake-lexicon phrases contained in already lower-cased text, lexicon order
pub fn fake_matches(text_lower: &str) -> Vec<&'static str> {
    FAKE_INDICATORS
        .iter()
        .copied()
        .filter(|phrase| text_lower.contains(phrase))
        .collect()
}

/// Real-lexicon phrases contained in already lower-cased text, lexicon order
pub fn real_matches(text_lower: &str) -> Vec<&'static str> {
    REAL_INDICATORS
        .iter()
        .copied()
        .filter(|phrase| text_lower.contains(phrase))
        .collect()
}

/// Two or more consecutive exclamation marks
pub fn has_exclamation_run(text: &str) -> bool {
    EXCLAMATION_RUN_RE.is_match(text)
}

/// Three or more consecutive ASCII capitals; expects the text before lower-casing
pub fn has_capital_run(text: &str) -> bool {
    CAPITAL_RUN_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_keep_lexicon_order() {
        let text = "scientists hate this miracle cure, shocking!!";
        assert_eq!(fake_matches(text), vec!["shocking", "miracle", "scientists hate"]);
        assert!(real_matches(text).is_empty());
    }

    #[test]
    fn test_real_matches() {
        let text = "according to a peer-reviewed study published in a journal";
        assert_eq!(
            real_matches(text),
            vec!["according to", "study published", "journal", "peer-reviewed"]
        );
    }

    #[test]
    fn test_matching_is_substring_based() {
        // "universityhall" still contains "university"
        assert_eq!(real_matches("universityhall"), vec!["university"]);
        // matching expects lower-cased input
        assert!(fake_matches("SHOCKING").is_empty());
    }

    #[test]
    fn test_exclamation_run() {
        assert!(has_exclamation_run("wow!!"));
        assert!(has_exclamation_run("wow!!!!"));
        assert!(!has_exclamation_run("wow! really!"));
    }

    #[test]
    fn test_capital_run() {
        assert!(has_capital_run("the IPCC report"));
        assert!(has_capital_run("BREAKING news"));
        assert!(!has_capital_run("The UN said"));
        assert!(!has_capital_run("A B C D"));
    }
}
