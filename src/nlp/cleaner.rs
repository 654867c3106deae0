//! Text cleaning
//!
//! Normalizes raw text into a canonical lowercase, punctuation-free form.
//! Cleaning is an ordered list of [`CleaningRule`]s; the order is part of the
//! contract because URL and digit stripping must see the text before
//! punctuation is turned into spaces.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http\S+|www\S+").expect("valid URL pattern"));
static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digit pattern"));
static NON_LETTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z\s]").expect("valid letter pattern"));
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// One step of the cleaning sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleaningRule {
    /// Lowercase the whole string.
    Lowercase,
    /// Remove `http...` / `www...` runs up to the next whitespace.
    StripUrls,
    /// Remove every digit character.
    StripDigits,
    /// Replace anything that is not `a-z` or whitespace with one space.
    ReplaceNonLetters,
    /// Collapse whitespace runs to one space and trim the ends.
    CollapseWhitespace,
}

/// The default rule order.
///
/// `StripUrls` runs a second time after `StripDigits`: removing digits can
/// glue fragments into a fresh `http`/`www` run, and leaving it would make a
/// second cleaning pass change the text.
pub const DEFAULT_RULES: &[CleaningRule] = &[
    CleaningRule::Lowercase,
    CleaningRule::StripUrls,
    CleaningRule::StripDigits,
    CleaningRule::StripUrls,
    CleaningRule::ReplaceNonLetters,
    CleaningRule::CollapseWhitespace,
];

impl CleaningRule {
    /// Apply this rule alone.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            CleaningRule::Lowercase => Cow::Owned(text.to_lowercase()),
            CleaningRule::StripUrls => URL_RE.replace_all(text, ""),
            CleaningRule::StripDigits => DIGIT_RE.replace_all(text, ""),
            CleaningRule::ReplaceNonLetters => NON_LETTER_RE.replace_all(text, " "),
            CleaningRule::CollapseWhitespace => match WHITESPACE_RE.replace_all(text, " ") {
                Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
                Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
            },
        }
    }

    /// Stable name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            CleaningRule::Lowercase => "lowercase",
            CleaningRule::StripUrls => "strip_urls",
            CleaningRule::StripDigits => "strip_digits",
            CleaningRule::ReplaceNonLetters => "replace_non_letters",
            CleaningRule::CollapseWhitespace => "collapse_whitespace",
        }
    }
}

/// A cleaner that applies a fixed sequence of rules.
#[derive(Debug, Clone)]
pub struct RuleCleaner {
    rules: Vec<CleaningRule>,
}

impl Default for RuleCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleCleaner {
    /// Create a cleaner with [`DEFAULT_RULES`].
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_RULES.to_vec(),
        }
    }

    /// Create a cleaner with a custom rule order.
    pub fn with_rules(rules: Vec<CleaningRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[CleaningRule] {
        &self.rules
    }

    /// Run every rule in order.
    pub fn clean(&self, text: &str) -> String {
        let mut current = text.to_string();
        for rule in &self.rules {
            current = rule.apply(&current).into_owned();
        }
        current
    }
}

/// Clean `text` with the default rule order.
pub fn clean(text: &str) -> String {
    RuleCleaner::new().clean(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_canonical(cleaned: &str) {
        assert!(
            cleaned.chars().all(|c| c.is_ascii_lowercase() || c == ' '),
            "unexpected character in {cleaned:?}"
        );
        assert_eq!(cleaned, cleaned.trim());
        assert!(!cleaned.contains("  "), "double space in {cleaned:?}");
    }

    const SAMPLES: &[&str] = &[
        "",
        "   ",
        "\t\n\r",
        "Natural Language Processing (NLP) helps computers understand people.",
        "Visit https://example.com/path?q=1 or www.rust-lang.org today!",
        "123!!! 456???",
        "It's 2024 -- the year of   e-mail   & C++.",
        "Café naïve résumé ÜBER",
        "ht1tp is not a url, but w2ww3x might be",
        "http",
        "www",
        "line one\nline two\r\n\ttabbed",
        "🚀 Rocket 🚀 science",
        "ALL CAPS SHOUTING!!!",
        "mixed123numbers456inside",
        "a.b.c;d:e/f\\g|h",
        "İstanbul ǅungla ß",
        "\u{00a0}non\u{2003}breaking\u{3000}spaces\u{00a0}",
    ];

    #[test]
    fn test_example_sentence() {
        assert_eq!(
            clean("Natural Language Processing (NLP) helps computers understand people."),
            "natural language processing nlp helps computers understand people"
        );
    }

    #[test]
    fn test_urls_are_removed() {
        assert_eq!(
            clean("Visit https://example.com/path?q=1 or www.rust-lang.org today!"),
            "visit or today"
        );
    }

    #[test]
    fn test_digits_and_punctuation_only() {
        assert_eq!(clean("123!!! 456???"), "");
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("  \t\n "), "");
    }

    #[test]
    fn test_punctuation_becomes_space() {
        assert_eq!(clean("don't-stop"), "don t stop");
    }

    #[test]
    fn test_digits_are_stripped_not_spaced() {
        assert_eq!(clean("abc123def"), "abcdef");
    }

    #[test]
    fn test_non_ascii_letters_are_replaced() {
        assert_eq!(clean("Café au lait"), "caf au lait");
    }

    #[test]
    fn test_output_is_canonical() {
        for sample in SAMPLES {
            assert_canonical(&clean(sample));
        }
    }

    #[test]
    fn test_clean_is_idempotent() {
        for sample in SAMPLES {
            let once = clean(sample);
            assert_eq!(clean(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_url_formed_by_digit_removal() {
        // "ht1tpx" becomes "httpx" once digits go; the second URL pass drops it.
        assert_eq!(clean("ht1tpx keep"), "keep");
    }

    #[test]
    fn test_rules_apply_independently() {
        assert_eq!(CleaningRule::Lowercase.apply("AbC"), "abc");
        assert_eq!(CleaningRule::StripUrls.apply("see http://x.y now"), "see  now");
        assert_eq!(CleaningRule::StripDigits.apply("a1b22c"), "abc");
        assert_eq!(CleaningRule::ReplaceNonLetters.apply("a,b!"), "a b ");
        assert_eq!(CleaningRule::CollapseWhitespace.apply("  a \t b  "), "a b");
    }

    #[test]
    fn test_rule_order_matters() {
        // Punctuation before URL stripping leaves URL fragments behind.
        let reordered = RuleCleaner::with_rules(vec![
            CleaningRule::Lowercase,
            CleaningRule::ReplaceNonLetters,
            CleaningRule::StripUrls,
            CleaningRule::CollapseWhitespace,
        ]);
        assert_eq!(reordered.clean("go to http://a.com now"), "go to http a com now");
        assert_eq!(clean("go to http://a.com now"), "go to now");
    }

    #[test]
    fn test_default_rules_order() {
        let names: Vec<_> = RuleCleaner::new().rules().iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "lowercase",
                "strip_urls",
                "strip_digits",
                "strip_urls",
                "replace_non_letters",
                "collapse_whitespace"
            ]
        );
    }
}
