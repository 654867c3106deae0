//! Stopword filtering
//!
//! This module provides English stopword filtering, either from the NLTK
//! stopwords corpus (one word per line) or from the built-in list of the
//! `stop-words` crate, plus custom lists.

use std::path::Path;

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use crate::error::ResourceError;

/// Relative path of the English list inside the `stopwords` corpus.
pub const CORPUS_ENGLISH_FILE: &str = "english";

/// A filter for removing stopwords from a token sequence
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
    /// Whether membership is checked on the token as-is
    case_sensitive: bool,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// Create a filter from the built-in English list
    pub fn english() -> Self {
        Self {
            stopwords: get(LANGUAGE::English)
                .iter()
                .map(|s| s.to_string())
                .collect(),
            case_sensitive: true,
        }
    }

    /// Create a filter from an unpacked NLTK `stopwords` corpus directory
    pub fn from_corpus(dir: &Path) -> Result<Self, ResourceError> {
        let path = dir.join(CORPUS_ENGLISH_FILE);
        let contents =
            std::fs::read_to_string(&path).map_err(|e| ResourceError::io(&path, e))?;
        let words: Vec<&str> = contents
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .collect();
        Ok(Self::from_list(&words))
    }

    /// A filter that keeps every token
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
            case_sensitive: true,
        }
    }

    /// Build from any word list; entries are lowercased
    pub fn from_list(words: &[&str]) -> Self {
        let stopwords: FxHashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
        Self {
            stopwords,
            case_sensitive: true,
        }
    }

    /// Set case sensitivity
    ///
    /// The set itself is lowercase, so a case-sensitive filter never matches
    /// `The`. Upstream cleaning lowercases everything, which makes the
    /// default behave case-insensitively end to end.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Extend the set; words are lowercased on the way in.
    pub fn insert_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    /// Take words out of the set, e.g. to keep negations like `not`.
    pub fn remove_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.stopwords.remove(&word.as_ref().to_lowercase());
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        if self.case_sensitive {
            self.stopwords.contains(word)
        } else {
            self.stopwords.contains(&word.to_lowercase())
        }
    }

    /// Keep the tokens that are not stopwords, in their original order
    pub fn filter(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .filter(|t| !self.is_stopword(t))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_builtin_english_list() {
        let filter = StopwordFilter::english();

        for word in ["the", "and", "of", "to"] {
            assert!(filter.is_stopword(word), "{word} should be a stopword");
        }
        assert!(!filter.is_stopword("lemmatization"));
        assert!(filter.len() >= 100);
    }

    #[test]
    fn test_case_sensitive_by_default() {
        let filter = StopwordFilter::english();

        assert!(filter.is_case_sensitive());
        assert!(filter.is_stopword("the"));
        assert!(!filter.is_stopword("The"));
    }

    #[test]
    fn test_case_insensitive_opt_in() {
        let filter = StopwordFilter::english().with_case_sensitive(false);

        assert!(filter.is_stopword("The"));
        assert!(filter.is_stopword("IS"));
    }

    #[test]
    fn test_custom_list_is_lowercased_and_editable() {
        let mut filter = StopwordFilter::from_list(&["Foo", "bar"]);
        assert!(filter.is_stopword("foo"));
        assert!(!filter.is_stopword("not"));

        filter.insert_words(["NOT", "nor"]);
        assert!(filter.is_stopword("not"));
        assert_eq!(filter.len(), 4);

        filter.remove_words(vec![String::from("not")]);
        assert!(!filter.is_stopword("not"));
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = StopwordFilter::empty();
        let input = tokens(&["the", "a", "of"]);

        assert!(filter.is_empty());
        assert_eq!(filter.filter(&input), input);
    }

    #[test]
    fn test_filter_preserves_order_and_duplicates() {
        let filter = StopwordFilter::from_list(&["the", "is", "a"]);
        let input = tokens(&["the", "cat", "is", "a", "cat", "the", "dog"]);

        assert_eq!(filter.filter(&input), tokens(&["cat", "cat", "dog"]));
    }

    #[test]
    fn test_filter_result_is_subsequence() {
        let filter = StopwordFilter::english();
        let input = tokens(&["the", "quick", "brown", "fox", "is", "over", "the", "dog"]);
        let output = filter.filter(&input);

        assert!(output.len() <= input.len());
        let mut rest = input.iter();
        for token in &output {
            assert!(rest.any(|t| t == token), "{token} out of order");
        }
    }

    #[test]
    fn test_filter_empty_sequence() {
        assert!(StopwordFilter::english().filter(&[]).is_empty());
    }

    #[test]
    fn test_from_corpus() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CORPUS_ENGLISH_FILE), "i\nme\n\nthe\n  is \n").unwrap();

        let filter = StopwordFilter::from_corpus(dir.path()).unwrap();
        assert_eq!(filter.len(), 4);
        assert!(filter.is_stopword("is"));
        assert!(!filter.is_stopword(""));
    }

    #[test]
    fn test_from_corpus_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(StopwordFilter::from_corpus(dir.path()).is_err());
    }
}
