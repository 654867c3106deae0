//! Stage trait definitions for the pipeline.
//!
//! Each trait represents one processing stage boundary. The pipeline is
//! generic over them, so every combination of stage implementations is
//! statically dispatched. Stages cannot fail: they take borrowed input and
//! return a freshly allocated output.

use crate::nlp::cleaner::RuleCleaner;
use crate::nlp::lemmatizer::WordNetLemmatizer;
use crate::nlp::stemmer::{EnglishStemmer, PorterStemmer, SnowballStemmer};
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::{TreebankTokenizer, WhitespaceTokenizer};

// ============================================================================
// Cleaner (stage 1)
// ============================================================================

/// Normalizes raw text into canonical form.
///
/// # Contract
///
/// - **Output** contains only lowercase ASCII letters and single spaces,
///   with no leading or trailing whitespace.
/// - **Idempotent**: cleaning cleaned text changes nothing.
pub trait Cleaner {
    fn clean(&self, text: &str) -> String;
}

impl Cleaner for RuleCleaner {
    #[inline]
    fn clean(&self, text: &str) -> String {
        RuleCleaner::clean(self, text)
    }
}

// ============================================================================
// Tokenizer (stage 2)
// ============================================================================

/// Splits text into word tokens. Empty input yields no tokens.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

impl Tokenizer for TreebankTokenizer {
    #[inline]
    fn tokenize(&self, text: &str) -> Vec<String> {
        TreebankTokenizer::tokenize(self, text)
    }
}

impl Tokenizer for WhitespaceTokenizer {
    #[inline]
    fn tokenize(&self, text: &str) -> Vec<String> {
        WhitespaceTokenizer::tokenize(self, text)
    }
}

// ============================================================================
// TokenFilter (stage 3)
// ============================================================================

/// Drops tokens from a sequence.
///
/// # Contract
///
/// The output is an order-preserving subsequence of the input; surviving
/// duplicates are kept.
pub trait TokenFilter {
    fn filter(&self, tokens: &[String]) -> Vec<String>;
}

impl TokenFilter for StopwordFilter {
    #[inline]
    fn filter(&self, tokens: &[String]) -> Vec<String> {
        StopwordFilter::filter(self, tokens)
    }
}

// ============================================================================
// Stemmer (stage 4)
// ============================================================================

/// Reduces a single word to its stem.
///
/// The pipeline maps this over the filtered tokens, so the stemmed
/// sequence is always positionally aligned with its input.
pub trait Stemmer {
    fn stem(&self, word: &str) -> String;
}

impl Stemmer for PorterStemmer {
    #[inline]
    fn stem(&self, word: &str) -> String {
        PorterStemmer::stem(self, word)
    }
}

impl Stemmer for SnowballStemmer {
    #[inline]
    fn stem(&self, word: &str) -> String {
        SnowballStemmer::stem(self, word)
    }
}

impl Stemmer for EnglishStemmer {
    #[inline]
    fn stem(&self, word: &str) -> String {
        EnglishStemmer::stem(self, word)
    }
}

// ============================================================================
// Lemmatizer (stage 5)
// ============================================================================

/// Maps a single word to its dictionary base form, or returns it unchanged.
pub trait Lemmatizer {
    fn lemmatize(&self, word: &str) -> String;
}

impl Lemmatizer for WordNetLemmatizer {
    #[inline]
    fn lemmatize(&self, word: &str) -> String {
        WordNetLemmatizer::lemmatize(self, word)
    }
}

/// Leaves every word unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLemmatizer;

impl Lemmatizer for IdentityLemmatizer {
    #[inline]
    fn lemmatize(&self, word: &str) -> String {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::lemmatizer::{Lexicon, PartOfSpeech};

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cleaner_trait_matches_inherent() {
        let cleaner = RuleCleaner::new();
        let text = "Hello, World 42!";
        assert_eq!(Cleaner::clean(&cleaner, text), cleaner.clean(text));
    }

    #[test]
    fn test_tokenizers_agree_on_cleaned_text() {
        let text = "natural language processing helps";
        assert_eq!(
            Tokenizer::tokenize(&TreebankTokenizer::builtin(), text),
            Tokenizer::tokenize(&WhitespaceTokenizer, text)
        );
    }

    #[test]
    fn test_filter_is_subsequence() {
        let tokens = words(&["the", "cat", "and", "the", "hat", "cat"]);
        let filter = StopwordFilter::from_list(&["the", "and"]);
        let kept = TokenFilter::filter(&filter, &tokens);
        assert_eq!(kept, words(&["cat", "hat", "cat"]));
    }

    #[test]
    fn test_stemmer_impls() {
        assert_eq!(Stemmer::stem(&PorterStemmer, "helps"), "help");
        assert_eq!(Stemmer::stem(&EnglishStemmer::default(), "helps"), "help");
        assert_eq!(Stemmer::stem(&SnowballStemmer::new(), "running"), "run");
    }

    #[test]
    fn test_lemmatizer_impls() {
        let mut lexicon = Lexicon::empty();
        lexicon.insert_lemma(PartOfSpeech::Noun, "computer");
        let lemmatizer = WordNetLemmatizer::new(lexicon);

        assert_eq!(Lemmatizer::lemmatize(&lemmatizer, "computers"), "computer");
        assert_eq!(Lemmatizer::lemmatize(&IdentityLemmatizer, "computers"), "computers");
    }
}
