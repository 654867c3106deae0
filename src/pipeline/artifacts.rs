//! First-class pipeline artifacts.
//!
//! [`PipelineResult`] carries every intermediate output of one run. It is
//! built once by the runner and never mutated afterwards; derived views
//! ([`PipelineStats`], [`ComparisonRow`]) are computed from it on demand.

use rustc_hash::FxHashSet;
use serde::Serialize;

/// All intermediate outputs of a single pipeline run.
///
/// `tokens_no_sw`, `stemmed` and `lemmas` always have the same length and
/// are positionally aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineResult {
    pub cleaned: String,
    pub tokens: Vec<String>,
    pub tokens_no_sw: Vec<String>,
    pub stemmed: Vec<String>,
    pub lemmas: Vec<String>,
}

impl PipelineResult {
    /// Summary counts for the report.
    pub fn stats(&self) -> PipelineStats {
        let unique: FxHashSet<&str> = self.tokens.iter().map(String::as_str).collect();
        PipelineStats {
            token_count: self.tokens.len(),
            unique_token_count: unique.len(),
            filtered_count: self.tokens_no_sw.len(),
            removed_count: self.tokens.len() - self.tokens_no_sw.len(),
        }
    }

    /// One row per filtered token: the token, its stem and its lemma.
    pub fn comparison(&self) -> Vec<ComparisonRow> {
        self.tokens_no_sw
            .iter()
            .zip(&self.stemmed)
            .zip(&self.lemmas)
            .map(|((original, stemmed), lemma)| ComparisonRow {
                original: original.clone(),
                stemmed: stemmed.clone(),
                lemma: lemma.clone(),
            })
            .collect()
    }

    /// `true` when cleaning left nothing to tokenize.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Token counts shown next to the panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub token_count: usize,
    pub unique_token_count: usize,
    pub filtered_count: usize,
    pub removed_count: usize,
}

/// A filtered token next to its stem and lemma.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub original: String,
    pub stemmed: String,
    pub lemma: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> PipelineResult {
        PipelineResult {
            cleaned: "the cats and the dogs".into(),
            tokens: words(&["the", "cats", "and", "the", "dogs"]),
            tokens_no_sw: words(&["cats", "dogs"]),
            stemmed: words(&["cat", "dog"]),
            lemmas: words(&["cat", "dog"]),
        }
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats();
        assert_eq!(
            stats,
            PipelineStats {
                token_count: 5,
                unique_token_count: 4,
                filtered_count: 2,
                removed_count: 3,
            }
        );
    }

    #[test]
    fn test_comparison_rows_are_aligned() {
        let rows = sample().comparison();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].original, "dogs");
        assert_eq!(rows[1].stemmed, "dog");
        assert_eq!(rows[1].lemma, "dog");
    }

    #[test]
    fn test_empty_result() {
        let result = PipelineResult::default();
        assert!(result.is_empty());
        assert_eq!(result.stats(), PipelineStats::default());
        assert!(result.comparison().is_empty());
    }

    #[test]
    fn test_serializes_with_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["cleaned"], "the cats and the dogs");
        assert_eq!(json["tokens_no_sw"][0], "cats");
        assert_eq!(json["lemmas"].as_array().unwrap().len(), 2);
    }
}
