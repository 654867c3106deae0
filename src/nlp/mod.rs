//! Natural Language Processing components
//!
//! This module provides the five preprocessing steps: cleaning,
//! tokenization, stopword filtering, stemming and lemmatization.

pub mod cleaner;
pub mod lemmatizer;
pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;
