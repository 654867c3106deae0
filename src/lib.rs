//! # textprep
//!
//! An English text-preprocessing pipeline for learning the classic NLP
//! steps one at a time: cleaning, tokenization, stopword removal, Porter
//! stemming and WordNet lemmatization. Every intermediate output is kept so
//! the stages can be compared side by side.
//!
//! ## Quick start
//!
//! ```
//! use textprep::NltkPipeline;
//!
//! let pipeline = NltkPipeline::builtin();
//! let result = pipeline.run("Natural Language Processing helps computers.");
//!
//! assert_eq!(result.cleaned, "natural language processing helps computers");
//! assert_eq!(result.stemmed.len(), result.tokens_no_sw.len());
//! ```
//!
//! With the NLTK data packages (Punkt tables, stopword corpus, WordNet),
//! build the pipeline from a [`ResourceStore`] instead; missing packages are
//! downloaded once:
//!
//! ```no_run
//! use textprep::{HttpFetcher, NltkPipeline, PipelineSpec, ResourceStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ResourceStore::new("/tmp/nltk_data", Box::new(HttpFetcher::new()?));
//! let pipeline = NltkPipeline::from_store(&store, &PipelineSpec::default())?;
//! let result = pipeline.run("The striped bats are hanging on their feet.");
//! println!("{:?}", result.lemmas);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod nlp;
pub mod pipeline;
pub mod report;
pub mod resources;

pub use error::{Error, InputError, ResourceError, Result, SpecError};
pub use nlp::cleaner::{clean, CleaningRule, RuleCleaner};
pub use nlp::lemmatizer::{Lexicon, PartOfSpeech, WordNetLemmatizer};
pub use nlp::stemmer::{EnglishStemmer, PorterStemmer, SnowballStemmer, StemmerKind};
pub use nlp::stopwords::StopwordFilter;
pub use nlp::tokenizer::{SentenceSplitter, TreebankTokenizer, WhitespaceTokenizer};
pub use pipeline::artifacts::{ComparisonRow, PipelineResult, PipelineStats};
pub use pipeline::runner::{preprocess, NltkPipeline, Pipeline, PipelineBuilder};
pub use pipeline::spec::PipelineSpec;
pub use pipeline::validation::{validate_input, ValidationEngine};
pub use resources::{Fetcher, HttpFetcher, OfflineFetcher, Resource, ResourceStore};

/// The sentence the demo runs when no text is given.
pub const DEMO_SENTENCE: &str = "Natural Language Processing helps computers understand people.";
