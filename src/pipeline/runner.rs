//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! The [`Pipeline`] struct holds a statically-composed set of stages.
//! Calling [`Pipeline::run`] executes them in order (clean, tokenize,
//! remove stopwords, stem, lemmatize), threading each output into the next
//! stage and keeping every intermediate in the returned [`PipelineResult`].
//!
//! # Static dispatch
//!
//! `Pipeline` is generic over all stage types, so the compiler monomorphizes
//! each combination into a unique concrete type. Zero-sized stages (e.g.
//! [`PorterStemmer`](crate::nlp::stemmer::PorterStemmer)) add zero bytes.
//!
//! # Construction
//!
//! A pipeline is built once and passed around by reference; stages are
//! immutable after construction, so a single instance can serve any number
//! of runs.
//!
//! - [`Pipeline::from_store`] loads the NLTK resources from a
//!   [`ResourceStore`], fetching missing packages first.
//! - [`Pipeline::builtin`] needs no resources at all.
//! - [`PipelineBuilder`] swaps individual stages.

use tracing::info;

use crate::error::ResourceError;
use crate::nlp::cleaner::RuleCleaner;
use crate::nlp::lemmatizer::WordNetLemmatizer;
use crate::nlp::stemmer::EnglishStemmer;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::{SentenceSplitter, TreebankTokenizer};
use crate::pipeline::artifacts::PipelineResult;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReportBuilder, STAGE_CLEAN, STAGE_LEMMATIZE,
    STAGE_STEM, STAGE_STOPWORDS, STAGE_TOKENIZE,
};
use crate::pipeline::spec::PipelineSpec;
use crate::pipeline::traits::{Cleaner, Lemmatizer, Stemmer, TokenFilter, Tokenizer};
use crate::pipeline::validation::validate_input;
use crate::resources::{Resource, ResourceStore};

/// Enter a tracing span for a pipeline stage; it closes at end of scope.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::debug_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// Pipeline — statically-composed stage container
// ============================================================================

/// A pipeline composed of concrete stage implementations.
///
/// # Type parameters
///
/// | Param | Trait | NLTK-backed impl |
/// |-------|-------|------------------|
/// | `Cl`  | [`Cleaner`] | [`RuleCleaner`] |
/// | `Tok` | [`Tokenizer`] | [`TreebankTokenizer`] |
/// | `Sw`  | [`TokenFilter`] | [`StopwordFilter`] |
/// | `St`  | [`Stemmer`] | [`EnglishStemmer`] |
/// | `Lm`  | [`Lemmatizer`] | [`WordNetLemmatizer`] |
#[derive(Debug, Clone)]
pub struct Pipeline<Cl, Tok, Sw, St, Lm> {
    pub cleaner: Cl,
    pub tokenizer: Tok,
    pub stopwords: Sw,
    pub stemmer: St,
    pub lemmatizer: Lm,
}

/// The pipeline backed by NLTK resources (or their built-in stand-ins).
pub type NltkPipeline =
    Pipeline<RuleCleaner, TreebankTokenizer, StopwordFilter, EnglishStemmer, WordNetLemmatizer>;

impl NltkPipeline {
    /// Build a pipeline that needs no downloaded resources.
    ///
    /// - Cleaning rules as usual
    /// - Treebank tokenizer with a small built-in abbreviation table
    /// - The `stop-words` English list
    /// - Porter stemmer
    /// - WordNet lemmatizer over an empty lexicon (every word unchanged)
    pub fn builtin() -> Self {
        Self::builtin_with(&PipelineSpec::default())
    }

    /// [`builtin`](Self::builtin) with the stage options of `spec` applied.
    /// Its resource settings are ignored.
    pub fn builtin_with(spec: &PipelineSpec) -> Self {
        Pipeline {
            cleaner: RuleCleaner::new(),
            tokenizer: TreebankTokenizer::builtin(),
            stopwords: StopwordFilter::english()
                .with_case_sensitive(!spec.case_insensitive_stopwords),
            stemmer: EnglishStemmer::from_kind(spec.stemmer),
            lemmatizer: WordNetLemmatizer::default().with_default_pos(spec.lemma_pos),
        }
    }

    /// Build the pipeline from the packages in `store`, configured by `spec`.
    ///
    /// Missing packages are fetched first (once per store). Any fetch or
    /// read failure is returned and no pipeline is built.
    pub fn from_store(store: &ResourceStore, spec: &PipelineSpec) -> Result<Self, ResourceError> {
        store.ensure_available()?;

        let splitter = SentenceSplitter::from_punkt_tab(&store.require(Resource::PunktTab)?)?;
        let stopwords = StopwordFilter::from_corpus(&store.require(Resource::Stopwords)?)?
            .with_case_sensitive(!spec.case_insensitive_stopwords);
        let lemmatizer = WordNetLemmatizer::from_wordnet_dir(&store.require(Resource::Wordnet)?)?
            .with_default_pos(spec.lemma_pos);

        info!(
            abbreviations = splitter.len(),
            stopwords = stopwords.len(),
            stemmer = spec.stemmer.as_str(),
            "pipeline resources loaded"
        );

        Ok(Pipeline {
            cleaner: RuleCleaner::new(),
            tokenizer: TreebankTokenizer::new(splitter),
            stopwords,
            stemmer: EnglishStemmer::from_kind(spec.stemmer),
            lemmatizer,
        })
    }
}

/// Check `raw`, prepare the packages in `store`, then run.
///
/// Input is checked before the store is touched, so rejected text never
/// triggers a download.
pub fn preprocess(
    store: &ResourceStore,
    spec: &PipelineSpec,
    raw: &str,
) -> crate::Result<PipelineResult> {
    let text = validate_input(raw)?;
    let pipeline = NltkPipeline::from_store(store, spec)?;
    Ok(pipeline.run(text))
}

// ============================================================================
// Stages and Pipeline::run
// ============================================================================

impl<Cl, Tok, Sw, St, Lm> Pipeline<Cl, Tok, Sw, St, Lm>
where
    Cl: Cleaner,
    Tok: Tokenizer,
    Sw: TokenFilter,
    St: Stemmer,
    Lm: Lemmatizer,
{
    pub fn clean(&self, text: &str) -> String {
        self.cleaner.clean(text)
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(text)
    }

    pub fn remove_stopwords(&self, tokens: &[String]) -> Vec<String> {
        self.stopwords.filter(tokens)
    }

    /// Stem every token; the output is aligned 1:1 with `tokens`.
    pub fn stem(&self, tokens: &[String]) -> Vec<String> {
        tokens.iter().map(|t| self.stemmer.stem(t)).collect()
    }

    /// Lemmatize every token; the output is aligned 1:1 with `tokens`.
    pub fn lemmatize(&self, tokens: &[String]) -> Vec<String> {
        tokens.iter().map(|t| self.lemmatizer.lemmatize(t)).collect()
    }

    /// Run all stages on `raw`.
    pub fn run(&self, raw: &str) -> PipelineResult {
        self.run_observed(raw, &mut NoopObserver)
    }

    /// Run all stages on `raw`, notifying `observer` at each stage boundary.
    ///
    /// Stages run in order:
    /// 1. Clean
    /// 2. Tokenize
    /// 3. Remove stopwords
    /// 4. Stem the filtered tokens
    /// 5. Lemmatize the filtered tokens
    pub fn run_observed(&self, raw: &str, observer: &mut impl PipelineObserver) -> PipelineResult {
        // Stage 1: Clean
        let cleaned = {
            trace_stage!(STAGE_CLEAN);
            observer.on_stage_start(STAGE_CLEAN);
            let clock = StageClock::start();
            let cleaned = self.clean(raw);
            let report = StageReportBuilder::new(clock.elapsed())
                .input(raw.chars().count())
                .output(cleaned.chars().count())
                .build();
            observer.on_stage_end(STAGE_CLEAN, &report);
            cleaned
        };

        // Stage 2: Tokenize
        let tokens = {
            trace_stage!(STAGE_TOKENIZE);
            observer.on_stage_start(STAGE_TOKENIZE);
            let clock = StageClock::start();
            let tokens = self.tokenize(&cleaned);
            let report = StageReportBuilder::new(clock.elapsed())
                .output(tokens.len())
                .build();
            observer.on_stage_end(STAGE_TOKENIZE, &report);
            observer.on_tokens(&tokens);
            tokens
        };

        // Stage 3: Remove stopwords
        let tokens_no_sw = {
            trace_stage!(STAGE_STOPWORDS);
            observer.on_stage_start(STAGE_STOPWORDS);
            let clock = StageClock::start();
            let kept = self.remove_stopwords(&tokens);
            let report = StageReportBuilder::new(clock.elapsed())
                .input(tokens.len())
                .output(kept.len())
                .build();
            observer.on_stage_end(STAGE_STOPWORDS, &report);
            kept
        };

        // Stage 4: Stem
        let stemmed = {
            trace_stage!(STAGE_STEM);
            observer.on_stage_start(STAGE_STEM);
            let clock = StageClock::start();
            let stemmed = self.stem(&tokens_no_sw);
            let report = StageReportBuilder::new(clock.elapsed())
                .input(tokens_no_sw.len())
                .output(stemmed.len())
                .build();
            observer.on_stage_end(STAGE_STEM, &report);
            stemmed
        };

        // Stage 5: Lemmatize
        let lemmas = {
            trace_stage!(STAGE_LEMMATIZE);
            observer.on_stage_start(STAGE_LEMMATIZE);
            let clock = StageClock::start();
            let lemmas = self.lemmatize(&tokens_no_sw);
            let report = StageReportBuilder::new(clock.elapsed())
                .input(tokens_no_sw.len())
                .output(lemmas.len())
                .build();
            observer.on_stage_end(STAGE_LEMMATIZE, &report);
            lemmas
        };

        let result = PipelineResult {
            cleaned,
            tokens,
            tokens_no_sw,
            stemmed,
            lemmas,
        };
        observer.on_result(&result);
        result
    }

    /// [`run`](Self::run) for text straight from a user: empty or
    /// whitespace-only input is rejected and no stage runs.
    pub fn try_run(&self, raw: &str) -> crate::Result<PipelineResult> {
        self.try_run_observed(raw, &mut NoopObserver)
    }

    pub fn try_run_observed(
        &self,
        raw: &str,
        observer: &mut impl PipelineObserver,
    ) -> crate::Result<PipelineResult> {
        let text = validate_input(raw)?;
        Ok(self.run_observed(text, observer))
    }
}

// ============================================================================
// PipelineBuilder — fluent construction with custom stages
// ============================================================================

/// Fluent builder for constructing a [`Pipeline`] with custom stages.
///
/// Starts from the [`Pipeline::builtin`] stages and allows overriding
/// individual ones.
///
/// ```
/// # use textprep::pipeline::runner::PipelineBuilder;
/// # use textprep::nlp::stemmer::PorterStemmer;
/// # use textprep::nlp::tokenizer::WhitespaceTokenizer;
/// let pipeline = PipelineBuilder::new()
///     .tokenizer(WhitespaceTokenizer)
///     .stemmer(PorterStemmer)
///     .build();
/// assert_eq!(pipeline.run("Hello, world!").tokens, vec!["hello", "world"]);
/// ```
pub struct PipelineBuilder<
    Cl = RuleCleaner,
    Tok = TreebankTokenizer,
    Sw = StopwordFilter,
    St = EnglishStemmer,
    Lm = WordNetLemmatizer,
> {
    cleaner: Cl,
    tokenizer: Tok,
    stopwords: Sw,
    stemmer: St,
    lemmatizer: Lm,
}

impl PipelineBuilder {
    /// Start building from the built-in stages.
    pub fn new() -> Self {
        let Pipeline {
            cleaner,
            tokenizer,
            stopwords,
            stemmer,
            lemmatizer,
        } = NltkPipeline::builtin();
        PipelineBuilder {
            cleaner,
            tokenizer,
            stopwords,
            stemmer,
            lemmatizer,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<Cl, Tok, Sw, St, Lm> PipelineBuilder<Cl, Tok, Sw, St, Lm> {
    /// Override the cleaner stage.
    pub fn cleaner<C: Cleaner>(self, c: C) -> PipelineBuilder<C, Tok, Sw, St, Lm> {
        PipelineBuilder {
            cleaner: c,
            tokenizer: self.tokenizer,
            stopwords: self.stopwords,
            stemmer: self.stemmer,
            lemmatizer: self.lemmatizer,
        }
    }

    /// Override the tokenizer stage.
    pub fn tokenizer<T: Tokenizer>(self, t: T) -> PipelineBuilder<Cl, T, Sw, St, Lm> {
        PipelineBuilder {
            cleaner: self.cleaner,
            tokenizer: t,
            stopwords: self.stopwords,
            stemmer: self.stemmer,
            lemmatizer: self.lemmatizer,
        }
    }

    /// Override the stopword filter stage.
    pub fn stopwords<F: TokenFilter>(self, f: F) -> PipelineBuilder<Cl, Tok, F, St, Lm> {
        PipelineBuilder {
            cleaner: self.cleaner,
            tokenizer: self.tokenizer,
            stopwords: f,
            stemmer: self.stemmer,
            lemmatizer: self.lemmatizer,
        }
    }

    /// Override the stemmer stage.
    pub fn stemmer<S: Stemmer>(self, s: S) -> PipelineBuilder<Cl, Tok, Sw, S, Lm> {
        PipelineBuilder {
            cleaner: self.cleaner,
            tokenizer: self.tokenizer,
            stopwords: self.stopwords,
            stemmer: s,
            lemmatizer: self.lemmatizer,
        }
    }

    /// Override the lemmatizer stage.
    pub fn lemmatizer<L: Lemmatizer>(self, l: L) -> PipelineBuilder<Cl, Tok, Sw, St, L> {
        PipelineBuilder {
            cleaner: self.cleaner,
            tokenizer: self.tokenizer,
            stopwords: self.stopwords,
            stemmer: self.stemmer,
            lemmatizer: l,
        }
    }

    /// Consume the builder and produce a [`Pipeline`].
    pub fn build(self) -> Pipeline<Cl, Tok, Sw, St, Lm> {
        Pipeline {
            cleaner: self.cleaner,
            tokenizer: self.tokenizer,
            stopwords: self.stopwords,
            stemmer: self.stemmer,
            lemmatizer: self.lemmatizer,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
