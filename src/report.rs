//! Text report of a pipeline run.
//!
//! Six labeled panels (original, cleaned, tokens, filtered tokens, stems,
//! lemmas), the token metrics, and a table comparing each filtered token
//! with its stem and lemma.

use std::fmt::Write as _;

use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::pipeline::artifacts::PipelineResult;

/// Shown in place of an empty token list.
pub const NO_TOKENS: &str = "(no tokens)";

/// Section headers used by the demo output.
pub const DEMO_SECTIONS: [&str; 5] = ["CLEANED", "TOKENS", "TOKENS_NO_SW", "STEMMED", "LEMMAS"];

#[derive(Tabled)]
struct ComparisonLine<'a> {
    #[tabled(rename = "Original word")]
    original: &'a str,
    #[tabled(rename = "Stemmed")]
    stemmed: &'a str,
    #[tabled(rename = "Lemmatized")]
    lemma: &'a str,
}

/// Renders one run for the terminal.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    original: &'a str,
    result: &'a PipelineResult,
    color: bool,
}

impl<'a> Report<'a> {
    pub fn new(original: &'a str, result: &'a PipelineResult) -> Self {
        Self {
            original,
            result,
            color: false,
        }
    }

    /// Bold, colored panel titles.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn render(&self) -> String {
        let result = self.result;
        let stats = result.stats();
        let mut out = String::new();

        self.panel(&mut out, "1. Original text", captions::ORIGINAL, self.original.trim());
        self.panel(&mut out, "2. Cleaned text", captions::CLEANED, &result.cleaned);
        self.panel(
            &mut out,
            &format!("3. Tokens ({})", result.tokens.len()),
            captions::TOKENS,
            &token_list(&result.tokens),
        );
        self.panel(
            &mut out,
            &format!("4. Tokens without stopwords ({})", result.tokens_no_sw.len()),
            captions::STOPWORDS,
            &token_list(&result.tokens_no_sw),
        );
        self.panel(
            &mut out,
            "5. Stemmed tokens",
            captions::STEMMED,
            &token_list(&result.stemmed),
        );
        self.panel(
            &mut out,
            "6. Lemmatized tokens",
            captions::LEMMATIZED,
            &token_list(&result.lemmas),
        );

        let metrics = format!(
            "Total tokens:      {}\nUnique tokens:     {}\nAfter filtering:   {}\nStopwords removed: {}",
            stats.token_count, stats.unique_token_count, stats.filtered_count, stats.removed_count
        );
        self.panel(&mut out, "Metrics", "", &metrics);
        self.panel(
            &mut out,
            "Stemming vs. lemmatization",
            captions::COMPARISON,
            &self.comparison_table(),
        );

        out
    }

    fn comparison_table(&self) -> String {
        let rows = self.result.comparison();
        if rows.is_empty() {
            return NO_TOKENS.to_string();
        }
        let lines = rows.iter().map(|row| ComparisonLine {
            original: &row.original,
            stemmed: &row.stemmed,
            lemma: &row.lemma,
        });
        Table::new(lines).with(Style::modern()).to_string()
    }

    /// Title, optional caption, then the body as given. An empty body stays
    /// empty; token lists bring their own [`NO_TOKENS`] marker.
    fn panel(&self, out: &mut String, title: &str, caption: &str, body: &str) {
        // Writing into a String cannot fail.
        if self.color {
            let _ = writeln!(out, "{}", title.cyan().bold());
            if !caption.is_empty() {
                let _ = writeln!(out, "{}", caption.dimmed());
            }
        } else {
            let _ = writeln!(out, "{title}");
            if !caption.is_empty() {
                let _ = writeln!(out, "{caption}");
            }
        }
        let _ = writeln!(out, "{body}\n");
    }
}

/// One-line explanations printed under each panel title.
pub mod captions {
    pub const ORIGINAL: &str = "The text as entered, before any processing.";
    pub const CLEANED: &str =
        "Lowercased, with links, digits, punctuation and extra spaces removed.";
    pub const TOKENS: &str = "The cleaned text split into individual words.";
    pub const STOPWORDS: &str =
        "Frequent function words such as 'the' or 'is' dropped to keep the content words.";
    pub const STEMMED: &str =
        "Suffixes cut off by rule. Fast, but the stems are not always real words.";
    pub const LEMMATIZED: &str = "Each word mapped to its dictionary form using WordNet.";
    pub const COMPARISON: &str = "How each remaining word changes under stemming and lemmatization.";
}

/// Tokens as a bracketed, quoted list, or [`NO_TOKENS`].
pub fn token_list(tokens: &[String]) -> String {
    if tokens.is_empty() {
        return NO_TOKENS.to_string();
    }
    let quoted: Vec<String> = tokens.iter().map(|t| format!("'{t}'")).collect();
    format!("[{}]", quoted.join(", "))
}

/// The demo layout: one `--- NAME ---` section per stage output.
pub fn render_sections(result: &PipelineResult) -> String {
    let bodies = [
        result.cleaned.clone(),
        token_list(&result.tokens),
        token_list(&result.tokens_no_sw),
        token_list(&result.stemmed),
        token_list(&result.lemmas),
    ];
    let mut out = String::new();
    for (name, body) in DEMO_SECTIONS.iter().zip(bodies) {
        let _ = writeln!(out, "--- {name} ---\n{body}\n");
    }
    out
}
