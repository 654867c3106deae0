//! Tokenization
//!
//! Word tokenization happens in two passes. Text is first split into
//! sentences, using the Punkt English abbreviation table so that `Dr.` or
//! `e.g.` do not end a sentence. Each sentence then runs through the Penn
//! Treebank word rules, which separate punctuation, quotes and clitics
//! (`don't` → `do`, `n't`) from the words around them.
//!
//! On cleaned text (lowercase letters and single spaces) this degrades to
//! whitespace splitting, except for the fixed contraction splits such as
//! `cannot` → `can`, `not`.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rustc_hash::FxHashSet;

use crate::error::ResourceError;

/// Relative path of the English abbreviation table inside `punkt_tab`.
pub const PUNKT_ABBREV_FILE: &str = "english/abbrev_types.txt";

/// Abbreviations used when no Punkt table is loaded.
const BUILTIN_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "u.s",
    "u.k", "inc", "ltd", "co", "corp", "jan", "feb", "mar", "apr", "jun", "jul", "aug",
    "sep", "sept", "oct", "nov", "dec", "no", "fig", "approx",
];

fn rule(pattern: &str, replacement: &'static str) -> (Regex, &'static str) {
    (
        Regex::new(pattern).expect("valid tokenizer pattern"),
        replacement,
    )
}

static STARTING_QUOTES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        rule(r"([«“‘„]|[`]+)", " ${1} "),
        rule(r#"^""#, "``"),
        rule(r"(``)", " ${1} "),
        rule(r#"([ (\[{<])("|'{2})"#, "${1} `` "),
    ]
});

// A lone letter after an apostrophe is split off unless it is a clitic.
static QUOTED_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'(\w)\b").expect("valid tokenizer pattern"));

static PUNCTUATION: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        rule(r#"([^.])(\.)([\])}>"'»”’ ]*)\s*$"#, "${1} ${2} ${3} "),
        rule(r"([:,])([^\d])", " ${1} ${2}"),
        rule(r"([:,])$", " ${1} "),
        rule(r"\.{2,}", " ${0} "),
        rule(r"[;@#$%&]", " ${0} "),
        rule(r#"([^.])(\.)([\])}>"']*)\s*$"#, "${1} ${2}${3} "),
        rule(r"[?!]", " ${0} "),
        rule(r"([^'])' ", "${1} ' "),
        rule(r"[*]", " ${0} "),
    ]
});

static PARENS_BRACKETS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\]\[(){}<>]").expect("valid tokenizer pattern"));
static DOUBLE_DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"--").expect("valid tokenizer pattern"));

static ENDING_QUOTES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        rule(r"([»”’])", " ${1} "),
        rule(r"''", " '' "),
        rule(r#"""#, " '' "),
        rule(r"([^' ])('[sS]|'[mM]|'[dD]|') ", "${1} ${2} "),
        rule(r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "${1} ${2} "),
    ]
});

static CONTRACTIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        rule(r"(?i)\b(can)(not)\b", " ${1} ${2} "),
        rule(r"(?i)\b(d)('ye)\b", " ${1} ${2} "),
        rule(r"(?i)\b(gim)(me)\b", " ${1} ${2} "),
        rule(r"(?i)\b(gon)(na)\b", " ${1} ${2} "),
        rule(r"(?i)\b(got)(ta)\b", " ${1} ${2} "),
        rule(r"(?i)\b(lem)(me)\b", " ${1} ${2} "),
        rule(r"(?i)\b(more)('n)\b", " ${1} ${2} "),
        rule(r"(?i)\b(wan)(na)\s", " ${1} ${2} "),
        rule(r"(?i) ('t)(is)\b", " ${1} ${2} "),
        rule(r"(?i) ('t)(was)\b", " ${1} ${2} "),
    ]
});

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.?!]+["'»”’)\]]*\s+"#).expect("valid sentence pattern"));

fn apply_rules(text: String, rules: &[(Regex, &'static str)]) -> String {
    rules.iter().fold(text, |acc, (re, replacement)| {
        re.replace_all(&acc, *replacement).into_owned()
    })
}

/// Split one sentence into Treebank word tokens.
pub fn treebank_words(sentence: &str) -> Vec<String> {
    let mut text = apply_rules(sentence.to_string(), &STARTING_QUOTES);
    text = QUOTED_LETTER
        .replace_all(&text, |caps: &Captures| {
            let letter = &caps[1];
            if matches!(letter.to_lowercase().as_str(), "m" | "t" | "s" | "d" | "n") {
                caps[0].to_string()
            } else {
                format!("' {letter}")
            }
        })
        .into_owned();
    text = apply_rules(text, &PUNCTUATION);
    text = PARENS_BRACKETS.replace_all(&text, " ${0} ").into_owned();
    text = DOUBLE_DASHES.replace_all(&text, " -- ").into_owned();

    let padded = format!(" {text} ");
    let text = apply_rules(padded, &ENDING_QUOTES);
    let text = apply_rules(text, &CONTRACTIONS);

    text.split_whitespace().map(str::to_string).collect()
}

/// Splits text into sentences at `.`, `?` and `!` followed by whitespace,
/// except after a known abbreviation.
#[derive(Debug, Clone, Default)]
pub struct SentenceSplitter {
    /// Lowercase abbreviations without their final period
    abbreviations: FxHashSet<String>,
}

impl SentenceSplitter {
    /// A splitter that treats every period as a candidate boundary.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A splitter with a small built-in English abbreviation list.
    pub fn builtin() -> Self {
        Self::from_abbreviations(BUILTIN_ABBREVIATIONS.iter().copied())
    }

    pub fn from_abbreviations<I, S>(abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            abbreviations: abbreviations
                .into_iter()
                .map(|a| a.as_ref().trim().trim_end_matches('.').to_lowercase())
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }

    /// Load the English abbreviation table from an unpacked `punkt_tab`
    /// directory.
    pub fn from_punkt_tab(dir: &Path) -> Result<Self, ResourceError> {
        let path = dir.join(PUNKT_ABBREV_FILE);
        let contents =
            std::fs::read_to_string(&path).map_err(|e| ResourceError::io(&path, e))?;
        Ok(Self::from_abbreviations(contents.lines()))
    }

    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(word)
    }

    pub fn len(&self) -> usize {
        self.abbreviations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abbreviations.is_empty()
    }

    /// Split `text` into trimmed, non-empty sentences.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for m in SENTENCE_END.find_iter(text) {
            let punct = m.as_str().trim_end();
            if punct.starts_with('.') && !punct.starts_with("..") {
                let preceding = text[start..m.start()]
                    .rsplit(char::is_whitespace)
                    .next()
                    .unwrap_or("")
                    .trim_start_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase();
                if self.is_abbreviation(&preceding) {
                    continue;
                }
            }
            let sentence = text[start..m.start() + punct.len()].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = m.end();
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest);
        }
        sentences
    }
}

/// Sentence splitting followed by Treebank word rules.
#[derive(Debug, Clone, Default)]
pub struct TreebankTokenizer {
    sentences: SentenceSplitter,
}

impl TreebankTokenizer {
    pub fn new(sentences: SentenceSplitter) -> Self {
        Self { sentences }
    }

    /// Tokenizer backed by the built-in abbreviation list.
    pub fn builtin() -> Self {
        Self::new(SentenceSplitter::builtin())
    }

    pub fn sentence_splitter(&self) -> &SentenceSplitter {
        &self.sentences
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.sentences
            .split(text)
            .into_iter()
            .flat_map(treebank_words)
            .collect()
    }
}

/// Splits on Unicode whitespace only.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}
