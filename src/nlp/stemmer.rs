//! Stemming
//!
//! Rule-based suffix stripping with no dictionary. [`PorterStemmer`] is the
//! Porter (1980) algorithm with the NLTK extensions: a small pool of
//! irregular forms, words of two letters or fewer left alone, and a few
//! extra step-2 rules. [`SnowballStemmer`] wraps the Snowball English
//! ("Porter2") stemmer from `rust-stemmers`.
//!
//! Outputs are not guaranteed to be real words (`people` → `peopl`).

use rust_stemmers::{Algorithm, Stemmer as RustStemmer};
use serde::{Deserialize, Serialize};

/// Which stemming algorithm the pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StemmerKind {
    #[default]
    Porter,
    Snowball,
}

impl StemmerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StemmerKind::Porter => "porter",
            StemmerKind::Snowball => "snowball",
        }
    }
}

impl std::str::FromStr for StemmerKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "porter" => Ok(StemmerKind::Porter),
            "snowball" | "porter2" => Ok(StemmerKind::Snowball),
            other => Err(format!("unknown stemmer \"{other}\" (expected porter or snowball)")),
        }
    }
}

/// Irregular forms mapped straight to their stem.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("sky", "sky"),
    ("skies", "sky"),
    ("dying", "die"),
    ("lying", "lie"),
    ("tying", "tie"),
    ("news", "news"),
    ("innings", "inning"),
    ("inning", "inning"),
    ("outings", "outing"),
    ("outing", "outing"),
    ("cannings", "canning"),
    ("canning", "canning"),
    ("howe", "howe"),
    ("proceed", "proceed"),
    ("exceed", "exceed"),
    ("succeed", "succeed"),
];

type Condition = fn(&[char]) -> bool;

/// One `suffix → replacement` rule. `None` means no condition.
struct Rule {
    suffix: &'static str,
    replacement: &'static str,
    condition: Option<Condition>,
}

const fn rule(suffix: &'static str, replacement: &'static str, condition: Option<Condition>) -> Rule {
    Rule {
        suffix,
        replacement,
        condition,
    }
}

fn is_vowel_letter(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Consonant flags for every position of `word`, computed in one pass.
fn consonants(word: &[char]) -> Vec<bool> {
    let mut flags: Vec<bool> = Vec::with_capacity(word.len());
    for (i, &c) in word.iter().enumerate() {
        let consonant = match c {
            'y' => i == 0 || !flags[i - 1],
            c => !is_vowel_letter(c),
        };
        flags.push(consonant);
    }
    flags
}

/// A `y` is a consonant at the start of a word or after a vowel, so inside a
/// run of `y`s the answer alternates from the first one.
fn is_consonant(word: &[char], i: usize) -> bool {
    match word[i] {
        'y' => {
            let run = word[..=i].iter().rev().take_while(|&&c| c == 'y').count();
            let start = i + 1 - run;
            let first = start == 0 || is_vowel_letter(word[start - 1]);
            first == ((i - start) % 2 == 0)
        }
        c => !is_vowel_letter(c),
    }
}

/// Number of vowel-consonant sequences, the `m` of the Porter paper.
fn measure(stem: &[char]) -> usize {
    let mut m = 0;
    let mut prev_vowel = false;
    for consonant in consonants(stem) {
        if consonant && prev_vowel {
            m += 1;
        }
        prev_vowel = !consonant;
    }
    m
}

fn positive_measure(stem: &[char]) -> bool {
    measure(stem) > 0
}

fn measure_gt_1(stem: &[char]) -> bool {
    measure(stem) > 1
}

fn contains_vowel(stem: &[char]) -> bool {
    consonants(stem).iter().any(|&consonant| !consonant)
}

fn ends_double_consonant(word: &[char]) -> bool {
    let n = word.len();
    n >= 2 && word[n - 1] == word[n - 2] && is_consonant(word, n - 1)
}

/// `*o`: consonant-vowel-consonant ending, last consonant not w, x or y.
fn ends_cvc(word: &[char]) -> bool {
    let n = word.len();
    (n >= 3
        && is_consonant(word, n - 3)
        && !is_consonant(word, n - 2)
        && is_consonant(word, n - 1)
        && !matches!(word[n - 1], 'w' | 'x' | 'y'))
        || (n == 2 && !is_consonant(word, 0) && is_consonant(word, 1))
}

fn ends_with(word: &[char], suffix: &str) -> bool {
    let n = suffix.chars().count();
    word.len() >= n && word[word.len() - n..].iter().copied().eq(suffix.chars())
}

fn strip(word: &[char], suffix: &str) -> Vec<char> {
    word[..word.len() - suffix.chars().count()].to_vec()
}

fn with_suffix(mut stem: Vec<char>, replacement: &str) -> Vec<char> {
    stem.extend(replacement.chars());
    stem
}

/// Apply the first rule whose suffix matches. A matching rule whose
/// condition fails stops the search and leaves the word alone.
fn apply_rule_list(word: Vec<char>, rules: &[Rule]) -> Vec<char> {
    for r in rules {
        if ends_with(&word, r.suffix) {
            let stem = strip(&word, r.suffix);
            return match r.condition {
                Some(condition) if !condition(&stem) => word,
                _ => with_suffix(stem, r.replacement),
            };
        }
    }
    word
}

fn step1a(word: Vec<char>) -> Vec<char> {
    if word.len() == 4 && ends_with(&word, "ies") {
        return with_suffix(strip(&word, "ies"), "ie");
    }
    apply_rule_list(
        word,
        &[
            rule("sses", "ss", None),
            rule("ies", "i", None),
            rule("ss", "ss", None),
            rule("s", "", None),
        ],
    )
}

fn step1b(word: Vec<char>) -> Vec<char> {
    if ends_with(&word, "ied") {
        let replacement = if word.len() == 4 { "ie" } else { "i" };
        return with_suffix(strip(&word, "ied"), replacement);
    }

    if ends_with(&word, "eed") {
        let stem = strip(&word, "eed");
        return if positive_measure(&stem) {
            with_suffix(stem, "ee")
        } else {
            word
        };
    }

    let intermediate = ["ed", "ing"].iter().find_map(|suffix| {
        if ends_with(&word, suffix) {
            let stem = strip(&word, suffix);
            contains_vowel(&stem).then_some(stem)
        } else {
            None
        }
    });
    let Some(stem) = intermediate else {
        return word;
    };

    if ends_with(&stem, "at") || ends_with(&stem, "bl") || ends_with(&stem, "iz") {
        return with_suffix(stem, "e");
    }
    if ends_double_consonant(&stem) {
        let last = stem[stem.len() - 1];
        return if matches!(last, 'l' | 's' | 'z') {
            stem
        } else {
            stem[..stem.len() - 1].to_vec()
        };
    }
    if measure(&stem) == 1 && ends_cvc(&stem) {
        return with_suffix(stem, "e");
    }
    stem
}

fn step1c(word: Vec<char>) -> Vec<char> {
    fn preceded_by_consonant(stem: &[char]) -> bool {
        stem.len() > 1 && is_consonant(stem, stem.len() - 1)
    }
    apply_rule_list(word, &[rule("y", "i", Some(preceded_by_consonant))])
}

fn step2(word: Vec<char>) -> Vec<char> {
    if ends_with(&word, "alli") && positive_measure(&strip(&word, "alli")) {
        return step2(with_suffix(strip(&word, "alli"), "al"));
    }

    if ends_with(&word, "logi") {
        // The condition looks at the stem before "ogi", not before "logi".
        return if positive_measure(&strip(&word, "ogi")) {
            with_suffix(strip(&word, "logi"), "log")
        } else {
            word
        };
    }

    const PM: Option<Condition> = Some(positive_measure);
    apply_rule_list(
        word,
        &[
            rule("ational", "ate", PM),
            rule("tional", "tion", PM),
            rule("enci", "ence", PM),
            rule("anci", "ance", PM),
            rule("izer", "ize", PM),
            rule("bli", "ble", PM),
            rule("alli", "al", PM),
            rule("entli", "ent", PM),
            rule("eli", "e", PM),
            rule("ousli", "ous", PM),
            rule("ization", "ize", PM),
            rule("ation", "ate", PM),
            rule("ator", "ate", PM),
            rule("alism", "al", PM),
            rule("iveness", "ive", PM),
            rule("fulness", "ful", PM),
            rule("ousness", "ous", PM),
            rule("aliti", "al", PM),
            rule("iviti", "ive", PM),
            rule("biliti", "ble", PM),
            rule("fulli", "ful", PM),
            rule("lessli", "less", PM),
        ],
    )
}

fn step3(word: Vec<char>) -> Vec<char> {
    const PM: Option<Condition> = Some(positive_measure);
    apply_rule_list(
        word,
        &[
            rule("icate", "ic", PM),
            rule("ative", "", PM),
            rule("alize", "al", PM),
            rule("iciti", "ic", PM),
            rule("ical", "ic", PM),
            rule("ful", "", PM),
            rule("ness", "", PM),
        ],
    )
}

fn step4(word: Vec<char>) -> Vec<char> {
    fn ion_condition(stem: &[char]) -> bool {
        measure(stem) > 1 && matches!(stem.last(), Some('s' | 't'))
    }
    const GT1: Option<Condition> = Some(measure_gt_1);
    apply_rule_list(
        word,
        &[
            rule("al", "", GT1),
            rule("ance", "", GT1),
            rule("ence", "", GT1),
            rule("er", "", GT1),
            rule("ic", "", GT1),
            rule("able", "", GT1),
            rule("ible", "", GT1),
            rule("ant", "", GT1),
            rule("ement", "", GT1),
            rule("ment", "", GT1),
            rule("ent", "", GT1),
            rule("ion", "", Some(ion_condition)),
            rule("ou", "", GT1),
            rule("ism", "", GT1),
            rule("ate", "", GT1),
            rule("iti", "", GT1),
            rule("ous", "", GT1),
            rule("ive", "", GT1),
            rule("ize", "", GT1),
        ],
    )
}

fn step5a(word: Vec<char>) -> Vec<char> {
    if ends_with(&word, "e") {
        let stem = strip(&word, "e");
        let m = measure(&stem);
        if m > 1 || (m == 1 && !ends_cvc(&stem)) {
            return stem;
        }
    }
    word
}

fn step5b(word: Vec<char>) -> Vec<char> {
    if ends_with(&word, "ll") && measure(&word[..word.len() - 1]) > 1 {
        return word[..word.len() - 1].to_vec();
    }
    word
}

/// Porter stemmer in NLTK extension mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    pub fn new() -> Self {
        Self
    }

    /// Stem one word. Input is lowercased first.
    pub fn stem(&self, word: &str) -> String {
        let lower = word.to_lowercase();

        if let Some((_, stem)) = IRREGULAR_FORMS.iter().find(|(form, _)| *form == lower) {
            return (*stem).to_string();
        }

        let chars: Vec<char> = lower.chars().collect();
        if chars.len() <= 2 {
            return lower;
        }

        let chars = step1a(chars);
        let chars = step1b(chars);
        let chars = step1c(chars);
        let chars = step2(chars);
        let chars = step3(chars);
        let chars = step4(chars);
        let chars = step5a(chars);
        let chars = step5b(chars);
        chars.into_iter().collect()
    }
}

/// Snowball English stemmer.
pub struct SnowballStemmer {
    inner: RustStemmer,
}

impl std::fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowballStemmer").finish_non_exhaustive()
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl SnowballStemmer {
    pub fn new() -> Self {
        Self {
            inner: RustStemmer::create(Algorithm::English),
        }
    }

    pub fn stem(&self, word: &str) -> String {
        self.inner.stem(&word.to_lowercase()).into_owned()
    }
}

/// The stemmer picked by configuration.
#[derive(Debug)]
pub enum EnglishStemmer {
    Porter(PorterStemmer),
    Snowball(SnowballStemmer),
}

impl Default for EnglishStemmer {
    fn default() -> Self {
        Self::Porter(PorterStemmer)
    }
}

impl EnglishStemmer {
    pub fn from_kind(kind: StemmerKind) -> Self {
        match kind {
            StemmerKind::Porter => Self::Porter(PorterStemmer),
            StemmerKind::Snowball => Self::Snowball(SnowballStemmer::new()),
        }
    }

    pub fn kind(&self) -> StemmerKind {
        match self {
            Self::Porter(_) => StemmerKind::Porter,
            Self::Snowball(_) => StemmerKind::Snowball,
        }
    }

    pub fn stem(&self, word: &str) -> String {
        match self {
            Self::Porter(s) => s.stem(word),
            Self::Snowball(s) => s.stem(word),
        }
    }
}
