//! Lemmatization
//!
//! Dictionary-based reduction of a word to its base form, using the WordNet
//! lexical database. A word is looked up in the exception list of its part
//! of speech first; otherwise detachment rules (`-s`, `-ies` → `-y`, ...)
//! are applied repeatedly and the candidates that exist in the WordNet
//! index are kept. The shortest surviving candidate wins, and a word with no
//! candidate comes back unchanged.
//!
//! The default part of speech is [`PartOfSpeech::Noun`], so verb and
//! adjective inflections (`running`, `better`) usually stay as they are.

use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::ResourceError;

/// WordNet part of speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    #[default]
    Noun,
    Verb,
    #[serde(alias = "adj")]
    Adjective,
    #[serde(alias = "adv")]
    Adverb,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    /// File suffix used by the WordNet database (`index.noun`, `noun.exc`).
    pub fn file_stem(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adj",
            PartOfSpeech::Adverb => "adv",
        }
    }

    fn index(&self) -> usize {
        match self {
            PartOfSpeech::Noun => 0,
            PartOfSpeech::Verb => 1,
            PartOfSpeech::Adjective => 2,
            PartOfSpeech::Adverb => 3,
        }
    }

    /// Detachment rules as `(suffix, replacement)` pairs.
    fn substitutions(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            PartOfSpeech::Noun => &[
                ("s", ""),
                ("ses", "s"),
                ("ves", "f"),
                ("xes", "x"),
                ("zes", "z"),
                ("ches", "ch"),
                ("shes", "sh"),
                ("men", "man"),
                ("ies", "y"),
            ],
            PartOfSpeech::Verb => &[
                ("s", ""),
                ("ies", "y"),
                ("es", "e"),
                ("es", ""),
                ("ed", "e"),
                ("ed", ""),
                ("ing", "e"),
                ("ing", ""),
            ],
            PartOfSpeech::Adjective => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
            PartOfSpeech::Adverb => &[],
        }
    }
}

/// Per-part-of-speech lemma index and exception list.
#[derive(Debug, Clone, Default)]
struct PosTable {
    lemmas: FxHashSet<String>,
    exceptions: FxHashMap<String, Vec<String>>,
}

/// In-memory WordNet lemma index.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    tables: [PosTable; 4],
}

impl Lexicon {
    /// A lexicon with no entries; every lookup falls through unchanged.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load `index.*` and `*.exc` files from an unpacked `wordnet` directory.
    pub fn load(dir: &Path) -> Result<Self, ResourceError> {
        let mut lexicon = Self::empty();
        for pos in PartOfSpeech::ALL {
            let index_path = dir.join(format!("index.{}", pos.file_stem()));
            let index = std::fs::read_to_string(&index_path)
                .map_err(|e| ResourceError::io(&index_path, e))?;
            lexicon.extend_index(pos, &index);

            let exc_path = dir.join(format!("{}.exc", pos.file_stem()));
            let exc = std::fs::read_to_string(&exc_path)
                .map_err(|e| ResourceError::io(&exc_path, e))?;
            lexicon.extend_exceptions(pos, &exc);
        }
        Ok(lexicon)
    }

    /// Add lemmas from the text of an `index.<pos>` file.
    ///
    /// Lines starting with a space are the license header.
    pub fn extend_index(&mut self, pos: PartOfSpeech, contents: &str) {
        let table = &mut self.tables[pos.index()];
        for line in contents.lines() {
            if line.starts_with(' ') {
                continue;
            }
            if let Some(lemma) = line.split_whitespace().next() {
                table.lemmas.insert(lemma.to_string());
            }
        }
    }

    /// Add exceptions from the text of a `<pos>.exc` file
    /// (`inflected base [base...]` per line).
    pub fn extend_exceptions(&mut self, pos: PartOfSpeech, contents: &str) {
        let table = &mut self.tables[pos.index()];
        for line in contents.lines() {
            let mut fields = line.split_whitespace();
            if let Some(inflected) = fields.next() {
                let bases: Vec<String> = fields.map(str::to_string).collect();
                table
                    .exceptions
                    .entry(inflected.to_string())
                    .or_default()
                    .extend(bases);
            }
        }
    }

    pub fn insert_lemma(&mut self, pos: PartOfSpeech, lemma: &str) {
        self.tables[pos.index()].lemmas.insert(lemma.to_string());
    }

    pub fn insert_exception(&mut self, pos: PartOfSpeech, inflected: &str, base: &str) {
        self.tables[pos.index()]
            .exceptions
            .entry(inflected.to_string())
            .or_default()
            .push(base.to_string());
    }

    pub fn contains(&self, pos: PartOfSpeech, lemma: &str) -> bool {
        self.tables[pos.index()].lemmas.contains(lemma)
    }

    /// Number of distinct lemmas for `pos`.
    pub fn len(&self, pos: PartOfSpeech) -> usize {
        self.tables[pos.index()].lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(|t| t.lemmas.is_empty())
    }

    /// Every base form of `form` that exists in the index, in discovery order.
    pub fn morphy(&self, form: &str, pos: PartOfSpeech) -> Vec<String> {
        let table = &self.tables[pos.index()];
        let substitutions = pos.substitutions();

        let apply_rules = |forms: &[String]| -> Vec<String> {
            forms
                .iter()
                .flat_map(|form| {
                    substitutions.iter().filter_map(move |(old, new)| {
                        form.strip_suffix(old).map(|stem| format!("{stem}{new}"))
                    })
                })
                .collect()
        };

        let filter_forms = |forms: Vec<String>| -> Vec<String> {
            let mut seen = FxHashSet::default();
            forms
                .into_iter()
                .filter(|f| table.lemmas.contains(f) && seen.insert(f.clone()))
                .collect()
        };

        if let Some(bases) = table.exceptions.get(form) {
            let mut forms = vec![form.to_string()];
            forms.extend(bases.iter().cloned());
            return filter_forms(forms);
        }

        let mut forms = apply_rules(&[form.to_string()]);
        let mut candidates = vec![form.to_string()];
        candidates.extend(forms.iter().cloned());
        let results = filter_forms(candidates);
        if !results.is_empty() {
            return results;
        }

        while !forms.is_empty() {
            forms = apply_rules(&forms);
            let results = filter_forms(forms.clone());
            if !results.is_empty() {
                return results;
            }
        }
        Vec::new()
    }
}

/// Lemmatizer over a WordNet [`Lexicon`].
#[derive(Debug, Clone, Default)]
pub struct WordNetLemmatizer {
    lexicon: Lexicon,
    default_pos: PartOfSpeech,
}

impl WordNetLemmatizer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            default_pos: PartOfSpeech::Noun,
        }
    }

    /// Load the lexicon from an unpacked `wordnet` directory.
    pub fn from_wordnet_dir(dir: &Path) -> Result<Self, ResourceError> {
        Ok(Self::new(Lexicon::load(dir)?))
    }

    /// Change the part of speech used by [`lemmatize`](Self::lemmatize).
    pub fn with_default_pos(mut self, pos: PartOfSpeech) -> Self {
        self.default_pos = pos;
        self
    }

    pub fn default_pos(&self) -> PartOfSpeech {
        self.default_pos
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Lemmatize with the default part of speech.
    pub fn lemmatize(&self, word: &str) -> String {
        self.lemmatize_as(word, self.default_pos)
    }

    /// Lemmatize as `pos`. Returns `word` itself when nothing matches.
    pub fn lemmatize_as(&self, word: &str, pos: PartOfSpeech) -> String {
        self.lexicon
            .morphy(word, pos)
            .into_iter()
            .min_by_key(|candidate| candidate.chars().count())
            .unwrap_or_else(|| word.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_NOUN: &str = "  1 This software and database is being provided\n  2 license header\n\
computer n 2 2 @ ~ 2 0 03082979 09887034\n\
help n 8 5 @ ~ + ; 8 0 01207609\n\
people n 4 3 @ ~ + 4 1 07942152\n\
person n 3 5 @ ~ 3 2 00007846\n\
language n 6 5 @ ~ 6 4 06282651\n\
processing n 1 2 @ ~ 1 0 01023820\n\
process n 7 5 @ ~ 7 3 05701363\n\
goose n 2 3 @ ~ 2 1 01855672\n\
wolf n 5 4 @ ~ 5 2 02114100\n\
box n 10 5 @ ~ 10 4 02883344\n\
church n 3 4 @ ~ 3 2 08079613\n\
wish n 4 3 @ ~ 4 1 07186148\n\
man n 11 5 @ ~ 11 4 10287213\n\
city n 3 4 @ ~ 3 2 08524735\n\
glass n 7 5 @ ~ 7 3 14881303\n\
gas n 7 5 @ ~ 7 3 14940386\n";

    const NOUN_EXC: &str = "geese goose\npeople people person\nmice mouse\n";

    fn lexicon() -> Lexicon {
        let mut lexicon = Lexicon::empty();
        lexicon.extend_index(PartOfSpeech::Noun, INDEX_NOUN);
        lexicon.extend_exceptions(PartOfSpeech::Noun, NOUN_EXC);
        lexicon.insert_lemma(PartOfSpeech::Verb, "run");
        lexicon.insert_lemma(PartOfSpeech::Verb, "understand");
        lexicon.insert_lemma(PartOfSpeech::Verb, "walk");
        lexicon.insert_exception(PartOfSpeech::Verb, "ran", "run");
        lexicon.insert_exception(PartOfSpeech::Verb, "running", "run");
        lexicon.insert_lemma(PartOfSpeech::Adjective, "good");
        lexicon.insert_exception(PartOfSpeech::Adjective, "better", "good");
        lexicon
    }

    fn lemmatizer() -> WordNetLemmatizer {
        WordNetLemmatizer::new(lexicon())
    }

    #[test]
    fn test_index_skips_license_header() {
        let lex = lexicon();
        assert!(lex.contains(PartOfSpeech::Noun, "computer"));
        assert!(!lex.contains(PartOfSpeech::Noun, "1"));
        assert!(!lex.contains(PartOfSpeech::Noun, "This"));
        assert_eq!(lex.len(PartOfSpeech::Noun), 16);
    }

    #[test]
    fn test_regular_plurals() {
        let lem = lemmatizer();
        assert_eq!(lem.lemmatize("computers"), "computer");
        assert_eq!(lem.lemmatize("helps"), "help");
        assert_eq!(lem.lemmatize("boxes"), "box");
        assert_eq!(lem.lemmatize("churches"), "church");
        assert_eq!(lem.lemmatize("wishes"), "wish");
        assert_eq!(lem.lemmatize("wolves"), "wolf");
        assert_eq!(lem.lemmatize("cities"), "city");
        assert_eq!(lem.lemmatize("men"), "man");
        assert_eq!(lem.lemmatize("glasses"), "glass");
    }

    #[test]
    fn test_base_form_is_kept() {
        let lem = lemmatizer();
        assert_eq!(lem.lemmatize("language"), "language");
        assert_eq!(lem.lemmatize("processing"), "processing");
        assert_eq!(lem.lemmatize("gas"), "gas");
    }

    #[test]
    fn test_exceptions() {
        let lem = lemmatizer();
        assert_eq!(lem.lemmatize("geese"), "goose");
        // Both "people" and "person" are candidates; the shorter one wins,
        // and on a tie the first found is kept.
        assert_eq!(lem.lemmatize("people"), "people");
    }

    #[test]
    fn test_exception_without_indexed_base_returns_word() {
        // "mice" is listed but "mouse" is not in this small index.
        assert_eq!(lemmatizer().lemmatize("mice"), "mice");
    }

    #[test]
    fn test_unknown_word_is_unchanged() {
        let lem = lemmatizer();
        assert_eq!(lem.lemmatize("understand"), "understand");
        assert_eq!(lem.lemmatize("nlp"), "nlp");
        assert_eq!(lem.lemmatize(""), "");
    }

    #[test]
    fn test_noun_default_leaves_verb_inflections() {
        let lem = lemmatizer();
        assert_eq!(lem.lemmatize("running"), "running");
        assert_eq!(lem.lemmatize_as("running", PartOfSpeech::Verb), "run");
        assert_eq!(lem.lemmatize_as("ran", PartOfSpeech::Verb), "run");
        assert_eq!(lem.lemmatize_as("walked", PartOfSpeech::Verb), "walk");
        assert_eq!(lem.lemmatize_as("walks", PartOfSpeech::Verb), "walk");
    }

    #[test]
    fn test_adjective_exception() {
        let lem = lemmatizer();
        assert_eq!(lem.lemmatize("better"), "better");
        assert_eq!(lem.lemmatize_as("better", PartOfSpeech::Adjective), "good");
    }

    #[test]
    fn test_default_pos_override() {
        let lem = lemmatizer().with_default_pos(PartOfSpeech::Verb);
        assert_eq!(lem.default_pos(), PartOfSpeech::Verb);
        assert_eq!(lem.lemmatize("running"), "run");
    }

    #[test]
    fn test_empty_lexicon_is_identity() {
        let lem = WordNetLemmatizer::default();
        assert!(lem.lexicon().is_empty());
        for word in ["computers", "geese", "running"] {
            assert_eq!(lem.lemmatize(word), word);
        }
    }

    #[test]
    fn test_morphy_returns_all_indexed_candidates() {
        let lex = lexicon();
        assert_eq!(lex.morphy("people", PartOfSpeech::Noun), vec!["people", "person"]);
        assert!(lex.morphy("xyzzy", PartOfSpeech::Noun).is_empty());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        for pos in PartOfSpeech::ALL {
            std::fs::write(dir.path().join(format!("index.{}", pos.file_stem())), "").unwrap();
            std::fs::write(dir.path().join(format!("{}.exc", pos.file_stem())), "").unwrap();
        }
        std::fs::write(dir.path().join("index.noun"), INDEX_NOUN).unwrap();
        std::fs::write(dir.path().join("noun.exc"), NOUN_EXC).unwrap();

        let lem = WordNetLemmatizer::from_wordnet_dir(dir.path()).unwrap();
        assert_eq!(lem.lemmatize("computers"), "computer");
        assert_eq!(lem.lemmatize("geese"), "goose");
    }

    #[test]
    fn test_load_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Lexicon::load(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ResourceError::Io { .. }));
    }
}
