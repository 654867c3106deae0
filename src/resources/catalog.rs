//! The linguistic resources the pipeline needs, by logical name.

use std::path::{Path, PathBuf};

/// Default package index (the NLTK data repository).
pub const DEFAULT_INDEX_URL: &str =
    "https://raw.githubusercontent.com/nltk/nltk_data/gh-pages/packages";

/// A downloadable resource package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Punkt sentence tokenizer models
    Punkt,
    /// Punkt parameters as plain tables (abbreviations, collocations)
    PunktTab,
    /// Stopword lists
    Stopwords,
    /// WordNet lexical database
    Wordnet,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Punkt,
        Resource::PunktTab,
        Resource::Stopwords,
        Resource::Wordnet,
    ];

    /// Package name in the index.
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Punkt => "punkt",
            Resource::PunktTab => "punkt_tab",
            Resource::Stopwords => "stopwords",
            Resource::Wordnet => "wordnet",
        }
    }

    /// Index category the package lives under.
    pub fn category(&self) -> &'static str {
        match self {
            Resource::Punkt | Resource::PunktTab => "tokenizers",
            Resource::Stopwords | Resource::Wordnet => "corpora",
        }
    }

    /// Logical path, e.g. `corpora/stopwords`.
    pub fn logical_path(&self) -> String {
        format!("{}/{}", self.category(), self.name())
    }

    /// Where the unpacked package lives under `root`.
    pub fn local_dir(&self, root: &Path) -> PathBuf {
        root.join(self.category()).join(self.name())
    }

    /// Zip archive URL under `index_url`.
    pub fn package_url(&self, index_url: &str) -> String {
        format!(
            "{}/{}/{}.zip",
            index_url.trim_end_matches('/'),
            self.category(),
            self.name()
        )
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_paths() {
        let paths: Vec<_> = Resource::ALL.iter().map(|r| r.logical_path()).collect();
        assert_eq!(
            paths,
            vec![
                "tokenizers/punkt",
                "tokenizers/punkt_tab",
                "corpora/stopwords",
                "corpora/wordnet"
            ]
        );
    }

    #[test]
    fn test_package_url() {
        assert_eq!(
            Resource::Wordnet.package_url("https://example.org/packages/"),
            "https://example.org/packages/corpora/wordnet.zip"
        );
        assert_eq!(
            Resource::PunktTab.package_url(DEFAULT_INDEX_URL),
            format!("{DEFAULT_INDEX_URL}/tokenizers/punkt_tab.zip")
        );
    }

    #[test]
    fn test_local_dir() {
        let root = Path::new("/data");
        assert_eq!(
            Resource::Stopwords.local_dir(root),
            PathBuf::from("/data/corpora/stopwords")
        );
    }
}
