//! Pipeline configuration types.
//!
//! A [`PipelineSpec`] selects the stage variants and says where the
//! linguistic resources live. These types are the input to the
//! [`super::validation::ValidationEngine`].
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "stemmer": "porter",
//!   "lemma_pos": "noun",
//!   "case_insensitive_stopwords": false,
//!   "resources": {
//!     "data_dir": null,
//!     "index_url": "https://raw.githubusercontent.com/nltk/nltk_data/gh-pages/packages",
//!     "download": true,
//!     "timeout_secs": null
//!   },
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::nlp::lemmatizer::PartOfSpeech;
use crate::nlp::stemmer::StemmerKind;
use crate::resources::DEFAULT_INDEX_URL;

/// Current configuration version.
pub const SPEC_VERSION: u32 = 1;

/// Top-level pipeline configuration (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSpec {
    /// Configuration version (currently `1`).
    pub v: u32,

    #[serde(default)]
    pub stemmer: StemmerKind,

    /// Part of speech the lemmatizer assumes for every token.
    #[serde(default)]
    pub lemma_pos: PartOfSpeech,

    #[serde(default)]
    pub case_insensitive_stopwords: bool,

    #[serde(default)]
    pub resources: ResourcesSpec,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    /// Used by the strict-mode validation rule.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for PipelineSpec {
    fn default() -> Self {
        Self {
            v: SPEC_VERSION,
            stemmer: StemmerKind::default(),
            lemma_pos: PartOfSpeech::default(),
            case_insensitive_stopwords: false,
            resources: ResourcesSpec::default(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl PipelineSpec {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self, SpecError> {
        let json = std::fs::read_to_string(path).map_err(|source| SpecError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Where the resource cache lives and how it is filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesSpec {
    /// Cache directory; `None` means `$NLTK_DATA` or `~/nltk_data`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_index_url")]
    pub index_url: String,

    /// Fetch missing packages; when `false` they must already be present.
    #[serde(default = "default_download")]
    pub download: bool,

    /// Upper bound in seconds for one package download; `None` waits until
    /// the transfer finishes or the connection fails.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_index_url() -> String {
    DEFAULT_INDEX_URL.to_string()
}

fn default_download() -> bool {
    true
}

impl Default for ResourcesSpec {
    fn default() -> Self {
        Self {
            data_dir: None,
            index_url: default_index_url(),
            download: default_download(),
            timeout_secs: None,
            unknown_fields: HashMap::new(),
        }
    }
}
