//! Error types for textprep.
//!
//! The pipeline stages themselves cannot fail. Errors come from the edges:
//! fetching and reading linguistic resources, loading a configuration
//! file, and rejecting unusable input before a run.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating, downloading or reading linguistic resources.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The remote package index could not be reached or refused the request
    #[error("failed to fetch {resource} from {url}: {message}")]
    Fetch {
        resource: &'static str,
        url: String,
        message: String,
    },
    /// The downloaded package is not a readable zip archive
    #[error("failed to unpack {resource}: {source}")]
    Archive {
        resource: &'static str,
        #[source]
        source: zip::result::ZipError,
    },
    /// Reading or writing the local cache failed
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A resource is still absent after the bootstrap ran
    #[error("resource {resource} not found under {}", path.display())]
    Missing {
        resource: &'static str,
        path: PathBuf,
    },
    /// No data directory was given and no home directory could be resolved
    #[error("could not determine a data directory; pass --data-dir or set NLTK_DATA")]
    NoDataDir,
}

impl ResourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised when user input is rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Input is empty or whitespace only
    #[error("Please type some text first.")]
    Empty,
}

/// Errors raised while loading a pipeline configuration.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The validation engine reported at least one error
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Umbrella error for library operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Spec(#[from] SpecError),
}

pub type Result<T> = std::result::Result<T, Error>;
