//! Local resource cache with a one-shot bootstrap.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use once_cell::sync::OnceCell;
use tracing::{debug, info};
use zip::ZipArchive;

use super::catalog::{Resource, DEFAULT_INDEX_URL};
use super::fetch::Fetcher;
use crate::error::ResourceError;

/// Environment variable NLTK uses for its data directory.
pub const DATA_DIR_ENV: &str = "NLTK_DATA";

/// `$NLTK_DATA`, else `~/nltk_data`.
pub fn default_data_dir() -> Result<PathBuf, ResourceError> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join("nltk_data"))
        .ok_or(ResourceError::NoDataDir)
}

/// A cache directory of unpacked resource packages.
///
/// [`ensure_available`](Self::ensure_available) checks each resource by its
/// logical path and fetches only the missing ones. A successful bootstrap is
/// latched, so later calls return immediately; a failed one is not, so the
/// next call tries again.
pub struct ResourceStore {
    root: PathBuf,
    index_url: String,
    fetcher: Box<dyn Fetcher>,
    ready: OnceCell<()>,
}

impl std::fmt::Debug for ResourceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStore")
            .field("root", &self.root)
            .field("index_url", &self.index_url)
            .field("ready", &self.ready.get().is_some())
            .finish()
    }
}

impl ResourceStore {
    pub fn new(root: impl Into<PathBuf>, fetcher: Box<dyn Fetcher>) -> Self {
        Self {
            root: root.into(),
            index_url: DEFAULT_INDEX_URL.to_string(),
            fetcher,
            ready: OnceCell::new(),
        }
    }

    /// Use a different package index.
    pub fn with_index_url(mut self, index_url: impl Into<String>) -> Self {
        self.index_url = index_url.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_url(&self) -> &str {
        &self.index_url
    }

    /// Directory of an unpacked resource.
    pub fn path(&self, resource: Resource) -> PathBuf {
        resource.local_dir(&self.root)
    }

    pub fn is_present(&self, resource: Resource) -> bool {
        self.path(resource).is_dir()
    }

    /// Resources whose logical path is absent.
    pub fn missing(&self) -> Vec<Resource> {
        Resource::ALL
            .into_iter()
            .filter(|r| !self.is_present(*r))
            .collect()
    }

    /// Make sure every resource is present, fetching the missing ones.
    pub fn ensure_available(&self) -> Result<(), ResourceError> {
        self.ready.get_or_try_init(|| self.bootstrap()).map(|_| ())
    }

    /// Directory of `resource`, bootstrapping first if needed.
    pub fn require(&self, resource: Resource) -> Result<PathBuf, ResourceError> {
        self.ensure_available()?;
        let path = self.path(resource);
        if path.is_dir() {
            Ok(path)
        } else {
            Err(ResourceError::Missing {
                resource: resource.name(),
                path,
            })
        }
    }

    fn bootstrap(&self) -> Result<(), ResourceError> {
        for resource in Resource::ALL {
            if self.is_present(resource) {
                debug!(%resource, path = %self.path(resource).display(), "resource present");
                continue;
            }
            let url = resource.package_url(&self.index_url);
            info!(%resource, %url, "downloading missing resource");
            let bytes = self.fetcher.fetch(resource, &url)?;
            self.unpack(resource, bytes)?;

            if !self.is_present(resource) {
                return Err(ResourceError::Missing {
                    resource: resource.name(),
                    path: self.path(resource),
                });
            }
            info!(%resource, "resource installed");
        }
        Ok(())
    }

    /// Unpack a package zip into `<root>/<category>/`.
    fn unpack(&self, resource: Resource, bytes: Vec<u8>) -> Result<(), ResourceError> {
        let dest = self.root.join(resource.category());
        std::fs::create_dir_all(&dest).map_err(|e| ResourceError::io(&dest, e))?;

        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|source| {
            ResourceError::Archive {
                resource: resource.name(),
                source,
            }
        })?;
        archive
            .extract(&dest)
            .map_err(|source| ResourceError::Archive {
                resource: resource.name(),
                source,
            })
    }
}
