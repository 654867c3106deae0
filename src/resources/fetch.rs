//! Fetching resource packages.
//!
//! [`Fetcher`] is the seam between the cache and the network: the store
//! only asks for the bytes of a package, so tests swap in an in-memory
//! fetcher and never touch the network.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use super::catalog::Resource;
use crate::error::ResourceError;

/// Something that can produce the zip bytes of a resource package.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, resource: Resource, url: &str) -> Result<Vec<u8>, ResourceError>;
}

/// Downloads packages over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// A client that waits for each download to finish, however long it takes.
    pub fn new() -> Result<Self, ResourceError> {
        Self::with_timeout(None)
    }

    /// A client whose whole request, body included, must finish within
    /// `timeout`. `None` disables the limit; connecting is always capped.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, ResourceError> {
        let client = Client::builder()
            .user_agent(concat!("textprep/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(30))
            .timeout(timeout)
            .build()
            .map_err(|e| ResourceError::Fetch {
                resource: "http client",
                url: String::new(),
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, resource: Resource, url: &str) -> Result<Vec<u8>, ResourceError> {
        let to_error = |e: reqwest::Error| ResourceError::Fetch {
            resource: resource.name(),
            url: url.to_string(),
            message: e.to_string(),
        };

        debug!(%resource, url, "requesting package");
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(to_error)?;
        let bytes = response.bytes().map_err(to_error)?;
        debug!(%resource, bytes = bytes.len(), "package downloaded");
        Ok(bytes.to_vec())
    }
}

/// Fails every request; used when downloads are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineFetcher;

impl Fetcher for OfflineFetcher {
    fn fetch(&self, resource: Resource, url: &str) -> Result<Vec<u8>, ResourceError> {
        Err(ResourceError::Fetch {
            resource: resource.name(),
            url: url.to_string(),
            message: "downloads are disabled".to_string(),
        })
    }
}
