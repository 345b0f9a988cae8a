//! Source acquisition: make sure every manifest entry exists locally.
//!
//! Acquisition is idempotent and cached by existence alone. A file already
//! present in the local directory is never re-fetched and never re-verified.
//! The check-then-fetch sequence is not atomic; two acquirers racing on the
//! same directory may fetch a file twice, which is benign since the upstream
//! content is immutable.

use std::path::Path;

use crate::error::{HdlError, Result};
use crate::manifest::SourceManifest;

/// Abstract transport for bringing one remote file onto the local disk.
///
/// Implementations perform a single GET-like transfer of `url` into `dest`.
/// The seam exists so tests can count and fail transfers without a network.
pub trait SourceFetcher {
    /// Transfer the content at `url` into the file at `dest`.
    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

impl<F: SourceFetcher + ?Sized> SourceFetcher for &F {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        (**self).fetch(url, dest)
    }
}

/// HTTP(S) fetcher backed by a blocking reqwest client.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a default client.
    pub fn new() -> Self {
        HttpFetcher {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceFetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| HdlError::Transport {
                url: url.to_string(),
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(HdlError::Transport {
                url: url.to_string(),
                detail: format!("HTTP {}", response.status()),
            });
        }

        let bytes = response.bytes().map_err(|e| HdlError::Transport {
            url: url.to_string(),
            detail: e.to_string(),
        })?;

        std::fs::write(dest, &bytes)?;
        Ok(())
    }
}

/// Ensures every file named in a [`SourceManifest`] exists locally.
pub struct SourceAcquirer<F> {
    fetcher: F,
}

impl SourceAcquirer<HttpFetcher> {
    /// Create an acquirer that fetches over HTTP(S).
    pub fn http() -> Self {
        SourceAcquirer::new(HttpFetcher::new())
    }
}

impl<F: SourceFetcher> SourceAcquirer<F> {
    /// Create an acquirer using the given transport.
    pub fn new(fetcher: F) -> Self {
        SourceAcquirer { fetcher }
    }

    /// Make sure every manifest entry exists under `local_dir`.
    ///
    /// Files are visited in manifest order. An existing local file is
    /// skipped; a missing one is fetched from its upstream URL. The first
    /// transport failure aborts with [`HdlError::AcquisitionFailed`].
    /// Already-fetched files stay on disk, so a retried call only fetches
    /// what is still missing.
    pub fn ensure(&self, manifest: &SourceManifest, local_dir: &Path) -> Result<()> {
        for name in manifest.files() {
            let dest = manifest.local_path(local_dir, name);
            if dest.exists() {
                tracing::debug!("source already present, skipping: {}", dest.display());
                continue;
            }

            std::fs::create_dir_all(local_dir)?;
            let url = manifest.remote_url(name);
            tracing::info!("fetching {url} -> {}", dest.display());
            self.fetcher
                .fetch(&url, &dest)
                .map_err(|e| HdlError::AcquisitionFailed {
                    name: name.clone(),
                    cause: e.to_string(),
                })?;
        }
        Ok(())
    }
}
