use crate::fingerprint::{Fingerprinter, Sha256Fingerprinter};
use crate::probe::{Candidate, Probe};
use crate::settings::AllocatorSettings;
use async_trait::async_trait;
use burrow_core::{Allocator, AllocatorError, InsertOutcome, Repository, ShortCode, UrlRecord};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};
use url::Url;

type Result<T> = std::result::Result<T, AllocatorError>;

/// Longest URL accepted, in bytes. Matches the `original_url` column width.
pub const MAX_URL_LENGTH: usize = 2048;

/// A concrete implementation of the `Allocator` trait.
///
/// The service holds no per-URL state. Uniqueness is enforced entirely by
/// the repository's `insert_if_absent`, so any number of services may share
/// one repository.
#[derive(Debug, Clone)]
pub struct AllocatorService<R, F = Sha256Fingerprinter> {
    repository: Arc<R>,
    fingerprinter: Arc<F>,
    settings: AllocatorSettings,
}

impl<R: Repository> AllocatorService<R> {
    /// Creates a service using SHA-256 fingerprints.
    pub fn new(repository: R, settings: AllocatorSettings) -> Result<Self> {
        Self::with_fingerprinter(repository, Sha256Fingerprinter, settings)
    }
}

impl<R: Repository, F: Fingerprinter> AllocatorService<R, F> {
    /// Creates a service with a custom fingerprinter.
    pub fn with_fingerprinter(
        repository: R,
        fingerprinter: F,
        settings: AllocatorSettings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            repository: Arc::new(repository),
            fingerprinter: Arc::new(fingerprinter),
            settings,
        })
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Validates that the URL is an absolute http(s) URL with a host.
    fn validate_url(url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(AllocatorError::InvalidInput(
                "URL cannot be empty".to_string(),
            ));
        }

        // `Url::parse` strips surrounding whitespace, but the input is stored verbatim.
        if url.trim() != url {
            return Err(AllocatorError::InvalidInput(
                "URL must not have leading or trailing whitespace".to_string(),
            ));
        }

        if url.len() > MAX_URL_LENGTH {
            return Err(AllocatorError::InvalidInput(format!(
                "URL is {} bytes, limit is {}",
                url.len(),
                MAX_URL_LENGTH
            )));
        }

        let parsed = Url::parse(url)
            .map_err(|e| AllocatorError::InvalidInput(format!("malformed URL '{}': {}", url, e)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AllocatorError::InvalidInput(format!(
                "URL scheme must be http or https: {}",
                parsed.scheme()
            )));
        }

        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(AllocatorError::InvalidInput(format!(
                "URL must have a host: {}",
                url
            )));
        }

        Ok(())
    }

    /// Idempotent mode walks the fixed salt sequence so repeats land on the
    /// same codes. Otherwise every candidate gets a fresh non-zero salt, so
    /// repeated allocations of one URL never run out of candidates.
    fn candidate_code(&self, url: &str, candidate: &Candidate) -> ShortCode {
        let salt = if self.settings.idempotent {
            candidate.salt
        } else {
            rand::rng().random_range(1..=u32::MAX)
        };
        self.fingerprinter
            .fingerprint(url, salt)
            .to_code(candidate.width)
    }
}

#[async_trait]
impl<R: Repository, F: Fingerprinter> Allocator for AllocatorService<R, F> {
    async fn allocate(&self, original_url: &str) -> Result<ShortCode> {
        Self::validate_url(original_url)?;

        let probe = Probe::new(&self.settings);
        let attempts = probe.total();
        let mut width = self.settings.code_length;

        for candidate in probe {
            width = candidate.width;
            let code = self.candidate_code(original_url, &candidate);
            trace!(
                code = %code,
                attempt = candidate.attempt,
                width = candidate.width,
                "trying candidate"
            );

            if self.settings.idempotent {
                if let Some(existing) = self.repository.get(&code).await? {
                    if existing.original_url == original_url {
                        debug!(code = %code, "reusing existing short code");
                        return Ok(code);
                    }
                    debug!(
                        code = %code,
                        attempt = candidate.attempt,
                        "candidate held by a different url"
                    );
                    continue;
                }
            }

            match self
                .repository
                .insert_if_absent(&code, UrlRecord::new(original_url))
                .await?
            {
                InsertOutcome::Inserted => {
                    info!(
                        code = %code,
                        attempt = candidate.attempt,
                        "allocated short code"
                    );
                    return Ok(code);
                }
                // A concurrent request for the same URL claimed the code first.
                InsertOutcome::AlreadyExists(existing)
                    if self.settings.idempotent && existing.original_url == original_url =>
                {
                    debug!(code = %code, "short code allocated concurrently");
                    return Ok(code);
                }
                InsertOutcome::AlreadyExists(_) => {
                    debug!(
                        code = %code,
                        attempt = candidate.attempt,
                        "candidate already taken"
                    );
                }
            }
        }

        warn!(
            attempts,
            width,
            url = %original_url,
            "short code space exhausted"
        );
        Err(AllocatorError::AllocationExhausted { attempts, width })
    }

    async fn resolve(&self, code: &str) -> Result<String> {
        // Malformed codes are never stored.
        let Ok(short_code) = ShortCode::new(code) else {
            trace!(code = %code, "malformed short code");
            return Err(AllocatorError::NotFound(code.to_string()));
        };

        match self.repository.get(&short_code).await? {
            Some(record) => {
                debug!(code = %short_code, url = %record.original_url, "resolved short code");
                Ok(record.original_url)
            }
            None => {
                trace!(code = %short_code, "short code not found");
                Err(AllocatorError::NotFound(code.to_string()))
            }
        }
    }
}
