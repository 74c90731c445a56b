use crate::error::AllocatorError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, AllocatorError>;

#[async_trait]
pub trait Allocator: Send + Sync + 'static {
    /// Allocates a short code for `original_url` and stores the mapping.
    ///
    /// The returned code is unique among stored codes and resolves back to
    /// `original_url`.
    async fn allocate(&self, original_url: &str) -> Result<ShortCode>;

    /// Returns the URL stored under `code`, exactly as it was allocated.
    async fn resolve(&self, code: &str) -> Result<String>;
}
