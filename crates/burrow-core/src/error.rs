use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors surfaced by code allocation and lookup.
#[derive(Debug, Clone, Error)]
pub enum AllocatorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("short code not found: {0}")]
    NotFound(String),
    /// Every candidate in the probe sequence is held by a different URL.
    #[error("short code space exhausted after {attempts} attempts (width {width})")]
    AllocationExhausted { attempts: u32, width: usize },
    #[error("storage unavailable: {0}")]
    StorageUnavailable(
        #[from]
        #[source]
        StorageError,
    ),
    #[error("invalid allocator settings: {0}")]
    InvalidSettings(String),
}

impl AllocatorError {
    /// Returns `true` for errors caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_converts_into_storage_unavailable() {
        let err: AllocatorError = StorageError::Timeout("pool timed out".to_string()).into();
        assert!(matches!(
            err,
            AllocatorError::StorageUnavailable(StorageError::Timeout(_))
        ));
        assert!(!err.is_client_error());
    }

    #[test]
    fn client_errors() {
        assert!(AllocatorError::InvalidInput("empty".to_string()).is_client_error());
        assert!(AllocatorError::NotFound("abc123".to_string()).is_client_error());
        assert!(!AllocatorError::AllocationExhausted {
            attempts: 7,
            width: 7
        }
        .is_client_error());
    }

    #[test]
    fn exhaustion_message_names_width() {
        let err = AllocatorError::AllocationExhausted {
            attempts: 1,
            width: 6,
        };
        assert_eq!(
            err.to_string(),
            "short code space exhausted after 1 attempts (width 6)"
        );
    }
}
