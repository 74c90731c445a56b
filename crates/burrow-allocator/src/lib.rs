//! Short-code allocation for the Burrow URL shortener.
//!
//! [`AllocatorService`] turns a long URL into a short code that is unique
//! among stored codes. Candidates are derived from a fingerprint of the URL,
//! claimed with the repository's atomic insert-if-absent, and re-derived with
//! a salt when the code is already held by a different URL.

pub mod fingerprint;
pub mod probe;
pub mod service;
pub mod settings;

pub use burrow_core::{Allocator, AllocatorError, ShortCode};
pub use fingerprint::{Fingerprint, Fingerprinter, Sha256Fingerprinter};
pub use service::{AllocatorService, MAX_URL_LENGTH};
pub use settings::AllocatorSettings;
