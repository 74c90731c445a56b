//! Core types and traits for the Burrow URL shortener.
//!
//! This crate provides the types shared by the code allocator and the
//! storage backends: short codes, stored records, the storage contract and
//! the error taxonomy.

pub mod allocator;
pub mod base62;
pub mod error;
pub mod repository;
pub mod shortcode;

pub use allocator::Allocator;
pub use error::{AllocatorError, StorageError};
pub use repository::{InsertOutcome, ReadRepository, Repository, UrlRecord};
pub use shortcode::ShortCode;
