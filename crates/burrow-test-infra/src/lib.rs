//! Disposable backing services for Burrow integration tests.

pub mod error;
pub mod mysql;

pub use error::{Result, TestInfraError};
