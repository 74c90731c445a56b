//! Storage backends implementing the Burrow repository contract.

pub mod memory;
pub mod mysql;

pub use burrow_core::repository::{InsertOutcome, ReadRepository, Repository, UrlRecord};
pub use burrow_core::StorageError;
pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
