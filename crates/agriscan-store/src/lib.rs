//! Storage layer: a collection-scoped JSON repository with in-memory and
//! file-backed implementations, plus typed stores for history and fraud reports.

mod error;
pub use error::StoreError;

mod repository;
pub use repository::Repository;

mod memory;
pub use memory::MemoryRepository;

mod file;
pub use file::JsonFileRepository;

pub mod fraud;
pub mod history;
pub use fraud::FraudReportStore;
pub use history::HistoryStore;
