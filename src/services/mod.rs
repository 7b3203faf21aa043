//! Harvest orchestration and collaborator services

pub mod harvest;
pub mod languages;
pub mod storage;

pub use harvest::{HarvestService, HarvestSummary};
pub use languages::LanguageRepository;
pub use storage::{HttpObjectStore, ObjectStore};
