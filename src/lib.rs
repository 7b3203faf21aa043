//! Open Research Library metadata harvester
//!
//! Harvests bibliographic records from the library's OAI-PMH feed, normalizes
//! them into canonical book records, renders ONIX metadata and uploads the
//! metadata, book and cover artifacts to object storage.

pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod oai;
pub mod onix;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
