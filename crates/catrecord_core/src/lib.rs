//! Core domain logic for the cat record catalog.
//! This crate is the single source of truth for cat business rules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::cat::{Cat, CatId};
pub use model::identificator::{IdentificatorStrategy, StandardIdentificator};
pub use render::{DocumentRenderer, PageLayout, PdfRenderer, RenderError, PDF_MEDIA_TYPE};
pub use repo::cat_repo::{CatRepository, RepoError, RepoResult, SqliteCatRepository};
pub use service::cat_service::{CatService, CatServiceError, CatServiceResult, ErrorKind};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
