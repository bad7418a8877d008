use thiserror::Error;

use blockfall_core::CatalogError;

use crate::config::ConfigError;

/// Failures that prevent a game from being created.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("shape catalog is invalid: {0}")]
    Catalog(#[from] CatalogError),
    #[error("invalid engine configuration: {0}")]
    Config(#[from] ConfigError),
}
