use crate::collections::Collection;

/// Failures of catalog queries and writes that map onto client errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("No document '{key}' in {collection}")]
    NotFound { collection: Collection, key: String },
    #[error("Key '{key}' already exists in {collection}")]
    Conflict { collection: Collection, key: String },
    #[error("{0}")]
    BadRequest(String),
    #[error("Graph '{0}' does not exist")]
    GraphNotFound(String),
}

impl CatalogError {
    pub fn not_found(collection: Collection, key: &str) -> Self {
        Self::NotFound {
            collection,
            key: key.to_string(),
        }
    }

    pub fn conflict(collection: Collection, key: &str) -> Self {
        Self::Conflict {
            collection,
            key: key.to_string(),
        }
    }
}
