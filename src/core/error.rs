//! Error types for scheduler operations.

use thiserror::Error;

use crate::util::types::ChefId;

/// Errors produced by scheduler components.
///
/// Every variant is a local, recoverable rejection: the kitchen state is left
/// exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// Order rejected before any state was touched.
    #[error("invalid submission: {0}")]
    InvalidSubmission(String),
    /// Selection references a dish the catalog does not contain.
    #[error("unknown dish: {0}")]
    UnknownDish(String),
    /// Chef is preparing a dish and cannot be removed.
    #[error("chef {0} is busy")]
    ChefBusy(ChefId),
    /// No chef with this id is on the roster.
    #[error("chef {0} not found")]
    ChefNotFound(ChefId),
    /// Chef name is empty after trimming.
    #[error("chef name must not be empty")]
    InvalidChefName,
    /// Catalog failed validation.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
