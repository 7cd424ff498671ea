//! Errors surfaced by [`DeliverySystem`](crate::lifecycle::DeliverySystem).

use crate::catalog_actor::CatalogError;
use crate::directory_actor::DirectoryError;
use crate::order_actor::OrderError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeliveryError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Order(#[from] OrderError),

    /// A delete was refused because other records still point at the entity.
    #[error("Cannot delete {entity} {id}: referenced by {dependents}")]
    ReferentialIntegrityViolation {
        entity: &'static str,
        id: String,
        dependents: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An actor task panicked or was cancelled during shutdown.
    #[error("Shutdown failed: {0}")]
    Shutdown(String),
}

impl DeliveryError {
    /// The error placement and transitions report, if this is one.
    pub fn as_order_error(&self) -> Option<&OrderError> {
        match self {
            DeliveryError::Order(e) => Some(e),
            _ => None,
        }
    }
}
