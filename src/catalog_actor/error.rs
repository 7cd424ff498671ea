//! Error types for the catalog actors (restaurants and meals).

use crate::model::{MealId, RestaurantId};
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The requested restaurant was not found.
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(RestaurantId),

    /// The requested meal was not found.
    #[error("Meal not found: {0}")]
    MealNotFound(MealId),

    /// The catalog data provided is invalid.
    #[error("Catalog validation error: {0}")]
    ValidationError(String),

    /// The entity still has dependents and cannot be removed.
    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrityViolation(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CatalogError {
    fn from(msg: String) -> Self {
        CatalogError::ActorCommunicationError(msg)
    }
}
