//! Error types for the directory actors (customers and drivers).

use crate::model::{CustomerId, DriverId, OrderId};
use thiserror::Error;

/// Errors that can occur during directory operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DirectoryError {
    /// The requested customer was not found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// The requested driver was not found.
    #[error("Driver not found: {0}")]
    DriverNotFound(DriverId),

    /// The driver is off duty or already bound to an order.
    #[error("Driver unavailable: {0}")]
    DriverUnavailable(DriverId),

    /// A release named an order the driver is not bound to.
    #[error("Driver {driver_id} is bound to {expected:?}, not {actual}")]
    BindingMismatch {
        driver_id: DriverId,
        expected: Option<OrderId>,
        actual: OrderId,
    },

    /// The profile data provided is invalid.
    #[error("Directory validation error: {0}")]
    ValidationError(String),

    /// The entity still has dependents and cannot be removed.
    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrityViolation(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for DirectoryError {
    fn from(msg: String) -> Self {
        DirectoryError::ActorCommunicationError(msg)
    }
}
