//! Error types for the Order actor.

use super::OrderEvent;
use crate::catalog_actor::CatalogError;
use crate::directory_actor::DirectoryError;
use crate::model::{CustomerId, MealId, OrderId, OrderStatus, RestaurantId};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// The cart has no line items.
    #[error("Order has no line items")]
    EmptyOrder,

    /// A line item asked for zero of a meal.
    #[error("Invalid quantity for {meal_id}")]
    InvalidQuantity { meal_id: MealId },

    /// The delivery address is empty.
    #[error("Delivery address must not be blank")]
    BlankAddress,

    /// The meal does not exist or belongs to another restaurant.
    #[error("{meal_id} is not on the menu of {restaurant_id}")]
    CatalogMismatch {
        restaurant_id: RestaurantId,
        meal_id: MealId,
    },

    /// The restaurant specified in the order does not exist.
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(RestaurantId),

    /// The customer specified in the order does not exist.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// The customer has no phone or no address on file.
    #[error("{0} needs a phone and an address before ordering")]
    IncompleteCustomerProfile(CustomerId),

    /// A sub-total or the total does not fit in the money type.
    #[error("Order total overflows")]
    TotalOverflow,

    /// The event does not apply to the order's current status.
    #[error("Invalid transition for {order_id}: {event} while {from}")]
    InvalidTransition {
        order_id: OrderId,
        from: OrderStatus,
        event: OrderEvent,
    },

    /// The order still has dependents, or is still bound to the driver being removed.
    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrityViolation(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
