//! The order status state machine.
//!
//! | From | Event | To |
//! |---|---|---|
//! | Cooking | `KitchenReady` | Ready |
//! | Ready | `DriverAssigned` | On the way |
//! | On the way | `Delivered` | Delivered |
//!
//! Anything else is an invalid transition. Side effects (dispatch, `picked_at`, driver
//! release) belong to the callers; this table only answers "where does this go".

use crate::model::OrderStatus;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A signal that moves an order forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderEvent {
    /// External: the kitchen finished cooking.
    KitchenReady,
    /// Internal: dispatch bound a driver.
    DriverAssigned,
    /// External: the driver handed the order over.
    Delivered,
}

impl Display for OrderEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderEvent::KitchenReady => "kitchen_ready",
            OrderEvent::DriverAssigned => "driver_assigned",
            OrderEvent::Delivered => "delivered",
        };
        f.write_str(name)
    }
}

/// The status `event` leads to from `from`, or `None` when the event does not apply.
pub fn next_status(from: OrderStatus, event: OrderEvent) -> Option<OrderStatus> {
    match (from, event) {
        (OrderStatus::Cooking, OrderEvent::KitchenReady) => Some(OrderStatus::Ready),
        (OrderStatus::Ready, OrderEvent::DriverAssigned) => Some(OrderStatus::OnTheWay),
        (OrderStatus::OnTheWay, OrderEvent::Delivered) => Some(OrderStatus::Delivered),
        _ => None,
    }
}
