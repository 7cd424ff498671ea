//! Customer orders and their line items.
//!
//! [`Order`] implements [`ActorEntity`](actor_framework::ActorEntity) in
//! [`order_actor`](crate::order_actor), which hosts both the ledger (placement and totals)
//! and the status engine (transitions).

use crate::model::{CustomerId, DriverId, MealId, OrderId, RestaurantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Order progression. Persisted as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum OrderStatus {
    Cooking = 1,
    Ready = 2,
    OnTheWay = 3,
    Delivered = 4,
}

impl OrderStatus {
    /// Every status in progression order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Cooking,
        OrderStatus::Ready,
        OrderStatus::OnTheWay,
        OrderStatus::Delivered,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Human readable label shown to customers and restaurant staff.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Cooking => "Cooking",
            OrderStatus::Ready => "Ready",
            OrderStatus::OnTheWay => "On the way",
            OrderStatus::Delivered => "Delivered",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Delivered
    }

    /// Whether an order in this status is expected to carry a driver.
    pub fn has_driver(self) -> bool {
        matches!(self, OrderStatus::OnTheWay | OrderStatus::Delivered)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<OrderStatus> for u8 {
    fn from(status: OrderStatus) -> Self {
        status.code()
    }
}

/// A persisted status code outside `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status code: {0}")]
pub struct UnknownStatusCode(pub u8);

impl TryFrom<u8> for OrderStatus {
    type Error = UnknownStatusCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or(UnknownStatusCode(code))
    }
}

/// One line of an order: a meal, how many, and the price frozen at placement.
///
/// Never mutated once the order is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub order_id: OrderId,
    /// 1-based position within the order.
    pub line: u32,
    pub meal_id: MealId,
    pub quantity: u32,
    pub sub_total: u64,
}

impl Display for OrderDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.order_id, self.line)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
    pub driver_id: Option<DriverId>,
    pub address: String,
    pub total: u64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub picked_at: Option<DateTime<Utc>>,
    pub details: Vec<OrderDetails>,
}

impl Order {
    /// Sum of the line sub-totals. Equal to `total` for every stored order.
    pub fn details_total(&self) -> u64 {
        self.details.iter().map(|d| d.sub_total).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.id, f)
    }
}

/// A requested quantity of one meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub meal_id: MealId,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(meal_id: MealId, quantity: u32) -> Self {
        Self { meal_id, quantity }
    }
}

/// Payload for placing an order (the cart).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_id: CustomerId,
    pub restaurant_id: RestaurantId,
    pub address: String,
    pub line_items: Vec<LineItem>,
}

/// Confirmation returned by a successful placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_roundtrip_through_serde() {
        let json = serde_json::to_string(&OrderStatus::OnTheWay).unwrap();
        assert_eq!(json, "3");
        let back: OrderStatus = serde_json::from_str("2").unwrap();
        assert_eq!(back, OrderStatus::Ready);
        assert!(serde_json::from_str::<OrderStatus>("9").is_err());
    }

    #[test]
    fn test_status_labels_follow_progression() {
        let labels: Vec<_> = OrderStatus::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(labels, ["Cooking", "Ready", "On the way", "Delivered"]);
        assert_eq!(OrderStatus::try_from(0), Err(UnknownStatusCode(0)));
    }
}
