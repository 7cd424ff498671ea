//! Custom actions for the Order actor.

use crate::model::DriverId;
use chrono::{DateTime, Utc};

/// Status changes and driver bookkeeping on a stored order.
///
/// Every variant returns the order's state after the change. A failed action leaves the
/// order untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Cooking -> Ready.
    KitchenReady,
    /// Ready -> On the way, binding `driver_id`. `at` becomes `picked_at` unless one is
    /// already recorded.
    AssignDriver { driver_id: DriverId, at: DateTime<Utc> },
    /// On the way -> Delivered.
    Delivered,
    /// Unset the driver of a delivered order whose driver profile is being removed.
    ClearDriver(DriverId),
}

/// Orders are never edited after placement.
#[derive(Debug, Clone)]
pub enum OrderUpdate {}
