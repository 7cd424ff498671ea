//! Custom actions for the directory actors.

use crate::model::OrderId;

/// Customers have no custom actions.
#[derive(Debug, Clone)]
pub enum CustomerAction {}

/// Driver state changes that go beyond profile edits.
///
/// Every variant returns the driver's state after the change.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverAction {
    /// Go on or off duty. Going off duty does not drop a bound order.
    SetAvailability(bool),
    UpdateLocation(String),
    /// Bind the driver to an order if it is available. Fails with
    /// [`DriverUnavailable`](super::DirectoryError::DriverUnavailable) otherwise.
    Claim(OrderId),
    /// Unbind the driver from the named order.
    Release(OrderId),
}
