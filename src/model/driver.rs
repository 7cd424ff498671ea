use crate::model::{AccountRef, DriverId, OrderId};
use serde::{Deserialize, Serialize};

/// A driver profile wrapping an account.
///
/// A driver is available for dispatch when it is on duty and not holding an unfinished
/// order. `current_order` is the binding recorded at the moment dispatch claims the
/// driver; it is cleared when that order is delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub account: AccountRef,
    pub avatar: String,
    pub car_model: String,
    pub plate_number: String,
    /// Free-form until a geo collaborator exists.
    pub location: String,
    pub on_duty: bool,
    pub current_order: Option<OrderId>,
}

impl Driver {
    /// New drivers start off duty.
    pub fn new(id: DriverId, params: DriverCreate) -> Self {
        Self {
            id,
            account: params.account,
            avatar: params.avatar,
            car_model: params.car_model,
            plate_number: params.plate_number,
            location: String::new(),
            on_duty: false,
            current_order: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.on_duty && self.current_order.is_none()
    }
}

/// Payload for registering a driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverCreate {
    pub account: AccountRef,
    pub avatar: String,
    pub car_model: String,
    pub plate_number: String,
}

/// Profile changes; `None` leaves a field untouched. Availability and bindings change
/// only through [`DriverAction`](crate::directory_actor::DriverAction).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriverUpdate {
    pub avatar: Option<String>,
    pub car_model: Option<String>,
    pub plate_number: Option<String>,
}
