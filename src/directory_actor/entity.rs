//! `ActorEntity` implementations for [`Customer`] and [`Driver`].
//!
//! The driver actor is the only place a driver's binding changes. `Claim` reads the
//! availability and writes the binding inside one `handle_action` call, so two
//! dispatches racing for the same driver are ordered by the actor's mailbox and the
//! second one sees the driver as taken.

use super::{CustomerAction, DirectoryError, DriverAction};
use crate::model::{
    is_blank, Customer, CustomerCreate, CustomerId, CustomerUpdate, Driver, DriverCreate,
    DriverId, DriverUpdate,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
impl ActorEntity for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;
    type Action = CustomerAction;
    type ActionResult = ();
    type Context = ();
    type Error = DirectoryError;

    fn from_create_params(id: CustomerId, params: CustomerCreate) -> Result<Self, Self::Error> {
        if is_blank(&params.account.0) {
            return Err(DirectoryError::ValidationError(
                "customer account reference must not be blank".to_string(),
            ));
        }
        Ok(Customer::new(id, params))
    }

    async fn on_update(
        &mut self,
        update: CustomerUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(avatar) = update.avatar {
            self.avatar = avatar;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CustomerAction,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        match action {}
    }
}

#[async_trait]
impl ActorEntity for Driver {
    type Id = DriverId;
    type Create = DriverCreate;
    type Update = DriverUpdate;
    type Action = DriverAction;
    type ActionResult = Driver;
    type Context = ();
    type Error = DirectoryError;

    fn from_create_params(id: DriverId, params: DriverCreate) -> Result<Self, Self::Error> {
        if is_blank(&params.account.0) {
            return Err(DirectoryError::ValidationError(
                "driver account reference must not be blank".to_string(),
            ));
        }
        Ok(Driver::new(id, params))
    }

    async fn on_update(
        &mut self,
        update: DriverUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(avatar) = update.avatar {
            self.avatar = avatar;
        }
        if let Some(car_model) = update.car_model {
            self.car_model = car_model;
        }
        if let Some(plate_number) = update.plate_number {
            self.plate_number = plate_number;
        }
        Ok(())
    }

    /// A driver bound to an unfinished order cannot be removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        match self.current_order {
            Some(order_id) => Err(DirectoryError::ReferentialIntegrityViolation(format!(
                "{} is delivering {}",
                self.id, order_id
            ))),
            None => Ok(()),
        }
    }

    async fn handle_action(
        &mut self,
        action: DriverAction,
        _ctx: &Self::Context,
    ) -> Result<Driver, Self::Error> {
        match action {
            DriverAction::SetAvailability(on_duty) => {
                self.on_duty = on_duty;
            }
            DriverAction::UpdateLocation(location) => {
                self.location = location;
            }
            DriverAction::Claim(order_id) => {
                if self.current_order == Some(order_id) {
                    debug!(driver_id = %self.id, %order_id, "Already bound to this order");
                } else if !self.is_available() {
                    debug!(driver_id = %self.id, %order_id, "Claim refused");
                    return Err(DirectoryError::DriverUnavailable(self.id));
                }
                self.current_order = Some(order_id);
            }
            DriverAction::Release(order_id) => {
                if self.current_order != Some(order_id) {
                    return Err(DirectoryError::BindingMismatch {
                        driver_id: self.id,
                        expected: self.current_order,
                        actual: order_id,
                    });
                }
                self.current_order = None;
            }
        }
        Ok(self.clone())
    }
}
