//! `ActorEntity` implementations for [`Restaurant`] and [`Meal`].
//!
//! Catalog entities are reference data: creation validates the payload, updates are
//! plain data entry, and neither has custom actions.

use super::CatalogError;
use crate::clients::RestaurantClient;
use crate::model::{
    is_blank, Meal, MealCreate, MealId, MealUpdate, Restaurant, RestaurantCreate, RestaurantId,
    RestaurantUpdate,
};
use actor_framework::{ActorClient, ActorEntity};
use async_trait::async_trait;

/// Restaurants have no custom actions.
#[derive(Debug, Clone)]
pub enum RestaurantAction {}

/// Meals have no custom actions.
#[derive(Debug, Clone)]
pub enum MealAction {}

#[async_trait]
impl ActorEntity for Restaurant {
    type Id = RestaurantId;
    type Create = RestaurantCreate;
    type Update = RestaurantUpdate;
    type Action = RestaurantAction;
    type ActionResult = ();
    type Context = ();
    type Error = CatalogError;

    fn from_create_params(id: RestaurantId, params: RestaurantCreate) -> Result<Self, Self::Error> {
        if is_blank(&params.name) {
            return Err(CatalogError::ValidationError(
                "restaurant name must not be blank".to_string(),
            ));
        }
        Ok(Restaurant::new(id, params))
    }

    async fn on_update(
        &mut self,
        update: RestaurantUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if update.name.as_deref().is_some_and(is_blank) {
            return Err(CatalogError::ValidationError(
                "restaurant name must not be blank".to_string(),
            ));
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(logo) = update.logo {
            self.logo = logo;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: RestaurantAction,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        match action {}
    }
}

#[async_trait]
impl ActorEntity for Meal {
    type Id = MealId;
    type Create = MealCreate;
    type Update = MealUpdate;
    type Action = MealAction;
    type ActionResult = ();
    type Context = RestaurantClient;
    type Error = CatalogError;

    fn from_create_params(id: MealId, params: MealCreate) -> Result<Self, Self::Error> {
        if is_blank(&params.name) {
            return Err(CatalogError::ValidationError(
                "meal name must not be blank".to_string(),
            ));
        }
        Ok(Meal::new(id, params))
    }

    /// A meal can only be added to a restaurant that exists.
    async fn on_create(&mut self, restaurants: &RestaurantClient) -> Result<(), Self::Error> {
        match restaurants.get(self.restaurant_id).await? {
            Some(_) => Ok(()),
            None => Err(CatalogError::RestaurantNotFound(self.restaurant_id)),
        }
    }

    async fn on_update(
        &mut self,
        update: MealUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if update.name.as_deref().is_some_and(is_blank) {
            return Err(CatalogError::ValidationError(
                "meal name must not be blank".to_string(),
            ));
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(short_description) = update.short_description {
            self.short_description = short_description;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: MealAction,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        match action {}
    }
}
