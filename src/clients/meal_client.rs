//! # Meal Client
//!
//! High-level API for the `Meal` actor, including the catalog lookups the ledger and
//! the integrity checks rely on.

use super::{entity_error, lookup_error};
use crate::catalog_actor::CatalogError;
use crate::model::{Meal, MealCreate, MealId, MealUpdate, RestaurantId};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Meal actor.
#[derive(Clone)]
pub struct MealClient {
    inner: ResourceClient<Meal>,
}

impl MealClient {
    pub fn new(inner: ResourceClient<Meal>) -> Self {
        Self { inner }
    }

    /// Adds a meal to its restaurant's menu. Fails with `RestaurantNotFound` when the
    /// restaurant does not exist.
    #[instrument(skip(self, params), fields(restaurant_id = %params.restaurant_id))]
    pub async fn add_meal(&self, params: MealCreate) -> Result<MealId, CatalogError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(entity_error)
    }

    #[instrument(skip(self))]
    pub async fn update_meal(&self, id: MealId, update: MealUpdate) -> Result<Meal, CatalogError> {
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(|e| lookup_error(e, CatalogError::MealNotFound(id)))
    }

    /// Current unit price of a meal, in minor units.
    #[instrument(skip(self))]
    pub async fn meal_price(&self, id: MealId) -> Result<u64, CatalogError> {
        self.get(id)
            .await?
            .map(|meal| meal.price)
            .ok_or(CatalogError::MealNotFound(id))
    }

    /// Whether `meal_id` is on the menu of `restaurant_id`. A missing meal is not.
    #[instrument(skip(self))]
    pub async fn restaurant_owns(
        &self,
        restaurant_id: RestaurantId,
        meal_id: MealId,
    ) -> Result<bool, CatalogError> {
        Ok(self
            .get(meal_id)
            .await?
            .is_some_and(|meal| meal.restaurant_id == restaurant_id))
    }

    /// The restaurant's menu, by meal id.
    #[instrument(skip(self))]
    pub async fn meals_for_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Meal>, CatalogError> {
        let mut meals: Vec<Meal> = self
            .list()
            .await?
            .into_iter()
            .filter(|meal| meal.restaurant_id == restaurant_id)
            .collect();
        meals.sort_by_key(|meal| meal.id);
        Ok(meals)
    }

    /// Removes the meal record only; see [`integrity::delete_meal`](crate::integrity::delete_meal).
    #[instrument(skip(self))]
    pub(crate) async fn remove(&self, id: MealId) -> Result<(), CatalogError> {
        debug!("Sending request");
        self.inner
            .delete(id)
            .await
            .map_err(|e| lookup_error(e, CatalogError::MealNotFound(id)))
    }
}

#[async_trait]
impl ActorClient<Meal> for MealClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Meal> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        entity_error(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;

    fn meal(id: u32, restaurant_id: u32, price: u64) -> Meal {
        Meal {
            id: MealId(id),
            restaurant_id: RestaurantId(restaurant_id),
            name: format!("meal {id}"),
            short_description: String::new(),
            image: String::new(),
            price,
        }
    }

    #[tokio::test]
    async fn test_catalog_lookups() {
        let mut mock = MockClient::<Meal>::new();
        mock.expect_get(MealId(1)).return_ok(Some(meal(1, 1, 500)));
        mock.expect_get(MealId(2)).return_ok(None);
        mock.expect_get(MealId(1)).return_ok(Some(meal(1, 1, 500)));
        mock.expect_get(MealId(1)).return_ok(Some(meal(1, 1, 500)));
        let meals = MealClient::new(mock.client());

        assert_eq!(meals.meal_price(MealId(1)).await.unwrap(), 500);
        assert_eq!(
            meals.meal_price(MealId(2)).await.unwrap_err(),
            CatalogError::MealNotFound(MealId(2))
        );
        assert!(meals.restaurant_owns(RestaurantId(1), MealId(1)).await.unwrap());
        assert!(!meals.restaurant_owns(RestaurantId(2), MealId(1)).await.unwrap());
        mock.verify();
    }

    #[tokio::test]
    async fn test_menu_is_filtered_and_sorted() {
        let mut mock = MockClient::<Meal>::new();
        mock.expect_list()
            .return_ok(vec![meal(3, 1, 100), meal(2, 2, 100), meal(1, 1, 100)]);
        let meals = MealClient::new(mock.client());

        let ids: Vec<_> = meals
            .meals_for_restaurant(RestaurantId(1))
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, [MealId(1), MealId(3)]);
    }

    #[tokio::test]
    async fn test_add_meal_surfaces_catalog_error() {
        let mut mock = MockClient::<Meal>::new();
        mock.expect_create().return_err(FrameworkError::EntityError(Box::new(
            CatalogError::RestaurantNotFound(RestaurantId(9)),
        )));
        let meals = MealClient::new(mock.client());

        let err = meals
            .add_meal(MealCreate {
                restaurant_id: RestaurantId(9),
                name: "Soup".to_string(),
                short_description: String::new(),
                image: String::new(),
                price: 450,
            })
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::RestaurantNotFound(RestaurantId(9)));
    }
}
