use crate::model::{MealId, RestaurantId};
use serde::{Deserialize, Serialize};

/// A menu item. Belongs to exactly one restaurant for its whole life.
///
/// `price` is in minor currency units. Orders snapshot it at placement, so changing it
/// later never alters an existing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: MealId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub short_description: String,
    pub image: String,
    pub price: u64,
}

impl Meal {
    pub fn new(id: MealId, params: MealCreate) -> Self {
        Self {
            id,
            restaurant_id: params.restaurant_id,
            name: params.name,
            short_description: params.short_description,
            image: params.image,
            price: params.price,
        }
    }
}

/// Payload for adding a meal to a restaurant's menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealCreate {
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub short_description: String,
    pub image: String,
    pub price: u64,
}

/// Menu edits. The owning restaurant cannot be changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MealUpdate {
    pub name: Option<String>,
    pub short_description: Option<String>,
    pub image: Option<String>,
    pub price: Option<u64>,
}
