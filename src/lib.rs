//! # Delivery Core
//!
//! The order lifecycle and driver dispatch core of a food-delivery marketplace,
//! built from resource actors.
//!
//! A cart becomes an order in `Cooking`, priced from the catalog. The kitchen marks it
//! `Ready`, dispatch binds one available driver and sends it `On the way`, and the
//! driver marks it `Delivered`, which frees the driver again.
//!
//! ## Module Tour
//!
//! ### 1. The Actors ([`catalog_actor`], [`directory_actor`], [`order_actor`])
//! One [`ResourceActor`](actor_framework::ResourceActor) per entity type. Each actor
//! handles its requests one at a time, which is what serializes order transitions and
//! makes a driver claim atomic.
//!
//! ### 2. The Interface ([`clients`])
//! Typed wrappers around the generic `ResourceClient` that speak each actor's error type.
//!
//! ### 3. Cross-actor Rules ([`dispatch`], [`integrity`], [`notify`])
//! - [`dispatch`]: claim-then-assign with rollback.
//! - [`integrity`]: cascade and restrict rules for deletes, under a shared/exclusive guard.
//! - [`notify`]: fire-and-forget status notifications.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`DeliverySystem`](lifecycle::DeliverySystem) starts and wires the actors and exposes
//! the inbound operations.
//!
//! ## Example
//!
//! ```rust
//! use delivery_core::lifecycle::DeliverySystem;
//! use delivery_core::model::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), delivery_core::error::DeliveryError> {
//!     let system = DeliverySystem::new();
//!
//!     let restaurant_id = system
//!         .register_restaurant(RestaurantCreate {
//!             account: AccountRef::new("acct-r1"),
//!             name: "Noodle Bar".into(),
//!             phone: "555-0100".into(),
//!             address: "1 Market St".into(),
//!             logo: "logos/noodle.png".into(),
//!         })
//!         .await?;
//!     let meal_id = system
//!         .add_meal(MealCreate {
//!             restaurant_id,
//!             name: "Ramen".into(),
//!             short_description: "Pork broth".into(),
//!             image: "meals/ramen.png".into(),
//!             price: 1250,
//!         })
//!         .await?;
//!     let customer_id = system
//!         .register_customer(CustomerCreate {
//!             account: AccountRef::new("acct-c1"),
//!             avatar: String::new(),
//!             phone: Some("555-0111".into()),
//!             address: Some("9 Elm St".into()),
//!         })
//!         .await?;
//!
//!     let placed = system
//!         .place_order(OrderCreate {
//!             customer_id,
//!             restaurant_id,
//!             address: "9 Elm St".into(),
//!             line_items: vec![LineItem::new(meal_id, 2)],
//!         })
//!         .await?;
//!     assert_eq!(placed.total, 2500);
//!
//!     system.shutdown().await
//! }
//! ```

pub mod catalog_actor;
pub mod clients;
pub mod config;
pub mod directory_actor;
pub mod dispatch;
pub mod error;
pub mod integrity;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod order_actor;
