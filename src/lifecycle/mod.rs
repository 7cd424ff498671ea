//! # System Lifecycle & Orchestration
//!
//! [`DeliverySystem`] creates every actor, wires the order actor to the catalog and the
//! directory through its context, and shuts the whole graph down again.
//!
//! ## Wiring
//!
//! ```text
//! Restaurant   Context = ()
//! Meal         Context = RestaurantClient
//! Customer     Context = ()
//! Driver       Context = ()
//! Order        Context = OrderContext { customers, restaurants, meals }
//! ```
//!
//! Actors are created first and receive their dependencies only when they start
//! (`actor.run(context)`), so construction order never matters.
//!
//! ## Shutdown
//!
//! An actor stops when the last client of its mailbox is dropped. Dropping the facade's
//! clients stops the order actor, whose context then releases the catalog and directory
//! clients, and so on down the graph.

pub mod delivery_system;

pub use delivery_system::DeliverySystem;
