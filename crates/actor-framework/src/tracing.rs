//! # Observability
//!
//! One-shot initialization of the `tracing` subscriber shared by every binary and demo.
//!
//! The actor loop already emits structured events (`entity_type`, `id`, `size`) for every
//! request; client wrappers add `#[instrument]` spans on top. `RUST_LOG` controls what is
//! printed:
//!
//! ```bash
//! RUST_LOG=info cargo run                              # lifecycle events only
//! RUST_LOG=debug cargo run                             # payloads of every request
//! RUST_LOG=delivery_core=debug,actor_framework=info cargo run
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber with `RUST_LOG`, or `fallback` when it is unset or
/// unparsable.
///
/// Uses the compact format without targets; the actor events carry `entity_type`
/// instead. Calling it twice is harmless: the second call leaves the first subscriber in
/// place.
pub fn setup_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
