//! # System Lifecycle & Orchestration
//!
//! Starts, wires and stops the three actors behind the service.
//!
//! ## Startup
//!
//! [`OrderSystem::start`] loads a [`Snapshot`](crate::store::Snapshot) from
//! the store, restores each actor's table from it and spawns the actors:
//!
//! ```rust,ignore
//! let store: SharedStore = Arc::new(MemoryStore::new());
//! let system = OrderSystem::start(store).await?;
//!
//! let cafe = system.restaurant_client
//!     .create_restaurant(RestaurantCreate { name: "Cafe".into() })
//!     .await?;
//! let order = system.order_client.open_order(cafe.id).await?;
//!
//! system.shutdown().await?;
//! ```
//!
//! ## Dependency Injection via Context
//!
//! Actors are built without dependencies and receive them in
//! `run(context)` ("late binding"):
//!
//! | Actor | Context |
//! |---|---|
//! | Menu | `SharedStore` |
//! | Order | `OrderContext { store, item_ids }` |
//! | Restaurant | `RestaurantContext { store, menu, orders }` |
//!
//! Only the Restaurant actor talks to other actors (to evict a deleted
//! restaurant's menu and orders). The Menu and Order actors never call back,
//! so the dependency graph is acyclic.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the Restaurant
//!    actor's channel.
//! 2. **Restaurant actor exits** - dropping its context releases the last
//!    Menu and Order senders, so those actors exit next.
//! 3. **Await completion** - every actor task is joined.
//!
//! Anything else holding a client clone (e.g. the HTTP router state) must
//! be dropped first, or shutdown waits for it.
//!
//! ## Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter
//! filtered by `RUST_LOG` (default `info`):
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads
//! ```

pub mod order_system;
pub mod tracing;

pub use order_system::*;
pub use self::tracing::setup_tracing;
