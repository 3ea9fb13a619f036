//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each wrapper implements [`ActorClient`](actor_framework::ActorClient) for
//! the generic `get`/`list`/`delete` and adds the domain operations the
//! HTTP layer calls. Checks that span actors (does the restaurant exist?)
//! live here, outside any actor, so no actor ever waits on another one
//! that could be waiting on it.

pub mod menu_client;
pub mod order_client;
pub mod restaurant_client;

pub use menu_client::*;
pub use order_client::*;
pub use restaurant_client::*;
