//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).

pub mod lesson_client;
pub mod order_client;

pub use lesson_client::*;
pub use order_client::*;
