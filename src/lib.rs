//! # Lesson Booking
//!
//! Backend for an after-school lesson shop: a catalog of lessons with limited
//! places, and orders that take places from one or more lessons at once.
//!
//! ## Architecture
//!
//! Storage is built from resource actors (see the `actor-framework` crate).
//! Each collection is owned by one Tokio task; handlers talk to it through a
//! typed client.
//!
//! - **Catalog** ([`lesson_actor`]): lessons and their remaining `spaces`.
//!   Reserving and releasing places are actions, so a check and its write
//!   are one message and two buyers can never both take the last place.
//! - **Orders** ([`order_actor`]): placing an order reserves every line item
//!   concurrently and only stores the order when all of them succeeded.
//!   Partial reservations are released again.
//! - **Orchestrator** ([`lifecycle`]): opens the [`store`], spawns and wires
//!   the actors and shuts everything down. With a `file://` store each actor
//!   writes its collection back after every change.
//! - **HTTP** ([`api`]): axum routes over the clients, with CORS, request
//!   tracing, static images and a panic page.
//!
//! ## Running
//!
//! ```bash
//! DB_CONNECTION=file://data RUST_LOG=info cargo run
//! ```
//!
//! See [`config`] for the other environment variables.

pub mod api;
pub mod clients;
pub mod config;
pub mod lesson_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod search;
pub mod store;
