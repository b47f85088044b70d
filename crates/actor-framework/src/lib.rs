//! # Actor Framework
//!
//! Building blocks for resource stores implemented as Tokio actors. Each store
//! is one task that exclusively owns a collection of documents; everything else
//! talks to it through a cheap, cloneable client over a bounded channel.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the document type and its hooks. Business
//!    rules (e.g. "never reserve more than is left") live here.
//! 2. **Runtime** ([`ResourceActor`]): the message loop. Processes one request
//!    at a time, so hooks need no locks and read-check-write sequences inside a
//!    hook are atomic with respect to other requests.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed async calls
//!    for Create, Get, List, Update, Delete and custom Actions.
//!
//! ## Context Injection
//!
//! Dependencies are passed to `run()` rather than `new()`. All actors can be
//! created first and then wired together, e.g. an order store that needs the
//! catalog's client to reserve capacity:
//!
//! ```rust,ignore
//! let (lesson_actor, lessons) = ResourceActor::<Lesson>::new(32);
//! let (order_actor, orders) = ResourceActor::<Order>::new(32);
//! tokio::spawn(lesson_actor.run(()));
//! tokio::spawn(order_actor.run(LessonClient::new(lessons.clone())));
//! ```
//!
//! ## Shutdown
//!
//! An actor stops when every clone of its client has been dropped. Keep the
//! dependency graph acyclic and shutdown falls out of dropping the clients.
//!
//! ## Persistence
//!
//! Collections live in memory. [`ResourceActor::persist_with`] attaches a
//! [`Snapshot`] that is written after every change, and
//! [`ResourceActor::with_documents`] starts an actor from a reloaded copy.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a client's requests from canned expectations,
//! so code that depends on a store can be tested without running one.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod snapshot;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
pub use snapshot::{Snapshot, SnapshotError};
