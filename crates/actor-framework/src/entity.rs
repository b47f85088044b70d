//! # ActorEntity Trait
//!
//! The contract a document type implements so a [`ResourceActor`](crate::ResourceActor)
//! can own a collection of it. Associated types pin down the id, the create and
//! update payloads, the custom actions and the injected context, so a payload
//! meant for one store can never be sent to another.
//!
//! Lifecycle hooks (`on_create`, `on_update`, `on_delete`, `handle_action`) run
//! inside the actor task, one message at a time. A hook that mutates `self`
//! therefore sees no concurrent writer; that is the property the booking
//! service relies on for capacity checks.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored document must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so they may call other actors. The `Context` type is handed
/// to `run()` rather than `new()`, which lets actors be wired to each other after
/// all of them exist.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier assigned by the actor on create.
    ///
    /// `Ord` keeps listings in a stable, creation-ordered sequence; `From<u32>`
    /// lets the actor mint ids from its counter.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new document.
    type Create: Send + Sync + Debug;

    /// Payload required to update an existing document.
    type Update: Send + Sync + Debug;

    /// Document-specific operations (e.g. `ReserveSpaces`).
    type Action: Send + Sync + Debug;

    /// Result returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the actor. Use `()` when there are none.
    type Context: Send + Sync;

    /// One error enum per actor; hooks for every message share it.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the document from the freshly minted id and the create payload.
    /// Called synchronously, before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Runs after construction and before the document is stored. Returning an
    /// error aborts the create; nothing is inserted.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Runs when a document that passed `on_create` is not stored after all
    /// (its snapshot could not be written). Undo side effects of `on_create`
    /// here.
    async fn on_discard(&self, _ctx: &Self::Context) {}

    /// Apply an update in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before the document is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Actions that never change the document skip the snapshot write.
    fn is_read_only(_action: &Self::Action) -> bool {
        false
    }

    /// Handle a document-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
