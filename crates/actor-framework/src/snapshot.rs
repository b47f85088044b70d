//! # Snapshots
//!
//! An actor keeps its collection in memory. Give it a [`Snapshot`] and it also
//! writes the whole collection out after every change, before replying. A
//! failed write rolls the change back and the caller sees
//! [`FrameworkError::Persistence`](crate::FrameworkError::Persistence).
//!
//! Reloading is the caller's job: read the documents back and hand them to
//! [`ResourceActor::with_documents`](crate::ResourceActor::with_documents).

use async_trait::async_trait;

pub type SnapshotError = Box<dyn std::error::Error + Send + Sync>;

/// Durable copy of one actor's collection.
#[async_trait]
pub trait Snapshot<T>: Send + Sync {
    /// Replaces the stored copy with `documents` (in id order).
    async fn save(&self, documents: Vec<T>) -> Result<(), SnapshotError>;
}
