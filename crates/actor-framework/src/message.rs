//! # Generic Messages
//!
//! The request envelope that travels from a [`ResourceClient`](crate::ResourceClient)
//! to its [`ResourceActor`](crate::ResourceActor). Every variant carries a oneshot
//! sender for the reply.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A predicate evaluated inside the actor against each stored document.
///
/// Used by [`ResourceRequest::List`] to select documents without copying the
/// whole collection out of the actor first.
pub struct Filter<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(predicate))
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// Message sent to the actor to request an operation.
///
/// The variants are the standard resource lifecycle (Create, Get, Update,
/// Delete), a `List` read over the whole collection, and `Action` for
/// document-specific behaviour that does not fit CRUD.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    /// All documents in id order, optionally narrowed by a [`Filter`].
    List {
        filter: Option<Filter<T>>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_applies_predicate() {
        let even = Filter::new(|n: &u32| n % 2 == 0);
        assert!(even.matches(&4));
        assert!(!even.matches(&7));
        assert_eq!(format!("{:?}", even), "Filter(..)");
    }
}
