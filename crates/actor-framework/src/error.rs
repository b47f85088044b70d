//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, plus the boxed wrapper that
//! carries an entity's own error type back to the caller.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
    /// The change was applied in memory but could not be written out, and
    /// has been rolled back.
    #[error("Persistence failed: {0}")]
    Persistence(String),
    /// Every id the actor can mint has been used.
    #[error("Id space exhausted")]
    IdsExhausted,
}

impl FrameworkError {
    /// Recovers the entity's typed error from an [`FrameworkError::EntityError`].
    ///
    /// Hooks return `T::Error`, which the actor boxes before sending it over the
    /// response channel. Clients that want to branch on the concrete error
    /// (e.g. a capacity conflict vs. a plumbing failure) downcast it back here.
    /// Any other variant, or an entity error of a different type, is returned
    /// unchanged in `Err`.
    pub fn into_entity_error<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }

    /// True when the failure came from the channel rather than the entity.
    pub fn is_disconnected(&self) -> bool {
        matches!(self, FrameworkError::ActorClosed | FrameworkError::ActorDropped)
    }
}
