//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, plus a carrier for entity errors.

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
}

impl FrameworkError {
    /// Recovers the typed entity error carried by [`FrameworkError::EntityError`].
    ///
    /// Returns `Err(self)` unchanged when this is a plumbing error or when the boxed error
    /// is of a different type, so callers can fall back to their own mapping.
    ///
    /// ```rust
    /// use actor_framework::FrameworkError;
    ///
    /// #[derive(Debug, thiserror::Error, PartialEq)]
    /// #[error("empty order")]
    /// struct EmptyOrder;
    ///
    /// let err = FrameworkError::EntityError(Box::new(EmptyOrder));
    /// assert_eq!(err.downcast_entity::<EmptyOrder>().unwrap(), EmptyOrder);
    ///
    /// let closed = FrameworkError::ActorClosed;
    /// assert!(closed.downcast_entity::<EmptyOrder>().is_err());
    /// ```
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}
