//! Error types for Switchboard.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`SwitchboardError`] - Top-level error type for all Switchboard operations
//! - [`ConfigError`] - Registry construction errors (fatal, build time)
//! - [`DispatchError`] - Errors surfaced by a single request dispatch

use crate::signature::Signature;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
///
/// Every handler, behavior and hook reports failures as a `BoxError`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Switchboard operations.
#[derive(Error, Debug)]
pub enum SwitchboardError {
    /// The registry could not be built.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A request dispatch failed.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Errors raised while building a registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// More than one handler was registered for one signature.
    #[error("duplicate handler registered for `{0}`")]
    DuplicateHandler(Signature),

    /// A required signature has no handler.
    #[error("no handler registered for required signature `{0}`")]
    MissingHandler(Signature),
}

/// Errors that can occur while dispatching a request.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No handler is registered for the request's signature.
    #[error("no handler registered for `{0}`")]
    NoHandler(Signature),

    /// A handler, behavior or hook failed. The original error is kept as-is.
    #[error("request pipeline failed: {0}")]
    Failed(#[source] BoxError),
}

impl DispatchError {
    /// Returns the original pipeline error if it is of type `T`.
    pub fn downcast_ref<T: std::error::Error + 'static>(&self) -> Option<&T> {
        match self {
            DispatchError::Failed(err) => err.downcast_ref::<T>(),
            DispatchError::NoHandler(_) => None,
        }
    }

    /// Consumes the error, returning the original pipeline error, if any.
    pub fn into_source(self) -> Option<BoxError> {
        match self {
            DispatchError::Failed(err) => Some(err),
            DispatchError::NoHandler(_) => None,
        }
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Failed(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Error, Debug)]
    #[error("out of stock")]
    struct OutOfStock;

    #[test]
    fn failed_keeps_original_error() {
        let err = DispatchError::from(Box::new(OutOfStock) as BoxError);
        assert!(err.downcast_ref::<OutOfStock>().is_some());
        assert_eq!(err.to_string(), "request pipeline failed: out of stock");
        assert!(err.into_source().is_some());
    }

    #[test]
    fn no_handler_names_signature() {
        let err = DispatchError::NoHandler(Signature::of::<String, ()>());
        assert!(err.to_string().contains("String -> ()"));
        assert!(err.downcast_ref::<OutOfStock>().is_none());
    }
}
