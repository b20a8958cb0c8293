//! Error types

use thiserror::Error;

/// Failure reported by the host's size-observation mechanism
#[derive(Clone, Debug, Error)]
#[error("size observation failed: {0}")]
pub struct ObservationError(pub String);

/// Failure while wiring observation for an element
///
/// The element is left untracked; no partial state survives a failed
/// `observe`. Missing clip support and unmeasurable elements are accepted
/// no-op states, not errors.
#[derive(Debug, Error)]
pub enum ObserveError {
    #[error("could not subscribe to size changes: {0}")]
    Subscription(#[from] ObservationError),
}
