//! Error taxonomy. Every error here is recoverable: it is surfaced to the
//! user as a transient notice and leaves the controller state untouched.

use thiserror::Error;

/// Failures of a text-injection attempt against the captured source.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InjectionError {
    /// The selection did not originate in an editable element.
    #[error("selection was not in an editable element")]
    NoEditableTarget,

    /// There is no text to insert; no mutation occurred.
    #[error("no text to insert")]
    EmptyPayload,

    /// The target element rejected the mutation, e.g. it was detached from
    /// the document or its content changed under the captured offsets.
    #[error("failed to apply text to the source element")]
    InjectionFailed,
}

/// A clipboard write did not complete.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);
