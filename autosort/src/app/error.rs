//! Application error types.

use thiserror::Error;

use crate::commands::CommandError;

/// Errors from an [`Autosort`](super::Autosort) operation that touches a host.
///
/// `E` is the host's own error type.
#[derive(Debug, Error)]
pub enum AppError<E> {
    /// The command was rejected. Nothing was changed.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// The host failed to report or rearrange its buffers.
    #[error("Buffer host error: {0}")]
    Host(#[source] E),
}
