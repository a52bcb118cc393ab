//! Error types for buffer operations.

use thiserror::Error;

/// Buffer operation error.
///
/// The only failing operation is a write against a buffer that has
/// already been closed. Reads never fail; a closed buffer signals
/// exhaustion through a short read count instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Buffer has been closed for writing.
    #[error("buffer: closed")]
    Closed,
}
