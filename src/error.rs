use thiserror::Error;

/// Error returned when building or flattening a node shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The interchange sequence or text is malformed.
    ///
    /// `position` is the index of the offending entry for sequences and the
    /// byte offset for text.
    #[error("invalid input at position {position}: {reason}")]
    InvalidInput {
        position: usize,
        reason: &'static str,
    },
    /// A bounded traversal visited more than `max_steps` nodes.
    #[error("traversal exceeded {max_steps} steps, the list is likely cyclic")]
    CycleDetected { max_steps: usize },
}

impl Error {
    pub(crate) fn invalid(position: usize, reason: &'static str) -> Self {
        Self::InvalidInput { position, reason }
    }
}
