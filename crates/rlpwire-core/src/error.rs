//! Error types for RLP decoding.
//!
//! Decoding fails fast: RLP has no resynchronization point, so any
//! error aborts the decode of the whole buffer and no partial result
//! is returned. Callers should treat every variant as "reject the
//! message"; a failure is deterministic for a given buffer, so
//! retrying never helps.
//!
//! # Example
//!
//! ```rust
//! use rlpwire_core::error::DecodeError;
//!
//! fn check(data: &[u8]) -> Result<(), DecodeError> {
//!     if data.is_empty() {
//!         return Err(DecodeError::invalid_prefix(0));
//!     }
//!     Ok(())
//! }
//! ```

/// Errors that can occur while decoding an RLP buffer.
///
/// Every variant carries enough position information to report where
/// in the buffer the decode failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The byte at `offset` is not a valid RLP prefix, or `offset` is
    /// past the end of the buffer.
    #[error("invalid RLP prefix at offset {offset}")]
    InvalidPrefix {
        /// Offset of the offending byte (or the out-of-bounds offset).
        offset: usize,
    },

    /// A declared length, or the length-of-length bytes themselves,
    /// extend past the end of the buffer.
    #[error("buffer underrun at offset {offset}: need {needed} bytes, {available} available")]
    BufferUnderrun {
        /// Offset at which the oversized read would have started.
        offset: usize,
        /// Number of bytes the encoding declared.
        needed: usize,
        /// Number of bytes actually remaining.
        available: usize,
    },

    /// A child element of a list would extend past the list's declared
    /// payload end, or a top-level decode left trailing bytes.
    #[error("length mismatch: declared {declared} bytes, consumed {consumed}")]
    LengthMismatch {
        /// Payload length the enclosing encoding declared.
        declared: usize,
        /// Bytes the children actually span.
        consumed: usize,
    },

    /// List nesting exceeds the maximum supported depth.
    ///
    /// A buffer can be crafted with one list level per few bytes, so
    /// untrusted input must not be allowed to drive unbounded
    /// recursion.
    #[error("nesting exceeds maximum depth {limit}")]
    NestingTooDeep {
        /// The enforced depth limit.
        limit: usize,
    },

    /// The element at `offset` does not have the shape the caller
    /// asked for (e.g. a list where a scalar extractor expected a
    /// string, or a payload wider than the target integer).
    #[error("unexpected shape at offset {offset}: expected {expected}")]
    InvalidShape {
        /// Offset of the element with the wrong shape.
        offset: usize,
        /// What the caller expected to find there.
        expected: &'static str,
    },
}

impl DecodeError {
    /// Create an [`DecodeError::InvalidPrefix`] at the given offset.
    #[must_use]
    pub const fn invalid_prefix(offset: usize) -> Self {
        Self::InvalidPrefix { offset }
    }

    /// Create a [`DecodeError::BufferUnderrun`].
    #[must_use]
    pub const fn buffer_underrun(offset: usize, needed: usize, available: usize) -> Self {
        Self::BufferUnderrun {
            offset,
            needed,
            available,
        }
    }

    /// Create a [`DecodeError::LengthMismatch`].
    #[must_use]
    pub const fn length_mismatch(declared: usize, consumed: usize) -> Self {
        Self::LengthMismatch { declared, consumed }
    }

    /// Create an [`DecodeError::InvalidShape`] with a static
    /// description of the expected shape.
    #[must_use]
    pub const fn invalid_shape(offset: usize, expected: &'static str) -> Self {
        Self::InvalidShape { offset, expected }
    }
}

/// A `Result` type alias for RLP decode operations.
pub type RlpResult<T> = std::result::Result<T, DecodeError>;

// ============================================================================
// Unit Tests
// ============================================================================
