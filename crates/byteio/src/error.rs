use core::fmt;

/// Low-level errors shared by every primitive in this crate.
///
/// Nothing here allocates or carries owned data: every variant is a plain
/// tag, matching the no-heap, no-hidden-state contract of the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    /// A read would require bytes beyond what's available.
    EndOfStream,
    /// A write would exceed the destination buffer's capacity.
    BufferTooSmall,
    /// COBS decode input contained a reserved byte (0x00).
    InvalidInput,
    /// COBS decode input ended mid-segment.
    Truncated,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EndOfStream => write!(f, "end of stream"),
            Error::BufferTooSmall => write!(f, "buffer too small"),
            Error::InvalidInput => write!(f, "input contains a reserved byte"),
            Error::Truncated => write!(f, "truncated final segment"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
