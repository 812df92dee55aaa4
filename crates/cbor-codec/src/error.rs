use core::fmt;

/// The codec's single flat error enumeration.
///
/// Every fallible operation in this crate returns `Result<T, CborError>`;
/// there is no `None`/success variant — success is `Ok`. Each variant here
/// corresponds one-to-one to a condition named in the format's error
/// design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CborError {
    /// A read would require bytes beyond what's available.
    EndOfStream,
    /// Reserved additional-information value (28, 29, 30) outside an
    /// indefinite-length context.
    InvalidAi,
    /// An indefinite string's chunk had a different major type than the
    /// string being assembled.
    IndefMismatch,
    /// An indefinite-length chunk was itself indefinite-length.
    IndefNesting,
    /// Text content is not valid UTF-8.
    InvalidUtf8,
    /// A write would exceed the destination buffer's capacity.
    BufferTooSmall,
    /// The next head's major type doesn't match what was requested.
    BadType,
    /// Nesting depth exceeded the configured [`crate::Limits::max_depth`].
    Recursion,
    /// A map's pair count is invalid (odd in strict contexts, or exceeds
    /// platform limits).
    MapLength,
    /// A simple value in the reserved range, or redundantly encoded with
    /// a wider head than necessary.
    BadSimpleValue,
    /// A break (`0xFF`) byte appeared with no open indefinite-length
    /// container to close.
    UnexpectedBreak,
    /// A required sub-stream or pointer argument was absent.
    Null,
    /// A length would overflow the platform's size type.
    ItemTooLong,
    /// An integer or float value is out of range for the requested width
    /// or signedness.
    Range,
    /// A map-lookup helper found no matching key.
    KeyNotFound,
    /// A date-time tag's body was malformed.
    BadDatetime,
    /// A float tag's body was malformed.
    BadDouble,
    /// A decimal-fraction tag's body was malformed.
    BadDecimal,
    /// A rational tag's body was malformed.
    BadRational,
    /// An encoded-CBOR tag's body was malformed.
    BadEncoded,
    /// A pack/unpack directive's value couldn't convert to the requested
    /// type.
    CantConvertType,
    /// An index argument exceeded bounds.
    IdxTooBig,
    /// A pack/unpack format string contained an unrecognized directive.
    Fmt,
    /// An array or map argument count exceeded a configured limit.
    ArrayTooLarge,
}

impl fmt::Display for CborError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            CborError::EndOfStream => "end of stream",
            CborError::InvalidAi => "invalid additional information",
            CborError::IndefMismatch => "indefinite chunk major type mismatch",
            CborError::IndefNesting => "indefinite chunk nested in indefinite string",
            CborError::InvalidUtf8 => "invalid utf-8 in text string",
            CborError::BufferTooSmall => "buffer too small",
            CborError::BadType => "unexpected major type",
            CborError::Recursion => "recursion depth exceeded",
            CborError::MapLength => "invalid map length",
            CborError::BadSimpleValue => "invalid simple value encoding",
            CborError::UnexpectedBreak => "unexpected break outside indefinite container",
            CborError::Null => "missing required argument",
            CborError::ItemTooLong => "item length overflows platform size",
            CborError::Range => "value out of range",
            CborError::KeyNotFound => "map key not found",
            CborError::BadDatetime => "malformed date-time tag",
            CborError::BadDouble => "malformed float tag",
            CborError::BadDecimal => "malformed decimal-fraction tag",
            CborError::BadRational => "malformed rational tag",
            CborError::BadEncoded => "malformed encoded-cbor tag",
            CborError::CantConvertType => "value cannot convert to requested type",
            CborError::IdxTooBig => "index out of bounds",
            CborError::Fmt => "invalid pack/unpack format directive",
            CborError::ArrayTooLarge => "array or map length exceeds configured limit",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CborError {}

impl From<byteio::Error> for CborError {
    fn from(e: byteio::Error) -> Self {
        match e {
            byteio::Error::EndOfStream => CborError::EndOfStream,
            byteio::Error::BufferTooSmall => CborError::BufferTooSmall,
            byteio::Error::InvalidInput | byteio::Error::Truncated => CborError::Fmt,
            // `byteio::Error` is `#[non_exhaustive]`; a future variant
            // added there shouldn't silently fail to convert.
            _ => CborError::Fmt,
        }
    }
}

/// Result alias used throughout this crate.
pub type CborResult<T> = Result<T, CborError>;
