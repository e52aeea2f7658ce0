use thiserror::Error;

/// Failure while turning TLV bytes into a [`Value`](crate::Value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of TLV data")]
    UnexpectedEndOfData,
    #[error("unknown TLV element type: 0x{0:02x}")]
    UnknownElementType(u8),
    #[error("TLV containers nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

/// Failure while turning a [`Value`](crate::Value) into TLV bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("unsupported value type: {0}")]
    UnsupportedValueType(&'static str),
}

/// Failure while reading a script result back on the host side.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("malformed script response: {0}")]
    Json(#[from] serde_json::Error),
}
