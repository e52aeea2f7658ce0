//! Matter TLV encoding and decoding for SBMD device scripts.
//!
//! `sbmd-tlv` converts between the Tag-Length-Value wire format used by Matter
//! attribute and command payloads and a typed in-memory [`Value`] model. Payloads
//! cross the script boundary as base64 text, so the crate also carries the Base64
//! and UTF-8 transcoders the codec is built on, plus the two response builders
//! (`write`, `invoke`) that scripts return to the host.
//!
//! Everything here is synchronous and allocation-light: each call builds its own
//! reader or writer and drops it on return.
//!
//! ```
//! use sbmd_tlv::{tlv, Value};
//!
//! let payload = tlv::encode(&Value::UInt(300), Some("uint16")).unwrap();
//! assert_eq!(payload, "BSwB");
//! assert_eq!(tlv::decode(&payload).unwrap(), Value::UInt(300));
//! ```

/// Standard-alphabet Base64 transcoding.
pub mod base64;
/// Control bytes, tags, integer primitives and the element reader/writer.
pub mod encoding;
/// Error types for encoding and decoding operations.
pub mod error;
/// Builders for the `write` and `invoke` script results.
pub mod response;
/// Base64-in, base64-out entry points over the element codec.
pub mod tlv;
/// The value model and its JSON bridge.
pub mod types;
/// Lenient codepoint-level UTF-8 transcoding.
pub mod utf8;

pub use encoding::control::{ElementType, Tag, TagForm, ELEMENT_TYPE_CODES};
pub use error::{DecodeError, EncodeError, ResponseError};
pub use response::{InvokeOptions, InvokeRequest, ScriptResponse, WriteOptions, WriteRequest};
pub use tlv::{FieldSchema, StructSchema};
pub use types::{Element, TypeHint, Value};
