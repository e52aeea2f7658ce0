//! Base64-in, base64-out entry points used by scripts.
//!
//! Each call builds its own [`TlvReader`] or [`TlvWriter`] and drops it on
//! return.

use crate::encoding::control::{ElementType, Tag};
use crate::encoding::{TlvReader, TlvWriter};
use crate::types::{Element, TypeHint, Value};
use crate::{base64, DecodeError, EncodeError};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value as Json;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

const EMPTY_STRUCT: [u8; 2] = [ElementType::Struct.code(), ElementType::EndContainer.code()];

/// Decodes the first element of a base64 payload. Empty input decodes to
/// `Null`; bytes after the first element are ignored.
pub fn decode(tlv_base64: &str) -> Result<Value, DecodeError> {
    let bytes = base64::decode(tlv_base64);
    let mut r = TlvReader::new(&bytes);
    if !r.has_more() {
        return Ok(Value::Null);
    }
    let element = r.read_element()?;
    if r.has_more() {
        log::debug!("ignoring {} trailing TLV bytes", r.remaining());
    }
    Ok(element.map_or(Value::Null, |e| e.value))
}

/// Same as [`decode`]; callers use it when the payload is known to be a struct.
pub fn decode_struct(tlv_base64: &str) -> Result<Value, DecodeError> {
    decode(tlv_base64)
}

pub fn decode_json(tlv_base64: &str) -> Result<Json, DecodeError> {
    decode(tlv_base64).map(|v| v.to_json())
}

/// Decodes every top-level element of a payload, keeping tags and wire types.
/// Stray end-of-container markers are skipped.
pub fn decode_elements(tlv_base64: &str) -> Result<Vec<Element>, DecodeError> {
    let bytes = base64::decode(tlv_base64);
    let mut r = TlvReader::new(&bytes);
    let mut elements = Vec::new();
    while r.has_more() {
        if let Some(element) = r.read_element()? {
            elements.push(element);
        }
    }
    Ok(elements)
}

/// Encodes `value` as one anonymous element.
pub fn encode(value: &Value, type_hint: Option<&str>) -> Result<String, EncodeError> {
    let mut w = TlvWriter::new();
    w.write_element(Tag::Anonymous, value, type_hint.map(TypeHint::new))?;
    Ok(base64::encode(w.as_written()))
}

pub fn encode_json(value: &Json, type_hint: Option<&str>) -> Result<String, EncodeError> {
    encode(&Value::from(value), type_hint)
}

/// Encodes named fields as a struct laid out by `schema`.
///
/// Fields are written in schema order under their declared tag and type.
/// Schema fields missing from `fields` are skipped; fields not in the schema
/// are ignored.
pub fn encode_struct(
    fields: &BTreeMap<String, Value>,
    schema: &StructSchema,
) -> Result<String, EncodeError> {
    write_struct(schema, |name| fields.get(name))
}

/// [`encode_struct`] over a JSON object. A field present as `null` is written
/// as Null.
pub fn encode_struct_json(fields: &Json, schema: &StructSchema) -> Result<String, EncodeError> {
    write_struct(schema, |name| fields.get(name).map(Value::from))
}

/// Base64 of a struct with no fields.
pub fn empty_struct() -> String {
    base64::encode(&EMPTY_STRUCT)
}

fn write_struct<V, F>(schema: &StructSchema, mut lookup: F) -> Result<String, EncodeError>
where
    V: Borrow<Value>,
    F: FnMut(&str) -> Option<V>,
{
    let mut w = TlvWriter::new();
    w.write_header(Tag::Anonymous, ElementType::Struct);
    for field in schema.fields() {
        match lookup(&field.name) {
            Some(value) => {
                w.write_element(Tag::Context(field.tag), value.borrow(), field.type_hint())?
            }
            None => log::trace!("struct field {:?} not supplied", field.name),
        }
    }
    w.write_end_container();
    Ok(base64::encode(w.as_written()))
}

/// One named field of a [`StructSchema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: String,
    pub tag: u8,
    pub type_name: Option<String>,
}

impl FieldSchema {
    pub fn type_hint(&self) -> Option<TypeHint<'_>> {
        self.type_name.as_deref().map(TypeHint::new)
    }
}

/// Ordered field layout for [`encode_struct`].
///
/// Deserializes from a JSON object of `name -> {"tag": n, "type": "..."}`,
/// keeping the document order of its keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructSchema {
    fields: Vec<FieldSchema>,
}

impl StructSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, tag: u8, type_name: &str) -> Self {
        self.fields.push(FieldSchema {
            name: name.into(),
            tag,
            type_name: Some(type_name.to_owned()),
        });
        self
    }

    pub fn untyped_field(mut self, name: impl Into<String>, tag: u8) -> Self {
        self.fields.push(FieldSchema {
            name: name.into(),
            tag,
            type_name: None,
        });
        self
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }
}

#[derive(Deserialize)]
struct FieldSpec {
    tag: u8,
    #[serde(rename = "type", default)]
    type_name: Option<String>,
}

impl<'de> Deserialize<'de> for StructSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = StructSchema;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field name to {tag, type}")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<StructSchema, A::Error> {
                let mut fields = Vec::new();
                while let Some((name, spec)) = map.next_entry::<String, FieldSpec>()? {
                    fields.push(FieldSchema {
                        name,
                        tag: spec.tag,
                        type_name: spec.type_name,
                    });
                }
                Ok(StructSchema { fields })
            }
        }

        deserializer.deserialize_map(SchemaVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        decode, decode_elements, decode_json, decode_struct, empty_struct, encode, encode_json,
        encode_struct, encode_struct_json, StructSchema,
    };
    use crate::encoding::control::{ElementType, Tag, Width};
    use crate::{DecodeError, EncodeError, Value};
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    proptest! {
        #[test]
        fn bool_and_string_roundtrip(b in any::<bool>(), s in any::<String>()) {
            prop_assert_eq!(decode(&encode(&Value::Bool(b), None).unwrap()).unwrap(), Value::Bool(b));
            let text = Value::Utf8(s);
            prop_assert_eq!(decode(&encode(&text, Some("string")).unwrap()).unwrap(), text);
        }

        #[test]
        fn uint8_hint_roundtrip(v in any::<u8>()) {
            let encoded = encode(&Value::UInt(v as u64), Some("uint8")).unwrap();
            prop_assert_eq!(decode(&encoded).unwrap(), Value::UInt(v as u64));
        }

        #[test]
        fn int32_hint_roundtrip(v in any::<i32>()) {
            let encoded = encode(&Value::Int(v as i64), Some("int32")).unwrap();
            prop_assert_eq!(decode(&encoded).unwrap(), Value::Int(v as i64));
        }
    }

    #[test]
    fn empty_input_is_null() {
        assert_eq!(decode("").unwrap(), Value::Null);
    }

    #[test]
    fn known_payloads() {
        assert_eq!(encode(&Value::Bool(true), None).unwrap(), "CQ==");
        assert_eq!(decode("CQ==").unwrap(), Value::Bool(true));
        assert_eq!(encode(&Value::UInt(1), None).unwrap(), "BAE=");
        assert_eq!(encode(&Value::UInt(300), Some("uint16")).unwrap(), "BSwB");
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        // uint8 1 followed by bool true
        assert_eq!(decode("BAEJ").unwrap(), Value::UInt(1));
        assert_eq!(decode_elements("BAEJ").unwrap().len(), 2);
    }

    #[test]
    fn lone_end_marker_is_null() {
        assert_eq!(decode("GA==").unwrap(), Value::Null);
    }

    #[test]
    fn empty_struct_constant() {
        assert_eq!(empty_struct(), "FRg=");
        assert_eq!(decode_struct(&empty_struct()).unwrap(), Value::empty_struct());
    }

    #[test]
    fn encode_struct_uses_schema_tags_and_order() {
        let schema = StructSchema::new()
            .field("level", 0, "uint8")
            .field("transitionTime", 1, "uint16")
            .field("optionsMask", 2, "bitmap8");
        let fields = BTreeMap::from([
            ("level".to_owned(), Value::UInt(254)),
            ("transitionTime".to_owned(), Value::UInt(10)),
            ("ignored".to_owned(), Value::Bool(true)),
        ]);
        let encoded = encode_struct(&fields, &schema).unwrap();
        assert_eq!(
            crate::base64::decode(&encoded),
            [0x15, 0x24, 0x00, 0xFE, 0x25, 0x01, 0x0A, 0x00, 0x18]
        );
    }

    #[test]
    fn encode_struct_then_decode_struct() {
        let schema = StructSchema::new().field("isOn", 3, "bool");
        let fields = BTreeMap::from([("isOn".to_owned(), Value::Bool(true))]);
        let decoded = decode_struct(&encode_struct(&fields, &schema).unwrap()).unwrap();
        assert_eq!(
            decoded,
            Value::Struct(BTreeMap::from([(3, Value::Bool(true))]))
        );
    }

    #[test]
    fn encode_struct_json_writes_explicit_null() {
        let schema = StructSchema::new()
            .field("a", 0, "uint8")
            .untyped_field("b", 1)
            .untyped_field("c", 2);
        let encoded = encode_struct_json(&json!({"a": 1, "b": null}), &schema).unwrap();
        assert_eq!(
            crate::base64::decode(&encoded),
            [0x15, 0x24, 0x00, 0x01, 0x34, 0x01, 0x18]
        );
    }

    #[test]
    fn schema_deserializes_in_document_order() {
        let schema: StructSchema =
            serde_json::from_str(r#"{"z": {"tag": 0, "type": "uint8"}, "a": {"tag": 1}}"#)
                .unwrap();
        let names: Vec<_> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["z", "a"]);
        assert_eq!(schema.fields()[1].type_name, None);
    }

    #[test]
    fn json_roundtrip() {
        let input = json!({"0": 1, "1": "two", "2": [true, null, -3], "3": 0.25});
        let encoded = encode_json(&input, None).unwrap();
        assert_eq!(decode_json(&encoded).unwrap(), input);
    }

    #[test]
    fn decode_elements_keeps_wire_details() {
        // context tag 1, int8 -2
        let elements = decode_elements("IAH+").unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].tag, Tag::Context(1));
        assert_eq!(elements[0].element_type, ElementType::SignedInt(Width::One));
        assert_eq!(elements[0].value, Value::Int(-2));
    }

    #[test]
    fn deeply_nested_payload_is_rejected() {
        let payload = crate::base64::encode(&vec![0x16u8; 200_000]);
        assert_eq!(
            decode(&payload).unwrap_err(),
            DecodeError::NestingTooDeep(crate::encoding::element::MAX_NESTING_DEPTH)
        );
    }

    #[test]
    fn unsigned_hints_without_width_use_eight_bytes() {
        for hint in ["bitmap8", "bitmap16", "uint64"] {
            let encoded = encode(&Value::UInt(1), Some(hint)).unwrap();
            assert_eq!(
                crate::base64::decode(&encoded),
                [0x07, 0x01, 0, 0, 0, 0, 0, 0, 0],
                "{hint}"
            );
            assert_eq!(decode(&encoded).unwrap(), Value::UInt(1));
        }
    }

    #[test]
    fn struct_key_beyond_context_tag_is_unsupported() {
        let value = Value::Struct(BTreeMap::from([(300, Value::Null)]));
        assert_eq!(
            encode(&value, None).unwrap_err(),
            EncodeError::UnsupportedValueType("struct key exceeds context tag")
        );
    }

    #[test]
    fn truncated_integer_fails() {
        // uint32 with only two payload bytes
        assert_eq!(
            decode(&crate::base64::encode(&[0x06, 0x01, 0x02])).unwrap_err(),
            DecodeError::UnexpectedEndOfData
        );
    }
}
