use crate::encoding::{
    control::{Control, ElementType, Tag, TagForm, Width},
    primitives::{
        decode_length, decode_signed, decode_unsigned, encode_length, encode_signed,
        encode_unsigned, length_width, signed_width, unsigned_width,
    },
    reader::TlvReader,
    writer::TlvWriter,
};
use crate::types::{Element, TypeHint, Value};
use crate::{utf8, DecodeError, EncodeError};
use std::collections::BTreeMap;

/// Deepest container nesting accepted on decode. Deeper input fails with
/// [`DecodeError::NestingTooDeep`], which keeps recursive walks over decoded
/// values (drop, JSON conversion, re-encoding) within stack limits.
pub const MAX_NESTING_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Struct,
    Array,
    List,
}

impl ContainerKind {
    pub const fn of(element_type: ElementType) -> Option<Self> {
        match element_type {
            ElementType::Struct => Some(Self::Struct),
            ElementType::Array => Some(Self::Array),
            ElementType::List => Some(Self::List),
            _ => None,
        }
    }

    pub const fn element_type(self) -> ElementType {
        match self {
            Self::Struct => ElementType::Struct,
            Self::Array => ElementType::Array,
            Self::List => ElementType::List,
        }
    }

    fn collect(self, members: Vec<Element>) -> Value {
        match self {
            Self::Array => Value::Array(members.into_iter().map(|e| e.value).collect()),
            Self::List => Value::List(members.into_iter().map(|e| e.value).collect()),
            Self::Struct => {
                let mut fields = BTreeMap::new();
                for member in members {
                    match member.tag.number() {
                        Some(tag) => {
                            fields.insert(tag, member.value);
                        }
                        None => log::debug!("dropping anonymous struct member"),
                    }
                }
                Value::Struct(fields)
            }
        }
    }
}

/// A container whose end marker has not been read yet.
#[derive(Debug)]
struct OpenContainer {
    tag: Tag,
    kind: ContainerKind,
    members: Vec<Element>,
}

impl OpenContainer {
    fn new(tag: Tag, kind: ContainerKind) -> Self {
        Self {
            tag,
            kind,
            members: Vec::new(),
        }
    }

    fn close(self) -> Element {
        Element {
            tag: self.tag,
            element_type: self.kind.element_type(),
            value: self.kind.collect(self.members),
        }
    }
}

impl<'a> TlvReader<'a> {
    /// Reads one complete element, including everything nested inside it.
    ///
    /// Returns `Ok(None)` when the next element is an end-of-container marker.
    pub fn read_element(&mut self) -> Result<Option<Element>, DecodeError> {
        self.read_nested(Vec::new())
    }

    /// Reads the members of a container whose control byte and tag have
    /// already been consumed, up to and including its end marker.
    ///
    /// Running out of input also ends the container.
    pub fn read_container(&mut self, kind: ContainerKind) -> Result<Value, DecodeError> {
        let outer = OpenContainer::new(Tag::Anonymous, kind);
        Ok(self
            .read_nested(vec![outer])?
            .map_or(Value::Null, |element| element.value))
    }

    // Open containers live on a heap stack; their count is capped at MAX_NESTING_DEPTH.
    fn read_nested(
        &mut self,
        mut open: Vec<OpenContainer>,
    ) -> Result<Option<Element>, DecodeError> {
        loop {
            let exhausted = if self.has_more() { None } else { open.pop() };
            let element = match exhausted {
                Some(container) => {
                    log::debug!(
                        "{:?} container closed by end of buffer at offset {}",
                        container.kind,
                        self.position()
                    );
                    container.close()
                }
                None => {
                    let offset = self.position();
                    let control = self.read_u8()?;
                    let tag = Tag::decode(self, TagForm::from_control(control))?;
                    let Control { element_type, .. } = Control::decode(control)?;
                    log::trace!("element {element_type:?} tag {tag:?} at offset {offset}");

                    if let Some(kind) = ContainerKind::of(element_type) {
                        if open.len() >= MAX_NESTING_DEPTH {
                            return Err(DecodeError::NestingTooDeep(MAX_NESTING_DEPTH));
                        }
                        open.push(OpenContainer::new(tag, kind));
                        continue;
                    }
                    if element_type == ElementType::EndContainer {
                        match open.pop() {
                            Some(container) => container.close(),
                            None => return Ok(None),
                        }
                    } else {
                        Element {
                            tag,
                            element_type,
                            value: self.read_scalar(element_type)?,
                        }
                    }
                }
            };

            match open.last_mut() {
                Some(parent) => parent.members.push(element),
                None => return Ok(Some(element)),
            }
        }
    }

    fn read_scalar(&mut self, element_type: ElementType) -> Result<Value, DecodeError> {
        Ok(match element_type {
            ElementType::SignedInt(width) => Value::Int(decode_signed(self, width)?),
            ElementType::UnsignedInt(width) => Value::UInt(decode_unsigned(self, width)?),
            ElementType::BoolFalse => Value::Bool(false),
            ElementType::BoolTrue => Value::Bool(true),
            ElementType::Float => Value::Float(f32::from_le_bytes(self.read_array()?)),
            ElementType::Double => Value::Double(f64::from_le_bytes(self.read_array()?)),
            ElementType::Utf8String(width) => {
                let len = decode_length(self, width)?;
                Value::Utf8(utf8::decode(self.read_exact(len)?))
            }
            ElementType::OctetString(width) => {
                let len = decode_length(self, width)?;
                Value::Bytes(self.read_exact(len)?.to_vec())
            }
            ElementType::Null
            | ElementType::Struct
            | ElementType::Array
            | ElementType::List
            | ElementType::EndContainer => Value::Null,
        })
    }
}

impl TlvWriter {
    /// Writes `value` as one element under `tag`.
    ///
    /// The hint applies to `value` itself only; members of containers are
    /// written without one.
    pub fn write_element(
        &mut self,
        tag: Tag,
        value: &Value,
        hint: Option<TypeHint<'_>>,
    ) -> Result<(), EncodeError> {
        match value {
            Value::Null => self.write_header(tag, ElementType::Null),
            Value::Bool(b) => self.write_header(tag, ElementType::bool(*b)),
            Value::Int(_) | Value::UInt(_) => self.write_integer(tag, value, hint),
            Value::Float(f) => self.write_double(tag, f64::from(*f)),
            Value::Double(d) => self.write_double(tag, *d),
            Value::Utf8(s) => self.write_string(tag, ElementType::Utf8String, &utf8::encode(s)),
            Value::Bytes(bytes) => self.write_string(tag, ElementType::OctetString, bytes),
            Value::Array(items) | Value::List(items)
                if hint.is_some_and(TypeHint::is_octet_string) =>
            {
                let bytes = octets(items)?;
                self.write_string(tag, ElementType::OctetString, &bytes);
            }
            Value::Array(items) | Value::List(items) => {
                self.write_header(tag, ElementType::Array);
                for item in items {
                    self.write_element(Tag::Anonymous, item, None)?;
                }
                self.write_end_container();
            }
            Value::Struct(fields) => {
                self.write_header(tag, ElementType::Struct);
                for (key, field) in fields {
                    let context = u8::try_from(*key).map_err(|_| {
                        log::debug!("struct key {key} does not fit a context tag");
                        EncodeError::UnsupportedValueType("struct key exceeds context tag")
                    })?;
                    self.write_element(Tag::Context(context), field, None)?;
                }
                self.write_end_container();
            }
        }
        Ok(())
    }

    /// Control byte followed by the tag bytes.
    pub fn write_header(&mut self, tag: Tag, element_type: ElementType) {
        self.write_u8(Control::byte(tag, element_type));
        tag.encode(self);
    }

    pub fn write_end_container(&mut self) {
        self.write_u8(ElementType::EndContainer.code());
    }

    fn write_integer(&mut self, tag: Tag, value: &Value, hint: Option<TypeHint<'_>>) {
        let signed = match hint {
            Some(hint) => hint.is_signed(),
            None => matches!(value, Value::Int(_)),
        };
        let forced = hint.and_then(TypeHint::forced_width);

        // Crossing families reinterprets the 64-bit two's complement pattern.
        let bits = match value {
            Value::Int(i) => *i as u64,
            Value::UInt(u) => *u,
            _ => return,
        };

        if signed {
            let v = bits as i64;
            let width = forced.unwrap_or_else(|| signed_width(v));
            self.write_header(tag, ElementType::SignedInt(width));
            encode_signed(self, v, width);
        } else {
            // Only unhinted values shrink to their magnitude on this path.
            let width = match (forced, hint) {
                (Some(width), _) => width,
                (None, Some(_)) => Width::Eight,
                (None, None) => unsigned_width(bits),
            };
            self.write_header(tag, ElementType::UnsignedInt(width));
            encode_unsigned(self, bits, width);
        }
    }

    fn write_double(&mut self, tag: Tag, value: f64) {
        self.write_header(tag, ElementType::Double);
        self.write_all(&value.to_le_bytes());
    }

    fn write_string(&mut self, tag: Tag, family: fn(Width) -> ElementType, bytes: &[u8]) {
        let width = length_width(bytes.len());
        self.write_header(tag, family(width));
        encode_length(self, bytes.len(), width);
        self.write_all(bytes);
    }
}

/// Byte payload of an array hinted as `octstr`; each member keeps its low byte.
fn octets(items: &[Value]) -> Result<Vec<u8>, EncodeError> {
    items
        .iter()
        .map(|item| match item {
            Value::UInt(u) => Ok(*u as u8),
            Value::Int(i) => Ok(*i as u8),
            _ => Err(EncodeError::UnsupportedValueType(
                "octstr members must be integers",
            )),
        })
        .collect()
}
