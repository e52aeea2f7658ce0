use crate::encoding::{reader::TlvReader, writer::TlvWriter};
use crate::DecodeError;
use serde::Serialize;

pub const ELEMENT_TYPE_MASK: u8 = 0x1F;
pub const TAG_FORM_MASK: u8 = 0xE0;

/// Element-type codes exposed to scripts as a read-only table.
///
/// Integer and string families list their base code; the two low bits of the
/// code select the integer width or the length-field width.
pub const ELEMENT_TYPE_CODES: [(&str, u8); 13] = [
    ("SIGNED_INT", 0x00),
    ("UNSIGNED_INT", 0x04),
    ("BOOL_FALSE", 0x08),
    ("BOOL_TRUE", 0x09),
    ("FLOAT", 0x0A),
    ("DOUBLE", 0x0B),
    ("UTF8_STRING", 0x0C),
    ("OCTET_STRING", 0x10),
    ("NULL", 0x14),
    ("STRUCT", 0x15),
    ("ARRAY", 0x16),
    ("LIST", 0x17),
    ("END_CONTAINER", 0x18),
];

/// Byte width selected by the two low bits of a sized element type.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Width {
    One = 0,
    Two = 1,
    Four = 2,
    Eight = 3,
}

impl Width {
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::One,
            1 => Self::Two,
            2 => Self::Four,
            _ => Self::Eight,
        }
    }

    pub const fn bytes(self) -> usize {
        1 << (self as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementType {
    SignedInt(Width),
    UnsignedInt(Width),
    BoolFalse,
    BoolTrue,
    Float,
    Double,
    /// UTF-8 string; the width is that of the length field.
    Utf8String(Width),
    /// Octet string; the width is that of the length field.
    OctetString(Width),
    Null,
    Struct,
    Array,
    List,
    EndContainer,
}

impl ElementType {
    pub fn from_u8(code: u8) -> Result<Self, DecodeError> {
        let code = code & ELEMENT_TYPE_MASK;
        match code {
            0x00..=0x03 => Ok(Self::SignedInt(Width::from_bits(code))),
            0x04..=0x07 => Ok(Self::UnsignedInt(Width::from_bits(code))),
            0x08 => Ok(Self::BoolFalse),
            0x09 => Ok(Self::BoolTrue),
            0x0A => Ok(Self::Float),
            0x0B => Ok(Self::Double),
            0x0C..=0x0F => Ok(Self::Utf8String(Width::from_bits(code))),
            0x10..=0x13 => Ok(Self::OctetString(Width::from_bits(code))),
            0x14 => Ok(Self::Null),
            0x15 => Ok(Self::Struct),
            0x16 => Ok(Self::Array),
            0x17 => Ok(Self::List),
            0x18 => Ok(Self::EndContainer),
            _ => Err(DecodeError::UnknownElementType(code)),
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            Self::SignedInt(w) => w as u8,
            Self::UnsignedInt(w) => 0x04 | w as u8,
            Self::BoolFalse => 0x08,
            Self::BoolTrue => 0x09,
            Self::Float => 0x0A,
            Self::Double => 0x0B,
            Self::Utf8String(w) => 0x0C | w as u8,
            Self::OctetString(w) => 0x10 | w as u8,
            Self::Null => 0x14,
            Self::Struct => 0x15,
            Self::Array => 0x16,
            Self::List => 0x17,
            Self::EndContainer => 0x18,
        }
    }

    pub const fn bool(value: bool) -> Self {
        if value {
            Self::BoolTrue
        } else {
            Self::BoolFalse
        }
    }

    pub const fn is_container(self) -> bool {
        matches!(self, Self::Struct | Self::Array | Self::List)
    }
}

/// Tag form carried in the high three bits of the control byte.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagForm {
    Anonymous = 0x00,
    Context = 0x20,
    CommonProfile2 = 0x40,
    CommonProfile4 = 0x60,
    ImplicitProfile2 = 0x80,
    ImplicitProfile4 = 0xA0,
    FullyQualified6 = 0xC0,
    FullyQualified8 = 0xE0,
}

impl TagForm {
    pub const fn from_control(control: u8) -> Self {
        match control & TAG_FORM_MASK {
            0x00 => Self::Anonymous,
            0x20 => Self::Context,
            0x40 => Self::CommonProfile2,
            0x60 => Self::CommonProfile4,
            0x80 => Self::ImplicitProfile2,
            0xA0 => Self::ImplicitProfile4,
            0xC0 => Self::FullyQualified6,
            _ => Self::FullyQualified8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tag {
    Anonymous,
    Context(u8),
    CommonProfile(u32),
    ImplicitProfile(u32),
    FullyQualified {
        vendor_id: u16,
        profile_id: u16,
        tag: u32,
    },
}

impl Tag {
    /// Tag number used as a struct key; `None` for anonymous elements.
    pub const fn number(self) -> Option<u32> {
        match self {
            Self::Anonymous => None,
            Self::Context(n) => Some(n as u32),
            Self::CommonProfile(n) | Self::ImplicitProfile(n) => Some(n),
            Self::FullyQualified { tag, .. } => Some(tag),
        }
    }

    pub const fn form(self) -> TagForm {
        match self {
            Self::Anonymous => TagForm::Anonymous,
            Self::Context(_) => TagForm::Context,
            Self::CommonProfile(n) if n <= 0xFFFF => TagForm::CommonProfile2,
            Self::CommonProfile(_) => TagForm::CommonProfile4,
            Self::ImplicitProfile(n) if n <= 0xFFFF => TagForm::ImplicitProfile2,
            Self::ImplicitProfile(_) => TagForm::ImplicitProfile4,
            Self::FullyQualified { tag, .. } if tag <= 0xFFFF => TagForm::FullyQualified6,
            Self::FullyQualified { .. } => TagForm::FullyQualified8,
        }
    }

    pub fn decode(r: &mut TlvReader<'_>, form: TagForm) -> Result<Self, DecodeError> {
        Ok(match form {
            TagForm::Anonymous => Self::Anonymous,
            TagForm::Context => Self::Context(r.read_u8()?),
            TagForm::CommonProfile2 => Self::CommonProfile(r.read_le_u16()? as u32),
            TagForm::CommonProfile4 => Self::CommonProfile(r.read_le_u32()?),
            TagForm::ImplicitProfile2 => Self::ImplicitProfile(r.read_le_u16()? as u32),
            TagForm::ImplicitProfile4 => Self::ImplicitProfile(r.read_le_u32()?),
            TagForm::FullyQualified6 | TagForm::FullyQualified8 => {
                let vendor_id = r.read_le_u16()?;
                let profile_id = r.read_le_u16()?;
                let tag = if form == TagForm::FullyQualified6 {
                    r.read_le_u16()? as u32
                } else {
                    r.read_le_u32()?
                };
                Self::FullyQualified {
                    vendor_id,
                    profile_id,
                    tag,
                }
            }
        })
    }

    /// Writes the tag bytes that follow the control byte.
    pub fn encode(self, w: &mut TlvWriter) {
        match (self, self.form()) {
            (Self::Anonymous, _) => {}
            (Self::Context(n), _) => w.write_u8(n),
            (Self::CommonProfile(n) | Self::ImplicitProfile(n), form) => {
                if matches!(form, TagForm::CommonProfile2 | TagForm::ImplicitProfile2) {
                    w.write_le_u16(n as u16);
                } else {
                    w.write_le_u32(n);
                }
            }
            (
                Self::FullyQualified {
                    vendor_id,
                    profile_id,
                    tag,
                },
                form,
            ) => {
                w.write_le_u16(vendor_id);
                w.write_le_u16(profile_id);
                if form == TagForm::FullyQualified6 {
                    w.write_le_u16(tag as u16);
                } else {
                    w.write_le_u32(tag);
                }
            }
        }
    }
}

/// Decoded first byte of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub tag_form: TagForm,
    pub element_type: ElementType,
}

impl Control {
    pub fn decode(byte: u8) -> Result<Self, DecodeError> {
        Ok(Self {
            tag_form: TagForm::from_control(byte),
            element_type: ElementType::from_u8(byte)?,
        })
    }

    pub const fn byte(tag: Tag, element_type: ElementType) -> u8 {
        tag.form() as u8 | element_type.code()
    }
}
