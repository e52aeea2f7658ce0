use crate::encoding::{control::Width, reader::TlvReader, writer::TlvWriter};
use crate::DecodeError;

/// Smallest width holding `value` as an unsigned integer.
pub const fn unsigned_width(value: u64) -> Width {
    if value <= 0xFF {
        Width::One
    } else if value <= 0xFFFF {
        Width::Two
    } else if value <= 0xFFFF_FFFF {
        Width::Four
    } else {
        Width::Eight
    }
}

/// Smallest width holding `value` in two's complement.
pub const fn signed_width(value: i64) -> Width {
    if value >= i8::MIN as i64 && value <= i8::MAX as i64 {
        Width::One
    } else if value >= i16::MIN as i64 && value <= i16::MAX as i64 {
        Width::Two
    } else if value >= i32::MIN as i64 && value <= i32::MAX as i64 {
        Width::Four
    } else {
        Width::Eight
    }
}

/// Width of the length field preceding a string payload of `len` bytes.
pub const fn length_width(len: usize) -> Width {
    unsigned_width(len as u64)
}

pub fn decode_unsigned(r: &mut TlvReader<'_>, width: Width) -> Result<u64, DecodeError> {
    let bytes = r.read_exact(width.bytes())?;
    Ok(bytes
        .iter()
        .rev()
        .fold(0u64, |acc, &b| (acc << 8) | b as u64))
}

pub fn decode_signed(r: &mut TlvReader<'_>, width: Width) -> Result<i64, DecodeError> {
    let raw = decode_unsigned(r, width)?;
    let shift = 64 - (width.bytes() as u32 * 8);
    Ok(((raw << shift) as i64) >> shift)
}

/// Reads a string length field. A length that cannot be addressed on this
/// platform can never be satisfied by the buffer either.
pub fn decode_length(r: &mut TlvReader<'_>, width: Width) -> Result<usize, DecodeError> {
    let len = decode_unsigned(r, width)?;
    usize::try_from(len).map_err(|_| DecodeError::UnexpectedEndOfData)
}

/// Writes the low `width` bytes of `value`, least significant first.
pub fn encode_unsigned(w: &mut TlvWriter, value: u64, width: Width) {
    w.write_all(&value.to_le_bytes()[..width.bytes()]);
}

pub fn encode_signed(w: &mut TlvWriter, value: i64, width: Width) {
    w.write_all(&value.to_le_bytes()[..width.bytes()]);
}

pub fn encode_length(w: &mut TlvWriter, len: usize, width: Width) {
    encode_unsigned(w, len as u64, width);
}
