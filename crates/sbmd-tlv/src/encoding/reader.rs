use crate::DecodeError;

/// Read cursor over one TLV buffer.
///
/// A reader is created for a single decode call and is never shared. Short
/// reads fail with [`DecodeError::UnexpectedEndOfData`] and leave the cursor
/// where it was.
#[derive(Debug, Clone, Copy)]
pub struct TlvReader<'a> {
    input: &'a [u8],
    offset: usize,
}

impl<'a> TlvReader<'a> {
    pub const fn new(input: &'a [u8]) -> Self {
        Self { input, offset: 0 }
    }

    /// Bytes consumed so far.
    pub const fn position(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.unread().len()
    }

    pub fn has_more(&self) -> bool {
        !self.unread().is_empty()
    }

    fn unread(&self) -> &'a [u8] {
        self.input.get(self.offset..).unwrap_or_default()
    }

    pub fn read_exact(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let chunk = self
            .unread()
            .get(..len)
            .ok_or(DecodeError::UnexpectedEndOfData)?;
        self.offset += len;
        Ok(chunk)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        self.read_exact(N)?
            .try_into()
            .map_err(|_| DecodeError::UnexpectedEndOfData)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.read_array().map(|[byte]| byte)
    }

    pub fn read_le_u16(&mut self) -> Result<u16, DecodeError> {
        self.read_array().map(u16::from_le_bytes)
    }

    pub fn read_le_u32(&mut self) -> Result<u32, DecodeError> {
        self.read_array().map(u32::from_le_bytes)
    }
}
