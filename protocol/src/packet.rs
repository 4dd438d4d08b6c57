//! Primitive packet cursor.
//!
//! Integers are big-endian. Strings are a `u16` byte length followed by the
//! UTF-8 bytes. Every read either succeeds or leaves the cursor where it was.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{CodecError, Result};

const STRING_LENGTH_LEN: usize = 2;

/// Append-only packet builder.
#[derive(Clone, Debug, Default)]
pub struct PacketWriter {
    buf: BytesMut,
}

impl PacketWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buf.put_i8(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.put_u16(value);
    }

    pub fn write_i16(&mut self, value: i16) {
        self.buf.put_i16(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.put_u32(value);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.put_i32(value);
    }

    /// Writes a length-prefixed string.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        let len = u16::try_from(value.len()).map_err(|_| CodecError::FieldTooLong {
            field: "string",
            len: value.len(),
            max: usize::from(u16::MAX),
        })?;
        self.buf.put_u16(len);
        self.buf.put_slice(value.as_bytes());
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Freezes the written bytes.
    #[must_use]
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Read cursor over a received packet.
#[derive(Clone, Copy, Debug)]
pub struct PacketReader<'a> {
    buf: &'a [u8],
}

impl<'a> PacketReader<'a> {
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if self.buf.remaining() < needed {
            return Err(CodecError::Truncated {
                needed,
                remaining: self.buf.remaining(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        self.ensure(1)?;
        Ok(self.buf.get_i8())
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        Ok(self.buf.get_u16())
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.ensure(2)?;
        Ok(self.buf.get_i16())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.buf.get_u32())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        Ok(self.buf.get_i32())
    }

    /// Reads a length-prefixed string without validating its encoding.
    pub fn read_raw_string(&mut self) -> Result<&'a [u8]> {
        self.ensure(STRING_LENGTH_LEN)?;
        let mut probe = self.buf;
        let len = usize::from(probe.get_u16());
        if probe.len() < len {
            return Err(CodecError::Truncated {
                needed: STRING_LENGTH_LEN + len,
                remaining: self.buf.len(),
            });
        }
        let (value, rest) = probe.split_at(len);
        self.buf = rest;
        Ok(value)
    }

    /// Reads a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        let mut probe = *self;
        let raw = probe.read_raw_string()?;
        let value = std::str::from_utf8(raw).map_err(|_| CodecError::InvalidString)?;
        *self = probe;
        Ok(value.to_owned())
    }

    /// Reads a string and drops every control character except newline, so
    /// peer-supplied text is safe to print. Invalid UTF-8 is replaced rather
    /// than rejected.
    pub fn read_safe_string(&mut self) -> Result<String> {
        let raw = self.read_raw_string()?;
        Ok(String::from_utf8_lossy(raw)
            .chars()
            .filter(|c| !c.is_control() || *c == '\n')
            .collect())
    }
}
