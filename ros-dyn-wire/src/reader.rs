//! Low-level wire-format read operations.

use std::marker::PhantomData;

use byteorder::ByteOrder;

use crate::error::{Error, Result};

/// Packed wire-format reader.
///
/// Reads fixed-width primitive encodings from a byte slice while
/// advancing a cursor. Every read is bounds-checked; running out of
/// input fails with `Error::UnexpectedEof` rather than panicking.
pub struct WireReader<'a, BO> {
    input: &'a [u8],
    position: usize,
    _phantom: PhantomData<BO>,
}

impl<'a, BO: ByteOrder> WireReader<'a, BO> {
    /// Create a new reader over the given input bytes.
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            position: 0,
            _phantom: PhantomData,
        }
    }

    /// Current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Remaining bytes available.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.input.len() - self.position
    }

    /// Read raw bytes, advancing the cursor.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.input[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    // Primitive read operations

    #[inline]
    pub fn read_bool(&mut self) -> Result<bool> {
        let byte = self.read_bytes(1)?[0];
        match byte {
            0 => Ok(false),
            1 => Ok(true),
            x => Err(Error::InvalidBool(x)),
        }
    }

    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_bytes(1)?[0] as i8)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(BO::read_i16(self.read_bytes(2)?))
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(BO::read_u16(self.read_bytes(2)?))
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(BO::read_i32(self.read_bytes(4)?))
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(BO::read_u32(self.read_bytes(4)?))
    }

    #[inline]
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(BO::read_i64(self.read_bytes(8)?))
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(BO::read_u64(self.read_bytes(8)?))
    }

    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(BO::read_f32(self.read_bytes(4)?))
    }

    #[inline]
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(BO::read_f64(self.read_bytes(8)?))
    }

    /// Read a length-prefixed UTF-8 string. No terminator is expected.
    #[inline]
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u32()? as usize;
        if len == 0 {
            return Ok(String::new());
        }
        let bytes = self.read_bytes(len)?;
        Ok(std::str::from_utf8(bytes)?.to_owned())
    }

    /// Read a sequence element count.
    ///
    /// The count is checked against the remaining input before any
    /// allocation happens: every element occupies at least one byte, so a
    /// count beyond the remaining bytes can never decode.
    #[inline]
    pub fn read_sequence_length(&mut self) -> Result<usize> {
        let len = self.read_u32()? as usize;
        if len > self.remaining() {
            return Err(Error::UnexpectedEof {
                needed: len,
                remaining: self.remaining(),
            });
        }
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::WireWriter;
    use byteorder::LittleEndian;

    #[test]
    fn test_roundtrip_all_types() {
        let mut buffer = Vec::new();
        {
            let mut writer = WireWriter::<LittleEndian>::new(&mut buffer);
            writer.write_bool(false);
            writer.write_i8(-42);
            writer.write_i16(-1000);
            writer.write_i32(-100000);
            writer.write_i64(-10000000000);
            writer.write_u8(200);
            writer.write_u16(50000);
            writer.write_u32(3000000000);
            writer.write_u64(10000000000);
            writer.write_f32(1.5);
            writer.write_f64(9.87654321);
            writer.write_string("test string");
        }

        let mut reader = WireReader::<LittleEndian>::new(&buffer);
        assert!(!reader.read_bool().unwrap());
        assert_eq!(reader.read_i8().unwrap(), -42);
        assert_eq!(reader.read_i16().unwrap(), -1000);
        assert_eq!(reader.read_i32().unwrap(), -100000);
        assert_eq!(reader.read_i64().unwrap(), -10000000000);
        assert_eq!(reader.read_u8().unwrap(), 200);
        assert_eq!(reader.read_u16().unwrap(), 50000);
        assert_eq!(reader.read_u32().unwrap(), 3000000000);
        assert_eq!(reader.read_u64().unwrap(), 10000000000);
        assert_eq!(reader.read_f32().unwrap(), 1.5);
        assert_eq!(reader.read_f64().unwrap(), 9.87654321);
        assert_eq!(reader.read_string().unwrap(), "test string");
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_eof_reports_counts() {
        let mut reader = WireReader::<LittleEndian>::new(&[1, 2]);
        match reader.read_u32() {
            Err(Error::UnexpectedEof { needed, remaining }) => {
                assert_eq!(needed, 4);
                assert_eq!(remaining, 2);
            }
            other => panic!("expected UnexpectedEof, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_bool() {
        let mut reader = WireReader::<LittleEndian>::new(&[7]);
        assert!(matches!(reader.read_bool(), Err(Error::InvalidBool(7))));
    }

    #[test]
    fn test_sequence_length_beyond_input() {
        // Count claims 1000 elements but only 2 bytes follow.
        let mut reader = WireReader::<LittleEndian>::new(&[0xE8, 0x03, 0, 0, 1, 2]);
        assert!(matches!(
            reader.read_sequence_length(),
            Err(Error::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_string_rejects_invalid_utf8() {
        let mut reader = WireReader::<LittleEndian>::new(&[2, 0, 0, 0, 0xFF, 0xFE]);
        assert!(matches!(reader.read_string(), Err(Error::Utf8(_))));
    }

    #[test]
    fn test_position_advances() {
        let mut reader = WireReader::<LittleEndian>::new(&[1, 2, 3, 4, 5, 6]);
        reader.read_u32().unwrap();
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.remaining(), 2);
    }
}
