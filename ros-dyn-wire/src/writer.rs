//! Low-level wire-format write operations.

use std::marker::PhantomData;

use byteorder::ByteOrder;

/// Packed wire-format writer.
///
/// Appends fixed-width primitive encodings to a byte buffer with no
/// padding between values. The byte order is chosen via the `BO` type
/// parameter; the message codec instantiates this with `LittleEndian`.
pub struct WireWriter<'a, BO> {
    buffer: &'a mut Vec<u8>,
    start_offset: usize,
    _phantom: PhantomData<BO>,
}

impl<'a, BO: ByteOrder> WireWriter<'a, BO> {
    /// Create a new writer appending to the given buffer.
    #[inline]
    pub fn new(buffer: &'a mut Vec<u8>) -> Self {
        let start_offset = buffer.len();
        Self {
            buffer,
            start_offset,
            _phantom: PhantomData,
        }
    }

    /// Number of bytes written through this writer.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.buffer.len() - self.start_offset
    }

    // Primitive write operations

    #[inline]
    pub fn write_bool(&mut self, v: bool) {
        self.buffer.push(if v { 1 } else { 0 });
    }

    #[inline]
    pub fn write_i8(&mut self, v: i8) {
        self.buffer.push(v as u8);
    }

    #[inline]
    pub fn write_u8(&mut self, v: u8) {
        self.buffer.push(v);
    }

    #[inline]
    pub fn write_i16(&mut self, v: i16) {
        let mut buf = [0u8; 2];
        BO::write_i16(&mut buf, v);
        self.buffer.extend_from_slice(&buf);
    }

    #[inline]
    pub fn write_u16(&mut self, v: u16) {
        let mut buf = [0u8; 2];
        BO::write_u16(&mut buf, v);
        self.buffer.extend_from_slice(&buf);
    }

    #[inline]
    pub fn write_i32(&mut self, v: i32) {
        let mut buf = [0u8; 4];
        BO::write_i32(&mut buf, v);
        self.buffer.extend_from_slice(&buf);
    }

    #[inline]
    pub fn write_u32(&mut self, v: u32) {
        let mut buf = [0u8; 4];
        BO::write_u32(&mut buf, v);
        self.buffer.extend_from_slice(&buf);
    }

    #[inline]
    pub fn write_i64(&mut self, v: i64) {
        let mut buf = [0u8; 8];
        BO::write_i64(&mut buf, v);
        self.buffer.extend_from_slice(&buf);
    }

    #[inline]
    pub fn write_u64(&mut self, v: u64) {
        let mut buf = [0u8; 8];
        BO::write_u64(&mut buf, v);
        self.buffer.extend_from_slice(&buf);
    }

    #[inline]
    pub fn write_f32(&mut self, v: f32) {
        let mut buf = [0u8; 4];
        BO::write_f32(&mut buf, v);
        self.buffer.extend_from_slice(&buf);
    }

    #[inline]
    pub fn write_f64(&mut self, v: f64) {
        let mut buf = [0u8; 8];
        BO::write_f64(&mut buf, v);
        self.buffer.extend_from_slice(&buf);
    }

    /// Write a string as a 4-byte length prefix followed by the raw UTF-8
    /// bytes. No terminator is written.
    #[inline]
    pub fn write_string(&mut self, s: &str) {
        self.write_u32(s.len() as u32);
        self.buffer.extend_from_slice(s.as_bytes());
    }

    /// Write a sequence element count.
    #[inline]
    pub fn write_sequence_length(&mut self, len: usize) {
        self.write_u32(len as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::LittleEndian;

    #[test]
    fn test_packed_layout() {
        let mut buffer = Vec::new();
        let mut writer = WireWriter::<LittleEndian>::new(&mut buffer);

        writer.write_u8(1);
        writer.write_u32(100);

        // No padding between the u8 and the u32.
        assert_eq!(buffer, [1, 100, 0, 0, 0]);
    }

    #[test]
    fn test_string_has_no_terminator() {
        let mut buffer = Vec::new();
        let mut writer = WireWriter::<LittleEndian>::new(&mut buffer);

        writer.write_string("hello");

        assert_eq!(buffer, [5, 0, 0, 0, b'h', b'e', b'l', b'l', b'o']);
    }

    #[test]
    fn test_empty_string() {
        let mut buffer = Vec::new();
        let mut writer = WireWriter::<LittleEndian>::new(&mut buffer);

        writer.write_string("");

        assert_eq!(buffer, [0, 0, 0, 0]);
    }

    #[test]
    fn test_position_tracks_appended_bytes() {
        let mut buffer = vec![0xAA, 0xBB];
        let mut writer = WireWriter::<LittleEndian>::new(&mut buffer);
        assert_eq!(writer.position(), 0);

        writer.write_u16(7);
        writer.write_bool(true);
        assert_eq!(writer.position(), 3);
        assert_eq!(buffer.len(), 5);
    }

    #[test]
    fn test_little_endian_integers() {
        let mut buffer = Vec::new();
        let mut writer = WireWriter::<LittleEndian>::new(&mut buffer);

        writer.write_i32(42);
        writer.write_u16(0x1234);

        assert_eq!(buffer, [42, 0, 0, 0, 0x34, 0x12]);
    }
}
