//! Auto-growing binary writer for wire primitives.

/// Writes protobuf wire primitives into an owned buffer.
///
/// # Example
///
/// ```
/// use portspec_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.tag(4, 2);
/// writer.bytes(b"hi");
/// assert_eq!(writer.flush(), vec![0x22, 0x02, b'h', b'i']);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Writer {
    uint8: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn u8(&mut self, byte: u8) {
        self.uint8.push(byte);
    }

    /// Writes a base-128 varint.
    pub fn varint(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.uint8.push((value as u8) | 0x80);
            value >>= 7;
        }
        self.uint8.push(value as u8);
    }

    /// Writes a field key: `(field << 3) | wire_type`.
    pub fn tag(&mut self, field: u32, wire_type: u8) {
        self.varint((u64::from(field) << 3) | u64::from(wire_type & 0x07));
    }

    pub fn fixed32(&mut self, value: u32) {
        self.uint8.extend_from_slice(&value.to_le_bytes());
    }

    pub fn fixed64(&mut self, value: u64) {
        self.uint8.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a length prefix followed by the payload.
    pub fn bytes(&mut self, payload: &[u8]) {
        self.varint(payload.len() as u64);
        self.uint8.extend_from_slice(payload);
    }

    /// Appends raw bytes without a length prefix.
    pub fn raw(&mut self, payload: &[u8]) {
        self.uint8.extend_from_slice(payload);
    }

    /// Returns the written bytes and resets the writer.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }
}
