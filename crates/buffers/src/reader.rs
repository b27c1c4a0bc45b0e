//! Binary buffer reader with cursor tracking.

use crate::{BufferError, MAX_VARINT_LEN};

/// A binary buffer reader that reads data from a byte slice.
///
/// The cursor `x` is always an absolute index into `uint8`, including for
/// readers produced by [`Reader::cut`], so error offsets point into the
/// original input.
///
/// # Example
///
/// ```
/// use portspec_buffers::Reader;
///
/// let data = [0x96, 0x01, 0xAA];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.varint().unwrap(), 150);
/// assert_eq!(reader.u8().unwrap(), 0xAA);
/// assert!(reader.u8().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Creates a reader from a slice with custom start and end positions.
    pub fn from_slice(uint8: &'a [u8], x: usize, end: usize) -> Self {
        let end = end.min(uint8.len());
        Self {
            uint8,
            x: x.min(end),
            end,
        }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end - self.x
    }

    /// Returns `true` when the cursor reached the end.
    pub fn is_empty(&self) -> bool {
        self.x >= self.end
    }

    fn ensure(&self, wanted: usize) -> Result<(), BufferError> {
        if self.size() < wanted {
            return Err(BufferError::EndOfBuffer {
                offset: self.x,
                wanted: wanted - self.size(),
            });
        }
        Ok(())
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.ensure(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads a base-128 varint (little-endian groups of seven bits).
    ///
    /// The cursor is left untouched on failure.
    pub fn varint(&mut self) -> Result<u64, BufferError> {
        let start = self.x;
        let mut value: u64 = 0;
        for i in 0..MAX_VARINT_LEN {
            let pos = start + i;
            if pos >= self.end {
                return Err(BufferError::EndOfBuffer {
                    offset: start,
                    wanted: 1,
                });
            }
            let byte = self.uint8[pos];
            if i == MAX_VARINT_LEN - 1 && byte >= 0x02 {
                return Err(BufferError::VarintOverflow { offset: start });
            }
            value |= u64::from(byte & 0x7F) << (7 * i);
            if byte & 0x80 == 0 {
                self.x = pos + 1;
                return Ok(value);
            }
        }
        Err(BufferError::VarintOverflow { offset: start })
    }

    /// Reads a little-endian 32-bit value.
    #[inline]
    pub fn fixed32(&mut self) -> Result<u32, BufferError> {
        let bytes = self.buf(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads a little-endian 64-bit value.
    #[inline]
    pub fn fixed64(&mut self) -> Result<u64, BufferError> {
        let bytes = self.buf(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(raw))
    }

    /// Returns a subarray of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.ensure(size)?;
        let x = self.x;
        self.x += size;
        Ok(&self.uint8[x..x + size])
    }

    /// Creates a new Reader over the next `size` bytes and advances the cursor.
    pub fn cut(&mut self, size: usize) -> Result<Reader<'a>, BufferError> {
        self.ensure(size)?;
        let slice = Reader::from_slice(self.uint8, self.x, self.x + size);
        self.x += size;
        Ok(slice)
    }
}
