//! Byte cursor: little-endian reader/writer over a contiguous byte region.

use std::io::{Cursor, Seek, SeekFrom};

use scroll::{IOread, IOwrite, LE};

use crate::error::{GeoBlobError, Result};

/// A scoped, read-only view over an immutable byte slice with a mutable cursor position.
///
/// Reads never copy beyond what is requested; `sub_slice` hands back a borrow into the
/// original buffer rather than an owned copy.
pub struct ByteReader<'a> {
    buf: &'a [u8],
    cursor: Cursor<&'a [u8]>,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        ByteReader {
            buf,
            cursor: Cursor::new(buf),
        }
    }

    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    pub fn available(&self) -> usize {
        self.buf.len().saturating_sub(self.position())
    }

    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.buf.len() {
            return Err(GeoBlobError::UnexpectedEof {
                offset: self.position(),
                needed: pos - self.buf.len(),
            });
        }
        self.cursor
            .seek(SeekFrom::Start(pos as u64))
            .map_err(|e| GeoBlobError::Internal(e.to_string()))?;
        Ok(())
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.require(n)?;
        self.seek(self.position() + n)
    }

    fn require(&self, n: usize) -> Result<()> {
        if self.available() < n {
            return Err(GeoBlobError::UnexpectedEof {
                offset: self.position(),
                needed: n - self.available(),
            });
        }
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        self.require(1)?;
        self.cursor
            .ioread::<u8>()
            .map_err(|e| GeoBlobError::Internal(e.to_string()))
    }

    pub fn read_i32_le(&mut self) -> Result<i32> {
        self.require(4)?;
        self.cursor
            .ioread_with::<i32>(LE)
            .map_err(|e| GeoBlobError::Internal(e.to_string()))
    }

    pub fn read_f64_le(&mut self) -> Result<f64> {
        self.require(8)?;
        self.cursor
            .ioread_with::<f64>(LE)
            .map_err(|e| GeoBlobError::Internal(e.to_string()))
    }

    /// Borrow `len` bytes starting at `pos` without moving the cursor.
    pub fn sub_slice(&self, pos: usize, len: usize) -> Result<&'a [u8]> {
        let end = pos
            .checked_add(len)
            .ok_or_else(|| GeoBlobError::Internal("sub_slice length overflow".into()))?;
        if end > self.buf.len() {
            return Err(GeoBlobError::UnexpectedEof {
                offset: pos,
                needed: end - self.buf.len(),
            });
        }
        Ok(&self.buf[pos..end])
    }
}

/// A growable little-endian byte buffer with backpatch support for length prefixes.
///
/// Sequential writes go through `scroll`'s `IOwrite` extension the same way the rest of
/// this codebase writes little-endian wire values; backpatching indexes the underlying
/// `Vec` directly since `Vec<u8>: Write` has no way to seek backwards.
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn size(&self) -> usize {
        self.buf.len()
    }

    pub fn write_byte(&mut self, v: u8) -> Result<()> {
        self.buf
            .iowrite(v)
            .map_err(|e| GeoBlobError::Internal(e.to_string()))
    }

    pub fn write_i32_le(&mut self, v: i32) -> Result<()> {
        self.buf
            .iowrite_with(v, LE)
            .map_err(|e| GeoBlobError::Internal(e.to_string()))
    }

    pub fn write_f64_le(&mut self, v: f64) -> Result<()> {
        self.buf
            .iowrite_with(v, LE)
            .map_err(|e| GeoBlobError::Internal(e.to_string()))
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Reserve 4 bytes at the current position for a length prefix, returning the position
    /// so the caller can come back with [`ByteWriter::patch_i32_le_at`] once the body is known.
    pub fn reserve_i32_le(&mut self) -> Result<usize> {
        let pos = self.size();
        self.write_i32_le(0)?;
        Ok(pos)
    }

    pub fn patch_i32_le_at(&mut self, pos: usize, v: i32) -> Result<()> {
        if pos + 4 > self.buf.len() {
            return Err(GeoBlobError::Internal(format!(
                "patch position {pos} out of bounds for buffer of length {}",
                self.buf.len()
            )));
        }
        self.buf[pos..pos + 4].copy_from_slice(&v.to_le_bytes());
        Ok(())
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}
