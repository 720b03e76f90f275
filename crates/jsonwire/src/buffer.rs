//! Growable byte buffer shared by every writer in the crate.

use alloc::vec::Vec;

use crate::error::OutOfMemory;

const CAPACITY_MIN: usize = 256;

/// An append-only byte buffer with an optional reserved header prefix.
///
/// Content positions are counted from the end of the header region, so an
/// embedding host that must prepend a fixed-size header can reserve it up
/// front and fill it in via [`Buffer::into_parts`] without copying the
/// payload. Capacity grows to `max(2 * capacity, needed, 256)`; the only
/// failure mode is [`OutOfMemory`].
#[derive(Debug, Default)]
pub struct Buffer {
    /// Header bytes followed by the content.
    data: Vec<u8>,
    header: usize,
}

impl Buffer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_header(0)
    }

    /// Creates a buffer whose backing storage reserves `header` bytes ahead
    /// of content position zero.
    #[must_use]
    pub fn with_header(header: usize) -> Self {
        let mut data = Vec::new();
        data.resize(header, 0);
        Self { data, header }
    }

    /// Current content length (the write position).
    #[must_use]
    pub fn pos(&self) -> usize {
        self.data.len() - self.header
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos() == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[self.header..]
    }

    /// Grows the backing storage so that `total` content bytes fit without
    /// reallocation.
    pub fn ensure(&mut self, total: usize) -> Result<(), OutOfMemory> {
        let needed = self.header + total;
        if needed <= self.data.capacity() {
            return Ok(());
        }
        let target = needed.max(self.data.capacity() * 2).max(CAPACITY_MIN);
        self.data
            .try_reserve_exact(target - self.data.len())
            .map_err(|_| OutOfMemory)
    }

    /// Grows the backing storage for `more` bytes past the current position.
    pub fn ensure_delta(&mut self, more: usize) -> Result<(), OutOfMemory> {
        self.ensure(self.pos() + more)
    }

    pub fn append(&mut self, bytes: &[u8]) -> Result<(), OutOfMemory> {
        self.ensure_delta(bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    pub fn append_byte(&mut self, byte: u8) -> Result<(), OutOfMemory> {
        self.ensure_delta(1)?;
        self.data.push(byte);
        Ok(())
    }

    /// Advances the position by `n` zero bytes and returns the old position.
    ///
    /// The binary writer uses this to reserve a type-and-length header that
    /// is backpatched when the compound ends.
    pub fn skip(&mut self, n: usize) -> Result<usize, OutOfMemory> {
        let old = self.pos();
        self.ensure_delta(n)?;
        self.data.resize(self.data.len() + n, 0);
        Ok(old)
    }

    /// Overwrites content starting at `pos`, growing the buffer when the
    /// write runs past the current position.
    pub fn write_at(&mut self, pos: usize, bytes: &[u8]) -> Result<(), OutOfMemory> {
        let end = pos + bytes.len();
        if end > self.pos() {
            self.ensure(end)?;
            self.data.resize(self.header + end, 0);
        }
        self.data[self.header + pos..self.header + end].copy_from_slice(bytes);
        Ok(())
    }

    /// Moves the content range `src` to start at `dest`, growing the buffer
    /// when the destination runs past the current position. Ranges may
    /// overlap.
    pub fn copy_within(
        &mut self,
        src: core::ops::Range<usize>,
        dest: usize,
    ) -> Result<(), OutOfMemory> {
        let end = dest + src.len();
        if end > self.pos() {
            self.ensure(end)?;
            self.data.resize(self.header + end, 0);
        }
        self.data
            .copy_within(self.header + src.start..self.header + src.end, self.header + dest);
        Ok(())
    }

    /// Drops content past `pos`. No-op when `pos` is at or past the current
    /// position.
    pub fn truncate(&mut self, pos: usize) {
        if pos < self.pos() {
            self.data.truncate(self.header + pos);
        }
    }

    /// Resets the position to zero, keeping capacity and the header region.
    pub fn clear(&mut self) {
        self.data.truncate(self.header);
    }

    /// Consumes the buffer, returning the full backing storage (header
    /// region included) and the header size.
    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, usize) {
        (self.data, self.header)
    }
}
