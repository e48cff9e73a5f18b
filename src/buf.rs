//! Owned byte buffers and the non-owning views taken from them.
//!
//! A [`Buffer`] owns a fixed-size, contiguous region of bytes allocated at
//! construction and released at drop. It is non-copyable (no `Clone`) but
//! movable. Reading and writing through it hands out ordinary Rust slices
//! (`&[u8]` / `&mut [u8]`), which already are the non-owning "view" type
//! this crate's design calls for: the borrow checker statically rejects any
//! view that would outlive the buffer it was taken from, so the usual
//! "don't let a view outlive its buffer" discipline is enforced by the
//! compiler rather than by convention.

/// A fixed-size, heap-allocated byte buffer.
///
/// The buffer's length is fixed at construction. Bytes beyond what has
/// actually been filled by a read are not meaningful; callers track their
/// own fill/consume cursors (see [`Buffer::filled`] and [`Buffer::consume`]).
pub struct Buffer {
    bytes: Box<[u8]>,
    filled: usize,
}

impl Buffer {
    /// Allocates a new buffer of exactly `size` bytes, zero-initialized.
    pub fn with_capacity(size: usize) -> Self {
        Self {
            bytes: vec![0u8; size].into_boxed_slice(),
            filled: 0,
        }
    }

    /// Total capacity of the buffer, in bytes.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// The number of bytes currently considered filled (`0..=capacity`).
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// A view over the filled portion of the buffer.
    pub fn filled_view(&self) -> &[u8] {
        &self.bytes[..self.filled]
    }

    /// A mutable view over the unfilled tail of the buffer, suitable for
    /// passing to a non-blocking read.
    pub fn spare(&mut self) -> &mut [u8] {
        &mut self.bytes[self.filled..]
    }

    /// Marks `n` additional bytes (from the spare tail) as filled.
    ///
    /// # Panics
    ///
    /// Panics if `n` would overflow the buffer's capacity.
    pub fn advance_filled(&mut self, n: usize) {
        assert!(self.filled + n <= self.bytes.len(), "advance past capacity");
        self.filled += n;
    }

    /// Drops the first `n` filled bytes, shifting the remainder to the
    /// front. Used after a parser or reader has consumed a prefix.
    ///
    /// # Panics
    ///
    /// Panics if `n > self.filled()`.
    pub fn consume(&mut self, n: usize) {
        assert!(n <= self.filled, "consume past filled region");
        self.bytes.copy_within(n..self.filled, 0);
        self.filled -= n;
    }

    /// Returns a sub-view `begin..end` of the filled region.
    ///
    /// # Panics
    ///
    /// Panics unless `begin <= end <= self.filled()`.
    pub fn sub(&self, begin: usize, end: usize) -> &[u8] {
        assert!(begin <= end && end <= self.filled, "view out of bounds");
        &self.bytes[begin..end]
    }
}

/// Returns the sub-range `begin..end` of `view`.
///
/// A free function mirroring the reference spec's `view.sub(begin, end)`
/// for callers holding a plain slice rather than a [`Buffer`].
///
/// # Panics
///
/// Panics unless `begin <= end <= view.len()`.
pub fn sub(view: &[u8], begin: usize, end: usize) -> &[u8] {
    assert!(begin <= end && end <= view.len(), "view out of bounds");
    &view[begin..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_and_consumes() {
        let mut buf = Buffer::with_capacity(8);
        assert_eq!(buf.capacity(), 8);

        buf.spare()[..3].copy_from_slice(b"abc");
        buf.advance_filled(3);
        assert_eq!(buf.filled_view(), b"abc");

        buf.consume(1);
        assert_eq!(buf.filled_view(), b"bc");
    }

    #[test]
    #[should_panic]
    fn consume_past_filled_panics() {
        let mut buf = Buffer::with_capacity(4);
        buf.consume(1);
    }

    #[test]
    fn sub_respects_bounds() {
        let data = b"hello world";
        assert_eq!(sub(data, 0, 5), b"hello");
        assert_eq!(sub(data, 6, 11), b"world");
    }
}
