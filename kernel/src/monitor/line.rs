//! Interrupt-fed line buffer.
//!
//! The stdin interrupt appends bytes; the main loop takes completed lines out.
//! A line is complete when the byte before the last one is a newline, so an
//! empty line (two newlines in a row) submits whatever was typed before it.
//!
//! Capacity is fixed. Bytes past capacity are dropped and counted; the last
//! two bytes received are tracked separately so the terminator of an overlong
//! line is still seen, at which point the whole line is discarded.

/// A byte did not fit and was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overrun;

/// Result of taking a completed line out of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completed {
    /// A line of this many bytes was copied out.
    Line(usize),
    /// The line outgrew the buffer and was discarded.
    Overlong { dropped: usize },
}

pub struct LineBuffer<const N: usize> {
    buf: [u8; N],
    pos: usize,
    dropped: usize,
    tail: [u8; 2],
}

impl<const N: usize> LineBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            pos: 0,
            dropped: 0,
            tail: [0u8; 2],
        }
    }

    /// Append one byte at the cursor.
    pub fn push(&mut self, byte: u8) -> Result<(), Overrun> {
        self.tail = [self.tail[1], byte];
        if self.pos == N {
            self.dropped += 1;
            return Err(Overrun);
        }
        self.buf[self.pos] = byte;
        self.pos += 1;
        Ok(())
    }

    /// Write cursor: number of valid bytes.
    pub fn len(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    pub fn is_full(&self) -> bool {
        self.pos == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bytes dropped since the last reset.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    pub fn is_complete(&self) -> bool {
        if self.dropped > 0 {
            self.tail[0] == b'\n'
        } else {
            self.pos > 1 && self.buf[self.pos - 2] == b'\n'
        }
    }

    /// If a line is complete, copy it (without its two trailing bytes) into
    /// `out` and reset the buffer.
    pub fn take(&mut self, out: &mut [u8; N]) -> Option<Completed> {
        if !self.is_complete() {
            return None;
        }

        let completed = if self.dropped > 0 {
            Completed::Overlong {
                dropped: self.dropped,
            }
        } else {
            let len = self.pos - 2;
            out[..len].copy_from_slice(&self.buf[..len]);
            Completed::Line(len)
        };

        self.reset();
        Some(completed)
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.dropped = 0;
        self.tail = [0u8; 2];
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill<const N: usize>(buf: &mut LineBuffer<N>, bytes: &[u8]) {
        for &b in bytes {
            let _ = buf.push(b);
        }
    }

    #[test]
    fn bytes_accumulate_in_order() {
        let mut buf = LineBuffer::<16>::new();
        fill(&mut buf, b"hel");
        fill(&mut buf, b"lo");
        assert_eq!(buf.as_bytes(), b"hello");
        assert_eq!(buf.len(), 5);
        assert!(!buf.is_complete());
    }

    #[test]
    fn single_newline_is_not_complete() {
        let mut buf = LineBuffer::<16>::new();
        fill(&mut buf, b"hello\n");
        assert!(!buf.is_complete());
        let mut out = [0u8; 16];
        assert_eq!(buf.take(&mut out), None);
        assert_eq!(buf.len(), 6);
    }

    #[test]
    fn blank_line_completes_and_resets() {
        let mut buf = LineBuffer::<16>::new();
        fill(&mut buf, b"hello\n\n");
        assert!(buf.is_complete());

        let mut out = [0u8; 16];
        assert_eq!(buf.take(&mut out), Some(Completed::Line(5)));
        assert_eq!(&out[..5], b"hello");
        assert!(buf.is_empty());
    }

    #[test]
    fn lone_newline_pair_is_an_empty_line() {
        let mut buf = LineBuffer::<4>::new();
        fill(&mut buf, b"\n\n");
        let mut out = [0u8; 4];
        assert_eq!(buf.take(&mut out), Some(Completed::Line(0)));
    }

    #[test]
    fn completion_looks_at_second_to_last_byte() {
        let mut buf = LineBuffer::<16>::new();
        fill(&mut buf, b"ab\nc");
        assert!(buf.is_complete());
        let mut out = [0u8; 16];
        assert_eq!(buf.take(&mut out), Some(Completed::Line(2)));
        assert_eq!(&out[..2], b"ab");
    }

    #[test]
    fn overflow_keeps_prefix_and_counts_drops() {
        let mut buf = LineBuffer::<4>::new();
        assert_eq!(buf.push(b'a'), Ok(()));
        fill(&mut buf, b"bcd");
        assert!(buf.is_full());
        assert_eq!(buf.push(b'e'), Err(Overrun));
        assert_eq!(buf.as_bytes(), b"abcd");
        assert_eq!(buf.len(), buf.capacity());
        assert_eq!(buf.dropped(), 1);
    }

    #[test]
    fn overlong_line_is_discarded_on_its_terminator() {
        let mut buf = LineBuffer::<4>::new();
        fill(&mut buf, b"abcdef\n");
        assert!(!buf.is_complete());
        fill(&mut buf, b"\n");
        assert!(buf.is_complete());

        let mut out = [0u8; 4];
        assert_eq!(buf.take(&mut out), Some(Completed::Overlong { dropped: 4 }));
        assert!(buf.is_empty());
        assert_eq!(buf.dropped(), 0);

        // Back to normal operation.
        fill(&mut buf, b"x\n\n");
        assert_eq!(buf.take(&mut out), Some(Completed::Line(1)));
        assert_eq!(out[0], b'x');
    }

    #[test]
    fn newline_inside_full_buffer_does_not_complete_early() {
        let mut buf = LineBuffer::<4>::new();
        fill(&mut buf, b"ab\ncd");
        // The stored "ab\nc" would look complete, but once bytes were dropped
        // only the most recent input counts.
        assert_eq!(buf.dropped(), 1);
        assert!(!buf.is_complete());
    }
}
