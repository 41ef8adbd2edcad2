use bytes::BytesMut;
use log::warn;

use crate::utils::error::{FramingError, NmeaError};

/// Practical upper bound for one line from a receiver, terminator included.
pub const DEFAULT_CAPACITY: usize = 256;

const LINE_FEED: u8 = b'\n';

/// Turns a byte stream into candidate sentences, one line at a time.
///
/// Lines longer than `capacity` are never emitted: the framer reports a
/// single overflow and then skips everything up to the next line feed.
pub struct SentenceFramer {
    buf: BytesMut,
    capacity: usize,
    resyncing: bool,
}

impl SentenceFramer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            capacity,
            resyncing: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes held for the sentence currently being assembled.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    pub fn is_resyncing(&self) -> bool {
        self.resyncing
    }

    /// Accepts one byte. Returns a complete line (terminator included) when
    /// `byte` is a line feed, or an error when the line was dropped.
    pub fn feed(&mut self, byte: u8) -> Option<Result<String, NmeaError>> {
        if self.resyncing {
            if byte == LINE_FEED {
                self.resyncing = false;
            }
            return None;
        }

        if self.buf.len() >= self.capacity {
            self.buf.clear();
            if byte != LINE_FEED {
                self.resyncing = true;
            }
            warn!("⚠️ Sentence exceeded {} bytes, resynchronizing", self.capacity);
            return Some(Err(NmeaError::BufferOverflow {
                capacity: self.capacity,
            }));
        }

        self.buf.extend_from_slice(&[byte]);
        if byte != LINE_FEED {
            return None;
        }

        let line = self.buf.split().freeze();
        if !line.is_ascii() {
            return Some(Err(FramingError::NonAscii.into()));
        }
        Some(Ok(String::from_utf8_lossy(&line).into_owned()))
    }

    /// Drops any partial sentence and leaves resynchronization.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.resyncing = false;
    }
}

impl Default for SentenceFramer {
    fn default() -> Self {
        Self::new()
    }
}
