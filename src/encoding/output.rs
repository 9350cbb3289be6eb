// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Growable output buffer with a hard size cap.
//!
//! The buffer starts at an initial capacity hint and grows on demand, but
//! refuses any write that would take it past its maximum. The rejected size
//! is remembered so the caller can report how much room the value needed.

use std::io::{self, Write};

/// Output buffer with an initial capacity and a maximum size.
#[derive(Debug, Clone)]
pub struct BoundedOutput {
    data: Vec<u8>,
    max_capacity: usize,
    overflow: Option<usize>,
}

impl BoundedOutput {
    /// Create a buffer; `initial_capacity` is clamped to `max_capacity`.
    pub fn new(initial_capacity: usize, max_capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(initial_capacity.min(max_capacity)),
            max_capacity,
            overflow: None,
        }
    }

    /// Bytes written so far.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Copy of the bytes written so far.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.clone()
    }

    /// Take the written bytes, leaving the buffer empty.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Number of bytes written.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Maximum number of bytes this buffer accepts.
    #[inline]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Bytes still available before the cap.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.max_capacity - self.data.len()
    }

    /// Size that a rejected write would have needed, if one was rejected.
    #[inline]
    pub fn overflow(&self) -> Option<usize> {
        self.overflow
    }

    /// Reset length and overflow state, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
        self.overflow = None;
    }
}

impl Write for BoundedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.len() > self.remaining() {
            let required = self.data.len() + buf.len();
            self.overflow = Some(required);
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!(
                    "buffer overflow: {required} bytes required, maximum is {}",
                    self.max_capacity
                ),
            ));
        }
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
