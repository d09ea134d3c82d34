//! Archive input boundary.
//!
//! The tar/bz2 walker (or any other container) lives outside this
//! workspace; the sequencer only needs an ordered stream of named byte
//! streams. [`MemoryArchive`] is the in-process implementation used by
//! tests and by callers that already hold the frames in memory.

use std::collections::VecDeque;
use std::io::{Cursor, Read};

/// One archive entry: a name and a byte stream positioned at the frame's
/// first header byte.
pub struct ArchiveEntry<R> {
    pub name: String,
    pub reader: R,
}

/// Ordered supplier of archive entries.
///
/// Entries must be yielded in archive physical order; the sequencer
/// preserves that order in its output. Read errors from the underlying
/// source abort the whole pass.
pub trait ArchiveSource {
    type Reader: Read;

    fn next_entry(&mut self) -> std::io::Result<Option<ArchiveEntry<Self::Reader>>>;
}

/// An archive backed by in-memory buffers.
#[derive(Debug, Default)]
pub struct MemoryArchive {
    entries: VecDeque<(String, Vec<u8>)>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.entries.push_back((name.into(), bytes));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ArchiveSource for MemoryArchive {
    type Reader = Cursor<Vec<u8>>;

    fn next_entry(&mut self) -> std::io::Result<Option<ArchiveEntry<Self::Reader>>> {
        Ok(self.entries.pop_front().map(|(name, bytes)| ArchiveEntry {
            name,
            reader: Cursor::new(bytes),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_archive_preserves_order() {
        let mut archive = MemoryArchive::new();
        archive.push("frame_000", vec![1]);
        archive.push("frame_005", vec![2]);

        let first = archive.next_entry().unwrap().unwrap();
        assert_eq!(first.name, "frame_000");
        let second = archive.next_entry().unwrap().unwrap();
        assert_eq!(second.name, "frame_005");
        assert!(archive.next_entry().unwrap().is_none());
    }
}
