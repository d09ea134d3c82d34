//! Streaming sequencer over archives of composite frames.
//!
//! Pulls entries from an ordered archive collaborator, decodes each frame's
//! header, extracts the requested cells and pushes everything to a
//! caller-supplied sink in one synchronous linear pass.

pub mod archive;
pub mod sequencer;
pub mod sink;

pub use archive::{ArchiveEntry, ArchiveSource, MemoryArchive};
pub use sequencer::{rv_rate_per_hour, sequence, sequence_containers, SequenceOptions, ValueTransform};
pub use sink::{Frame, FrameAccumulator, FrameSink};
