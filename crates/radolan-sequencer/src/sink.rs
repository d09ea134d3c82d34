//! Sequencer output boundary.

use std::collections::HashMap;

use radolan_common::GridCoordinate;
use radolan_parser::Header;

/// Receiver for sequencing events.
///
/// Events arrive as an explicit tagged protocol: `frame_started` announces
/// a frame before any of its values, `value` delivers the frame's requested
/// cells in scan order, and `finished` closes the pass after the last
/// frame. On a fatal error the sequencer stops without calling `finished`,
/// so a stateful sink must treat an unfinished pass as "discard the frame
/// currently being accumulated".
pub trait FrameSink {
    fn frame_started(&mut self, header: &Header);
    fn value(&mut self, coord: GridCoordinate, value: f64);
    fn finished(&mut self);
}

/// One fully accumulated frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub header: Header,
    pub samples: HashMap<GridCoordinate, f64>,
}

/// Sink that collects whole frames.
///
/// The current frame is reset on every `frame_started` and flushed once the
/// next frame begins or the pass finishes; a frame is therefore only
/// visible in [`FrameAccumulator::frames`] when no more values can arrive
/// for it.
#[derive(Debug, Default)]
pub struct FrameAccumulator {
    frames: Vec<Frame>,
    current: Option<Frame>,
    finished: bool,
}

impl FrameAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames closed so far.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Whether the pass ran to completion.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consume the accumulator, dropping any unflushed partial frame.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    fn flush(&mut self) {
        if let Some(frame) = self.current.take() {
            self.frames.push(frame);
        }
    }
}

impl FrameSink for FrameAccumulator {
    fn frame_started(&mut self, header: &Header) {
        self.flush();
        self.current = Some(Frame {
            header: header.clone(),
            samples: HashMap::new(),
        });
    }

    fn value(&mut self, coord: GridCoordinate, value: f64) {
        if let Some(frame) = self.current.as_mut() {
            frame.samples.insert(coord, value);
        }
    }

    fn finished(&mut self) {
        self.flush();
        self.finished = true;
    }
}
