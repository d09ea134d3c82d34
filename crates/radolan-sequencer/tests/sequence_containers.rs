//! Sequencing over container-format frames (the HDF5 successor), using an
//! in-memory attribute source.

use chrono::{Duration, TimeZone, Utc};
use radolan_common::{GridCoordinate, RadolanResult, RequestSpec};
use radolan_parser::CompositeSource;
use radolan_sequencer::{sequence_containers, FrameAccumulator, SequenceOptions};

struct MemoryContainer {
    forecast_minutes: i64,
    columns: usize,
    rows: usize,
    cells: Vec<u16>,
}

impl CompositeSource for MemoryContainer {
    fn pattern(&self) -> RadolanResult<String> {
        Ok("RV".to_string())
    }
    fn date(&self) -> RadolanResult<String> {
        Ok("20220613".to_string())
    }
    fn time(&self) -> RadolanResult<String> {
        Ok("120000".to_string())
    }
    fn end_date(&self) -> RadolanResult<String> {
        let end = Utc.with_ymd_and_hms(2022, 6, 13, 12, 0, 0).unwrap()
            + Duration::minutes(self.forecast_minutes);
        Ok(end.format("%Y%m%d").to_string())
    }
    fn end_time(&self) -> RadolanResult<String> {
        let end = Utc.with_ymd_and_hms(2022, 6, 13, 12, 0, 0).unwrap()
            + Duration::minutes(self.forecast_minutes);
        Ok(end.format("%H%M%S").to_string())
    }
    fn gain(&self) -> RadolanResult<f64> {
        Ok(0.1)
    }
    fn offset(&self) -> RadolanResult<f64> {
        Ok(0.0)
    }
    fn no_data(&self) -> RadolanResult<u16> {
        Ok(65535)
    }
    fn x_size(&self) -> RadolanResult<usize> {
        Ok(self.columns)
    }
    fn y_size(&self) -> RadolanResult<usize> {
        Ok(self.rows)
    }
    fn value(&self, x: usize, y: usize) -> RadolanResult<u16> {
        Ok(self.cells[y * self.columns + x])
    }
}

#[test]
fn test_container_sequencing() {
    let sources = (0..3).map(|i| MemoryContainer {
        forecast_minutes: i * 5,
        columns: 3,
        rows: 2,
        cells: vec![10, 20, 30, 40, 50, 60],
    });

    let options = SequenceOptions::new(RequestSpec::from_points([GridCoordinate::new(2, 1)]));
    let mut sink = FrameAccumulator::new();
    sequence_containers(sources, &options, &mut sink).unwrap();

    assert!(sink.is_finished());
    let frames = sink.into_frames();
    assert_eq!(frames.len(), 3);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame.header.forecast_minutes, Some(i as u32 * 5));
        // North origin: (2, 1) is the last stored cell, raw 60 at gain 0.1.
        assert_eq!(frame.samples[&GridCoordinate::new(2, 1)], 6.0);
    }
}

#[test]
fn test_container_sequencing_rejects_bad_request() {
    let sources = std::iter::once(MemoryContainer {
        forecast_minutes: 0,
        columns: 3,
        rows: 2,
        cells: vec![0; 6],
    });

    let options = SequenceOptions::new(RequestSpec::from_points([GridCoordinate::new(0, 2)]));
    let mut sink = FrameAccumulator::new();
    assert!(sequence_containers(sources, &options, &mut sink).is_err());
    assert!(!sink.is_finished());
}
