//! Tests for the container-format adapter, using an in-memory attribute
//! source standing in for an HDF5 reader.

use chrono::{TimeZone, Utc};
use radolan_common::{GridCoordinate, GridDimension, RadolanResult, RequestSpec, RowOrigin};
use radolan_parser::{
    extract_container_values, read_container_header, CompositeSource, SENTINEL_VALUE,
    ValueScaling,
};

struct MemoryContainer {
    pattern: String,
    date: String,
    time: String,
    end_date: String,
    end_time: String,
    gain: f64,
    offset: f64,
    no_data: u16,
    columns: usize,
    rows: usize,
    /// Row-major, row 0 at the northern edge.
    cells: Vec<u16>,
}

impl MemoryContainer {
    fn rv_frame(forecast_minutes: i64, cells: Vec<u16>, columns: usize, rows: usize) -> Self {
        let start = Utc.with_ymd_and_hms(2022, 6, 13, 12, 0, 0).unwrap();
        let end = start + chrono::Duration::minutes(forecast_minutes);
        Self {
            pattern: "RV".to_string(),
            date: start.format("%Y%m%d").to_string(),
            time: start.format("%H%M%S").to_string(),
            end_date: end.format("%Y%m%d").to_string(),
            end_time: end.format("%H%M%S").to_string(),
            gain: 0.01,
            offset: 0.0,
            no_data: 65535,
            columns,
            rows,
            cells,
        }
    }
}

impl CompositeSource for MemoryContainer {
    fn pattern(&self) -> RadolanResult<String> {
        Ok(self.pattern.clone())
    }
    fn date(&self) -> RadolanResult<String> {
        Ok(self.date.clone())
    }
    fn time(&self) -> RadolanResult<String> {
        Ok(self.time.clone())
    }
    fn end_date(&self) -> RadolanResult<String> {
        Ok(self.end_date.clone())
    }
    fn end_time(&self) -> RadolanResult<String> {
        Ok(self.end_time.clone())
    }
    fn gain(&self) -> RadolanResult<f64> {
        Ok(self.gain)
    }
    fn offset(&self) -> RadolanResult<f64> {
        Ok(self.offset)
    }
    fn no_data(&self) -> RadolanResult<u16> {
        Ok(self.no_data)
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
fn test_container_header() {
    let container = MemoryContainer::rv_frame(25, vec![0; 6], 3, 2);
    let header = read_container_header(&container).unwrap();

    assert_eq!(header.product, "RV");
    assert_eq!(
        header.timestamp,
        Utc.with_ymd_and_hms(2022, 6, 13, 12, 0, 0).unwrap()
    );
    assert_eq!(header.forecast_minutes, Some(25));
    assert_eq!(header.dimension, GridDimension::new(3, 2));
    assert_eq!(
        header.scaling,
        ValueScaling::GainOffset {
            gain: 0.01,
            offset: 0.0
        }
    );
    assert_eq!(header.no_data, 65535);
    assert_eq!(header.row_origin, RowOrigin::North);
}

#[test]
fn test_container_end_before_start_is_rejected() {
    let container = MemoryContainer::rv_frame(-5, vec![0; 6], 3, 2);
    assert!(read_container_header(&container).is_err());
}

#[test]
fn test_container_extraction_gain_offset_and_sentinel() {
    let cells = vec![
        100, 65535, 0, //
        50, 200, 300,
    ];
    let container = MemoryContainer::rv_frame(5, cells, 3, 2);
    let header = read_container_header(&container).unwrap();

    let request = RequestSpec::from_points([
        GridCoordinate::new(0, 0),
        GridCoordinate::new(1, 0),
        GridCoordinate::new(2, 1),
    ]);

    let mut out = Vec::new();
    extract_container_values(&header, &container, &request, |coord, value| {
        out.push((coord, value));
    })
    .unwrap();

    // Row-major emission, north origin: y = 0 is the first stored row.
    assert_eq!(
        out,
        vec![
            (GridCoordinate::new(0, 0), 1.0),
            (GridCoordinate::new(1, 0), SENTINEL_VALUE),
            (GridCoordinate::new(2, 1), 3.0),
        ]
    );
}

#[test]
fn test_container_extraction_validates_eagerly() {
    let container = MemoryContainer::rv_frame(5, vec![0; 6], 3, 2);
    let header = read_container_header(&container).unwrap();
    let request = RequestSpec::from_points([GridCoordinate::new(3, 0)]);
    assert!(extract_container_values(&header, &container, &request, |_, _| {}).is_err());
}
