//! Adapter for the HDF5-based successor format.
//!
//! The self-describing container is never parsed here. An implementation of
//! [`CompositeSource`] (backed by an HDF5 reader, a test double, whatever)
//! exposes the handful of attributes the decoder needs plus random access to
//! the 2-D value array; this module shapes them into the same [`Header`] /
//! value contract as the binary format.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use radolan_common::{
    GridCoordinate, GridDimension, RadolanError, RadolanResult, RequestSpec, RowOrigin,
};

use crate::header::Header;
use crate::ValueScaling;

/// Attribute surface of one container-format frame.
///
/// Date fields are the container's compact `YYYYMMDD` / `HHMMSS` strings;
/// `value(x, y)` indexes the declared `x_size` x `y_size` array with row 0
/// at the grid's northern edge.
pub trait CompositeSource {
    fn pattern(&self) -> RadolanResult<String>;
    fn date(&self) -> RadolanResult<String>;
    fn time(&self) -> RadolanResult<String>;
    fn end_date(&self) -> RadolanResult<String>;
    fn end_time(&self) -> RadolanResult<String>;
    fn gain(&self) -> RadolanResult<f64>;
    fn offset(&self) -> RadolanResult<f64>;
    fn no_data(&self) -> RadolanResult<u16>;
    fn x_size(&self) -> RadolanResult<usize>;
    fn y_size(&self) -> RadolanResult<usize>;
    fn value(&self, x: usize, y: usize) -> RadolanResult<u16>;
}

/// Build a [`Header`] from a container frame's attributes.
///
/// The forecast offset is derived from the end timestamp, matching the
/// container's convention of declaring a validity window instead of an
/// explicit offset field.
pub fn read_container_header<S: CompositeSource>(source: &S) -> RadolanResult<Header> {
    let timestamp = parse_compact_time(&source.date()?, &source.time()?)?;
    let end = parse_compact_time(&source.end_date()?, &source.end_time()?)?;

    let forecast_minutes = u32::try_from((end - timestamp).num_minutes()).map_err(|_| {
        RadolanError::ContainerAttribute(format!(
            "end time {} precedes frame time {}",
            end, timestamp
        ))
    })?;

    let dimension = GridDimension {
        columns: source.x_size()?,
        rows: source.y_size()?,
    };
    if dimension.is_empty() {
        return Err(RadolanError::ContainerAttribute(format!(
            "declared dimension {}x{} is empty",
            dimension.rows, dimension.columns
        )));
    }

    Ok(Header {
        product: source.pattern()?,
        timestamp,
        scaling: ValueScaling::GainOffset {
            gain: source.gain()?,
            offset: source.offset()?,
        },
        dimension,
        forecast_minutes: Some(forecast_minutes),
        metadata_len: 0,
        no_data: source.no_data()?,
        row_origin: RowOrigin::North,
    })
}

/// Extract requested cells from a container frame.
///
/// Same contract as [`crate::extract_values`], but the array is random
/// access so only requested cells are touched. Emission stays row-major for
/// determinism.
pub fn extract_container_values<S, F>(
    header: &Header,
    source: &S,
    request: &RequestSpec,
    mut on_value: F,
) -> RadolanResult<()>
where
    S: CompositeSource,
    F: FnMut(GridCoordinate, f64),
{
    request.validate(&header.dimension)?;

    for y in 0..header.dimension.rows {
        for x in request.columns_for_row(y) {
            let raw = source.value(x, y)?;
            on_value(GridCoordinate::new(x, y), header.decode_cell(raw));
        }
    }

    Ok(())
}

fn parse_compact_time(date: &str, time: &str) -> RadolanResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(&format!("{}{}", date, time), "%Y%m%d%H%M%S")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| {
            RadolanError::ContainerAttribute(format!(
                "unparseable timestamp attributes {:?} / {:?}",
                date, time
            ))
        })
}
