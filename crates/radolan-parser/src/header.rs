//! Fixed-layout binary header decoding.

use std::io::Read;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use radolan_common::{GridDimension, RadolanError, RadolanResult, RowOrigin};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::{HeaderLayout, Span, GP_MARKER, MS_MARKER, PR_MARKER, VV_MARKER};

/// Raw bit pattern reserved for "no valid measurement" in the binary format.
pub const NO_DATA_PATTERN: u16 = 0xC429;

/// Value emitted for a no-data cell, regardless of scaling.
pub const SENTINEL_VALUE: f64 = -1.0;

/// Hard ceiling on the declared trailing-metadata length.
pub const MAX_METADATA_LEN: usize = 999;

/// Single byte separating the metadata block from the value matrix.
pub const HEADER_TERMINATOR: u8 = 0x03;

/// Numeric-decode strategy for raw cell values.
///
/// The binary format declares a power-of-ten precision multiplier; the
/// HDF5 successor declares a gain/offset pair instead. Both feed the same
/// extractor contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ValueScaling {
    Precision(f64),
    GainOffset { gain: f64, offset: f64 },
}

impl ValueScaling {
    /// Decode a raw (non-sentinel) cell value into physical units.
    pub fn decode(&self, raw: u16) -> f64 {
        match *self {
            ValueScaling::Precision(scale) => raw as f64 * scale,
            ValueScaling::GainOffset { gain, offset } => raw as f64 * gain + offset,
        }
    }
}

/// Decoded per-frame header, shared by both format families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Two-character product code, e.g. `RW` or `RV`.
    pub product: String,
    /// Frame timestamp (UTC, minute resolution for the binary format).
    pub timestamp: DateTime<Utc>,
    pub scaling: ValueScaling,
    pub dimension: GridDimension,
    /// Forecast offset in minutes; `None` on non-forecast products.
    pub forecast_minutes: Option<u32>,
    /// Length of the discarded free-text metadata block.
    pub metadata_len: usize,
    /// Raw bit pattern meaning "no data" in this frame.
    pub no_data: u16,
    /// Published coordinate convention of this product family.
    pub row_origin: RowOrigin,
}

impl Header {
    /// Decode one raw cell, mapping the no-data pattern to the sentinel.
    pub fn decode_cell(&self, raw: u16) -> f64 {
        if raw == self.no_data {
            SENTINEL_VALUE
        } else {
            self.scaling.decode(raw)
        }
    }
}

/// Decode the fixed binary preamble of one archive entry.
///
/// Reads the preamble, the declared metadata block and the terminator byte,
/// leaving `reader` positioned at the first cell of the value matrix.
/// The caller states the layout variant; offset mismatches surface as
/// [`RadolanError::MalformedHeader`] rather than triggering auto-detection.
pub fn decode_header<R: Read>(reader: &mut R, layout: HeaderLayout) -> RadolanResult<Header> {
    let spec = layout.spec();

    let mut preamble = vec![0u8; spec.preamble_len];
    read_exact_or_truncated(reader, &mut preamble, "header preamble")?;

    check_marker(&preamble, spec.pr_marker, PR_MARKER)?;
    check_marker(&preamble, spec.gp_marker, GP_MARKER)?;
    check_marker(&preamble, spec.ms_marker, MS_MARKER)?;

    let product = ascii_field(&preamble, spec.product, "product code")?.to_string();
    let timestamp = decode_timestamp(
        ascii_field(&preamble, spec.day_hour_minute, "day/hour/minute")?,
        ascii_field(&preamble, spec.month_year, "month/year")?,
    )?;
    let scaling = ValueScaling::Precision(decode_precision(ascii_field(
        &preamble,
        spec.precision,
        "precision",
    )?)?);
    let dimension = decode_dimension(ascii_field(&preamble, spec.dimension, "grid dimension")?)?;

    let forecast_minutes = match spec.forecast {
        Some(forecast) => {
            check_marker(&preamble, forecast.marker, VV_MARKER)?;
            let field = ascii_field(&preamble, forecast.field, "forecast offset")?;
            Some(parse_unsigned(field, "forecast offset")?)
        }
        None => None,
    };

    let metadata_len =
        parse_unsigned::<usize>(ascii_field(&preamble, spec.metadata_len, "metadata length")?, "metadata length")?;
    if metadata_len > MAX_METADATA_LEN {
        return Err(RadolanError::MalformedHeader(format!(
            "declared metadata length {} exceeds ceiling {}",
            metadata_len, MAX_METADATA_LEN
        )));
    }

    // The metadata block carries free-text production notes; consume and
    // discard so the stream lands on the terminator.
    let mut metadata = vec![0u8; metadata_len];
    read_exact_or_truncated(reader, &mut metadata, "header metadata block")?;

    let mut terminator = [0u8; 1];
    read_exact_or_truncated(reader, &mut terminator, "header terminator")?;
    if terminator[0] != HEADER_TERMINATOR {
        return Err(RadolanError::MalformedHeader(format!(
            "expected 0x03 terminator after metadata block, found 0x{:02x}",
            terminator[0]
        )));
    }

    debug!(
        product = %product,
        %timestamp,
        columns = dimension.columns,
        rows = dimension.rows,
        forecast_minutes,
        "decoded composite header"
    );

    Ok(Header {
        product,
        timestamp,
        scaling,
        dimension,
        forecast_minutes,
        metadata_len,
        no_data: NO_DATA_PATTERN,
        row_origin: spec.row_origin,
    })
}

pub(crate) fn read_exact_or_truncated<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    what: &str,
) -> RadolanResult<()> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            Err(RadolanError::TruncatedStream(what.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

fn check_marker(preamble: &[u8], span: Span, token: &[u8; 2]) -> RadolanResult<()> {
    let found = &preamble[span.0..span.1];
    if found != token {
        return Err(RadolanError::MalformedHeader(format!(
            "missing '{}' marker at offset {}",
            String::from_utf8_lossy(token),
            span.0
        )));
    }
    Ok(())
}

fn ascii_field<'a>(preamble: &'a [u8], span: Span, what: &str) -> RadolanResult<&'a str> {
    let bytes = &preamble[span.0..span.1];
    // ASCII-only, so downstream fixed-index slicing stays on char boundaries.
    if !bytes.is_ascii() {
        return Err(RadolanError::MalformedHeader(format!(
            "{} field is not ASCII",
            what
        )));
    }
    std::str::from_utf8(bytes)
        .map_err(|_| RadolanError::MalformedHeader(format!("{} field is not ASCII", what)))
}

fn parse_unsigned<T: std::str::FromStr>(field: &str, what: &str) -> RadolanResult<T> {
    field.trim().parse().map_err(|_| {
        RadolanError::MalformedHeader(format!("{} field {:?} is not a number", what, field))
    })
}

/// Combine the compact `DDhhmm` and `MMYY` fields into a UTC timestamp with
/// zero seconds. Years are relative to 2000.
fn decode_timestamp(day_hour_minute: &str, month_year: &str) -> RadolanResult<DateTime<Utc>> {
    let bad = |_| {
        RadolanError::MalformedHeader(format!(
            "non-numeric date fields {:?} / {:?}",
            day_hour_minute, month_year
        ))
    };
    let day: u32 = day_hour_minute[0..2].parse().map_err(bad)?;
    let hour: u32 = day_hour_minute[2..4].parse().map_err(bad)?;
    let minute: u32 = day_hour_minute[4..6].parse().map_err(bad)?;
    let month: u32 = month_year[0..2].parse().map_err(bad)?;
    let year: i32 = month_year[2..4].parse().map_err(bad)?;

    NaiveDate::from_ymd_opt(2000 + year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| {
            RadolanError::MalformedHeader(format!(
                "invalid calendar date 20{:02}-{:02}-{:02} {:02}:{:02}",
                year, month, day, hour, minute
            ))
        })
}

/// Decode the 4-character precision block (`E-01` style) into a
/// power-of-ten multiplier. The leading type character is skipped; the
/// remaining three characters are a signed exponent.
fn decode_precision(field: &str) -> RadolanResult<f64> {
    let exponent: i32 = field[1..].trim().parse().map_err(|_| {
        RadolanError::MalformedHeader(format!("precision field {:?} has no exponent", field))
    })?;
    Ok(10f64.powi(exponent))
}

/// Split the `"RRRRxCCCC"` dimension field. Rows come first.
fn decode_dimension(field: &str) -> RadolanResult<GridDimension> {
    let malformed =
        || RadolanError::MalformedHeader(format!("grid dimension field {:?}", field));

    let (rows_str, columns_str) = field.split_once('x').ok_or_else(malformed)?;
    let rows: usize = rows_str.trim().parse().map_err(|_| malformed())?;
    let columns: usize = columns_str.trim().parse().map_err(|_| malformed())?;
    if rows == 0 || columns == 0 {
        return Err(malformed());
    }
    Ok(GridDimension { columns, rows })
}
