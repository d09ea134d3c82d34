//! Byte-layout tables for the binary composite header variants.
//!
//! The upstream format revised its preamble twice: the oldest products use
//! an 88-byte preamble without a forecast field, forecast-capable products
//! added a `VV` block, and a later revision grew the preamble to 91 bytes.
//! The layout is always stated by the caller; nothing here sniffs bytes to
//! guess a variant.

use radolan_common::RowOrigin;
use serde::{Deserialize, Serialize};

/// Inclusive-exclusive byte span inside the fixed preamble.
pub(crate) type Span = (usize, usize);

pub(crate) const PR_MARKER: &[u8; 2] = b"PR";
pub(crate) const GP_MARKER: &[u8; 2] = b"GP";
pub(crate) const VV_MARKER: &[u8; 2] = b"VV";
pub(crate) const MS_MARKER: &[u8; 2] = b"MS";

/// Header layout variant, selected by the caller per product epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderLayout {
    /// Oldest 88-byte preamble, no forecast block (e.g. the RW composites).
    Classic88,
    /// 88-byte preamble with a `VV` forecast block.
    Forecast88,
    /// Revised 91-byte preamble with a `VV` forecast block (e.g. RV).
    Forecast91,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ForecastSpans {
    pub marker: Span,
    pub field: Span,
}

/// Resolved byte offsets for one layout variant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LayoutSpec {
    pub preamble_len: usize,
    pub product: Span,
    pub day_hour_minute: Span,
    pub month_year: Span,
    pub pr_marker: Span,
    pub precision: Span,
    pub gp_marker: Span,
    pub dimension: Span,
    pub forecast: Option<ForecastSpans>,
    pub ms_marker: Span,
    pub metadata_len: Span,
    /// Published coordinate convention of the product family.
    pub row_origin: RowOrigin,
}

const LAYOUT_CLASSIC_88: LayoutSpec = LayoutSpec {
    preamble_len: 88,
    product: (0, 2),
    day_hour_minute: (2, 8),
    month_year: (13, 17),
    pr_marker: (41, 43),
    precision: (44, 48),
    gp_marker: (55, 57),
    dimension: (57, 66),
    forecast: None,
    ms_marker: (83, 85),
    metadata_len: (85, 88),
    row_origin: RowOrigin::South,
};

const LAYOUT_FORECAST_88: LayoutSpec = LayoutSpec {
    preamble_len: 88,
    product: (0, 2),
    day_hour_minute: (2, 8),
    month_year: (13, 17),
    pr_marker: (41, 43),
    precision: (44, 48),
    gp_marker: (55, 57),
    dimension: (57, 66),
    forecast: Some(ForecastSpans {
        marker: (66, 68),
        field: (69, 72),
    }),
    ms_marker: (83, 85),
    metadata_len: (85, 88),
    row_origin: RowOrigin::South,
};

const LAYOUT_FORECAST_91: LayoutSpec = LayoutSpec {
    preamble_len: 91,
    product: (0, 2),
    day_hour_minute: (2, 8),
    month_year: (13, 17),
    pr_marker: (44, 46),
    precision: (47, 51),
    gp_marker: (58, 60),
    dimension: (60, 69),
    forecast: Some(ForecastSpans {
        marker: (69, 71),
        field: (72, 75),
    }),
    ms_marker: (86, 88),
    metadata_len: (88, 91),
    row_origin: RowOrigin::South,
};

impl HeaderLayout {
    pub(crate) fn spec(self) -> &'static LayoutSpec {
        match self {
            HeaderLayout::Classic88 => &LAYOUT_CLASSIC_88,
            HeaderLayout::Forecast88 => &LAYOUT_FORECAST_88,
            HeaderLayout::Forecast91 => &LAYOUT_FORECAST_91,
        }
    }

    /// Fixed preamble length for this variant.
    pub fn preamble_len(self) -> usize {
        self.spec().preamble_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_lengths() {
        assert_eq!(HeaderLayout::Classic88.preamble_len(), 88);
        assert_eq!(HeaderLayout::Forecast88.preamble_len(), 88);
        assert_eq!(HeaderLayout::Forecast91.preamble_len(), 91);
    }

    #[test]
    fn test_spans_fit_inside_preamble() {
        for layout in [
            HeaderLayout::Classic88,
            HeaderLayout::Forecast88,
            HeaderLayout::Forecast91,
        ] {
            let spec = layout.spec();
            let mut spans = vec![
                spec.product,
                spec.day_hour_minute,
                spec.month_year,
                spec.pr_marker,
                spec.precision,
                spec.gp_marker,
                spec.dimension,
                spec.ms_marker,
                spec.metadata_len,
            ];
            if let Some(forecast) = spec.forecast {
                spans.push(forecast.marker);
                spans.push(forecast.field);
            }
            for (start, end) in spans {
                assert!(start < end && end <= spec.preamble_len, "{:?}", layout);
            }
        }
    }
}
