//! Builder for synthetic binary composite frames.
//!
//! Assembles the preamble with its own offset knowledge, independent of the
//! production decoder, so round-trip tests actually cross-check the two.

/// Builds one complete binary frame (preamble + metadata + terminator +
/// value matrix).
#[derive(Debug, Clone)]
pub struct CompositeBuilder {
    product: String,
    day: u32,
    hour: u32,
    minute: u32,
    month: u32,
    year2: u32,
    precision_exp: i32,
    rows: usize,
    columns: usize,
    forecast_minutes: Option<u32>,
    metadata: Vec<u8>,
    cells: Vec<u16>,
    extended: bool,
}

impl CompositeBuilder {
    fn base(product: &str, forecast_minutes: Option<u32>, extended: bool) -> Self {
        Self {
            product: product.to_string(),
            day: 13,
            hour: 15,
            minute: 40,
            month: 2,
            year2: 22,
            precision_exp: -1,
            rows: 4,
            columns: 5,
            forecast_minutes,
            metadata: b"<synthetic>".to_vec(),
            cells: Vec::new(),
            extended,
        }
    }

    /// Oldest 88-byte layout without a forecast block.
    pub fn classic(product: &str) -> Self {
        Self::base(product, None, false)
    }

    /// 88-byte layout with a `VV` forecast block.
    pub fn forecast(product: &str) -> Self {
        Self::base(product, Some(0), false)
    }

    /// Revised 91-byte layout with a `VV` forecast block.
    pub fn extended(product: &str) -> Self {
        Self::base(product, Some(0), true)
    }

    pub fn with_timestamp(mut self, day: u32, month: u32, year2: u32, hour: u32, minute: u32) -> Self {
        self.day = day;
        self.month = month;
        self.year2 = year2;
        self.hour = hour;
        self.minute = minute;
        self
    }

    pub fn with_precision(mut self, exponent: i32) -> Self {
        self.precision_exp = exponent;
        self
    }

    /// Grid size, rows first (matching the `"RRRRxCCCC"` header field).
    pub fn with_grid(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    pub fn with_forecast(mut self, minutes: u32) -> Self {
        self.forecast_minutes = Some(minutes);
        self
    }

    pub fn with_metadata(mut self, metadata: &str) -> Self {
        self.metadata = metadata.as_bytes().to_vec();
        self
    }

    /// Raw cell values in transmitted order (northernmost row first).
    pub fn with_cells(mut self, cells: Vec<u16>) -> Self {
        self.cells = cells;
        self
    }

    pub fn with_uniform_cells(self, raw: u16) -> Self {
        let cells = vec![raw; self.rows * self.columns];
        self.with_cells(cells)
    }

    pub fn build(&self) -> Vec<u8> {
        assert_eq!(
            self.cells.len(),
            self.rows * self.columns,
            "cell count must match the declared grid"
        );
        assert!(self.metadata.len() <= 999);

        let preamble_len = if self.extended { 91 } else { 88 };
        let mut preamble = vec![b' '; preamble_len];

        let write = |buf: &mut [u8], at: usize, text: &str| {
            buf[at..at + text.len()].copy_from_slice(text.as_bytes());
        };

        write(&mut preamble, 0, &self.product);
        write(
            &mut preamble,
            2,
            &format!("{:02}{:02}{:02}", self.day, self.hour, self.minute),
        );
        write(&mut preamble, 13, &format!("{:02}{:02}", self.month, self.year2));

        let (pr, precision, gp, dimension, vv, ms, ms_len) = if self.extended {
            (44, 47, 58, 60, (69, 72), 86, 88)
        } else {
            (41, 44, 55, 57, (66, 69), 83, 85)
        };

        write(&mut preamble, pr, "PR");
        write(&mut preamble, precision, &format!("E{:+03}", self.precision_exp));
        write(&mut preamble, gp, "GP");
        write(
            &mut preamble,
            dimension,
            &format!("{:>4}x{:>4}", self.rows, self.columns),
        );
        if let Some(minutes) = self.forecast_minutes {
            write(&mut preamble, vv.0, "VV");
            write(&mut preamble, vv.1, &format!("{:03}", minutes));
        }
        write(&mut preamble, ms, "MS");
        write(&mut preamble, ms_len, &format!("{:03}", self.metadata.len()));

        let mut frame = preamble;
        frame.extend_from_slice(&self.metadata);
        frame.push(0x03);
        for cell in &self.cells {
            frame.extend_from_slice(&cell.to_le_bytes());
        }
        frame
    }
}
