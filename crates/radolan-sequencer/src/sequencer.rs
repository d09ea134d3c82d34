//! The per-entry decode -> announce -> extract loop.

use radolan_common::{RadolanResult, RequestSpec};
use radolan_parser::{
    decode_header, extract_container_values, extract_values, read_container_header,
    CompositeSource, HeaderLayout, SENTINEL_VALUE,
};
use tracing::{debug, info};

use crate::archive::{ArchiveEntry, ArchiveSource};
use crate::sink::FrameSink;

/// Numeric post-processing applied to every extracted measurement.
pub type ValueTransform = Box<dyn Fn(f64) -> f64>;

/// Fixed configuration for one sequencing pass.
pub struct SequenceOptions {
    pub request: RequestSpec,
    /// Optional unit conversion; never sees the no-data sentinel.
    pub transform: Option<ValueTransform>,
}

impl SequenceOptions {
    pub fn new(request: RequestSpec) -> Self {
        Self {
            request,
            transform: None,
        }
    }

    pub fn with_transform(mut self, transform: ValueTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    fn apply(&self, value: f64) -> f64 {
        match &self.transform {
            Some(transform) if value != SENTINEL_VALUE => transform(value),
            _ => value,
        }
    }
}

/// Transform for the 5-minute RV rain-amount product: scale to liters per
/// square meter per hour and shorten to two decimals, as the product
/// documentation states.
pub fn rv_rate_per_hour() -> ValueTransform {
    Box::new(|value| {
        if value > 0.0 {
            (value * 12.0 * 100.0).round() / 100.0
        } else {
            value
        }
    })
}

/// Walk a binary-format archive, pushing every frame to `sink`.
///
/// Frames are emitted in archive order; within a frame, values follow the
/// extractor's scan order. After the last entry the sink's `finished` event
/// fires exactly once. Any failure aborts the pass immediately: the sink
/// sees neither a retraction of already-delivered values nor a `finished`
/// event.
pub fn sequence<A, S>(
    archive: &mut A,
    layout: HeaderLayout,
    options: &SequenceOptions,
    sink: &mut S,
) -> RadolanResult<()>
where
    A: ArchiveSource,
    S: FrameSink,
{
    let mut frames = 0usize;

    while let Some(entry) = archive.next_entry()? {
        let ArchiveEntry { name, mut reader } = entry;
        let header = decode_header(&mut reader, layout)?;
        debug!(
            entry = %name,
            product = %header.product,
            forecast_minutes = header.forecast_minutes,
            "sequencing archive entry"
        );

        sink.frame_started(&header);
        extract_values(&header, &mut reader, &options.request, |coord, value| {
            sink.value(coord, options.apply(value));
        })?;
        frames += 1;
    }

    sink.finished();
    info!(frames, "sequencing pass complete");
    Ok(())
}

/// Walk an ordered collection of container-format frames with the same
/// sink protocol as [`sequence`].
pub fn sequence_containers<C, I, S>(
    sources: I,
    options: &SequenceOptions,
    sink: &mut S,
) -> RadolanResult<()>
where
    C: CompositeSource,
    I: IntoIterator<Item = C>,
    S: FrameSink,
{
    let mut frames = 0usize;

    for source in sources {
        let header = read_container_header(&source)?;
        debug!(
            product = %header.product,
            forecast_minutes = header.forecast_minutes,
            "sequencing container frame"
        );

        sink.frame_started(&header);
        extract_container_values(&header, &source, &options.request, |coord, value| {
            sink.value(coord, options.apply(value));
        })?;
        frames += 1;
    }

    sink.finished();
    info!(frames, "container sequencing pass complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_skips_sentinel() {
        let options =
            SequenceOptions::new(RequestSpec::new()).with_transform(Box::new(|v| v * 2.0));
        assert_eq!(options.apply(1.5), 3.0);
        assert_eq!(options.apply(SENTINEL_VALUE), SENTINEL_VALUE);
    }

    #[test]
    fn test_rv_rate_per_hour() {
        let transform = rv_rate_per_hour();
        assert_eq!(transform(0.5), 6.0);
        assert_eq!(transform(0.0), 0.0);
        // 0.07 mm / 5 min -> 0.84 l/m2/h, already two decimals
        assert!((transform(0.07) - 0.84).abs() < 1e-9);
    }
}
