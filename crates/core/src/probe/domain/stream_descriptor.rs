use std::collections::BTreeMap;

use serde::Serialize;

use crate::probe::domain::stream_source::StreamSource;
use crate::shared::codec::CodecId;
use crate::shared::media_time::MediaTime;
use crate::shared::pixel_format::PixelFormat;
use crate::shared::rational::Rational;

/// Normalized, immutable summary of one opened video stream.
///
/// Built once from a [`StreamSource`]. Derivation never fails: missing or
/// inconsistent native values are resolved with fixed fallbacks, trading
/// accuracy for robustness.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StreamDescriptor {
    index: usize,
    codec_name: String,
    codec_id: CodecId,
    is_interlaced: bool,
    frame_size: (u32, u32),
    pixel_format: PixelFormat,
    time_base: Rational,
    real_frame_rate: Rational,
    avg_frame_rate: f64,
    is_variable_frame_rate: bool,
    duration: MediaTime,
    start_time: MediaTime,
    frame_count: u64,
    is_frame_count_from_container: bool,
    metadata: BTreeMap<String, String>,
}

impl StreamDescriptor {
    /// Interprets the raw values of `source`.
    ///
    /// - An undefined start time becomes zero.
    /// - An undefined stream duration falls back to the container duration,
    ///   then to zero.
    /// - A missing frame count is estimated as
    ///   `round(duration_seconds * avg_frame_rate)`; the estimate is zero
    ///   when the average rate is unknown and may be wrong for VFR content.
    /// - The stream is flagged VFR when the real and average frame rates
    ///   differ as `f64` values, compared exactly.
    pub fn from_source(source: &impl StreamSource) -> Self {
        let index = source.index();
        let time_base = source.time_base();
        let field_order = source.field_order();
        let real_frame_rate = source.real_frame_rate();
        let avg_rate = source.avg_frame_rate();
        let avg_frame_rate = avg_rate.to_f64();

        let start_time = match source.start_time() {
            Some(ticks) => MediaTime::from_timestamp(ticks, time_base),
            None => {
                log::debug!("stream {index}: start time undefined, using zero");
                MediaTime::ZERO
            }
        };

        let duration = resolve_duration(source, time_base);

        let (frame_count, is_frame_count_from_container) = match source.frame_count() {
            Some(count) => (count, true),
            None => {
                let estimate = duration.to_frame_number(avg_rate).max(0) as u64;
                log::debug!(
                    "stream {index}: no frame count in container, estimated {estimate} \
                     from {duration} at {avg_frame_rate} fps"
                );
                (estimate, false)
            }
        };

        let metadata: BTreeMap<String, String> = source.metadata().into_iter().collect();

        Self {
            index,
            codec_name: source.codec_name(),
            codec_id: source.codec_id(),
            is_interlaced: field_order.is_interlaced(),
            frame_size: source.frame_size(),
            pixel_format: source.pixel_format(),
            time_base,
            real_frame_rate,
            avg_frame_rate,
            is_variable_frame_rate: real_frame_rate.to_f64() != avg_frame_rate,
            duration,
            start_time,
            frame_count,
            is_frame_count_from_container,
            metadata,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn codec_name(&self) -> &str {
        &self.codec_name
    }

    pub fn codec_id(&self) -> CodecId {
        self.codec_id
    }

    pub fn is_interlaced(&self) -> bool {
        self.is_interlaced
    }

    pub fn frame_size(&self) -> (u32, u32) {
        self.frame_size
    }

    pub fn width(&self) -> u32 {
        self.frame_size.0
    }

    pub fn height(&self) -> u32 {
        self.frame_size.1
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// Seconds per native timestamp tick.
    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    pub fn real_frame_rate(&self) -> Rational {
        self.real_frame_rate
    }

    pub fn avg_frame_rate(&self) -> f64 {
        self.avg_frame_rate
    }

    pub fn is_variable_frame_rate(&self) -> bool {
        self.is_variable_frame_rate
    }

    pub fn duration(&self) -> MediaTime {
        self.duration
    }

    pub fn start_time(&self) -> MediaTime {
        self.start_time
    }

    /// Exact when [`is_frame_count_from_container`](Self::is_frame_count_from_container)
    /// is true, otherwise an estimate.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_frame_count_from_container(&self) -> bool {
        self.is_frame_count_from_container
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Width over height; 0.0 for a zero height.
    pub fn aspect_ratio(&self) -> f64 {
        if self.frame_size.1 == 0 {
            return 0.0;
        }
        self.frame_size.0 as f64 / self.frame_size.1 as f64
    }

    /// Converts a native timestamp of this stream to media time.
    pub fn timestamp_to_time(&self, timestamp: i64) -> MediaTime {
        MediaTime::from_timestamp(timestamp, self.time_base)
    }

    /// Converts media time to the nearest native timestamp of this stream.
    pub fn time_to_timestamp(&self, time: MediaTime) -> i64 {
        time.to_timestamp(self.time_base)
    }

    /// Presentation time of frame `frame`, assuming the real frame rate.
    pub fn frame_to_time(&self, frame: i64) -> MediaTime {
        MediaTime::from_frame_number(frame, self.real_frame_rate)
    }
}

fn resolve_duration(source: &impl StreamSource, time_base: Rational) -> MediaTime {
    if let Some(ticks) = source.duration() {
        return MediaTime::from_timestamp(ticks, time_base);
    }
    match source.container_duration() {
        Some(micros) => {
            log::debug!(
                "stream {}: no stream duration, using container duration",
                source.index()
            );
            MediaTime::from_micros(micros)
        }
        None => {
            log::debug!("stream {}: duration unknown, using zero", source.index());
            MediaTime::ZERO
        }
    }
}
