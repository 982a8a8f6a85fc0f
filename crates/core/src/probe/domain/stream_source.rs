use crate::shared::codec::CodecId;
use crate::shared::field_order::FieldOrder;
use crate::shared::pixel_format::PixelFormat;
use crate::shared::rational::Rational;

/// Raw view of one opened, demuxed stream and its owning container.
///
/// Implementations translate native "unknown" sentinels into `None` and
/// otherwise report values verbatim. Interpreting them (fallbacks,
/// estimates) is left to [`StreamDescriptor`].
///
/// [`StreamDescriptor`]: crate::probe::domain::stream_descriptor::StreamDescriptor
pub trait StreamSource {
    /// Position of the stream within its container.
    fn index(&self) -> usize;

    fn codec_id(&self) -> CodecId;

    /// Native codec name, available even when `codec_id` is `Unknown`.
    fn codec_name(&self) -> String;

    fn field_order(&self) -> FieldOrder;

    /// `(width, height)` in pixels.
    fn frame_size(&self) -> (u32, u32);

    fn pixel_format(&self) -> PixelFormat;

    fn time_base(&self) -> Rational;

    /// Lowest frame rate that represents all timestamps exactly.
    fn real_frame_rate(&self) -> Rational;

    fn avg_frame_rate(&self) -> Rational;

    /// Start time in `time_base` ticks; `None` when the container left it undefined.
    fn start_time(&self) -> Option<i64>;

    /// Duration in `time_base` ticks; `None` when negative or undefined.
    fn duration(&self) -> Option<i64>;

    /// Frame count recorded by the container; `None` when absent or zero.
    fn frame_count(&self) -> Option<u64>;

    /// Container-wide duration in microseconds; `None` when undefined.
    fn container_duration(&self) -> Option<i64>;

    /// Stream tags in native iteration order. Keys may repeat.
    fn metadata(&self) -> Vec<(String, String)>;
}
