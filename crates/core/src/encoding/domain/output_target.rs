use crate::encoding::domain::codec_options::CodecOptions;
use crate::encoding::domain::encoder_stream_error::EncoderStreamError;
use crate::shared::codec::{CodecId, MediaType};
use crate::shared::pixel_format::PixelFormat;
use crate::shared::rational::Rational;

/// An encoder the native library can instantiate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncoderInfo {
    pub name: String,
    pub media_type: MediaType,
}

/// Fully resolved codec context settings for one video stream.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoStreamSettings {
    pub codec: CodecId,
    pub width: u32,
    pub height: u32,
    pub time_base: Rational,
    pub gop_size: u32,
    pub pixel_format: PixelFormat,
    /// Emit codec headers once in the container instead of in-band.
    pub global_header: bool,
    /// `None` leaves the encoder's own rate control untouched.
    pub bitrate: Option<u64>,
}

/// Domain interface for an output container that can host new encoded streams.
pub trait OutputTarget {
    /// Handle to a stream added by [`OutputTarget::open_video_stream`].
    type Stream;

    /// Video codec the container format declares as its default, if any.
    fn default_video_codec(&self) -> Option<CodecId>;

    fn requires_global_header(&self) -> bool;

    fn find_encoder(&self, codec: CodecId) -> Option<EncoderInfo>;

    /// Allocates a stream, applies `settings` and opens the codec with
    /// `options`.
    ///
    /// Returns the stream together with the options the codec left
    /// unconsumed.
    fn open_video_stream(
        &mut self,
        settings: &VideoStreamSettings,
        options: CodecOptions,
    ) -> Result<(Self::Stream, CodecOptions), EncoderStreamError>;
}
