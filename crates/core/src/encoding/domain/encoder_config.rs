//! Encoder stream configuration types.

use serde::{Deserialize, Serialize};

use crate::encoding::domain::codec_options::CodecOptions;
use crate::encoding::domain::encoder_stream_error::EncoderStreamError;
use crate::shared::codec::CodecId;
use crate::shared::constants::{DEFAULT_BITRATE, DEFAULT_FRAMERATE, DEFAULT_KEYFRAME_INTERVAL};
use crate::shared::pixel_format::PixelFormat;
use crate::shared::rational::Rational;

/// Which codec the new stream should use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecChoice {
    /// The output container format's declared default video codec.
    #[default]
    ContainerDefault,
    Explicit(CodecId),
}

/// Encoder speed preset.
///
/// Slower presets produce better compression (smaller files at same quality)
/// but take longer to encode. Only applied to codecs that accept a named
/// preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncoderPreset {
    /// Fastest encoding, largest files.
    Ultrafast,
    /// Very fast encoding.
    Superfast,
    /// Fast encoding.
    Veryfast,
    /// Faster than default.
    Faster,
    /// Fast encoding, good for real-time.
    Fast,
    /// Default balance of speed and compression.
    #[default]
    Medium,
    /// Better compression, slower.
    Slow,
    /// Even better compression.
    Slower,
    /// Best compression, slowest.
    Veryslow,
}

impl EncoderPreset {
    /// Get the FFmpeg preset string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ultrafast => "ultrafast",
            Self::Superfast => "superfast",
            Self::Veryfast => "veryfast",
            Self::Faster => "faster",
            Self::Fast => "fast",
            Self::Medium => "medium",
            Self::Slow => "slow",
            Self::Slower => "slower",
            Self::Veryslow => "veryslow",
        }
    }
}

/// Caller-supplied settings for a new video stream in an output container.
///
/// `bitrate` only applies when `quality_factor` is unset or the resolved
/// codec cannot take a constant rate factor. `codec_options` is updated in
/// place when the stream is created: it ends up holding the entries the
/// codec did not consume.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncoderStreamConfig {
    pub codec: CodecChoice,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    pub framerate: Rational,
    /// Maximum frames between keyframes (GOP size).
    pub keyframe_interval: u32,
    pub pixel_format: PixelFormat,
    /// Constant rate factor; lower is higher quality.
    pub quality_factor: Option<u32>,
    /// Target bitrate in bits per second.
    pub bitrate: u64,
    pub preset: EncoderPreset,
    #[serde(default)]
    pub codec_options: CodecOptions,
}

impl EncoderStreamConfig {
    /// Create a configuration with the default codec, pixel format,
    /// keyframe interval, bitrate and preset.
    pub fn new(width: u32, height: u32, framerate: Rational) -> Self {
        Self {
            codec: CodecChoice::ContainerDefault,
            width,
            height,
            framerate,
            keyframe_interval: DEFAULT_KEYFRAME_INTERVAL,
            pixel_format: PixelFormat::Yuv420p,
            quality_factor: None,
            bitrate: DEFAULT_BITRATE,
            preset: EncoderPreset::default(),
            codec_options: CodecOptions::new(),
        }
    }

    pub fn with_codec(mut self, codec: CodecChoice) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_keyframe_interval(mut self, frames: u32) -> Self {
        self.keyframe_interval = frames;
        self
    }

    pub fn with_pixel_format(mut self, format: PixelFormat) -> Self {
        self.pixel_format = format;
        self
    }

    pub fn with_quality_factor(mut self, crf: u32) -> Self {
        self.quality_factor = Some(crf);
        self
    }

    pub fn with_bitrate(mut self, bitrate: u64) -> Self {
        self.bitrate = bitrate;
        self
    }

    pub fn with_preset(mut self, preset: EncoderPreset) -> Self {
        self.preset = preset;
        self
    }

    pub fn with_codec_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.codec_options.set(key, value);
        self
    }

    /// Check the geometry, frame rate and bitrate can describe a video stream.
    pub fn validate(&self) -> Result<(), EncoderStreamError> {
        if self.width == 0 || self.height == 0 {
            return Err(EncoderStreamError::InvalidConfig(format!(
                "frame size {}x{} must be positive",
                self.width, self.height
            )));
        }
        if self.framerate.num <= 0 || self.framerate.den <= 0 {
            return Err(EncoderStreamError::InvalidConfig(format!(
                "frame rate {} must be positive",
                self.framerate
            )));
        }
        if i64::try_from(self.bitrate).is_err() {
            return Err(EncoderStreamError::InvalidConfig(format!(
                "bitrate {} exceeds the native maximum of {}",
                self.bitrate,
                i64::MAX
            )));
        }
        Ok(())
    }
}

impl Default for EncoderStreamConfig {
    fn default() -> Self {
        Self::new(1920, 1080, Rational::new(DEFAULT_FRAMERATE, 1))
    }
}
