//! Codec identity and media kind.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Kind of elementary stream a codec produces or consumes.
///
/// Native media kinds other than audio and video (subtitles, data,
/// attachments) are reported as `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    None,
    Video,
    Audio,
}

/// Codec identifier.
///
/// Codecs this crate knows by name get their own variant. Any other native
/// codec is carried as [`CodecId::Other`] with its FFmpeg name, so it can
/// still be looked up and encoded. `Unknown` means no codec at all.
///
/// Serialized as the FFmpeg codec name. Only the named variants (and
/// `"none"`) can be deserialized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CodecId {
    #[default]
    Unknown,
    // Video
    H264,
    H265,
    Vp8,
    Vp9,
    Av1,
    Mpeg4,
    Mpeg2Video,
    Mjpeg,
    Png,
    Prores,
    RawVideo,
    // Audio
    Aac,
    Opus,
    Mp3,
    Vorbis,
    Flac,
    Ac3,
    PcmS16Le,
    /// A native codec without its own variant, by FFmpeg name.
    Other(&'static str),
}

const NAMED: [CodecId; 19] = [
    CodecId::Unknown,
    CodecId::H264,
    CodecId::H265,
    CodecId::Vp8,
    CodecId::Vp9,
    CodecId::Av1,
    CodecId::Mpeg4,
    CodecId::Mpeg2Video,
    CodecId::Mjpeg,
    CodecId::Png,
    CodecId::Prores,
    CodecId::RawVideo,
    CodecId::Aac,
    CodecId::Opus,
    CodecId::Mp3,
    CodecId::Vorbis,
    CodecId::Flac,
    CodecId::Ac3,
    CodecId::PcmS16Le,
];

impl CodecId {
    /// Short lowercase codec name, matching FFmpeg's naming.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "none",
            Self::H264 => "h264",
            Self::H265 => "hevc",
            Self::Vp8 => "vp8",
            Self::Vp9 => "vp9",
            Self::Av1 => "av1",
            Self::Mpeg4 => "mpeg4",
            Self::Mpeg2Video => "mpeg2video",
            Self::Mjpeg => "mjpeg",
            Self::Png => "png",
            Self::Prores => "prores",
            Self::RawVideo => "rawvideo",
            Self::Aac => "aac",
            Self::Opus => "opus",
            Self::Mp3 => "mp3",
            Self::Vorbis => "vorbis",
            Self::Flac => "flac",
            Self::Ac3 => "ac3",
            Self::PcmS16Le => "pcm_s16le",
            Self::Other(name) => name,
        }
    }

    /// The named variant for an FFmpeg codec name.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED.into_iter().find(|codec| codec.name() == name)
    }

    /// `None` for `Unknown` and for `Other`, whose kind only the native
    /// encoder registry knows.
    pub const fn media_type(self) -> MediaType {
        match self {
            Self::Unknown | Self::Other(_) => MediaType::None,
            Self::H264
            | Self::H265
            | Self::Vp8
            | Self::Vp9
            | Self::Av1
            | Self::Mpeg4
            | Self::Mpeg2Video
            | Self::Mjpeg
            | Self::Png
            | Self::Prores
            | Self::RawVideo => MediaType::Video,
            Self::Aac
            | Self::Opus
            | Self::Mp3
            | Self::Vorbis
            | Self::Flac
            | Self::Ac3
            | Self::PcmS16Le => MediaType::Audio,
        }
    }

    /// Whether the encoder accepts a constant rate factor through its
    /// private `crf` option.
    pub const fn supports_crf(self) -> bool {
        matches!(self, Self::H264 | Self::H265 | Self::Vp8 | Self::Vp9)
    }

    /// Whether the encoder accepts a named speed preset through its
    /// private `preset` option.
    pub const fn supports_preset(self) -> bool {
        matches!(self, Self::H264 | Self::H265)
    }
}

impl std::fmt::Display for CodecId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for CodecId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for CodecId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::from_name(&name)
            .ok_or_else(|| de::Error::custom(format!("unknown codec name `{name}`")))
    }
}
