//! Conversion between ffmpeg-next types and this crate's types.

use std::ffi::{c_int, CString};

use ffmpeg_next::codec::Id;
use ffmpeg_next::ffi::{self, AVFieldOrder, AVPixelFormat};
use ffmpeg_next::format::Pixel;
use ffmpeg_next::media;

use crate::shared::codec::{CodecId, MediaType};
use crate::shared::field_order::FieldOrder;
use crate::shared::pixel_format::PixelFormat;
use crate::shared::rational::Rational;

pub fn rational_from_ffmpeg(r: ffmpeg_next::Rational) -> Rational {
    Rational::new(r.numerator(), r.denominator())
}

pub fn rational_to_ffmpeg(r: Rational) -> ffmpeg_next::Rational {
    ffmpeg_next::Rational::new(r.num, r.den)
}

pub fn codec_id_from_ffmpeg(id: Id) -> CodecId {
    match id {
        // Video
        Id::H264 => CodecId::H264,
        Id::HEVC => CodecId::H265,
        Id::VP8 => CodecId::Vp8,
        Id::VP9 => CodecId::Vp9,
        Id::AV1 => CodecId::Av1,
        Id::MPEG4 => CodecId::Mpeg4,
        Id::MPEG2VIDEO => CodecId::Mpeg2Video,
        Id::MJPEG => CodecId::Mjpeg,
        Id::PNG => CodecId::Png,
        Id::PRORES => CodecId::Prores,
        Id::RAWVIDEO => CodecId::RawVideo,
        // Audio
        Id::AAC => CodecId::Aac,
        Id::OPUS => CodecId::Opus,
        Id::MP3 => CodecId::Mp3,
        Id::VORBIS => CodecId::Vorbis,
        Id::FLAC => CodecId::Flac,
        Id::AC3 => CodecId::Ac3,
        Id::PCM_S16LE => CodecId::PcmS16Le,
        Id::None => CodecId::Unknown,
        other => CodecId::Other(other.name()),
    }
}

pub fn codec_id_to_ffmpeg(codec: CodecId) -> Id {
    match codec {
        CodecId::Unknown => Id::None,
        CodecId::H264 => Id::H264,
        CodecId::H265 => Id::HEVC,
        CodecId::Vp8 => Id::VP8,
        CodecId::Vp9 => Id::VP9,
        CodecId::Av1 => Id::AV1,
        CodecId::Mpeg4 => Id::MPEG4,
        CodecId::Mpeg2Video => Id::MPEG2VIDEO,
        CodecId::Mjpeg => Id::MJPEG,
        CodecId::Png => Id::PNG,
        CodecId::Prores => Id::PRORES,
        CodecId::RawVideo => Id::RAWVIDEO,
        CodecId::Aac => Id::AAC,
        CodecId::Opus => Id::OPUS,
        CodecId::Mp3 => Id::MP3,
        CodecId::Vorbis => Id::VORBIS,
        CodecId::Flac => Id::FLAC,
        CodecId::Ac3 => Id::AC3,
        CodecId::PcmS16Le => Id::PCM_S16LE,
        CodecId::Other(name) => codec_id_by_name(name),
    }
}

fn codec_id_by_name(name: &str) -> Id {
    let Ok(name) = CString::new(name) else {
        return Id::None;
    };
    // SAFETY: the descriptor table is static; lookup only reads it.
    let descriptor = unsafe { ffi::avcodec_descriptor_get_by_name(name.as_ptr()) };
    if descriptor.is_null() {
        return Id::None;
    }
    Id::from(unsafe { (*descriptor).id })
}

/// Maps the raw `format` field of video codec parameters.
pub fn pixel_format_from_raw(format: c_int) -> PixelFormat {
    MAPPED_PIXEL_FORMATS
        .into_iter()
        .find(|&candidate| {
            AVPixelFormat::from(pixel_format_to_ffmpeg(candidate)) as c_int == format
        })
        .unwrap_or(PixelFormat::Unknown)
}

const MAPPED_PIXEL_FORMATS: [PixelFormat; 11] = [
    PixelFormat::Yuv420p,
    PixelFormat::Nv12,
    PixelFormat::Yuv422p,
    PixelFormat::Yuv444p,
    PixelFormat::Yuv420p10,
    PixelFormat::Yuvj420p,
    PixelFormat::Bgra,
    PixelFormat::Rgba,
    PixelFormat::Rgb24,
    PixelFormat::Bgr24,
    PixelFormat::Gray8,
];

pub fn pixel_format_to_ffmpeg(format: PixelFormat) -> Pixel {
    match format {
        PixelFormat::Unknown => Pixel::None,
        PixelFormat::Yuv420p => Pixel::YUV420P,
        PixelFormat::Nv12 => Pixel::NV12,
        PixelFormat::Yuv422p => Pixel::YUV422P,
        PixelFormat::Yuv444p => Pixel::YUV444P,
        PixelFormat::Yuv420p10 => Pixel::YUV420P10LE,
        PixelFormat::Yuvj420p => Pixel::YUVJ420P,
        PixelFormat::Bgra => Pixel::BGRA,
        PixelFormat::Rgba => Pixel::RGBA,
        PixelFormat::Rgb24 => Pixel::RGB24,
        PixelFormat::Bgr24 => Pixel::BGR24,
        PixelFormat::Gray8 => Pixel::GRAY8,
    }
}

pub fn field_order_from_ffmpeg(order: AVFieldOrder) -> FieldOrder {
    match order {
        AVFieldOrder::AV_FIELD_UNKNOWN => FieldOrder::Unknown,
        AVFieldOrder::AV_FIELD_PROGRESSIVE => FieldOrder::Progressive,
        AVFieldOrder::AV_FIELD_TT => FieldOrder::TopFirst,
        AVFieldOrder::AV_FIELD_BB => FieldOrder::BottomFirst,
        AVFieldOrder::AV_FIELD_TB => FieldOrder::TopBottom,
        AVFieldOrder::AV_FIELD_BT => FieldOrder::BottomTop,
    }
}

pub fn media_type_from_ffmpeg(medium: media::Type) -> MediaType {
    match medium {
        media::Type::Video => MediaType::Video,
        media::Type::Audio => MediaType::Audio,
        _ => MediaType::None,
    }
}
