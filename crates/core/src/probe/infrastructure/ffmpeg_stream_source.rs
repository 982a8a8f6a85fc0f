use ffmpeg_next::ffi;
use ffmpeg_next::format::context::Input;
use ffmpeg_next::format::stream::Stream;

use crate::probe::domain::stream_descriptor::StreamDescriptor;
use crate::probe::domain::stream_source::StreamSource;
use crate::shared::codec::CodecId;
use crate::shared::ffmpeg_convert::{
    codec_id_from_ffmpeg, field_order_from_ffmpeg, pixel_format_from_raw, rational_from_ffmpeg,
};
use crate::shared::field_order::FieldOrder;
use crate::shared::pixel_format::PixelFormat;
use crate::shared::rational::Rational;

/// Reads stream facts from an input container opened via ffmpeg-next.
///
/// Borrows the container, so the source (and anything derived from its
/// raw pointers) cannot outlive it.
pub struct FfmpegStreamSource<'a> {
    stream: Stream<'a>,
    container_duration: i64,
}

impl<'a> FfmpegStreamSource<'a> {
    /// `None` if the container has no stream at `index`.
    pub fn new(input: &'a Input, index: usize) -> Option<Self> {
        let stream = input.stream(index)?;
        Some(Self {
            stream,
            container_duration: input.duration(),
        })
    }

    /// The stream FFmpeg ranks best among the container's video streams.
    pub fn best_video(input: &'a Input) -> Option<Self> {
        let index = input.streams().best(ffmpeg_next::media::Type::Video)?.index();
        Self::new(input, index)
    }

    pub fn describe(&self) -> StreamDescriptor {
        StreamDescriptor::from_source(self)
    }

    fn parameters(&self) -> &ffi::AVCodecParameters {
        // SAFETY: codecpar is allocated with the stream and lives as long as
        // the borrowed input context.
        unsafe { &*self.stream.parameters().as_ptr() }
    }
}

impl StreamSource for FfmpegStreamSource<'_> {
    fn index(&self) -> usize {
        self.stream.index()
    }

    fn codec_id(&self) -> CodecId {
        codec_id_from_ffmpeg(self.stream.parameters().id())
    }

    fn codec_name(&self) -> String {
        self.stream.parameters().id().name().to_string()
    }

    fn field_order(&self) -> FieldOrder {
        field_order_from_ffmpeg(self.parameters().field_order)
    }

    fn frame_size(&self) -> (u32, u32) {
        let par = self.parameters();
        (par.width.max(0) as u32, par.height.max(0) as u32)
    }

    fn pixel_format(&self) -> PixelFormat {
        pixel_format_from_raw(self.parameters().format)
    }

    fn time_base(&self) -> Rational {
        rational_from_ffmpeg(self.stream.time_base())
    }

    fn real_frame_rate(&self) -> Rational {
        rational_from_ffmpeg(self.stream.rate())
    }

    fn avg_frame_rate(&self) -> Rational {
        rational_from_ffmpeg(self.stream.avg_frame_rate())
    }

    fn start_time(&self) -> Option<i64> {
        let start = self.stream.start_time();
        (start != ffi::AV_NOPTS_VALUE).then_some(start)
    }

    fn duration(&self) -> Option<i64> {
        let duration = self.stream.duration();
        (duration >= 0).then_some(duration)
    }

    fn frame_count(&self) -> Option<u64> {
        let frames = self.stream.frames();
        (frames > 0).then_some(frames as u64)
    }

    fn container_duration(&self) -> Option<i64> {
        (self.container_duration != ffi::AV_NOPTS_VALUE).then_some(self.container_duration)
    }

    fn metadata(&self) -> Vec<(String, String)> {
        self.stream
            .metadata()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::encoding::domain::encoder_config::{CodecChoice, EncoderStreamConfig};
    use crate::encoding::infrastructure::ffmpeg_output_container::{
        FfmpegOutputContainer, FfmpegVideoStream,
    };
    use crate::shared::ffmpeg_convert::rational_to_ffmpeg;

    /// Writes `num_frames` grey MPEG-4 frames through the crate's own encoder path.
    fn create_test_video(path: &Path, num_frames: usize, width: u32, height: u32, fps: i32) {
        let codec = CodecChoice::Explicit(CodecId::Mpeg4);
        write_grey_frames(path, codec, num_frames, width, height, fps);
    }

    fn write_grey_frames(
        path: &Path,
        codec: CodecChoice,
        num_frames: usize,
        width: u32,
        height: u32,
        fps: i32,
    ) {
        ffmpeg_next::init().unwrap();
        let _ = env_logger::builder().is_test(true).try_init();

        let octx = ffmpeg_next::format::output(path).unwrap();
        let mut container = FfmpegOutputContainer::new(octx);

        let mut config =
            EncoderStreamConfig::new(width, height, Rational::new(fps, 1)).with_codec(codec);
        let mut stream = container.add_video_stream(&mut config).unwrap();

        let encoder_time_base = stream.time_base();
        container.output_mut().write_header().unwrap();
        let ost_time_base = container
            .output()
            .stream(stream.index())
            .unwrap()
            .time_base();

        for i in 0..num_frames {
            let mut frame = ffmpeg_next::util::frame::video::Video::new(
                ffmpeg_next::format::Pixel::YUV420P,
                width,
                height,
            );
            for plane in 0..3 {
                frame.data_mut(plane).fill(128);
            }
            frame.set_pts(Some(i as i64));
            stream.encoder_mut().unwrap().send_frame(&frame).unwrap();
            drain(&mut container, &mut stream, encoder_time_base, ost_time_base);
        }

        stream.encoder_mut().unwrap().send_eof().unwrap();
        drain(&mut container, &mut stream, encoder_time_base, ost_time_base);
        container.output_mut().write_trailer().unwrap();
    }

    fn drain(
        container: &mut FfmpegOutputContainer,
        stream: &mut FfmpegVideoStream,
        encoder_time_base: Rational,
        ost_time_base: ffmpeg_next::Rational,
    ) {
        let index = stream.index();
        let mut encoded = ffmpeg_next::Packet::empty();
        while stream
            .encoder_mut()
            .unwrap()
            .receive_packet(&mut encoded)
            .is_ok()
        {
            encoded.set_stream(index);
            encoded.rescale_ts(rational_to_ffmpeg(encoder_time_base), ost_time_base);
            encoded
                .write_interleaved(container.output_mut())
                .unwrap();
        }
    }

    #[test]
    fn test_describes_written_video() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.mp4");
        create_test_video(&path, 10, 160, 120, 25);

        let input = ffmpeg_next::format::input(&path).unwrap();
        let source = FfmpegStreamSource::best_video(&input).unwrap();
        let d = source.describe();

        assert_eq!(d.index(), 0);
        assert_eq!(d.codec_id(), CodecId::Mpeg4);
        assert_eq!(d.codec_name(), "mpeg4");
        assert_eq!(d.frame_size(), (160, 120));
        assert_eq!(d.pixel_format(), PixelFormat::Yuv420p);
        assert!(!d.is_interlaced());
        assert!(d.duration().total_seconds() > 0.0);
        assert!(d.start_time().ticks() >= 0);
    }

    #[test]
    fn test_mp4_reports_frame_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("count.mp4");
        create_test_video(&path, 12, 160, 120, 30);

        let input = ffmpeg_next::format::input(&path).unwrap();
        let d = FfmpegStreamSource::best_video(&input).unwrap().describe();

        assert!(d.is_frame_count_from_container());
        assert_eq!(d.frame_count(), 12);
    }

    #[test]
    fn test_raw_values_follow_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.mp4");
        create_test_video(&path, 5, 160, 120, 30);

        let input = ffmpeg_next::format::input(&path).unwrap();
        let source = FfmpegStreamSource::new(&input, 0).unwrap();
        let stream = input.stream(0).unwrap();

        assert_eq!(source.time_base(), rational_from_ffmpeg(stream.time_base()));
        assert_eq!(source.real_frame_rate(), rational_from_ffmpeg(stream.rate()));
        assert_eq!(source.duration(), Some(stream.duration()));
        assert_eq!(source.container_duration(), Some(input.duration()));
    }

    #[test]
    fn test_missing_stream_index_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one_stream.mp4");
        create_test_video(&path, 1, 160, 120, 30);

        let input = ffmpeg_next::format::input(&path).unwrap();
        assert!(FfmpegStreamSource::new(&input, 5).is_none());
    }

    #[test]
    fn test_transport_stream_frame_count_is_estimated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_count.ts");
        write_grey_frames(&path, CodecChoice::ContainerDefault, 50, 160, 120, 25);

        let input = ffmpeg_next::format::input(&path).unwrap();
        let source = FfmpegStreamSource::best_video(&input).unwrap();
        assert_eq!(source.frame_count(), None);

        let d = source.describe();
        assert_eq!(d.codec_id(), CodecId::Mpeg2Video);
        assert!(!d.is_frame_count_from_container());
        let expected = (d.duration().total_seconds() * d.avg_frame_rate()).round() as u64;
        assert_eq!(d.frame_count(), expected);
        assert!(d.frame_count() > 0);
    }

    #[test]
    fn test_codec_without_named_variant_keeps_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.flv");
        write_grey_frames(&path, CodecChoice::ContainerDefault, 5, 160, 120, 25);

        let input = ffmpeg_next::format::input(&path).unwrap();
        let d = FfmpegStreamSource::best_video(&input).unwrap().describe();

        assert_eq!(d.codec_id(), CodecId::Other("flv1"));
        assert_eq!(d.codec_name(), "flv1");
        assert_eq!(d.pixel_format(), PixelFormat::Yuv420p);
    }
}
