use std::sync::{Arc, Weak};

use ffmpeg_next::codec::{self, encoder};
use ffmpeg_next::format::context::Output;
use ffmpeg_next::{ffi, Dictionary};

use crate::encoding::create_video_stream::create_video_stream;
use crate::encoding::domain::codec_options::CodecOptions;
use crate::encoding::domain::encoder_config::EncoderStreamConfig;
use crate::encoding::domain::encoder_stream_error::EncoderStreamError;
use crate::encoding::domain::output_target::{EncoderInfo, OutputTarget, VideoStreamSettings};
use crate::shared::codec::CodecId;
use crate::shared::ffmpeg_convert::{
    codec_id_from_ffmpeg, codec_id_to_ffmpeg, media_type_from_ffmpeg, pixel_format_to_ffmpeg,
    rational_to_ffmpeg,
};
use crate::shared::rational::Rational;

/// Output container opened via ffmpeg-next that hands out encoder streams.
///
/// Streams returned by [`FfmpegOutputContainer::add_video_stream`] stay
/// usable only while the container is alive; afterwards their encoder
/// reports [`EncoderStreamError::ContainerClosed`].
pub struct FfmpegOutputContainer {
    octx: Output,
    liveness: Arc<()>,
}

impl FfmpegOutputContainer {
    pub fn new(octx: Output) -> Self {
        Self {
            octx,
            liveness: Arc::new(()),
        }
    }

    /// Adds and opens a video encoder stream described by `config`.
    ///
    /// On success `config.codec_options` is left holding the options the
    /// encoder did not recognize.
    pub fn add_video_stream(
        &mut self,
        config: &mut EncoderStreamConfig,
    ) -> Result<FfmpegVideoStream, EncoderStreamError> {
        create_video_stream(self, config)
    }

    pub fn output(&self) -> &Output {
        &self.octx
    }

    /// Mutable access for header, packet and trailer writes.
    pub fn output_mut(&mut self) -> &mut Output {
        &mut self.octx
    }

    /// Releases the native context. Outstanding stream handles are detached.
    pub fn into_inner(self) -> Output {
        self.octx
    }
}

impl OutputTarget for FfmpegOutputContainer {
    type Stream = FfmpegVideoStream;

    fn default_video_codec(&self) -> Option<CodecId> {
        // SAFETY: every muxing context carries the output format it was
        // created with.
        let raw = unsafe { (*self.octx.format().as_ptr()).video_codec };
        let id = codec::Id::from(raw);
        (id != codec::Id::None).then(|| codec_id_from_ffmpeg(id))
    }

    fn requires_global_header(&self) -> bool {
        self.octx
            .format()
            .flags()
            .contains(ffmpeg_next::format::Flags::GLOBAL_HEADER)
    }

    fn find_encoder(&self, codec: CodecId) -> Option<EncoderInfo> {
        encoder::find(codec_id_to_ffmpeg(codec)).map(|found| EncoderInfo {
            name: found.name().to_string(),
            media_type: media_type_from_ffmpeg(found.medium()),
        })
    }

    fn open_video_stream(
        &mut self,
        settings: &VideoStreamSettings,
        options: CodecOptions,
    ) -> Result<(FfmpegVideoStream, CodecOptions), EncoderStreamError> {
        let codec_id = settings.codec;
        let found = encoder::find(codec_id_to_ffmpeg(codec_id))
            .ok_or(EncoderStreamError::EncoderNotFound { codec: codec_id })?;

        let open_failed = |reason: String| EncoderStreamError::CodecOpenFailed {
            codec: codec_id,
            reason,
        };

        let mut video = codec::context::Context::new_with_codec(found)
            .encoder()
            .video()
            .map_err(|e| open_failed(e.to_string()))?;

        video.set_width(settings.width);
        video.set_height(settings.height);
        video.set_format(pixel_format_to_ffmpeg(settings.pixel_format));
        video.set_time_base(rational_to_ffmpeg(settings.time_base));
        video.set_frame_rate(Some(rational_to_ffmpeg(settings.time_base.invert())));
        video.set_gop(settings.gop_size);
        if let Some(bitrate) = settings.bitrate {
            video.set_bit_rate(bitrate as usize);
        }
        if settings.global_header {
            video.set_flags(codec::Flags::GLOBAL_HEADER);
        }

        let mut dict = Dictionary::new();
        for (key, value) in options.iter() {
            dict.set(key, value);
        }

        // avcodec_open2 removes the entries it consumes from the dictionary,
        // which the safe open_with wrapper discards.
        let (ret, remaining) = unsafe {
            let mut raw = dict.disown();
            let ret = ffi::avcodec_open2(video.as_mut_ptr(), found.as_ptr(), &mut raw);
            (ret, Dictionary::own(raw))
        };
        if ret < 0 {
            return Err(open_failed(ffmpeg_next::Error::from(ret).to_string()));
        }
        let leftovers: CodecOptions = remaining.iter().collect();

        let mut ost = self
            .octx
            .add_stream(Some(found))
            .map_err(|e| EncoderStreamError::StreamAllocationFailed(e.to_string()))?;
        ost.set_time_base(rational_to_ffmpeg(settings.time_base));
        ost.set_parameters(&video);
        let index = ost.index();

        Ok((
            FfmpegVideoStream {
                index,
                codec: codec_id,
                time_base: settings.time_base,
                encoder: video,
                container: Arc::downgrade(&self.liveness),
            },
            leftovers,
        ))
    }
}

/// An open video encoder bound to one stream of an [`FfmpegOutputContainer`].
pub struct FfmpegVideoStream {
    index: usize,
    codec: CodecId,
    time_base: Rational,
    encoder: encoder::video::Video,
    container: Weak<()>,
}

impl FfmpegVideoStream {
    /// Position of the stream within the output container.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn codec(&self) -> CodecId {
        self.codec
    }

    /// Encoder time base; packets need rescaling to the stream's own time
    /// base, which the muxer may adjust when writing the header.
    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    pub fn is_attached(&self) -> bool {
        self.container.strong_count() > 0
    }

    pub fn encoder(&self) -> Result<&encoder::video::Video, EncoderStreamError> {
        if !self.is_attached() {
            return Err(EncoderStreamError::ContainerClosed);
        }
        Ok(&self.encoder)
    }

    pub fn encoder_mut(&mut self) -> Result<&mut encoder::video::Video, EncoderStreamError> {
        if !self.is_attached() {
            return Err(EncoderStreamError::ContainerClosed);
        }
        Ok(&mut self.encoder)
    }
}
