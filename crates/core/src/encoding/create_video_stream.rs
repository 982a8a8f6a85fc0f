use crate::encoding::domain::encoder_config::{CodecChoice, EncoderStreamConfig};
use crate::encoding::domain::encoder_stream_error::EncoderStreamError;
use crate::encoding::domain::output_target::{OutputTarget, VideoStreamSettings};
use crate::shared::codec::{CodecId, MediaType};
use crate::shared::constants::{CRF_OPTION_KEY, PRESET_OPTION_KEY};

/// Adds an open video encoder stream to `target`: validate → resolve codec →
/// find encoder → assemble settings and options → open.
///
/// On success `config.codec_options` holds only the entries the codec did
/// not consume. On failure `config` is left untouched.
pub fn create_video_stream<T: OutputTarget>(
    target: &mut T,
    config: &mut EncoderStreamConfig,
) -> Result<T::Stream, EncoderStreamError> {
    config.validate()?;

    let codec = resolve_codec(target, config.codec)?;

    let encoder = target
        .find_encoder(codec)
        .ok_or(EncoderStreamError::EncoderNotFound { codec })?;
    if encoder.media_type != MediaType::Video {
        return Err(EncoderStreamError::WrongMediaType {
            codec,
            media_type: encoder.media_type,
        });
    }

    let mut options = config.codec_options.clone();
    let crf = config.quality_factor.filter(|_| codec.supports_crf());
    if let Some(crf) = crf {
        options.set(CRF_OPTION_KEY, crf.to_string());
    }
    if codec.supports_preset() {
        options.set(PRESET_OPTION_KEY, config.preset.as_str());
    }

    let settings = VideoStreamSettings {
        codec,
        width: config.width,
        height: config.height,
        time_base: config.framerate.invert(),
        gop_size: config.keyframe_interval,
        pixel_format: config.pixel_format,
        global_header: target.requires_global_header(),
        bitrate: if crf.is_some() {
            None
        } else {
            Some(config.bitrate)
        },
    };

    let (stream, leftovers) = target.open_video_stream(&settings, options)?;

    config.codec_options.apply_unconsumed(leftovers.iter());
    if !config.codec_options.is_empty() {
        let keys: Vec<&str> = config.codec_options.iter().map(|(k, _)| k).collect();
        log::warn!("{} encoder ignored options: {}", codec, keys.join(", "));
    }

    log::info!(
        "Added {} stream ({} via {}): {}x{} @ {} fps, time base {}, gop {}",
        codec,
        settings.pixel_format,
        encoder.name,
        settings.width,
        settings.height,
        config.framerate,
        settings.time_base,
        settings.gop_size,
    );

    Ok(stream)
}

fn resolve_codec<T: OutputTarget>(
    target: &T,
    choice: CodecChoice,
) -> Result<CodecId, EncoderStreamError> {
    let codec = match choice {
        CodecChoice::Explicit(codec) => codec,
        CodecChoice::ContainerDefault => target
            .default_video_codec()
            .ok_or(EncoderStreamError::NoVideoSupport)?,
    };
    if codec == CodecId::Unknown {
        return Err(EncoderStreamError::NoVideoSupport);
    }
    Ok(codec)
}
