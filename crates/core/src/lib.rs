//! Stream descriptors for demuxed video and encoder stream setup for muxing,
//! on top of FFmpeg.
//!
//! Each feature is split into a `domain` layer (plain types, traits and the
//! derivation rules, testable with stubs) and an `infrastructure` layer that
//! implements those traits over `ffmpeg-next`.

pub mod shared {
    pub mod codec;
    pub mod constants;
    pub mod ffmpeg_convert;
    pub mod field_order;
    pub mod media_time;
    pub mod pixel_format;
    pub mod rational;
}

pub mod probe {
    pub mod domain {
        pub mod stream_descriptor;
        pub mod stream_source;
    }
    pub mod infrastructure {
        pub mod ffmpeg_stream_source;
    }
}

pub mod encoding {
    pub mod create_video_stream;
    pub mod domain {
        pub mod codec_options;
        pub mod encoder_config;
        pub mod encoder_stream_error;
        pub mod output_target;
    }
    pub mod infrastructure {
        pub mod ffmpeg_output_container;
    }
}
