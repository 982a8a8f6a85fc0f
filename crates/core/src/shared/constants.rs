/// `MediaTime` resolution: 100-nanosecond ticks.
pub const TICKS_PER_SECOND: i64 = 10_000_000;
pub const TICKS_PER_MICROSECOND: i64 = 10;

/// Codec-private option carrying the constant rate factor.
pub const CRF_OPTION_KEY: &str = "crf";
/// Codec-private option carrying the speed/compression preset name.
pub const PRESET_OPTION_KEY: &str = "preset";

pub const DEFAULT_FRAMERATE: i32 = 30;
pub const DEFAULT_KEYFRAME_INTERVAL: u32 = 12;
pub const DEFAULT_BITRATE: u64 = 5_000_000;
