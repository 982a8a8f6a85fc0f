use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::shared::constants::{TICKS_PER_MICROSECOND, TICKS_PER_SECOND};
use crate::shared::rational::Rational;

/// A signed span of media time counted in 100-nanosecond ticks.
///
/// Native timestamps are integers in a stream-specific time base; every
/// conversion into `MediaTime` goes through [`MediaTime::from_timestamp`] so
/// the arithmetic stays exact until the final rounding to a tick.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MediaTime {
    ticks: i64,
}

impl MediaTime {
    pub const ZERO: MediaTime = MediaTime { ticks: 0 };

    pub const fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    /// Container-level durations are reported in microseconds.
    pub const fn from_micros(micros: i64) -> Self {
        Self {
            ticks: micros.saturating_mul(TICKS_PER_MICROSECOND),
        }
    }

    /// Converts a native tick count expressed in `time_base` units.
    ///
    /// Computes `timestamp * num / den` seconds with 128-bit integer
    /// arithmetic and rounds to the nearest tick. A zero denominator yields
    /// [`MediaTime::ZERO`].
    pub fn from_timestamp(timestamp: i64, time_base: Rational) -> Self {
        if time_base.den == 0 {
            return Self::ZERO;
        }
        let numerator = timestamp as i128 * time_base.num as i128 * TICKS_PER_SECOND as i128;
        let ticks = div_round(numerator, time_base.den as i128);
        Self {
            ticks: ticks.clamp(i64::MIN as i128, i64::MAX as i128) as i64,
        }
    }

    /// Inverse of [`MediaTime::from_timestamp`], rounded to the nearest
    /// native tick.
    pub fn to_timestamp(self, time_base: Rational) -> i64 {
        if time_base.num == 0 {
            return 0;
        }
        let numerator = self.ticks as i128 * time_base.den as i128;
        let denominator = time_base.num as i128 * TICKS_PER_SECOND as i128;
        div_round(numerator, denominator).clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }

    /// Time at which frame `frame` starts for a constant `rate`.
    pub fn from_frame_number(frame: i64, rate: Rational) -> Self {
        Self::from_timestamp(frame, rate.invert())
    }

    /// Nearest frame index at `rate`; zero when the rate is unknown.
    pub fn to_frame_number(self, rate: Rational) -> i64 {
        (self.total_seconds() * rate.to_f64()).round() as i64
    }

    pub const fn ticks(self) -> i64 {
        self.ticks
    }

    pub fn total_seconds(self) -> f64 {
        self.ticks as f64 / TICKS_PER_SECOND as f64
    }

    /// `None` for negative spans, which `std::time::Duration` cannot hold.
    pub fn to_std(self) -> Option<Duration> {
        let ticks = u64::try_from(self.ticks).ok()?;
        let per_second = TICKS_PER_SECOND as u64;
        Some(Duration::new(
            ticks / per_second,
            ((ticks % per_second) * 100) as u32,
        ))
    }
}

impl From<Duration> for MediaTime {
    fn from(duration: Duration) -> Self {
        let ticks = duration.as_nanos() / 100;
        Self {
            ticks: i64::try_from(ticks).unwrap_or(i64::MAX),
        }
    }
}

impl fmt::Display for MediaTime {
    /// `hh:mm:ss.fffffff`, prefixed with `-` for negative spans.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.ticks < 0 { "-" } else { "" };
        let ticks = self.ticks.unsigned_abs();
        let per_second = TICKS_PER_SECOND as u64;
        let fraction = ticks % per_second;
        let seconds = ticks / per_second;
        write!(
            f,
            "{sign}{:02}:{:02}:{:02}.{fraction:07}",
            seconds / 3600,
            (seconds / 60) % 60,
            seconds % 60
        )
    }
}

/// Integer division rounding half away from zero.
fn div_round(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.abs() * 2 >= denominator.abs() {
        if (numerator < 0) != (denominator < 0) {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    }
}
