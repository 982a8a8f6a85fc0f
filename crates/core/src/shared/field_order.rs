use serde::{Deserialize, Serialize};

/// Field order of a video stream's frames.
///
/// The two-letter native names read top/bottom field coded first, then
/// displayed first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldOrder {
    #[default]
    Unknown,
    Progressive,
    /// Top coded first, top displayed first.
    TopFirst,
    /// Bottom coded first, bottom displayed first.
    BottomFirst,
    /// Top coded first, bottom displayed first.
    TopBottom,
    /// Bottom coded first, top displayed first.
    BottomTop,
}

impl FieldOrder {
    /// Anything other than progressive or unknown counts as interlaced.
    pub const fn is_interlaced(self) -> bool {
        !matches!(self, Self::Progressive | Self::Unknown)
    }
}
