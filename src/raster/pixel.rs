use std::fmt;

/// Three 8-bit channel values.
///
/// Channel order is whatever the source image uses; the codec persists the
/// channels in the same order it receives them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// All channels zero.
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    /// All channels saturated.
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    /// Construct from individual channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb([r, g, b])
    }

    /// Channel values in storage order.
    #[inline]
    pub fn channels(&self) -> [u8; 3] {
        self.0
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(channels: [u8; 3]) -> Self {
        Rgb(channels)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}
