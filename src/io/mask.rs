use crate::MAX_CHANNELS;

/// Bitmask of output channels that carry valid audio for a block.
///
/// Bit `n` set means channel `n` was written by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelMask(u8);

impl ChannelMask {
    /// Channels 0 and 1.
    pub const STEREO: Self = Self(0b00_0011);
    /// All six channels.
    pub const SURROUND: Self = Self(0b11_1111);

    /// Mask the engine reports for a given upmix setting.
    pub const fn for_upmix(upmix: bool) -> Self {
        if upmix {
            Self::SURROUND
        } else {
            Self::STEREO
        }
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::SURROUND.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, ch: usize) -> bool {
        ch < MAX_CHANNELS && self.0 & (1 << ch) != 0
    }

    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Indices of the set channels, ascending.
    pub fn channels(self) -> impl Iterator<Item = usize> {
        (0..MAX_CHANNELS).filter(move |&ch| self.contains(ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stereo_mask() {
        let mask = ChannelMask::for_upmix(false);
        assert_eq!(mask.bits(), 0b11);
        assert_eq!(mask.count(), 2);
        assert!(mask.contains(0));
        assert!(mask.contains(1));
        assert!(!mask.contains(2));
    }

    #[test]
    fn test_surround_mask() {
        let mask = ChannelMask::for_upmix(true);
        assert_eq!(mask.bits(), 0b11_1111);
        assert_eq!(mask.channels().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_from_bits_drops_unknown_channels() {
        let mask = ChannelMask::from_bits(0b1100_0001);
        assert_eq!(mask.bits(), 0b1);
        assert!(!mask.contains(7));
    }
}
