//! Channel-selection flags.
//!
//! A fixed-width bitmask with one bit per channel index, telling the
//! compositing operators which channels they may modify. The empty set
//! means "all channels".

/// Maximum number of channels a [`ChannelFlags`] can address.
pub const MAX_CHANNELS: usize = 8;

/// Bit set of channel indices that compositing may modify.
///
/// # Example
///
/// ```rust
/// use pxl_core::ChannelFlags;
///
/// let all = ChannelFlags::ALL;
/// assert_eq!(all, ChannelFlags::default());
/// assert!(all.contains(3));
///
/// // Y and Cb only; alpha (index 3) is locked.
/// let flags = ChannelFlags::from_indices(&[0, 1]);
/// assert!(flags.contains(1));
/// assert!(!flags.contains(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChannelFlags(u8);

impl ChannelFlags {
    /// Empty set, i.e. every channel is enabled.
    pub const ALL: Self = Self(0);

    /// Builds a set enabling the listed channel indices.
    ///
    /// # Panics
    ///
    /// Panics if an index is not below [`MAX_CHANNELS`].
    pub fn from_indices(indices: &[usize]) -> Self {
        let mut bits = 0u8;
        for &i in indices {
            assert!(i < MAX_CHANNELS, "channel index {i} out of range");
            bits |= 1 << i;
        }
        Self(bits)
    }

    /// Whether channel `index` may be modified.
    #[inline]
    pub const fn contains(&self, index: usize) -> bool {
        self.0 == 0 || (index < MAX_CHANNELS && self.0 & (1 << index) != 0)
    }

    /// Whether these flags lock the alpha channel at `alpha_index`.
    ///
    /// Alpha is locked when the set is non-empty and excludes it.
    #[inline]
    pub fn locks_alpha(&self, alpha_index: Option<usize>) -> bool {
        match alpha_index {
            Some(i) => !self.contains(i),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_means_all() {
        let f = ChannelFlags::default();
        for i in 0..MAX_CHANNELS {
            assert!(f.contains(i));
        }
        assert!(!f.locks_alpha(Some(3)));
    }

    #[test]
    fn test_alpha_lock() {
        let f = ChannelFlags::from_indices(&[0, 1, 2]);
        assert!(f.locks_alpha(Some(3)));
        assert!(!ChannelFlags::from_indices(&[0, 3]).locks_alpha(Some(3)));
        assert!(!f.locks_alpha(None));
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range() {
        ChannelFlags::from_indices(&[8]);
    }
}
