//! Gray <-> device RGB conversions.
//!
//! Gray uses the same luma weights as [`ycbcr`](crate::ycbcr), so a gray
//! value and the Y channel of the same RGB color agree.

use crate::ycbcr::luma;
use pxl_core::ChannelValue;

/// Luma of a device RGB triple, clamped to the native range for integers.
#[inline]
pub fn rgb_to_gray<T: ChannelValue>(rgb: [T; 3]) -> T {
    let [r, g, b] = rgb.map(ChannelValue::to_raw);
    T::from_raw(luma(r, g, b))
}

/// Expands a gray value to `(g, g, g)`.
#[inline]
pub fn gray_to_rgb<T: ChannelValue>(gray: T) -> [T; 3] {
    [gray; 3]
}
