//! Borrowed pixel and mask buffer views.
//!
//! The compositing core never owns pixel memory. A paint device hands out
//! raw byte rows with a known stride, and these views interpret them
//! through a [`ColorSpace`]:
//!
//! - [`PixelView`] - immutable source pixels
//! - [`PixelViewMut`] - mutable destination pixels
//! - [`MaskView`] - one 8-bit coverage value per pixel
//!
//! # Memory Layout
//!
//! Rows are contiguous and may carry padding; the last row only needs
//! `width * pixel_size` bytes:
//!
//! ```text
//! |<------------- stride ------------->|
//! [px px px px px ... px][  padding   ]  <- row 0
//! [px px px px px ... px][  padding   ]  <- row 1
//! [px px px px px ... px]                <- last row
//! ```
//!
//! # Example
//!
//! ```rust
//! use pxl_core::{ColorSpace, PixelView};
//!
//! let cs = ColorSpace::gray_u8();
//! let data = vec![0u8; 2 * 4 + 3]; // 2 rows, stride 5 (4 + 1 padding)
//! let view = PixelView::new(&data[..9], 5, 2, 2, &cs).unwrap();
//! assert_eq!(view.stride(), 5);
//! assert!(PixelView::new(&data[..8], 5, 2, 2, &cs).is_err());
//! ```

use crate::colorspace::ColorSpace;
use crate::error::{Error, Result};

/// Minimum buffer length for `height` rows of `row_bytes` at `stride`, or
/// `None` if it does not fit in `usize`.
#[inline]
fn required_len(stride: usize, row_bytes: usize, height: u32) -> Option<usize> {
    match height {
        0 => Some(0),
        h => stride.checked_mul(h as usize - 1)?.checked_add(row_bytes),
    }
}

fn validate(len: usize, stride: usize, width: u32, height: u32, pixel_size: usize) -> Result<()> {
    let Some(min_stride) = (width as usize).checked_mul(pixel_size) else {
        return Err(Error::BufferTooShort { len, required: usize::MAX });
    };
    if stride < min_stride {
        return Err(Error::InvalidStride {
            stride,
            min_stride,
            width,
        });
    }
    match required_len(stride, min_stride, height) {
        Some(required) if len >= required => Ok(()),
        Some(required) => Err(Error::BufferTooShort { len, required }),
        None => Err(Error::BufferTooShort { len, required: usize::MAX }),
    }
}

/// Immutable view of pixel rows laid out per a [`ColorSpace`].
#[derive(Debug, Clone, Copy)]
pub struct PixelView<'a> {
    data: &'a [u8],
    stride: usize,
    width: u32,
    height: u32,
    cs: &'a ColorSpace,
}

impl<'a> PixelView<'a> {
    /// Creates a view, checking stride and buffer length.
    pub fn new(data: &'a [u8], stride: usize, width: u32, height: u32, cs: &'a ColorSpace) -> Result<Self> {
        validate(data.len(), stride, width, height, cs.pixel_size())?;
        Ok(Self {
            data,
            stride,
            width,
            height,
            cs,
        })
    }

    /// Creates a tightly packed view (`stride == width * pixel_size`).
    pub fn packed(data: &'a [u8], width: u32, height: u32, cs: &'a ColorSpace) -> Result<Self> {
        Self::new(data, width as usize * cs.pixel_size(), width, height, cs)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel format.
    #[inline]
    pub fn color_space(&self) -> &'a ColorSpace {
        self.cs
    }

    /// Underlying bytes, starting at the first pixel of row 0.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

/// Mutable view of pixel rows laid out per a [`ColorSpace`].
#[derive(Debug)]
pub struct PixelViewMut<'a> {
    data: &'a mut [u8],
    stride: usize,
    width: u32,
    height: u32,
    cs: &'a ColorSpace,
}

impl<'a> PixelViewMut<'a> {
    /// Creates a view, checking stride and buffer length.
    pub fn new(data: &'a mut [u8], stride: usize, width: u32, height: u32, cs: &'a ColorSpace) -> Result<Self> {
        validate(data.len(), stride, width, height, cs.pixel_size())?;
        Ok(Self {
            data,
            stride,
            width,
            height,
            cs,
        })
    }

    /// Creates a tightly packed view (`stride == width * pixel_size`).
    pub fn packed(data: &'a mut [u8], width: u32, height: u32, cs: &'a ColorSpace) -> Result<Self> {
        let stride = width as usize * cs.pixel_size();
        Self::new(data, stride, width, height, cs)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel format.
    #[inline]
    pub fn color_space(&self) -> &'a ColorSpace {
        self.cs
    }

    /// Underlying bytes, mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.data
    }
}

/// View of an 8-bit coverage mask.
#[derive(Debug, Clone, Copy)]
pub struct MaskView<'a> {
    data: &'a [u8],
    stride: usize,
    width: u32,
    height: u32,
}

impl<'a> MaskView<'a> {
    /// Creates a mask view, checking stride and buffer length.
    pub fn new(data: &'a [u8], stride: usize, width: u32, height: u32) -> Result<Self> {
        validate(data.len(), stride, width, height, 1)?;
        Ok(Self {
            data,
            stride,
            width,
            height,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Underlying bytes.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}
