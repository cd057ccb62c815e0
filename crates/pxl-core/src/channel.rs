//! Channel descriptors.
//!
//! A [`ChannelDescriptor`] describes where one channel lives inside a
//! pixel and how to interpret its bytes. Descriptors are plain data and
//! are owned by the [`ColorSpace`](crate::ColorSpace) that lists them.

use crate::format::ChannelType;

/// Semantic role of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelRole {
    /// Carries color information (Y, Cb, Cr, Gray).
    Color,
    /// Carries coverage / opacity.
    Alpha,
}

/// Layout and meaning of one channel of a pixel format.
///
/// # Example
///
/// ```rust
/// use pxl_core::{ChannelDescriptor, ChannelRole, ChannelType};
///
/// let cb = ChannelDescriptor::new("Cb", ChannelRole::Color, ChannelType::U16, 2);
/// assert_eq!(cb.size(), 2);
/// assert_eq!(cb.byte_range(), 2..4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelDescriptor {
    name: String,
    role: ChannelRole,
    ty: ChannelType,
    offset: usize,
}

impl ChannelDescriptor {
    /// Creates a descriptor. The byte size follows from `ty`.
    pub fn new(name: impl Into<String>, role: ChannelRole, ty: ChannelType, offset: usize) -> Self {
        Self {
            name: name.into(),
            role,
            ty,
            offset,
        }
    }

    /// Channel name ("Y", "Cb", "Alpha", ...).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semantic role.
    #[inline]
    pub fn role(&self) -> ChannelRole {
        self.role
    }

    /// Numeric kind.
    #[inline]
    pub fn channel_type(&self) -> ChannelType {
        self.ty
    }

    /// Byte offset within the pixel.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte size.
    #[inline]
    pub fn size(&self) -> usize {
        self.ty.bytes()
    }

    /// Byte range `offset..offset + size` within the pixel.
    #[inline]
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.size()
    }

    /// Whether this is the alpha channel.
    #[inline]
    pub fn is_alpha(&self) -> bool {
        self.role == ChannelRole::Alpha
    }
}
