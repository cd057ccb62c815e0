//! # pxl-color
//!
//! Color conversions for pxl pixel formats.
//!
//! This crate maps the native channels of every [`pxl_core::ColorSpace`]
//! to device RGB and back:
//!
//! - **YCbCr** - fixed-coefficient YCbCr <-> RGB in the native domain
//! - **Gray** - luma with the same coefficients
//! - **Pixel conversion** - 8-bit and normalized RGB, format to format
//! - **Color XML** - single color (de)serialization with a profile name
//!
//! # Architecture
//!
//! ```text
//!                  pxl-color
//!                      |
//!     +-------+--------+--------+
//!     |       |        |        |
//!   ycbcr   gray    convert    xml
//!     |       |        |        |
//!     +-------+--------+--------+
//!                      |
//!                   pxl-core
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use pxl_color::{convert, xml};
//! use pxl_core::PixelFormatRegistry;
//!
//! let registry = PixelFormatRegistry::with_builtin();
//! let cs = registry.get("YCbCrAU8").unwrap();
//!
//! let mut px = [0u8; 4];
//! convert::from_rgb8(&cs, [200, 200, 200], 255, &mut px);
//! assert_eq!(px, [200, 128, 128, 255]);
//!
//! let text = xml::write_color(&cs, &px, Some("sRGB")).unwrap();
//! assert!(text.starts_with("<Color><YCbCr"));
//! ```

#![warn(missing_docs)]

pub mod convert;
pub mod error;
pub mod gray;
pub mod xml;
pub mod ycbcr;

pub use convert::{RgbConvert, convert_pixel, convert_pixels, from_rgb8, to_rgb8};
pub use error::{ColorError, ColorResult};
pub use xml::{ParsedColor, read_color, write_color};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::convert::RgbConvert;
    pub use crate::error::{ColorError, ColorResult};
    pub use crate::gray::{gray_to_rgb, rgb_to_gray};
    pub use crate::ycbcr::{rgb_to_ycbcr, ycbcr_to_rgb};
}
