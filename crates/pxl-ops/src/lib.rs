//! # pxl-ops
//!
//! Compositing operators for pxl pixel formats.
//!
//! Operators blend source pixels into destination pixels in place, in the
//! native channel domain of the pixel format (no conversion to a working
//! space).
//!
//! # Modules
//!
//! - [`composite`] - operators, the region dispatcher and the checked entry
//! - [`parallel`] - the same dispatcher over Rayon row bands (feature `parallel`)
//!
//! # Example
//!
//! ```rust
//! use pxl_core::{ChannelFlags, PixelFormatRegistry};
//! use pxl_ops::{CompositeOp, composite_region};
//!
//! let registry = PixelFormatRegistry::with_builtin();
//! let cs = registry.get("GRAYA").unwrap();
//!
//! // 2x1 region, opaque destination, half-covered white source
//! let mut dst = vec![0u8, 255, 0, 255];
//! let src = vec![255u8, 255, 255, 255];
//! let mask = [255u8, 0];
//!
//! let op = CompositeOp::from_name("normal");
//! composite_region(&cs, op, &mut dst, 4, &src, 4, Some((&mask[..], 2)), 255, 1, 2, ChannelFlags::ALL);
//! assert_eq!(dst, vec![255, 255, 0, 255]);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - enables [`parallel`] via `rayon`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod composite;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use composite::{CompositeOp, MissingAlpha, composite, composite_packed, composite_region};
pub use error::{OpsError, OpsResult};
