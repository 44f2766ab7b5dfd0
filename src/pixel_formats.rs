// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Pixel format definitions for mip chain images.
//!
//! Every image in this crate is 8-bit RGBA, tightly packed and interleaved. The format is
//! described by the zero-sized [`RGBA8UNorm`] type and a single pixel is a [`Unorm4`].
//!
//! # Examples
//!
//! ```
//! use mip_chain::pixel_formats::Unorm4;
//!
//! // Create a red pixel
//! let red_pixel = Unorm4 { r: 255, g: 0, b: 0, a: 255 };
//! assert_eq!(red_pixel.to_bytes(), [255, 0, 0, 255]);
//! ```

/*
Only one format is implemented.  The format is still a type rather than a constant so the
PNG layer can ask it for its color type and bit depth, the same way a second format would.
 */
pub(crate) mod png_support;

use crate::pixel_formats::sealed::PixelFormat;

pub use png_support::PngError;

/// Sealed traits for pixel format type safety.
pub(crate) mod sealed {
    use std::fmt::Debug;

    /// Core trait for pixel format types.
    ///
    /// This trait is sealed and cannot be implemented outside this crate.
    pub trait PixelFormat: Debug + Send + Sync + 'static {
        /// Number of bytes per pixel for this format.
        const BYTES_PER_PIXEL: u8;
    }
}

/// Number of bytes in one RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = RGBA8UNorm::BYTES_PER_PIXEL as usize;

/// C-compatible RGBA pixel with 8-bit normalized unsigned values.
///
/// This is the pixel type for [`RGBA8UNorm`]. Values range from 0-255 and are interpreted
/// as 0.0-1.0 when sampled on the GPU.
///
/// # Examples
///
/// ```
/// use mip_chain::pixel_formats::Unorm4;
///
/// let opaque_red = Unorm4 { r: 255, g: 0, b: 0, a: 255 };
/// let again = Unorm4::from_bytes([255, 0, 0, 255]);
/// assert_eq!(opaque_red, again);
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Unorm4 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Unorm4 {
    /// Transparent black.
    pub const ZERO: Unorm4 = Unorm4 {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };
    /// Opaque white.
    pub const WHITE: Unorm4 = Unorm4::opaque(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Unorm4 = Unorm4::opaque(0, 0, 0);

    /// Creates a pixel with full alpha.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Unorm4 { r, g, b, a: 255 }
    }

    /// Reads a pixel from its in-memory byte order (R, G, B, A).
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Unorm4 {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            a: bytes[3],
        }
    }

    /// The pixel in its in-memory byte order (R, G, B, A).
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// 8-bit normalized unsigned integer format with RGBA channels.
///
/// The most common texture format for color images. Each channel uses 8 bits
/// (0-255 mapped to 0.0-1.0). Total size is 4 bytes per pixel.
#[derive(Debug, Clone)]
pub struct RGBA8UNorm;
impl PixelFormat for RGBA8UNorm {
    const BYTES_PER_PIXEL: u8 = 4;
}
