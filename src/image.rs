// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Immutable RGBA8 images.

An [`Image`] is a rectangular buffer of interleaved 8-bit RGBA pixels with explicit
dimensions. The buffer length always equals `width * height * 4`; this is checked once,
when the image is constructed, and never again.

# Coordinate Systems

- Origin (0, 0) is at the top-left
- X increases to the right
- Y increases downward
- Pixels are stored row-major (Y-major, X-minor), which is the layout GPU uploads expect

# Example

```
use mip_chain::image::{Image, Texel};
use mip_chain::pixel_formats::Unorm4;

// A 4x4 horizontal gradient
let image = Image::new_with(4, 4, |texel| {
    let v = (texel.x * 64) as u8;
    Unorm4::opaque(v, v, v)
}).unwrap();

assert_eq!(image.pixel(Texel { x: 2, y: 3 }), Unorm4::opaque(128, 128, 128));
```
*/

pub mod sample;

use crate::pixel_formats::{BYTES_PER_PIXEL, Unorm4};

/// Reasons an image cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    /// The image has no pixels; no mip chain can start from it.
    #[error("image is empty ({width}x{height})")]
    EmptyImage { width: u16, height: u16 },
    /// The pixel buffer does not match the declared dimensions.
    #[error("{width}x{height} image needs {expected} bytes but the buffer has {actual}")]
    InvalidImage {
        width: u16,
        height: u16,
        expected: u64,
        actual: usize,
    },
}

/// Integer texture coordinates representing a specific pixel location.
///
/// `Texel` uses 16-bit unsigned integers for coordinates, supporting images
/// up to 65535x65535 pixels. The origin (0, 0) is at the top-left corner.
///
/// # Examples
///
/// ```
/// use mip_chain::image::Texel;
///
/// let texel = Texel { x: 10, y: 20 };
/// let origin = Texel::ZERO;
/// assert_eq!(origin.x, 0);
/// assert_eq!(origin.y, 0);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Texel {
    /// X coordinate (horizontal position)
    pub x: u16,
    /// Y coordinate (vertical position)
    pub y: u16,
}

impl Texel {
    /// The origin texel at coordinates (0, 0).
    pub const ZERO: Texel = Texel { x: 0, y: 0 };

    /// Converts texel coordinates to a linear pixel index.
    #[inline]
    pub(crate) const fn vec_offset(&self, width: u16) -> usize {
        width as usize * self.y as usize + self.x as usize
    }

    /// This texel, or its neighbor one step right and/or down, clamped to a
    /// `width`x`height` image.
    #[inline]
    pub(crate) const fn step_clamping(self, right: bool, down: bool, width: u16, height: u16) -> Self {
        let x = self.x.saturating_add(right as u16);
        let y = self.y.saturating_add(down as u16);
        Self {
            x: if x >= width { width - 1 } else { x },
            y: if y >= height { height - 1 } else { y },
        }
    }
}

/// An immutable RGBA8 image.
///
/// Every level of a [`MipChain`](crate::mip::MipChain) is an `Image`, and each one owns
/// its own buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    data: Vec<u8>,
    width: u16,
    height: u16,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Checks that `len` bytes can back a `width`x`height` RGBA8 image.
pub(crate) fn validate(width: u16, height: u16, len: usize) -> Result<(), ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::EmptyImage { width, height });
    }
    let expected = byte_len(width, height);
    if len as u64 != expected {
        return Err(ImageError::InvalidImage {
            width,
            height,
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Bytes in a `width`x`height` RGBA8 image. Computed in `u64`, where it cannot overflow.
#[inline]
pub(crate) const fn byte_len(width: u16, height: u16) -> u64 {
    width as u64 * height as u64 * BYTES_PER_PIXEL as u64
}

/// The buffer length for a `width`x`height` image, if this platform can address it.
pub(crate) fn buffer_len(width: u16, height: u16) -> Result<usize, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::EmptyImage { width, height });
    }
    let expected = byte_len(width, height);
    usize::try_from(expected).map_err(|_| ImageError::InvalidImage {
        width,
        height,
        expected,
        actual: 0,
    })
}

impl Image {
    /// Wraps an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// - [`ImageError::EmptyImage`] if either dimension is zero. This is checked first.
    /// - [`ImageError::InvalidImage`] if `data.len() != width * height * 4`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mip_chain::image::{Image, ImageError};
    ///
    /// let image = Image::new(2, 1, vec![0; 8]).unwrap();
    /// assert_eq!(image.width(), 2);
    ///
    /// let err = Image::new(2, 2, vec![0; 8]).unwrap_err();
    /// assert!(matches!(err, ImageError::InvalidImage { expected: 16, actual: 8, .. }));
    /// ```
    pub fn new(width: u16, height: u16, data: Vec<u8>) -> Result<Self, ImageError> {
        validate(width, height, data.len())?;
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image with pixels initialized by a function.
    ///
    /// # Examples
    ///
    /// ```
    /// use mip_chain::image::Image;
    /// use mip_chain::pixel_formats::Unorm4;
    ///
    /// // Create a checkerboard pattern
    /// let image = Image::new_with(64, 64, |texel| {
    ///     if (texel.x / 8 + texel.y / 8) % 2 == 0 {
    ///         Unorm4::WHITE
    ///     } else {
    ///         Unorm4::BLACK
    ///     }
    /// }).unwrap();
    /// assert_eq!(image.as_bytes().len(), 64 * 64 * 4);
    /// ```
    pub fn new_with<F: Fn(Texel) -> Unorm4>(
        width: u16,
        height: u16,
        initialize_with: F,
    ) -> Result<Self, ImageError> {
        let mut data = Vec::with_capacity(buffer_len(width, height)?);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&initialize_with(Texel { x, y }).to_bytes());
            }
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image with every pixel set to `pixel`.
    pub fn solid(width: u16, height: u16, pixel: Unorm4) -> Result<Self, ImageError> {
        Self::new_with(width, height, |_| pixel)
    }

    /// Builds an image from a buffer the caller guarantees is the right size.
    pub(crate) fn from_validated(width: u16, height: u16, data: Vec<u8>) -> Self {
        debug_assert!(validate(width, height, data.len()).is_ok());
        Self {
            data,
            width,
            height,
        }
    }

    /// Returns the width of the image in pixels.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Returns the height of the image in pixels.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The raw pixel data, row-major, 4 bytes per pixel.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Takes the raw pixel data out of the image.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Reads the pixel at `texel`.
    ///
    /// # Panics
    ///
    /// Panics if `texel` is outside the image.
    #[inline]
    pub fn pixel(&self, texel: Texel) -> Unorm4 {
        assert!(
            texel.x < self.width && texel.y < self.height,
            "texel ({},{}) outside {}x{} image",
            texel.x,
            texel.y,
            self.width,
            self.height
        );
        self.pixel_at_offset(texel.vec_offset(self.width))
            .expect("offset was bounds checked")
    }

    /// Reads the pixel at `texel`, or `None` when it is outside the image.
    #[inline]
    pub fn try_pixel(&self, texel: Texel) -> Option<Unorm4> {
        if texel.x < self.width && texel.y < self.height {
            self.pixel_at_offset(texel.vec_offset(self.width))
        } else {
            None
        }
    }

    /// Reads the pixel at a linear pixel index into the flat buffer, without any regard
    /// for row boundaries.
    #[inline]
    pub(crate) fn pixel_at_offset(&self, pixel_index: usize) -> Option<Unorm4> {
        let start = pixel_index.checked_mul(BYTES_PER_PIXEL)?;
        let bytes = self.data.get(start..start + BYTES_PER_PIXEL)?;
        Some(Unorm4::from_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Iterates the pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Unorm4> + '_ {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|c| Unorm4::from_bytes([c[0], c[1], c[2], c[3]]))
    }

    /// Whether every pixel equals `pixel`.
    pub fn is_solid(&self, pixel: Unorm4) -> bool {
        self.pixels().all(|p| p == pixel)
    }
}
