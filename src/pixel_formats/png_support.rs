// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! PNG decoding and encoding for [`Image`].

use std::io::Cursor;
use std::path::{Path, PathBuf};

use png::{BitDepth, ColorType};

use crate::image::{Image, ImageError, buffer_len};
use crate::pixel_formats::RGBA8UNorm;
use crate::pixel_formats::sealed::PixelFormat;

/// Formats that map directly onto a PNG color type and bit depth.
///
/// # Safety
///
/// The PNG layout must have exactly `BYTES_PER_PIXEL` bytes per pixel in the same
/// channel order as the format's pixel type.
pub(crate) unsafe trait PngPixelFormat: PixelFormat {
    fn png_color_type() -> png::ColorType;
    fn png_bit_depth() -> png::BitDepth;
}

unsafe impl PngPixelFormat for RGBA8UNorm {
    fn png_color_type() -> ColorType {
        ColorType::Rgba
    }

    fn png_bit_depth() -> BitDepth {
        BitDepth::Eight
    }
}

/// Reasons a PNG cannot become an [`Image`] or the other way around.
#[derive(Debug, thiserror::Error)]
pub enum PngError {
    #[error("can't decode PNG: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("can't encode PNG: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("PNG is {color_type:?} at {bit_depth:?}; only 8-bit RGBA is supported")]
    UnsupportedLayout {
        color_type: ColorType,
        bit_depth: BitDepth,
    },
    #[error("PNG is {width}x{height}; images are limited to 65535 pixels per side")]
    TooLarge { width: u32, height: u32 },
    #[error("can't read PNG file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: async_file::Error,
    },
    #[error(transparent)]
    Image(#[from] ImageError),
}

impl Image {
    /// Decodes an 8-bit RGBA PNG.
    ///
    /// # Errors
    ///
    /// Anything other than 8-bit RGBA fails with [`PngError::UnsupportedLayout`]; no color
    /// conversion is attempted.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self, PngError> {
        let decoder = png::Decoder::new(Cursor::new(bytes));
        let mut reader = decoder.read_info()?;
        let (width, height, color_type, bit_depth) = {
            let info = reader.info();
            (info.width, info.height, info.color_type, info.bit_depth)
        };
        if color_type != RGBA8UNorm::png_color_type() || bit_depth != RGBA8UNorm::png_bit_depth()
        {
            return Err(PngError::UnsupportedLayout {
                color_type,
                bit_depth,
            });
        }
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(PngError::TooLarge { width, height });
        };
        logwise::trace_sync!("from_png_bytes: will decode {w}x{h}", w = w, h = h);
        let mut buf = vec![0; buffer_len(w, h)?];
        let frame = reader.next_frame(&mut buf)?;
        buf.truncate(frame.buffer_size());
        Ok(Image::new(w, h, buf)?)
    }

    /// Loads an 8-bit RGBA PNG from disk.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # //this is no_run due to file IO
    /// # async fn example() {
    /// use mip_chain::image::Image;
    /// use std::path::{Path, PathBuf};
    /// # let priority: async_file::Priority = todo!();
    ///
    /// let image = Image::load_png(Path::new("assets/texture.png"), priority).await.unwrap();
    /// # }
    /// ```
    pub async fn load_png(path: &Path, priority: async_file::Priority) -> Result<Self, PngError> {
        let io_error = |source| PngError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = async_file::File::open(path, priority)
            .await
            .map_err(io_error)?;
        let data = file.read_all(priority).await.map_err(io_error)?;
        logwise::info_sync!("load_png: read {len} bytes", len = data.len());
        Self::from_png_bytes(&data)
    }

    /// Encodes the image as an 8-bit RGBA PNG.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, PngError> {
        let mut out = Vec::new();
        {
            let mut encoder =
                png::Encoder::new(&mut out, self.width() as u32, self.height() as u32);
            encoder.set_color(RGBA8UNorm::png_color_type());
            encoder.set_depth(RGBA8UNorm::png_bit_depth());
            let mut writer = encoder.write_header()?;
            writer.write_image_data(self.as_bytes())?;
            writer.finish()?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, Texel};
    use crate::patterns;
    use crate::pixel_formats::Unorm4;

    use super::PngError;

    #[test]
    fn png_round_trip() {
        let image = patterns::blended();
        let bytes = image.to_png_bytes().unwrap();
        let decoded = Image::from_png_bytes(&bytes).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn rejects_non_rgba() {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, 2, 2);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 64, 128, 255]).unwrap();
            writer.finish().unwrap();
        }
        let err = Image::from_png_bytes(&out).unwrap_err();
        assert!(matches!(err, PngError::UnsupportedLayout { .. }));
    }

    #[test]
    fn rejects_garbage() {
        let err = Image::from_png_bytes(b"not a png").unwrap_err();
        assert!(matches!(err, PngError::Decode(_)));
    }

    #[test]
    fn load_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blended.png");
        let image = patterns::blended();
        std::fs::write(&path, image.to_png_bytes().unwrap()).unwrap();

        let loaded =
            test_executors::spin_on(Image::load_png(&path, async_file::Priority::unit_test()))
                .unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn load_png_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        let err = test_executors::spin_on(Image::load_png(&path, async_file::Priority::unit_test()))
            .unwrap_err();
        assert!(std::error::Error::source(&err).is_some());
        match &err {
            PngError::Io { path: failed, .. } => assert_eq!(failed, &path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn keeps_alpha() {
        let image = Image::solid(3, 1, Unorm4 { r: 1, g: 2, b: 3, a: 4 }).unwrap();
        let decoded = Image::from_png_bytes(&image.to_png_bytes().unwrap()).unwrap();
        assert_eq!(decoded.pixel(Texel { x: 2, y: 0 }), Unorm4 { r: 1, g: 2, b: 3, a: 4 });
    }
}
