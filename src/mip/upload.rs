// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
The seam between a finished chain and whatever copies it into a GPU texture.

A [`LevelSink`] receives `(level, width, height, bytes)` for each level in ascending order,
starting at 0. Row data is tightly packed; any row-pitch padding the destination needs is
the sink's business.

```
use mip_chain::image::Image;
use mip_chain::mip::generate_chain;
use mip_chain::mip::upload::LevelSink;
use mip_chain::pixel_formats::Unorm4;

struct Sizes(Vec<(u32, u16, u16)>);
impl LevelSink for Sizes {
    type Error = std::convert::Infallible;
    fn write_level(&mut self, level: u32, width: u16, height: u16, _bytes: &[u8]) -> Result<(), Self::Error> {
        self.0.push((level, width, height));
        Ok(())
    }
}

let chain = generate_chain(Image::solid(4, 2, Unorm4::WHITE).unwrap());
let mut sink = Sizes(Vec::new());
chain.upload(&mut sink).unwrap();
assert_eq!(sink.0, vec![(0, 4, 2), (1, 2, 1), (2, 1, 1)]);
```
*/

use crate::mip::MipChain;

/// Consumes mip levels, typically by writing each into a mip slice of a GPU texture.
pub trait LevelSink {
    type Error;

    /// Accepts one level. Called with `level` 0, 1, 2, … in order.
    fn write_level(
        &mut self,
        level: u32,
        width: u16,
        height: u16,
        bytes: &[u8],
    ) -> Result<(), Self::Error>;
}

impl<S: LevelSink + ?Sized> LevelSink for &mut S {
    type Error = S::Error;

    fn write_level(
        &mut self,
        level: u32,
        width: u16,
        height: u16,
        bytes: &[u8],
    ) -> Result<(), Self::Error> {
        (**self).write_level(level, width, height, bytes)
    }
}

/// A sink rejected a level.
#[derive(Debug, thiserror::Error)]
#[error("mip level {level} was rejected: {source}")]
pub struct UploadError<E: std::error::Error + 'static> {
    pub level: u32,
    #[source]
    pub source: E,
}

impl MipChain {
    /// Hands every level to `sink`, largest first, stopping at the first error.
    pub fn upload<S: LevelSink>(&self, mut sink: S) -> Result<(), UploadError<S::Error>>
    where
        S::Error: std::error::Error + 'static,
    {
        for (level, image) in self.iter().enumerate() {
            let level = level as u32;
            logwise::trace_sync!(
                "upload: level {level} {w}x{h}",
                level = level,
                w = image.width(),
                h = image.height()
            );
            sink.write_level(level, image.width(), image.height(), image.as_bytes())
                .map_err(|source| UploadError { level, source })?;
        }
        Ok(())
    }
}
