// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Mip chain generation.

A [`MipChain`] is the base image followed by every successively half-sized level, down to
and including 1×1. Each dimension is halved independently with floor division and never
drops below 1, so a 5×7 image yields 5×7, 2×3, 1×1.

Each level is produced from the previous one by [`next_level`]: every destination pixel
center is mapped back into the source and bilinearly filtered there.

# Examples

```
use mip_chain::image::Image;
use mip_chain::mip::{generate_chain, level_count};
use mip_chain::pixel_formats::Unorm4;

let source = Image::solid(5, 7, Unorm4::opaque(10, 20, 30)).unwrap();
let chain = generate_chain(source);
assert_eq!(chain.len(), level_count(5, 7));
assert!(chain.iter().all(|level| level.is_solid(Unorm4::opaque(10, 20, 30))));
```

Raw buffers are validated before anything is generated:

```
use mip_chain::image::ImageError;
use mip_chain::mip::generate_chain_from_raw;

let err = generate_chain_from_raw(4, 4, vec![0; 63]).unwrap_err();
assert!(matches!(err, ImageError::InvalidImage { .. }));
```
*/

pub mod builder;
pub mod parallel;
pub mod upload;

use std::ops::Range;

use crate::image::sample::{EdgePolicy, Footprint, sample_bilinear, spills_past_end};
use crate::image::{Image, ImageError};
use crate::pixel_formats::BYTES_PER_PIXEL;

pub use builder::MipGeneratorBuilder;

/// Number of levels in the chain of a `width`x`height` image, base level included.
///
/// This is `floor(log2(max(width, height))) + 1`, or 0 when either dimension is 0.
///
/// ```
/// use mip_chain::mip::level_count;
/// assert_eq!(level_count(16, 16), 5);
/// assert_eq!(level_count(512, 256), 10);
/// assert_eq!(level_count(1, 1), 1);
/// ```
pub const fn level_count(width: u16, height: u16) -> usize {
    if width == 0 || height == 0 {
        return 0;
    }
    let largest = if width > height { width } else { height };
    largest.ilog2() as usize + 1
}

/// Size of the next level down from a `width`x`height` level.
#[inline]
pub const fn half_size(width: u16, height: u16) -> (u16, u16) {
    let w = width / 2;
    let h = height / 2;
    (if w == 0 { 1 } else { w }, if h == 0 { 1 } else { h })
}

/// Size of mip `level` of a `width`x`height` base, or `None` past the last level.
///
/// ```
/// use mip_chain::mip::level_size;
/// assert_eq!(level_size(5, 7, 1), Some((2, 3)));
/// assert_eq!(level_size(5, 7, 2), Some((1, 1)));
/// assert_eq!(level_size(5, 7, 3), None);
/// ```
pub fn level_size(width: u16, height: u16, level: usize) -> Option<(u16, u16)> {
    if level >= level_count(width, height) {
        return None;
    }
    let mut size = (width, height);
    for _ in 0..level {
        size = half_size(size.0, size.1);
    }
    Some(size)
}

/// Indices of every level in the chain of a `width`x`height` image.
pub fn mip_range(width: u16, height: u16) -> Range<usize> {
    0..level_count(width, height)
}

/// Whether `value` is a power of two. Zero is not.
pub const fn is_power_of_two(value: u16) -> bool {
    value.is_power_of_two()
}

/// Raises each dimension to at least 1.
pub fn sanitize_size(width: u16, height: u16) -> (u16, u16) {
    (width.max(1), height.max(1))
}

/// Reasons a hand-built chain is rejected by [`MipChain::from_levels`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("a mip chain needs at least one level")]
    Empty,
    #[error("level {level} is {actual:?} but should be {expected:?}")]
    WrongSize {
        level: usize,
        expected: (u16, u16),
        actual: (u16, u16),
    },
    #[error("level {level} follows the 1x1 level")]
    PastEnd { level: usize },
    #[error("chain stops at {last:?} instead of 1x1")]
    Unterminated { last: (u16, u16) },
}

/// A complete mip pyramid.
///
/// Level 0 is the source image. Every later level is exactly half the size of the one
/// before it (floor, minimum 1 per dimension), and the last level is 1×1. A chain is
/// never modified after it has been built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipChain {
    levels: Vec<Image>,
}

impl MipChain {
    /// Assembles a chain from levels built elsewhere, checking the halving and
    /// termination rules.
    ///
    /// Use this for chains whose levels are authored independently rather than
    /// downsampled, like [`patterns::checked`](crate::patterns::checked).
    pub fn from_levels(levels: Vec<Image>) -> Result<Self, ChainError> {
        for (level, pair) in levels.windows(2).enumerate() {
            let level = level + 1;
            let prev = (pair[0].width(), pair[0].height());
            let actual = (pair[1].width(), pair[1].height());
            if prev == (1, 1) {
                return Err(ChainError::PastEnd { level });
            }
            let expected = half_size(prev.0, prev.1);
            if actual != expected {
                return Err(ChainError::WrongSize {
                    level,
                    expected,
                    actual,
                });
            }
        }
        match levels.last().map(|l| (l.width(), l.height())) {
            Some((1, 1)) => Ok(Self { levels }),
            Some(last) => Err(ChainError::Unterminated { last }),
            None => Err(ChainError::Empty),
        }
    }

    /// All levels, largest first.
    #[inline]
    pub fn levels(&self) -> &[Image] {
        &self.levels
    }

    /// The level at `index`, if there is one.
    #[inline]
    pub fn level(&self, index: usize) -> Option<&Image> {
        self.levels.get(index)
    }

    /// Number of levels. Never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false; present for symmetry with [`len`](Self::len).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level 0.
    #[inline]
    pub fn base(&self) -> &Image {
        &self.levels[0]
    }

    /// The 1×1 level.
    #[inline]
    pub fn smallest(&self) -> &Image {
        &self.levels[self.levels.len() - 1]
    }

    /// Iterates levels, largest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Image> {
        self.levels.iter()
    }

    /// Takes the levels out of the chain.
    pub fn into_levels(self) -> Vec<Image> {
        self.levels
    }
}

impl<'a> IntoIterator for &'a MipChain {
    type Item = &'a Image;
    type IntoIter = std::slice::Iter<'a, Image>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

/// Produces the level below `src` with a bilinear 2× downsample.
///
/// For each destination pixel `(x, y)` the center `((x + .5) / dst_w, (y + .5) / dst_h)` is
/// mapped to source pixels as `u * src_w - .5`, and the 2×2 footprint at the floor of that
/// position is blended with the fractional remainder as weights.
pub fn next_level(src: &Image, policy: EdgePolicy) -> Image {
    let (src_w, src_h) = (src.width(), src.height());
    let (dst_w, dst_h) = half_size(src_w, src_h);
    let mut dst = Vec::with_capacity(dst_w as usize * dst_h as usize * BYTES_PER_PIXEL);
    for y in 0..dst_h {
        let v = (y as f64 + 0.5) / dst_h as f64;
        let av = v * src_h as f64 - 0.5;
        for x in 0..dst_w {
            let u = (x as f64 + 0.5) / dst_w as f64;
            let au = u * src_w as f64 - 0.5;
            let footprint = Footprint::new(au, av);
            dst.extend_from_slice(&sample_bilinear(src, footprint, policy).to_bytes());
        }
    }
    Image::from_validated(dst_w, dst_h, dst)
}

/// Whether [`next_level`] under [`EdgePolicy::RowSpill`] reads past the end of `src`.
fn level_spills(src: &Image) -> bool {
    let (src_w, src_h) = (src.width(), src.height());
    let (dst_w, dst_h) = half_size(src_w, src_h);
    //only the last destination row and column can reach the end of the buffer
    let av = (dst_h as f64 - 0.5) / dst_h as f64 * src_h as f64 - 0.5;
    let au = (dst_w as f64 - 0.5) / dst_w as f64 * src_w as f64 - 0.5;
    spills_past_end(src, Footprint::new(au, av))
}

/// Generates mip chains.
///
/// Holds the sampling configuration. Build one with [`MipGenerator::builder`], or use
/// [`MipGenerator::default`] for clamped edges.
///
/// ```
/// use mip_chain::image::Image;
/// use mip_chain::image::sample::EdgePolicy;
/// use mip_chain::mip::MipGenerator;
/// use mip_chain::pixel_formats::Unorm4;
///
/// let generator = MipGenerator::builder()
///     .edge_policy(EdgePolicy::RowSpill)
///     .debug_name("sprite atlas")
///     .build();
/// let chain = generator.generate(Image::solid(8, 8, Unorm4::WHITE).unwrap());
/// assert_eq!(chain.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipGenerator {
    edge_policy: EdgePolicy,
    debug_name: String,
}

impl Default for MipGenerator {
    fn default() -> Self {
        MipGeneratorBuilder::new().build()
    }
}

impl MipGenerator {
    /// Starts configuring a generator.
    pub fn builder() -> MipGeneratorBuilder {
        MipGeneratorBuilder::new()
    }

    pub(crate) fn from_parts(edge_policy: EdgePolicy, debug_name: String) -> Self {
        Self {
            edge_policy,
            debug_name,
        }
    }

    /// The policy used for neighbor lookups at the last row and column.
    pub fn edge_policy(&self) -> EdgePolicy {
        self.edge_policy
    }

    /// The name attached to this generator's log lines.
    pub fn debug_name(&self) -> &str {
        &self.debug_name
    }

    /// Generates the full chain for `source`. `source` becomes level 0.
    pub fn generate(&self, source: Image) -> MipChain {
        let (width, height) = (source.width(), source.height());
        logwise::info_sync!(
            "generate_chain: {name} {w}x{h} -> {levels} levels",
            name = logwise::privacy::LogIt(&self.debug_name),
            w = width,
            h = height,
            levels = level_count(width, height)
        );
        let mut levels = Vec::with_capacity(level_count(width, height));
        let mut current = source;
        while current.width() > 1 || current.height() > 1 {
            if self.edge_policy == EdgePolicy::RowSpill && level_spills(&current) {
                logwise::warn_sync!(
                    "generate_chain: {name} level {level} ({w}x{h}) samples past the end of its source; affected pixels are transparent black",
                    name = logwise::privacy::LogIt(&self.debug_name),
                    level = levels.len() + 1,
                    w = current.width(),
                    h = current.height()
                );
            }
            let next = next_level(&current, self.edge_policy);
            logwise::trace_sync!(
                "generate_chain: level {level} {w}x{h}",
                level = levels.len() + 1,
                w = next.width(),
                h = next.height()
            );
            levels.push(current);
            current = next;
        }
        levels.push(current);
        MipChain { levels }
    }

    /// Validates a raw RGBA8 buffer and generates its chain.
    ///
    /// # Errors
    ///
    /// [`ImageError::EmptyImage`] for a zero dimension, [`ImageError::InvalidImage`] when
    /// `data` is not `width * height * 4` bytes. Nothing is generated in either case.
    pub fn generate_from_raw(
        &self,
        width: u16,
        height: u16,
        data: Vec<u8>,
    ) -> Result<MipChain, ImageError> {
        let source = Image::new(width, height, data).inspect_err(|e| {
            logwise::warn_sync!(
                "generate_chain: {name} rejected source: {err}",
                name = logwise::privacy::LogIt(&self.debug_name),
                err = logwise::privacy::LogIt(e)
            );
        })?;
        Ok(self.generate(source))
    }
}

/// Generates the chain for `source` with clamped edge sampling.
pub fn generate_chain(source: Image) -> MipChain {
    MipGenerator::default().generate(source)
}

/// Validates a raw RGBA8 buffer and generates its chain with clamped edge sampling.
///
/// See [`MipGenerator::generate_from_raw`].
pub fn generate_chain_from_raw(
    width: u16,
    height: u16,
    data: Vec<u8>,
) -> Result<MipChain, ImageError> {
    MipGenerator::default().generate_from_raw(width, height, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Texel;
    use crate::pixel_formats::Unorm4;

    fn sizes(chain: &MipChain) -> Vec<(u16, u16)> {
        chain.iter().map(|l| (l.width(), l.height())).collect()
    }

    #[test]
    fn level_math() {
        assert_eq!(level_count(0, 5), 0);
        assert_eq!(level_count(5, 7), 3);
        assert_eq!(level_count(1024, 1), 11);
        assert_eq!(half_size(1, 9), (1, 4));
        assert_eq!(mip_range(4, 2), 0..3);
        assert!(is_power_of_two(64));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(48));
        assert_eq!(sanitize_size(0, 3), (1, 3));
    }

    #[test]
    fn non_power_of_two_sizes() {
        let chain = generate_chain(Image::solid(5, 7, Unorm4::WHITE).unwrap());
        assert_eq!(sizes(&chain), vec![(5, 7), (2, 3), (1, 1)]);
    }

    #[test]
    fn one_by_one_is_its_own_chain() {
        let source = Image::solid(1, 1, Unorm4::opaque(1, 2, 3)).unwrap();
        let chain = generate_chain(source.clone());
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.base(), &source);
        assert_eq!(chain.smallest(), &source);
    }

    #[test]
    fn two_by_two_averages() {
        // 2x2 -> 1x1 samples exactly the center, t1 = t2 = .5
        let source = Image::new_with(2, 2, |t| match (t.x, t.y) {
            (0, 0) => Unorm4 { r: 0, g: 0, b: 0, a: 0 },
            (1, 0) => Unorm4 { r: 100, g: 0, b: 0, a: 0 },
            (0, 1) => Unorm4 { r: 0, g: 100, b: 0, a: 0 },
            _ => Unorm4 { r: 100, g: 100, b: 200, a: 200 },
        })
        .unwrap();
        let next = next_level(&source, EdgePolicy::Clamp);
        // top: (50, 0, 0, 0), bottom: (50, 100, 100, 100), vertical at .5
        assert_eq!(
            next.pixel(Texel::ZERO),
            Unorm4 { r: 50, g: 50, b: 50, a: 50 }
        );
    }

    #[test]
    fn even_sizes_never_touch_edges() {
        // 4x4 -> 2x2: each destination pixel sits in the middle of a 2x2 block
        let source = Image::new_with(4, 4, |t| {
            let v = ((t.x / 2) + (t.y / 2) * 2) as u8 * 40;
            Unorm4::opaque(v, v, v)
        })
        .unwrap();
        let clamped = next_level(&source, EdgePolicy::Clamp);
        let spilled = next_level(&source, EdgePolicy::RowSpill);
        assert_eq!(clamped, spilled);
        assert_eq!(clamped.pixel(Texel { x: 1, y: 1 }), Unorm4::opaque(120, 120, 120));
        assert!(!level_spills(&source));
    }

    #[test]
    fn single_row_spills() {
        let source = Image::solid(4, 1, Unorm4::WHITE).unwrap();
        assert!(level_spills(&source));
        let spilled = next_level(&source, EdgePolicy::RowSpill);
        assert!(spilled.is_solid(Unorm4::ZERO));
        let clamped = next_level(&source, EdgePolicy::Clamp);
        assert!(clamped.is_solid(Unorm4::WHITE));
    }

    #[test]
    fn from_levels_accepts_generated() {
        let chain = generate_chain(Image::solid(6, 3, Unorm4::BLACK).unwrap());
        let rebuilt = MipChain::from_levels(chain.clone().into_levels()).unwrap();
        assert_eq!(rebuilt, chain);
    }

    #[test]
    fn from_levels_rejects() {
        let img = |w, h| Image::solid(w, h, Unorm4::BLACK).unwrap();
        assert_eq!(MipChain::from_levels(vec![]), Err(ChainError::Empty));
        assert_eq!(
            MipChain::from_levels(vec![img(4, 4), img(1, 1)]),
            Err(ChainError::WrongSize {
                level: 1,
                expected: (2, 2),
                actual: (1, 1)
            })
        );
        assert_eq!(
            MipChain::from_levels(vec![img(4, 4), img(2, 2)]),
            Err(ChainError::Unterminated { last: (2, 2) })
        );
        assert_eq!(
            MipChain::from_levels(vec![img(2, 2), img(1, 1), img(1, 1)]),
            Err(ChainError::PastEnd { level: 2 })
        );
    }
}
