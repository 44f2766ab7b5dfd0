// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Bilinear sampling of RGBA8 images.

The filter blends the four texels around a sample point: first horizontally on the top pair
and the bottom pair, then vertically between the two results.

```
use mip_chain::image::sample::bilinear_filter;
use mip_chain::pixel_formats::Unorm4;

let black = Unorm4::BLACK;
let white = Unorm4::WHITE;
let mid = bilinear_filter(black, white, black, white, 0.5, 0.0);
assert_eq!(mid, Unorm4::opaque(127, 127, 127));
```
*/

use crate::image::{Image, Texel};
use crate::pixel_formats::Unorm4;

/// How lookups of the right and lower neighbor behave at the last column and row.
///
/// The two policies produce different output whenever a level is one pixel wide or one
/// pixel tall, so they are never substituted for one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum EdgePolicy {
    /// Neighbor coordinates are clamped to `[0, width-1]` × `[0, height-1]`.
    #[default]
    Clamp,
    /// Neighbors are addressed in the flat buffer with no clamping.
    ///
    /// Stepping right from the last column lands on the first pixel of the next row.
    /// Stepping past the end of the buffer yields no sample at all, and a blend with a
    /// missing right-hand operand comes out transparent black. Use this to reproduce
    /// chains from the legacy browser downsampler bit for bit.
    RowSpill,
}

/// Linear interpolation `a + (b - a) * t`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    //truncates toward zero like a store into an 8-bit buffer
    lerp(a as f64, b as f64, t) as u8
}

/// Per-channel [`lerp`] of two pixels, alpha included.
///
/// Alpha is interpolated like any other channel; colors are not weighted by it.
#[inline]
pub fn mix(a: Unorm4, b: Unorm4, t: f64) -> Unorm4 {
    Unorm4 {
        r: lerp_channel(a.r, b.r, t),
        g: lerp_channel(a.g, b.g, t),
        b: lerp_channel(a.b, b.b, t),
        a: lerp_channel(a.a, b.a, t),
    }
}

/// Bilinear blend of four neighboring pixels.
///
/// `t1` weights the horizontal blends (`tl`→`tr`, `bl`→`br`), `t2` the vertical blend
/// between their results.
#[inline]
pub fn bilinear_filter(
    tl: Unorm4,
    tr: Unorm4,
    bl: Unorm4,
    br: Unorm4,
    t1: f64,
    t2: f64,
) -> Unorm4 {
    let top = mix(tl, tr, t1);
    let bottom = mix(bl, br, t1);
    mix(top, bottom, t2)
}

/// A sample position resolved against a source image.
///
/// `texel` is the top-left texel of the 2×2 footprint and `t1`, `t2` the fractional
/// offsets within it, each in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub texel: Texel,
    pub t1: f64,
    pub t2: f64,
}

impl Footprint {
    /// Maps source-space coordinates (`au`, `av`, in pixels, texel centers at `.0`) to the
    /// footprint around them.
    #[inline]
    pub fn new(au: f64, av: f64) -> Self {
        let fx = au.floor();
        let fy = av.floor();
        Footprint {
            //a negative coordinate saturates to 0, which is also where clamping would put it
            texel: Texel {
                x: fx as u16,
                y: fy as u16,
            },
            t1: au - fx,
            t2: av - fy,
        }
    }
}

/// Samples `image` at `footprint` under `policy`.
///
/// # Examples
///
/// ```
/// use mip_chain::image::{Image, Texel};
/// use mip_chain::image::sample::{sample_bilinear, EdgePolicy, Footprint};
/// use mip_chain::pixel_formats::Unorm4;
///
/// let image = Image::new_with(2, 1, |t| if t.x == 0 { Unorm4::BLACK } else { Unorm4::WHITE }).unwrap();
/// let halfway = Footprint { texel: Texel::ZERO, t1: 0.5, t2: 0.0 };
/// assert_eq!(sample_bilinear(&image, halfway, EdgePolicy::Clamp), Unorm4::opaque(127, 127, 127));
/// ```
pub fn sample_bilinear(image: &Image, footprint: Footprint, policy: EdgePolicy) -> Unorm4 {
    match policy {
        EdgePolicy::Clamp => sample_clamped(image, footprint),
        EdgePolicy::RowSpill => sample_spilled(image, footprint).unwrap_or(Unorm4::ZERO),
    }
}

fn sample_clamped(image: &Image, footprint: Footprint) -> Unorm4 {
    let (w, h) = (image.width(), image.height());
    let c11 = footprint.texel.step_clamping(false, false, w, h);
    let c21 = c11.step_clamping(true, false, w, h);
    let c12 = c11.step_clamping(false, true, w, h);
    let c22 = c11.step_clamping(true, true, w, h);
    bilinear_filter(
        image.pixel(c11),
        image.pixel(c21),
        image.pixel(c12),
        image.pixel(c22),
        footprint.t1,
        footprint.t2,
    )
}

/// Returns `None` when the whole result is missing; callers write transparent black.
fn sample_spilled(image: &Image, footprint: Footprint) -> Option<Unorm4> {
    let width = image.width() as usize;
    let base = footprint.texel.y as usize * width + footprint.texel.x as usize;
    let tl = image.pixel_at_offset(base);
    let tr = image.pixel_at_offset(base + 1);
    let bl = image.pixel_at_offset(base + width);
    let br = image.pixel_at_offset(base + width + 1);
    let top = mix_spilled(tl, tr, footprint.t1);
    let bottom = mix_spilled(bl, br, footprint.t1);
    mix_spilled(top, bottom, footprint.t2)
}

#[inline]
fn mix_spilled(a: Option<Unorm4>, b: Option<Unorm4>, t: f64) -> Option<Unorm4> {
    match (a, b) {
        (None, _) => None,
        (Some(_), None) => Some(Unorm4::ZERO),
        (Some(a), Some(b)) => Some(mix(a, b, t)),
    }
}

/// Whether sampling `footprint` under [`EdgePolicy::RowSpill`] reads past the end of the
/// image buffer.
pub(crate) fn spills_past_end(image: &Image, footprint: Footprint) -> bool {
    let width = image.width() as usize;
    let last = (footprint.texel.y as usize + 1) * width + footprint.texel.x as usize + 1;
    last >= width * image.height() as usize
}
