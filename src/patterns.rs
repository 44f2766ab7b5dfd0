// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Procedural test images.

These make mip filtering visible. [`blended`] is a small source image with hard color
edges, so a generated chain shows how colors bleed together as levels shrink.
[`checked`] is the opposite: a chain whose levels are authored independently, each in its
own color, so a renderer sampling the wrong level is obvious at a glance.
*/

use crate::image::Image;
use crate::mip::{ChainError, MipChain, half_size};
use crate::pixel_formats::Unorm4;

const W: Unorm4 = Unorm4::WHITE;
const R: Unorm4 = Unorm4::opaque(255, 0, 0);
const B: Unorm4 = Unorm4::opaque(0, 28, 116);
const Y: Unorm4 = Unorm4::opaque(255, 231, 0);
const G: Unorm4 = Unorm4::opaque(58, 181, 75);
const A: Unorm4 = Unorm4::opaque(38, 123, 167);

const BLENDED_SIZE: u16 = 16;

#[rustfmt::skip]
const BLENDED: [&[u8; 16]; 16] = [
    b"wrrrrrraarrrrrrw",
    b"wwrrrrraarrrrrww",
    b"wwwrrrraarrrrwww",
    b"wwwwrrraarrrwwww",
    b"wwwwwrraarrwwwww",
    b"wwwwwwraarwwwwww",
    b"wwwwwwwaawwwwwww",
    b"bbbbbbbbayyyyyyy",
    b"bbbbbbbgyyyyyyyy",
    b"wwwwwwwggwwwwwww",
    b"wwwwwwrggrwwwwww",
    b"wwwwwrrggrrwwwww",
    b"wwwwrrrggrrrwwww",
    b"wwwrrrrggrrrrwww",
    b"wwrrrrrggrrrrrww",
    b"wrrrrrrggrrrrrrw",
];

fn blended_color(code: u8) -> Unorm4 {
    match code {
        b'r' => R,
        b'b' => B,
        b'y' => Y,
        b'g' => G,
        b'a' => A,
        _ => W,
    }
}

/// A 16×16 image of colored wedges meeting at the center.
///
/// ```
/// use mip_chain::mip::generate_chain;
/// use mip_chain::patterns::blended;
///
/// let chain = generate_chain(blended());
/// assert_eq!(chain.len(), 5);
/// ```
pub fn blended() -> Image {
    let image = Image::new_with(BLENDED_SIZE, BLENDED_SIZE, |texel| {
        blended_color(BLENDED[texel.y as usize][texel.x as usize])
    });
    match image {
        Ok(image) => image,
        Err(e) => unreachable!("blended pattern has fixed nonzero size: {e}"),
    }
}

const CHECKED_SIZE: u16 = 64;

/// Level colors of [`checked`], largest level first.
pub const CHECKED_COLORS: [Unorm4; 7] = [
    Unorm4::opaque(128, 0, 255),
    Unorm4::opaque(0, 255, 0),
    Unorm4::opaque(255, 0, 0),
    Unorm4::opaque(255, 255, 0),
    Unorm4::opaque(0, 0, 255),
    Unorm4::opaque(0, 255, 255),
    Unorm4::opaque(255, 0, 255),
];

/// One level of [`checked`]: the top-left and bottom-right quadrants in `color`, the other
/// two in `background`.
fn checked_level(size: u16, color: Unorm4, background: Unorm4) -> Image {
    let half = size / 2;
    let level = Image::new_with(size, size, |texel| {
        let left = texel.x < half;
        let top = texel.y < half;
        if left == top { color } else { background }
    });
    match level {
        Ok(level) => level,
        Err(e) => unreachable!("checked levels are never empty: {e}"),
    }
}

/// A 64×64 chain whose every level is a two-color checkerboard in its own color.
///
/// Backgrounds alternate white and black from level to level. Level 0 is purple on white
/// and the 1×1 level is a single magenta pixel.
///
/// ```
/// use mip_chain::patterns::checked;
///
/// let chain = checked().unwrap();
/// assert_eq!(chain.len(), 7);
/// assert_eq!(chain.smallest().width(), 1);
/// ```
pub fn checked() -> Result<MipChain, ChainError> {
    let mut levels = Vec::with_capacity(CHECKED_COLORS.len());
    let mut size = CHECKED_SIZE;
    for (i, color) in CHECKED_COLORS.iter().enumerate() {
        let background = if i % 2 == 1 { Unorm4::BLACK } else { Unorm4::WHITE };
        levels.push(checked_level(size, *color, background));
        size = half_size(size, size).0;
    }
    MipChain::from_levels(levels)
}
