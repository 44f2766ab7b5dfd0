// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! mip_chain builds complete mip pyramids for RGBA8 textures on the CPU.

Given a base image, the generator produces every successively half-sized level down to 1×1.
Each level is derived from the one before it by a bilinear 2× downsample. The result is
ready to hand, level by level, to whatever uploads it into a mip-mapped GPU texture.

```
use mip_chain::image::Image;
use mip_chain::mip::generate_chain;
use mip_chain::pixel_formats::Unorm4;

let source = Image::solid(16, 16, Unorm4 { r: 255, g: 128, b: 0, a: 255 }).unwrap();
let chain = generate_chain(source);
let sizes: Vec<_> = chain.iter().map(|level| (level.width(), level.height())).collect();
assert_eq!(sizes, vec![(16, 16), (8, 8), (4, 4), (2, 2), (1, 1)]);
```

# Layout

| Module            | Contents                                                      |
|-------------------|---------------------------------------------------------------|
| [`image`]         | The immutable RGBA8 [`Image`](image::Image) and its sampling   |
| [`mip`]           | Chain generation, mip math, batch generation, the upload seam |
| [`pixel_formats`] | The RGBA8 pixel type and PNG support                          |
| [`patterns`]      | Procedural test images                                        |

# Edge sampling

The bilinear filter reads one texel to the right and one below. At the last column or row
there are two behaviors, and they are not interchangeable. See
[`EdgePolicy`](image::sample::EdgePolicy). The default clamps to the image.
*/

pub mod image;
pub mod mip;
pub mod patterns;
pub mod pixel_formats;

pub type Priority = some_executor::Priority;

pub use vec_parallel::Strategy;
