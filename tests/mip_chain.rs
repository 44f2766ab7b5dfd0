// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use mip_chain::image::sample::EdgePolicy;
use mip_chain::image::{Image, ImageError, Texel};
use mip_chain::mip::{
    MipChain, MipGenerator, generate_chain, generate_chain_from_raw, half_size, level_count,
    level_size,
};
use mip_chain::patterns;
use mip_chain::pixel_formats::Unorm4;

fn sizes(chain: &MipChain) -> Vec<(u16, u16)> {
    chain.iter().map(|l| (l.width(), l.height())).collect()
}

fn spill() -> MipGenerator {
    MipGenerator::builder()
        .edge_policy(EdgePolicy::RowSpill)
        .debug_name("row spill test")
        .build()
}

#[test]
fn sixteen_square() {
    let chain = generate_chain(Image::solid(16, 16, Unorm4::WHITE).unwrap());
    assert_eq!(sizes(&chain), vec![(16, 16), (8, 8), (4, 4), (2, 2), (1, 1)]);
}

#[test]
fn five_by_seven() {
    let chain = generate_chain(Image::solid(5, 7, Unorm4::WHITE).unwrap());
    assert_eq!(sizes(&chain), vec![(5, 7), (2, 3), (1, 1)]);
}

#[test]
fn level_zero_is_the_source() {
    let source = patterns::blended();
    let chain = generate_chain(source.clone());
    assert_eq!(chain.base(), &source);
}

#[test]
fn halving_and_termination() {
    for (w, h) in [(1, 1), (1, 2), (2, 1), (3, 3), (17, 4), (1, 100), (255, 256), (640, 480)] {
        let chain = generate_chain(Image::solid(w, h, Unorm4::BLACK).unwrap());
        assert_eq!(chain.len(), level_count(w, h), "{w}x{h}");
        for pair in chain.levels().windows(2) {
            let expected = half_size(pair[0].width(), pair[0].height());
            assert_eq!((pair[1].width(), pair[1].height()), expected, "{w}x{h}");
        }
        let ones = chain
            .iter()
            .filter(|l| l.width() == 1 && l.height() == 1)
            .count();
        assert_eq!(ones, 1, "{w}x{h}");
        assert_eq!((chain.smallest().width(), chain.smallest().height()), (1, 1));
        for (i, level) in chain.iter().enumerate() {
            assert_eq!(level_size(w, h, i), Some((level.width(), level.height())));
        }
    }
}

#[test]
fn solid_color_survives_every_level() {
    let color = Unorm4 { r: 12, g: 200, b: 77, a: 128 };
    for (w, h) in [(16, 16), (5, 7), (9, 1), (1, 9), (31, 2), (100, 3)] {
        let chain = generate_chain(Image::solid(w, h, color).unwrap());
        for level in &chain {
            assert!(level.is_solid(color), "{w}x{h} level {}x{}", level.width(), level.height());
        }
    }
}

#[test]
fn malformed_buffers_fail() {
    assert_eq!(
        generate_chain_from_raw(4, 4, vec![0; 60]),
        Err(ImageError::InvalidImage {
            width: 4,
            height: 4,
            expected: 64,
            actual: 60
        })
    );
    assert_eq!(
        generate_chain_from_raw(0, 4, Vec::new()),
        Err(ImageError::EmptyImage { width: 0, height: 4 })
    );
    assert!(generate_chain_from_raw(2, 2, vec![9; 16]).is_ok());
}

#[test]
fn blended_first_level() {
    let chain = generate_chain(patterns::blended());
    let level1 = chain.level(1).unwrap();
    // (0,0) blends W R / W W at the center of the block
    assert_eq!(
        level1.pixel(Texel::ZERO),
        Unorm4 { r: 255, g: 191, b: 191, a: 255 }
    );
    // the upper-right corner of level 1 is the mirror image
    assert_eq!(level1.pixel(Texel { x: 7, y: 0 }), level1.pixel(Texel::ZERO));
}

#[test]
fn policies_agree_on_power_of_two_squares() {
    let clamped = generate_chain(patterns::blended());
    let spilled = spill().generate(patterns::blended());
    assert_eq!(clamped, spilled);
}

#[test]
fn policies_differ_on_one_row_levels() {
    let color = Unorm4::opaque(90, 60, 30);
    let source = Image::solid(8, 2, color).unwrap();
    let clamped = generate_chain(source.clone());
    let spilled = spill().generate(source);
    assert_eq!(sizes(&clamped), sizes(&spilled));
    // 8x2 -> 4x1 never leaves the buffer
    assert_eq!(clamped.level(1), spilled.level(1));
    // 4x1 -> 2x1 reads the missing second row
    assert!(spilled.level(2).unwrap().is_solid(Unorm4::ZERO));
    assert!(clamped.level(2).unwrap().is_solid(color));
}

#[test]
fn independent_sources_on_threads() {
    let sources: Vec<Image> = (1..=6u8)
        .map(|i| Image::solid(i as u16 * 7, 13, Unorm4::opaque(i, i, i)).unwrap())
        .collect();
    let sequential: Vec<MipChain> = sources.iter().cloned().map(generate_chain).collect();
    let threaded: Vec<MipChain> = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .cloned()
            .map(|source| scope.spawn(move || generate_chain(source)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(sequential, threaded);
}
