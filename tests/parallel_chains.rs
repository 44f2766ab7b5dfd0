// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use mip_chain::image::Image;
use mip_chain::mip::parallel::generate_chains;
use mip_chain::mip::{MipChain, MipGenerator};
use mip_chain::patterns;
use mip_chain::pixel_formats::Unorm4;
use mip_chain::{Priority, Strategy};

fn sources() -> Vec<Image> {
    vec![
        patterns::blended(),
        Image::solid(5, 7, Unorm4::opaque(1, 2, 3)).unwrap(),
        Image::new_with(33, 12, |t| Unorm4::opaque(t.x as u8 * 7, t.y as u8 * 20, 0)).unwrap(),
        Image::solid(1, 1, Unorm4::WHITE).unwrap(),
    ]
}

#[test]
fn matches_sequential_in_order() {
    let generator = MipGenerator::default();
    let sequential: Vec<MipChain> = sources()
        .into_iter()
        .map(|s| generator.generate(s))
        .collect();
    let parallel = test_executors::sleep_on(generate_chains(
        &generator,
        sources(),
        Priority::UserInitiated,
        Strategy::One,
    ));
    assert_eq!(parallel, sequential);
}

#[test]
fn keeps_generator_configuration() {
    let generator = MipGenerator::builder()
        .edge_policy(mip_chain::image::sample::EdgePolicy::RowSpill)
        .debug_name("parallel spill")
        .build();
    let source = Image::solid(6, 1, Unorm4::WHITE).unwrap();
    let chains = test_executors::sleep_on(generate_chains(
        &generator,
        vec![source.clone()],
        Priority::UserInitiated,
        Strategy::One,
    ));
    assert_eq!(chains, vec![generator.generate(source)]);
    assert!(chains[0].smallest().is_solid(Unorm4::ZERO));
}
