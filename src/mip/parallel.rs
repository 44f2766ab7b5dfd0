// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Generates chains for many independent images at once.

Each source gets its own job; jobs share the sources read-only and own their outputs, so
there is nothing to coordinate between them.

```
use mip_chain::image::Image;
use mip_chain::mip::MipGenerator;
use mip_chain::mip::parallel::generate_chains;
use mip_chain::pixel_formats::Unorm4;
use mip_chain::{Priority, Strategy};

test_executors::sleep_on(async {
    let sources = vec![
        Image::solid(64, 64, Unorm4::WHITE).unwrap(),
        Image::solid(3, 9, Unorm4::BLACK).unwrap(),
    ];
    let chains = generate_chains(&MipGenerator::default(), sources, Priority::UserInitiated, Strategy::One).await;
    assert_eq!(chains[0].len(), 7);
    assert_eq!(chains[1].len(), 4);
});
```
*/

use std::sync::Arc;

use some_executor::hint::Hint;

use crate::Strategy;
use crate::image::Image;
use crate::mip::{MipChain, MipGenerator};

/// Generates one chain per source on the current executor.
///
/// The returned chains are in the same order as `sources`.
pub async fn generate_chains(
    generator: &MipGenerator,
    sources: Vec<Image>,
    priority: some_executor::Priority,
    strategy: Strategy,
) -> Vec<MipChain> {
    let len = sources.len();
    logwise::info_sync!(
        "generate_chains: {name} {count} sources",
        name = logwise::privacy::LogIt(generator.debug_name()),
        count = len
    );
    let sources = Arc::new(sources);
    let job_generator = generator.clone();
    let build_vec = vec_parallel::build_vec(len, strategy, move |index| {
        job_generator.generate(sources[index].clone())
    });
    let mut clone_box = some_executor::current_executor::current_executor();

    let f = build_vec.spawn_on(&mut clone_box, priority, Hint::CPU);

    f.await
}
