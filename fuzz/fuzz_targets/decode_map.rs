#![no_main]

use libfuzzer_sys::fuzz_target;
use maps::{decode_map, BlobLayout};

fuzz_target!(|data: &[u8]| {
    let layout = BlobLayout::for_testing();
    for index in 0..=layout.map_count {
        if let Ok(map) = decode_map(data, &layout, index) {
            let player = map.player();
            assert_eq!(
                map.cells().len(),
                usize::from(map.size_x()) * usize::from(map.size_y())
            );
            assert_eq!(map.cell(player.x, player.y), Some(maps::Cell::Empty));
            assert!(map.span().end <= data.len());
        }
    }
});
