#![allow(dead_code)]

use maps::{BlobLayout, Cell};

/// Appends the bits of `value` (`width` bits, MSB first) to `bits`.
pub fn push_bits(bits: &mut Vec<bool>, value: u8, width: u8) {
    for shift in (0..width).rev() {
        bits.push((value >> shift) & 1 == 1);
    }
}

pub fn cell_code(cell: Cell) -> (u8, u8) {
    match cell {
        Cell::Empty => (0b00, 2),
        Cell::Wall => (0b01, 2),
        Cell::Barrel => (0b10, 2),
        Cell::BarrelSlot => (0b110, 3),
        Cell::BarrelPlaced => (0b111, 3),
    }
}

/// Run-length encodes `cells` the way the level editor packed them.
pub fn encode_cells(cells: &[Cell]) -> Vec<bool> {
    let mut bits = Vec::new();
    let mut rest = cells;
    while let Some(&cell) = rest.first() {
        let run = rest.iter().take(9).take_while(|&&c| c == cell).count();
        if run == 1 {
            bits.push(false);
        } else {
            bits.push(true);
            push_bits(&mut bits, u8::try_from(run - 2).unwrap(), 3);
        }
        let (code, width) = cell_code(cell);
        push_bits(&mut bits, code, width);
        rest = &rest[run..];
    }
    bits
}

pub fn to_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |byte, (i, &bit)| byte | (u8::from(bit) << (7 - i)))
        })
        .collect()
}

pub fn pack_bits(bits: &str) -> Vec<u8> {
    let bits: Vec<bool> = bits
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c == '1')
        .collect();
    to_bytes(&bits)
}

/// One packed map: prolog, stream bytes, epilog.
pub fn packed_map(size_x: u8, size_y: u8, stream: &[u8], man_x: u8, man_y: u8) -> Vec<u8> {
    let mut packed = vec![size_x, size_y];
    packed.extend_from_slice(stream);
    packed.extend_from_slice(&[man_x, man_y]);
    packed
}

/// Lays out packed maps in `layout`, back to back from the data base.
pub fn build_blob(layout: &BlobLayout, maps: &[Vec<u8>]) -> Vec<u8> {
    let mut blob = vec![0u8; layout.blob_len];
    let mut relative = 0usize;
    for (index, packed) in maps.iter().enumerate() {
        let entry = layout.table_base() + index * 2;
        let offset = u16::try_from(relative).unwrap();
        blob[entry..entry + 2].copy_from_slice(&offset.to_le_bytes());
        let at = layout.data_base() + relative;
        blob[at..at + packed.len()].copy_from_slice(packed);
        relative += packed.len();
    }
    blob
}

pub fn single_map_blob(size_x: u8, size_y: u8, bits: &str, man_x: u8, man_y: u8) -> Vec<u8> {
    let layout = BlobLayout::for_testing();
    build_blob(
        &layout,
        &[packed_map(size_x, size_y, &pack_bits(bits), man_x, man_y)],
    )
}
