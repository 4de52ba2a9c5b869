#![no_main]

use std::io::Cursor;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nbtree::{nbt::encode::write_named_tag, read_tag_with_depth};

#[derive(Debug, Arbitrary)]
struct DecodeInput {
    data: Vec<u8>,
    max_depth: u8,
}

fuzz_target!(|input: DecodeInput| {
    let max_depth = usize::from(input.max_depth).max(1);

    // Декодер не должен паниковать, а всё принятое должно перезаписываться
    // и читаться обратно в то же дерево.
    if let Ok(root) = read_tag_with_depth(&mut Cursor::new(&input.data), max_depth) {
        let mut out = Vec::new();
        if write_named_tag(&mut out, &root).is_ok() {
            let again = read_tag_with_depth(&mut Cursor::new(&out), max_depth)
                .expect("re-encoded tree must decode");
            let mut out2 = Vec::new();
            write_named_tag(&mut out2, &again).expect("second encode");
            assert_eq!(out, out2);
        }
    }
});
