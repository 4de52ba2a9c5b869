#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use nbtree::Document;

fuzz_target!(|data: &[u8]| {
    // Проба сжатия и распаковка поверх произвольных байт не паникуют.
    let mut doc = Document::new().with_max_depth(64);
    if doc.load(&mut Cursor::new(data)).is_ok() {
        let mut out = Vec::new();
        let _ = doc.save(&mut out);
    }
});
