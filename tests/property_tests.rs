//! Property-based тесты кодека тегов.
//!
//! Генерируют случайные валидные деревья и проверяют симметрию
//! decode/encode, поведение документа со сжатием и устойчивость декодера к
//! произвольному входу.

use std::io::Cursor;

use nbtree::{
    nbt::{encode::write_named_tag, mutf8},
    read_tag, CompressionMode, Document, NbtError,
};
use proptest::prelude::*;

mod generators;
use generators::*;

const PROPTEST_CASES: u32 = 256;
const PROPTEST_MAX_SHRINK_ITERS: u32 = 10000;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: PROPTEST_CASES,
        max_shrink_iters: PROPTEST_MAX_SHRINK_ITERS,
        .. ProptestConfig::default()
    })]

    /// Главный roundtrip: decode(encode(t)) == t, повторная запись побайтово
    /// совпадает.
    #[test]
    fn roundtrip_preserves_tree_and_bytes(root in root_strategy()) {
        let mut bytes = Vec::new();
        write_named_tag(&mut bytes, &root)
            .map_err(|e| TestCaseError::fail(format!("Failed to encode: {e}")))?;

        let decoded = read_tag(&mut Cursor::new(&bytes))
            .map_err(|e| TestCaseError::fail(format!("Failed to decode: {e}")))?;

        prop_assert_eq!(&decoded.name, &root.name);
        prop_assert!(
            tag_deep_eq(&root.tag, &decoded.tag),
            "Roundtrip failed\nleft: {:?}\nright: {:?}", root.tag, decoded.tag
        );

        let mut again = Vec::new();
        write_named_tag(&mut again, &decoded)
            .map_err(|e| TestCaseError::fail(format!("Failed to re-encode: {e}")))?;
        prop_assert_eq!(again, bytes);
    }

    /// Документ сохраняет дерево и режим для всех видов сжатия.
    #[test]
    fn document_roundtrip_all_modes(
        root in root_strategy(),
        mode in prop_oneof![
            Just(CompressionMode::Gzip),
            Just(CompressionMode::Zlib),
            Just(CompressionMode::Uncompressed),
        ],
    ) {
        let mut doc = Document::with_root(root.name.clone(), root.tag.clone());
        doc.set_compression(mode);

        let mut out = Vec::new();
        doc.save(&mut out)
            .map_err(|e| TestCaseError::fail(format!("Failed to save: {e}")))?;

        let loaded = Document::from_reader(&mut Cursor::new(out))
            .map_err(|e| TestCaseError::fail(format!("Failed to load: {e}")))?;

        prop_assert_eq!(loaded.compression(), mode);
        prop_assert_eq!(loaded.root_name(), Some(root.name.as_str()));
        prop_assert!(tag_deep_eq(&root.tag, loaded.root().unwrap()));
    }

    /// Любой строгий префикс валидной записи даёт Truncated.
    #[test]
    fn strict_prefix_is_truncated(root in root_strategy(), cut in any::<prop::sample::Index>()) {
        let mut bytes = Vec::new();
        write_named_tag(&mut bytes, &root).unwrap();

        let len = cut.index(bytes.len());
        let err = read_tag(&mut Cursor::new(&bytes[..len])).unwrap_err();
        prop_assert!(
            matches!(err, NbtError::Truncated { .. }),
            "expected Truncated for prefix {} of {}, got {:?}", len, bytes.len(), err
        );
    }

    /// Декодер не паникует на произвольном входе.
    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = read_tag(&mut Cursor::new(&bytes));
        let _ = Document::from_reader(&mut Cursor::new(&bytes));
    }

    /// Modified UTF-8: roundtrip и согласованность длины.
    #[test]
    fn mutf8_roundtrip(s in string_strategy()) {
        let encoded = mutf8::encode(&s);
        prop_assert_eq!(encoded.len(), mutf8::encoded_len(&s));
        prop_assert!(!encoded.contains(&0u8));
        let decoded = mutf8::decode(&encoded).unwrap();
        prop_assert_eq!(decoded.as_ref(), s.as_str());
    }
}
