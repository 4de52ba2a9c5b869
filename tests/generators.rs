//! Генераторы для property-based тестирования дерева тегов.
//!
//! Деревья всегда валидны: списки однородны, `TAG_End` встречается только
//! как тип элементов пустого списка.

#![allow(dead_code)]

use std::ops::Range;

use nbtree::{NamedTag, Tag, TagCompound, TagKind, TagList};
use proptest::{collection::vec, prelude::*, string::string_regex};

const SMALL_SIZE: Range<usize> = 0..8;
const ARRAY_SIZE: Range<usize> = 0..64;

/// Имена и строки: ASCII, пустые, с NUL и символами вне BMP.
pub fn string_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        string_regex("[a-zA-Z0-9_]{1,16}").unwrap(),
        string_regex(r"[\u{00}-\u{1F}\u{7F}-\u{FF}]{1,16}").unwrap(),
        vec(any::<char>(), 0..16).prop_map(|chars| chars.into_iter().collect()),
    ]
}

/// Скалярные теги и массивы (без `End`).
pub fn leaf_tag_strategy() -> impl Strategy<Value = Tag> {
    prop_oneof![
        any::<i8>().prop_map(Tag::Byte),
        any::<i16>().prop_map(Tag::Short),
        prop_oneof![Just(i32::MIN), Just(i32::MAX), Just(0), any::<i32>()].prop_map(Tag::Int),
        prop_oneof![Just(i64::MIN), Just(i64::MAX), any::<i64>()].prop_map(Tag::Long),
        prop_oneof![
            Just(f32::NAN),
            Just(f32::INFINITY),
            Just(-0.0f32),
            any::<f32>()
        ]
        .prop_map(Tag::Float),
        prop_oneof![
            Just(f64::NAN),
            Just(f64::NEG_INFINITY),
            Just(f64::MIN_POSITIVE),
            any::<f64>()
        ]
        .prop_map(Tag::Double),
        vec(any::<i8>(), ARRAY_SIZE).prop_map(Tag::ByteArray),
        string_strategy().prop_map(Tag::String),
        vec(any::<i32>(), ARRAY_SIZE).prop_map(Tag::IntArray),
        vec(any::<i64>(), ARRAY_SIZE).prop_map(Tag::LongArray),
    ]
}

/// Однородный список: тип задаётся первым элементом, остальные отбираются.
fn list_from(items: Vec<Tag>) -> TagList {
    let kind = items.first().map(Tag::kind).unwrap_or(TagKind::End);
    let same: Vec<Tag> = items.into_iter().filter(|t| t.kind() == kind).collect();
    TagList::from_tags(kind, same).expect("homogeneous by construction")
}

/// Произвольное дерево ограниченной глубины.
pub fn tag_strategy() -> impl Strategy<Value = Tag> {
    leaf_tag_strategy().prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            vec(inner.clone(), SMALL_SIZE).prop_map(|items| Tag::List(list_from(items))),
            vec((string_strategy(), inner), SMALL_SIZE)
                .prop_map(|entries| Tag::Compound(entries.into_iter().collect::<TagCompound>())),
        ]
    })
}

/// Корень документа: как правило Compound, иногда любой тег.
pub fn root_strategy() -> impl Strategy<Value = NamedTag> {
    let tag = prop_oneof![
        3 => vec((string_strategy(), tag_strategy()), SMALL_SIZE)
            .prop_map(|entries| Tag::Compound(entries.into_iter().collect::<TagCompound>())),
        1 => tag_strategy(),
    ];
    (string_strategy(), tag).prop_map(|(name, tag)| NamedTag { name, tag })
}

/// Сравнение деревьев с побитовым сравнением чисел с плавающей точкой
/// (NaN == NaN).
pub fn tag_deep_eq(
    a: &Tag,
    b: &Tag,
) -> bool {
    match (a, b) {
        (Tag::Float(x), Tag::Float(y)) => x.to_bits() == y.to_bits(),
        (Tag::Double(x), Tag::Double(y)) => x.to_bits() == y.to_bits(),
        (Tag::List(x), Tag::List(y)) => {
            x.content_kind() == y.content_kind()
                && x.len() == y.len()
                && x.iter().zip(y.iter()).all(|(p, q)| tag_deep_eq(p, q))
        }
        (Tag::Compound(x), Tag::Compound(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .zip(y.iter())
                    .all(|((n1, t1), (n2, t2))| n1 == n2 && tag_deep_eq(t1, t2))
        }
        _ => a == b,
    }
}
