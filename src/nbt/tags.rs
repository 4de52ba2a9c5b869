//! Коды типов тегов бинарного формата.
//!
//! Каждая запись начинается с однобайтового кода типа. Используется в модулях
//! `decode` и `encode`.

use std::fmt;

use nbtree_error::{NbtError, NbtResult};
use num_enum::TryFromPrimitive;

/// Маркер конца Compound
pub const TAG_END: u8 = 0x00;
/// Знаковый байт (i8)
pub const TAG_BYTE: u8 = 0x01;
/// Короткое целое (i16)
pub const TAG_SHORT: u8 = 0x02;
/// Целое (i32)
pub const TAG_INT: u8 = 0x03;
/// Длинное целое (i64)
pub const TAG_LONG: u8 = 0x04;
/// Число с плавающей точкой (f32)
pub const TAG_FLOAT: u8 = 0x05;
/// Число с плавающей точкой двойной точности (f64)
pub const TAG_DOUBLE: u8 = 0x06;
/// Массив знаковых байт
pub const TAG_BYTE_ARRAY: u8 = 0x07;
/// Строка в modified UTF-8
pub const TAG_STRING: u8 = 0x08;
/// Однородный список безымянных тегов
pub const TAG_LIST: u8 = 0x09;
/// Упорядоченный набор именованных тегов
pub const TAG_COMPOUND: u8 = 0x0A;
/// Массив i32
pub const TAG_INT_ARRAY: u8 = 0x0B;
/// Массив i64
pub const TAG_LONG_ARRAY: u8 = 0x0C;

/// Тип тега без значения и имени.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum TagKind {
    End = TAG_END,
    Byte = TAG_BYTE,
    Short = TAG_SHORT,
    Int = TAG_INT,
    Long = TAG_LONG,
    Float = TAG_FLOAT,
    Double = TAG_DOUBLE,
    ByteArray = TAG_BYTE_ARRAY,
    String = TAG_STRING,
    List = TAG_LIST,
    Compound = TAG_COMPOUND,
    IntArray = TAG_INT_ARRAY,
    LongArray = TAG_LONG_ARRAY,
}

impl TagKind {
    /// Все типы в порядке кодов.
    pub const ALL: [TagKind; 13] = [
        TagKind::End,
        TagKind::Byte,
        TagKind::Short,
        TagKind::Int,
        TagKind::Long,
        TagKind::Float,
        TagKind::Double,
        TagKind::ByteArray,
        TagKind::String,
        TagKind::List,
        TagKind::Compound,
        TagKind::IntArray,
        TagKind::LongArray,
    ];

    /// Разбирает байт типа, возвращая `UnknownTagKind` для неизвестных кодов.
    pub fn from_byte(byte: u8) -> NbtResult<Self> {
        TagKind::try_from(byte).map_err(|_| NbtError::UnknownTagKind {
            kind: byte,
            offset: None,
        })
    }

    /// Код типа на проводе.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Каноническое имя типа (`TAG_Int`, `TAG_Byte_Array`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            TagKind::End => "TAG_End",
            TagKind::Byte => "TAG_Byte",
            TagKind::Short => "TAG_Short",
            TagKind::Int => "TAG_Int",
            TagKind::Long => "TAG_Long",
            TagKind::Float => "TAG_Float",
            TagKind::Double => "TAG_Double",
            TagKind::ByteArray => "TAG_Byte_Array",
            TagKind::String => "TAG_String",
            TagKind::List => "TAG_List",
            TagKind::Compound => "TAG_Compound",
            TagKind::IntArray => "TAG_Int_Array",
            TagKind::LongArray => "TAG_Long_Array",
        }
    }

    /// Является ли тип контейнером (увеличивает глубину вложенности).
    pub const fn is_container(self) -> bool {
        matches!(self, TagKind::List | TagKind::Compound)
    }
}

impl fmt::Display for TagKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Тест проверяет, что коды всех типов идут подряд от 0 до 12.
    #[test]
    fn test_codes_are_contiguous() {
        for (i, kind) in TagKind::ALL.iter().enumerate() {
            assert_eq!(kind.code() as usize, i);
            assert_eq!(TagKind::from_byte(i as u8).unwrap(), *kind);
        }
    }

    /// Тест проверяет, что неизвестный код возвращает UnknownTagKind.
    #[test]
    fn test_unknown_code() {
        let err = TagKind::from_byte(13).unwrap_err();
        assert_eq!(
            err,
            NbtError::UnknownTagKind {
                kind: 13,
                offset: None
            }
        );
        assert!(TagKind::from_byte(0xFF).is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!(TagKind::ByteArray.to_string(), "TAG_Byte_Array");
        assert_eq!(TagKind::Compound.name(), "TAG_Compound");
        assert!(TagKind::List.is_container());
        assert!(!TagKind::String.is_container());
    }
}
