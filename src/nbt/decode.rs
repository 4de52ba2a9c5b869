//! Рекурсивный декодер дерева тегов.
//!
//! Запись верхнего уровня: `[kind:u8][name][payload]`. Элементы списков
//! читаются без байта типа и без имени (тип задан заголовком списка).

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};
use nbtree_error::{NbtError, NbtResult};
use tracing::{trace, warn};

use super::{
    io::{CountingReader, NbtReadExt},
    NamedTag, Tag, TagCompound, TagKind, TagList,
};

/// Максимальная вложенность контейнеров по умолчанию.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Параметры декодирования.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Сколько вложенных `List`/`Compound` допускается.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Читает одну запись верхнего уровня с лимитом глубины по умолчанию.
pub fn read_tag<R: Read>(r: &mut R) -> NbtResult<NamedTag> {
    read_tag_with_depth(r, DEFAULT_MAX_DEPTH)
}

/// Читает одну запись верхнего уровня с заданным лимитом глубины.
///
/// Для записи `TAG_End` возвращается [`NamedTag::end`] (имя не читается).
pub fn read_tag_with_depth<R: Read>(
    r: &mut R,
    max_depth: usize,
) -> NbtResult<NamedTag> {
    let mut reader = TagReader::new(r, max_depth);
    reader.read_named().inspect_err(|e| {
        warn!(
            "Rejected tag stream at byte {}: {}",
            reader.position(),
            e
        )
    })
}

/// Декодер поверх произвольного `Read`.
pub struct TagReader<R: Read> {
    inner: CountingReader<R>,
    depth: usize,
    max_depth: usize,
}

impl<R: Read> TagReader<R> {
    pub fn new(
        inner: R,
        max_depth: usize,
    ) -> Self {
        Self {
            inner: CountingReader::new(inner),
            depth: 0,
            max_depth,
        }
    }

    pub fn with_options(
        inner: R,
        opts: DecodeOptions,
    ) -> Self {
        Self::new(inner, opts.max_depth)
    }

    /// Сколько байт уже прочитано.
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }

    /// Читает полную запись: тип, имя (кроме `End`) и содержимое.
    pub fn read_named(&mut self) -> NbtResult<NamedTag> {
        let kind = self.read_kind()?;
        if kind == TagKind::End {
            return Ok(NamedTag::end());
        }
        let name = self.inner.read_nbt_string()?;
        trace!("record {} '{}' at byte {}", kind, name, self.position());
        let tag = self.read_payload(kind)?;
        Ok(NamedTag { name, tag })
    }

    /// Читает содержимое тега известного типа (без байта типа и имени).
    pub fn read_payload(
        &mut self,
        kind: TagKind,
    ) -> NbtResult<Tag> {
        let tag = match kind {
            TagKind::End => Tag::End,
            TagKind::Byte => Tag::Byte(self.inner.read_i8()?),
            TagKind::Short => Tag::Short(self.inner.read_i16::<BigEndian>()?),
            TagKind::Int => Tag::Int(self.inner.read_i32::<BigEndian>()?),
            TagKind::Long => Tag::Long(self.inner.read_i64::<BigEndian>()?),
            TagKind::Float => Tag::Float(self.inner.read_f32::<BigEndian>()?),
            TagKind::Double => Tag::Double(self.inner.read_f64::<BigEndian>()?),
            TagKind::ByteArray => Tag::ByteArray(self.inner.read_nbt_byte_array()?),
            TagKind::String => Tag::String(self.inner.read_nbt_string()?),
            TagKind::IntArray => Tag::IntArray(self.inner.read_nbt_int_array()?),
            TagKind::LongArray => Tag::LongArray(self.inner.read_nbt_long_array()?),
            TagKind::List => {
                self.enter()?;
                let list = self.read_list()?;
                self.depth -= 1;
                Tag::List(list)
            }
            TagKind::Compound => {
                self.enter()?;
                let compound = self.read_compound()?;
                self.depth -= 1;
                Tag::Compound(compound)
            }
        };
        Ok(tag)
    }

    fn read_kind(&mut self) -> NbtResult<TagKind> {
        let offset = self.position();
        let byte = self.inner.read_u8()?;
        TagKind::from_byte(byte).map_err(|e| e.with_offset(offset))
    }

    fn read_list(&mut self) -> NbtResult<TagList> {
        let content_kind = self.read_kind()?;
        let raw_len = self.inner.read_i32::<BigEndian>()?;
        if content_kind == TagKind::End && raw_len > 0 {
            return Err(NbtError::NonEmptyEndList {
                len: raw_len as i64,
            });
        }
        let len = raw_len.max(0) as usize;

        let mut list = TagList::with_capacity(content_kind, len.min(1024));
        for _ in 0..len {
            let item = self.read_payload(content_kind)?;
            list.push(item)?;
        }
        Ok(list)
    }

    fn read_compound(&mut self) -> NbtResult<TagCompound> {
        let mut compound = TagCompound::new();
        loop {
            let NamedTag { name, tag } = self.read_named()?;
            if matches!(tag, Tag::End) {
                break;
            }
            compound.insert(name, tag);
        }
        Ok(compound)
    }

    fn enter(&mut self) -> NbtResult<()> {
        let next = self.depth + 1;
        if next > self.max_depth {
            return Err(NbtError::DepthExceeded {
                depth: next,
                max: self.max_depth,
            });
        }
        self.depth = next;
        Ok(())
    }
}
