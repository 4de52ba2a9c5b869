//! Рекурсивный кодировщик, зеркальный декодеру.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};
use nbtree_error::{NbtError, NbtResult};

use super::{
    decode::DEFAULT_MAX_DEPTH, io::NbtWriteExt, NamedTag, Tag, TagCompound, TagKind, TagList,
};

/// Ожидаемый тип в ошибке для End среди детей Compound.
const COMPOUND_CHILD: &str = "any tag except TAG_End";

/// Записывает полную запись `[kind][name][payload]`.
///
/// Для `Tag::End` пишется только байт типа.
pub fn write_tag<W: Write>(
    w: &mut W,
    name: &str,
    tag: &Tag,
) -> NbtResult<()> {
    TagWriter::new(w, DEFAULT_MAX_DEPTH).write_named(name, tag)
}

/// Записывает корень документа.
pub fn write_named_tag<W: Write>(
    w: &mut W,
    root: &NamedTag,
) -> NbtResult<()> {
    write_tag(w, &root.name, &root.tag)
}

/// Кодировщик поверх произвольного `Write`.
pub struct TagWriter<W: Write> {
    inner: W,
    depth: usize,
    max_depth: usize,
}

impl<W: Write> TagWriter<W> {
    pub fn new(
        inner: W,
        max_depth: usize,
    ) -> Self {
        Self {
            inner,
            depth: 0,
            max_depth,
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write_named(
        &mut self,
        name: &str,
        tag: &Tag,
    ) -> NbtResult<()> {
        let kind = tag.kind();
        self.inner.write_u8(kind.code())?;
        if kind == TagKind::End {
            return Ok(());
        }
        self.inner.write_nbt_string(name)?;
        self.write_payload(tag)
    }

    /// Записывает содержимое тега без байта типа и имени.
    pub fn write_payload(
        &mut self,
        tag: &Tag,
    ) -> NbtResult<()> {
        match tag {
            Tag::End => {}
            Tag::Byte(v) => self.inner.write_i8(*v)?,
            Tag::Short(v) => self.inner.write_i16::<BigEndian>(*v)?,
            Tag::Int(v) => self.inner.write_i32::<BigEndian>(*v)?,
            Tag::Long(v) => self.inner.write_i64::<BigEndian>(*v)?,
            Tag::Float(v) => self.inner.write_f32::<BigEndian>(*v)?,
            Tag::Double(v) => self.inner.write_f64::<BigEndian>(*v)?,
            Tag::ByteArray(v) => self.inner.write_nbt_byte_array(v)?,
            Tag::String(s) => self.inner.write_nbt_string(s)?,
            Tag::IntArray(v) => self.inner.write_nbt_int_array(v)?,
            Tag::LongArray(v) => self.inner.write_nbt_long_array(v)?,
            Tag::List(list) => {
                self.enter()?;
                self.write_list(list)?;
                self.depth -= 1;
            }
            Tag::Compound(compound) => {
                self.enter()?;
                self.write_compound(compound)?;
                self.depth -= 1;
            }
        }
        Ok(())
    }

    fn write_list(
        &mut self,
        list: &TagList,
    ) -> NbtResult<()> {
        let content_kind = list.content_kind();
        if content_kind == TagKind::End && !list.is_empty() {
            return Err(NbtError::NonEmptyEndList {
                len: list.len() as i64,
            });
        }
        self.inner.write_u8(content_kind.code())?;
        self.inner.write_nbt_len("list", list.len())?;
        for item in list {
            // get_mut позволяет подменить элемент тегом другого типа.
            let found = item.kind();
            if found != content_kind {
                return Err(NbtError::TypeMismatch {
                    expected: content_kind.name(),
                    found: found.name(),
                });
            }
            self.write_payload(item)?;
        }
        Ok(())
    }

    fn write_compound(
        &mut self,
        compound: &TagCompound,
    ) -> NbtResult<()> {
        for (name, tag) in compound.iter() {
            // End внутри Compound оборвал бы запись раньше времени.
            if tag.kind() == TagKind::End {
                return Err(NbtError::TypeMismatch {
                    expected: COMPOUND_CHILD,
                    found: TagKind::End.name(),
                });
            }
            self.write_named(name, tag)?;
        }
        self.inner.write_u8(TagKind::End.code())?;
        Ok(())
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
