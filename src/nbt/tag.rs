//! Дерево тегов в памяти.
//!
//! [`Tag`]: закрытое перечисление из 13 вариантов. Имена хранятся не в самом
//! теге, а у владельца: дети [`TagCompound`] именованы, элементы [`TagList`]
//! безымянны, корень документа описывается [`NamedTag`].

use nbtree_error::{NbtError, NbtResult};

use super::TagKind;

/// Один узел дерева.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(TagList),
    Compound(TagCompound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

/// Тег вместе с именем. Используется для корня документа.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTag {
    pub name: String,
    pub tag: Tag,
}

/// Однородный список безымянных тегов.
///
/// Тип элементов фиксируется при создании; [`TagList::push`] отклоняет
/// элементы другого типа, не изменяя список.
#[derive(Debug, Clone, PartialEq)]
pub struct TagList {
    content_kind: TagKind,
    items: Vec<Tag>,
}

/// Упорядоченный набор именованных тегов.
///
/// Порядок вставки сохраняется и определяет порядок записи на провод.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagCompound {
    entries: Vec<(String, Tag)>,
}

////////////////////////////////////////////////////////////////////////////////
// Tag
////////////////////////////////////////////////////////////////////////////////

impl Tag {
    /// Тип тега.
    pub fn kind(&self) -> TagKind {
        match self {
            Tag::End => TagKind::End,
            Tag::Byte(_) => TagKind::Byte,
            Tag::Short(_) => TagKind::Short,
            Tag::Int(_) => TagKind::Int,
            Tag::Long(_) => TagKind::Long,
            Tag::Float(_) => TagKind::Float,
            Tag::Double(_) => TagKind::Double,
            Tag::ByteArray(_) => TagKind::ByteArray,
            Tag::String(_) => TagKind::String,
            Tag::List(_) => TagKind::List,
            Tag::Compound(_) => TagKind::Compound,
            Tag::IntArray(_) => TagKind::IntArray,
            Tag::LongArray(_) => TagKind::LongArray,
        }
    }

    /// Пустой тег указанного типа: нули для скаляров, пустые контейнеры.
    ///
    /// Для `List` тип элементов: `End`.
    pub fn empty(kind: TagKind) -> Tag {
        match kind {
            TagKind::End => Tag::End,
            TagKind::Byte => Tag::Byte(0),
            TagKind::Short => Tag::Short(0),
            TagKind::Int => Tag::Int(0),
            TagKind::Long => Tag::Long(0),
            TagKind::Float => Tag::Float(0.0),
            TagKind::Double => Tag::Double(0.0),
            TagKind::ByteArray => Tag::ByteArray(Vec::new()),
            TagKind::String => Tag::String(String::new()),
            TagKind::List => Tag::List(TagList::new(TagKind::End)),
            TagKind::Compound => Tag::Compound(TagCompound::new()),
            TagKind::IntArray => Tag::IntArray(Vec::new()),
            TagKind::LongArray => Tag::LongArray(Vec::new()),
        }
    }

    pub fn as_byte(&self) -> Option<i8> {
        match self {
            Tag::Byte(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<i16> {
        match self {
            Tag::Short(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Tag::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Tag::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Tag::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Tag::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[i8]> {
        match self {
            Tag::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            Tag::IntArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_long_array(&self) -> Option<&[i64]> {
        match self {
            Tag::LongArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&TagList> {
        match self {
            Tag::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut TagList> {
        match self {
            Tag::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&TagCompound> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut TagCompound> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }
}

macro_rules! impl_from_for_tag {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Tag {
                fn from(v: $ty) -> Self {
                    Tag::$variant(v)
                }
            }
        )*
    };
}

impl_from_for_tag! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<i8> => ByteArray,
    String => String,
    TagList => List,
    TagCompound => Compound,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
}

impl From<&str> for Tag {
    fn from(v: &str) -> Self {
        Tag::String(v.to_owned())
    }
}

////////////////////////////////////////////////////////////////////////////////
// NamedTag
////////////////////////////////////////////////////////////////////////////////

impl NamedTag {
    pub fn new(
        name: impl Into<String>,
        tag: impl Into<Tag>,
    ) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }

    /// Запись `TAG_End` верхнего уровня (без имени на проводе).
    pub fn end() -> Self {
        Self {
            name: String::new(),
            tag: Tag::End,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// TagList
////////////////////////////////////////////////////////////////////////////////

impl TagList {
    /// Создаёт пустой список с типом элементов `content_kind`.
    pub fn new(content_kind: TagKind) -> Self {
        Self {
            content_kind,
            items: Vec::new(),
        }
    }

    /// Создаёт пустой список с заранее выделенной ёмкостью.
    pub fn with_capacity(
        content_kind: TagKind,
        capacity: usize,
    ) -> Self {
        Self {
            content_kind,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Собирает список из элементов, проверяя тип каждого.
    pub fn from_tags(
        content_kind: TagKind,
        tags: impl IntoIterator<Item = Tag>,
    ) -> NbtResult<Self> {
        let mut list = Self::new(content_kind);
        for tag in tags {
            list.push(tag)?;
        }
        Ok(list)
    }

    /// Объявленный тип элементов.
    pub fn content_kind(&self) -> TagKind {
        self.content_kind
    }

    /// Добавляет элемент в конец списка.
    ///
    /// Возвращает `TypeMismatch`, если тип элемента отличается от объявленного,
    /// и `NonEmptyEndList` для списка типа `End`; список при этом не меняется.
    pub fn push(
        &mut self,
        tag: Tag,
    ) -> NbtResult<()> {
        let found = tag.kind();
        if found == TagKind::End && self.content_kind == TagKind::End {
            return Err(NbtError::NonEmptyEndList {
                len: self.items.len() as i64 + 1,
            });
        }
        if found != self.content_kind {
            return Err(NbtError::TypeMismatch {
                expected: self.content_kind.name(),
                found: found.name(),
            });
        }
        self.items.push(tag);
        Ok(())
    }

    /// Элемент по индексу.
    pub fn get(
        &self,
        index: usize,
    ) -> NbtResult<&Tag> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(NbtError::IndexOutOfRange { index, len })
    }

    /// Изменяемый элемент по индексу.
    ///
    /// Замена элемента тегом другого типа не проверяется здесь; такой список
    /// будет отклонён при записи.
    pub fn get_mut(
        &mut self,
        index: usize,
    ) -> NbtResult<&mut Tag> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(NbtError::IndexOutOfRange { index, len })
    }

    /// Удаляет и возвращает элемент по индексу.
    pub fn remove(
        &mut self,
        index: usize,
    ) -> NbtResult<Tag> {
        let len = self.items.len();
        if index >= len {
            return Err(NbtError::IndexOutOfRange { index, len });
        }
        Ok(self.items.remove(index))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Tag> {
        self.items.iter_mut()
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for TagList {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

////////////////////////////////////////////////////////////////////////////////
// TagCompound
////////////////////////////////////////////////////////////////////////////////

impl TagCompound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Вставляет тег под именем `name`.
    ///
    /// Если ребёнок с таким именем уже есть, он удаляется, а новый
    /// добавляется в конец. Возвращает заменённый тег.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        tag: impl Into<Tag>,
    ) -> Option<Tag> {
        let name = name.into();
        let replaced = self.remove(&name);
        self.entries.push((name, tag.into()));
        replaced
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&Tag> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, tag)| tag)
    }

    pub fn get_mut(
        &mut self,
        name: &str,
    ) -> Option<&mut Tag> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, tag)| tag)
    }

    /// Есть ли ребёнок с именем `name`.
    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Удаляет ребёнка по имени, сохраняя порядок остальных.
    pub fn remove(
        &mut self,
        name: &str,
    ) -> Option<Tag> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Имена детей в порядке вставки.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Пары (имя, тег) в порядке вставки.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Tag)> {
        self.entries.iter_mut().map(|(n, t)| (n.as_str(), t))
    }
}

impl<N: Into<String>, T: Into<Tag>> FromIterator<(N, T)> for TagCompound {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut compound = TagCompound::new();
        for (name, tag) in iter {
            compound.insert(name, tag);
        }
        compound
    }
}

impl IntoIterator for TagCompound {
    type Item = (String, Tag);
    type IntoIter = std::vec::IntoIter<(String, Tag)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
