//! Формат именованных бинарных тегов (NBT).
//!
//! Модули снизу вверх:
//! - `tags`: коды типов и [`TagKind`];
//! - `mutf8`, `io`: modified UTF-8 и примитивы big-endian;
//! - `tag`: дерево в памяти ([`Tag`], [`TagList`], [`TagCompound`]);
//! - `decode`, `encode`: рекурсивный кодек;
//! - `compression`: проба gzip/zlib и обёртки потоков;
//! - `document`: [`Document`], связывающий всё вместе;
//! - `dump`: отладочный вывод дерева.

pub mod compression;
pub mod decode;
pub mod document;
pub mod dump;
pub mod encode;
pub mod io;
pub mod mutf8;
pub mod tag;
pub mod tags;

pub use compression::{probe_compression, CompressedWriter, CompressionMode};
pub use decode::{read_tag, read_tag_with_depth, DecodeOptions, TagReader, DEFAULT_MAX_DEPTH};
pub use document::Document;
pub use dump::dump;
pub use encode::{write_named_tag, write_tag, TagWriter};
pub use tag::{NamedTag, Tag, TagCompound, TagList};
pub use tags::TagKind;
