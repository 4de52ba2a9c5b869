//! Документ: один именованный корень плюс режим сжатия.
//!
//! `load` пробует сжатие, декодирует и только при полном успехе заменяет
//! корень и режим. `save` выбирает обёртку по текущему режиму и ничего в
//! документе не меняет.

use std::{
    fmt,
    fs::File,
    io::{BufReader, BufWriter, Read, Seek, Write},
    path::Path,
};

use nbtree_error::{bail, NbtreeResult, ResultExt, StatusCode};
use tracing::debug;

use super::{
    compression::{
        decompressor, finish_decompression, probe_compression, CompressedWriter, CompressionMode,
    },
    decode::{read_tag_with_depth, DecodeOptions},
    dump::write_dump,
    encode::TagWriter,
    NamedTag, Tag,
};

/// Документ в памяти.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Option<NamedTag>,
    compression: CompressionMode,
    options: DecodeOptions,
}

impl Document {
    /// Пустой документ без корня, режим `uncompressed`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Документ с готовым корнем.
    pub fn with_root(
        name: impl Into<String>,
        tag: impl Into<Tag>,
    ) -> Self {
        Self {
            root: Some(NamedTag::new(name, tag)),
            ..Self::default()
        }
    }

    /// Меняет параметры декодирования (лимит глубины).
    pub fn with_options(
        mut self,
        options: DecodeOptions,
    ) -> Self {
        self.options = options;
        self
    }

    pub fn with_max_depth(
        self,
        max_depth: usize,
    ) -> Self {
        self.with_options(DecodeOptions { max_depth })
    }

    /// Читает документ из источника с пробой сжатия.
    pub fn from_reader<R: Read + Seek>(source: &mut R) -> NbtreeResult<Self> {
        let mut doc = Self::new();
        doc.load(source)?;
        Ok(doc)
    }

    /// Читает несжатый документ без пробы.
    pub fn from_raw_reader<R: Read>(source: &mut R) -> NbtreeResult<Self> {
        let mut doc = Self::new();
        doc.load_raw(source)?;
        Ok(doc)
    }

    /// Открывает файл и читает его с пробой сжатия.
    pub fn open(path: impl AsRef<Path>) -> NbtreeResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open '{}'", path.display()))?;
        let mut reader = BufReader::new(file);
        Self::from_reader(&mut reader).with_context(|| format!("Failed to load '{}'", path.display()))
    }

    /// Загружает документ, определяя сжатие по заголовку.
    ///
    /// При ошибке прежний корень и режим остаются нетронутыми.
    pub fn load<R: Read + Seek>(
        &mut self,
        source: &mut R,
    ) -> NbtreeResult<()> {
        let mode = probe_compression(source)
            .context("Failed to probe compression")?
            .unwrap_or(CompressionMode::Uncompressed);

        let mut stream = decompressor(&mut *source, mode);
        let root = read_tag_with_depth(&mut stream, self.options.max_depth)
            .with_context(|| format!("Failed to decode {mode} document"))?;
        if mode.is_compressed() {
            finish_decompression(&mut stream)
                .with_context(|| format!("Failed to verify end of {mode} stream"))?;
        }

        debug!("Loaded {} document with root '{}'", mode, root.name);
        self.root = Some(root);
        self.compression = mode;
        Ok(())
    }

    /// Загружает несжатый документ без пробы (для источников без `Seek`).
    ///
    /// При успехе режим становится `uncompressed`.
    pub fn load_raw<R: Read>(
        &mut self,
        source: &mut R,
    ) -> NbtreeResult<()> {
        let root = read_tag_with_depth(source, self.options.max_depth)
            .context("Failed to decode raw document")?;

        debug!("Loaded raw document with root '{}'", root.name);
        self.root = Some(root);
        self.compression = CompressionMode::Uncompressed;
        Ok(())
    }

    /// Записывает корень, сжимая согласно текущему режиму.
    pub fn save<W: Write>(
        &self,
        sink: &mut W,
    ) -> NbtreeResult<()> {
        let Some(root) = &self.root else {
            bail!(StatusCode::InvalidOperation, "Document has no root tag");
        };

        let mut out = CompressedWriter::new(sink, self.compression);
        TagWriter::new(&mut out, self.options.max_depth)
            .write_named(&root.name, &root.tag)
            .context("Failed to encode document")?;
        out.finish()
            .context("Failed to finish compressed stream")?;

        debug!("Saved {} document with root '{}'", self.compression, root.name);
        Ok(())
    }

    /// Записывает документ в файл (создаёт или перезаписывает).
    pub fn save_to_path(
        &self,
        path: impl AsRef<Path>,
    ) -> NbtreeResult<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create '{}'", path.display()))?;
        let mut writer = BufWriter::new(file);
        self.save(&mut writer)
            .with_context(|| format!("Failed to save '{}'", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush '{}'", path.display()))?;
        Ok(())
    }

    pub fn root(&self) -> Option<&Tag> {
        self.root.as_ref().map(|r| &r.tag)
    }

    pub fn root_mut(&mut self) -> Option<&mut Tag> {
        self.root.as_mut().map(|r| &mut r.tag)
    }

    pub fn root_name(&self) -> Option<&str> {
        self.root.as_ref().map(|r| r.name.as_str())
    }

    /// Корень вместе с именем.
    pub fn named_root(&self) -> Option<&NamedTag> {
        self.root.as_ref()
    }

    /// Заменяет корень, возвращая прежний.
    pub fn set_root(
        &mut self,
        name: impl Into<String>,
        tag: impl Into<Tag>,
    ) -> Option<NamedTag> {
        self.root.replace(NamedTag::new(name, tag))
    }

    /// Забирает корень, оставляя документ пустым.
    pub fn take_root(&mut self) -> Option<NamedTag> {
        self.root.take()
    }

    pub fn compression(&self) -> CompressionMode {
        self.compression
    }

    pub fn set_compression(
        &mut self,
        mode: CompressionMode,
    ) {
        self.compression = mode;
    }

    pub fn max_depth(&self) -> usize {
        self.options.max_depth
    }
}

impl fmt::Display for Document {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match &self.root {
            Some(root) => write_dump(f, Some(&root.name), &root.tag, 0),
            None => writeln!(f, "<empty document>"),
        }
    }
}
