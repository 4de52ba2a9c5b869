//! Определение и применение сжатия документа (gzip / zlib / без сжатия).
//!
//! Сами алгоритмы берутся из `flate2`; здесь только проба заголовка и
//! обёртки над потоками.

use std::{
    fmt,
    io::{self, Read, Seek, SeekFrom, Write},
    str::FromStr,
};

use flate2::{
    read::{GzDecoder, ZlibDecoder},
    write::{GzEncoder, ZlibEncoder},
    Compression,
};
use nbtree_error::NbtResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::TagKind;

/// Магические байты gzip.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Формат сжатия документа.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionMode {
    Gzip,
    Zlib,
    #[default]
    #[serde(alias = "none")]
    Uncompressed,
}

impl CompressionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CompressionMode::Gzip => "gzip",
            CompressionMode::Zlib => "zlib",
            CompressionMode::Uncompressed => "uncompressed",
        }
    }

    pub fn is_compressed(self) -> bool {
        self != CompressionMode::Uncompressed
    }
}

impl fmt::Display for CompressionMode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompressionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gzip" | "gz" => Ok(CompressionMode::Gzip),
            "zlib" => Ok(CompressionMode::Zlib),
            "none" | "raw" | "uncompressed" => Ok(CompressionMode::Uncompressed),
            other => Err(format!(
                "unknown compression '{other}' (expected gzip, zlib or none)"
            )),
        }
    }
}

/// Классифицирует заголовок: gzip, zlib или `None` для несжатого входа.
///
/// Вход короче двух байт считается несжатым.
pub fn classify_header(header: &[u8]) -> Option<CompressionMode> {
    let [b0, b1] = match header {
        [b0, b1, ..] => [*b0, *b1],
        _ => return None,
    };
    if [b0, b1] == GZIP_MAGIC {
        return Some(CompressionMode::Gzip);
    }
    if is_zlib_header(b0, b1) {
        return Some(CompressionMode::Zlib);
    }
    None
}

/// Проверяет пару CMF/FLG zlib (RFC 1950): метод deflate, окно не больше
/// 32K, контрольная сумма заголовка кратна 31, без предустановленного
/// словаря (FDICT).
pub fn is_zlib_header(
    cmf: u8,
    flg: u8,
) -> bool {
    let method = cmf & 0x0F;
    let window = cmf >> 4;
    let fdict = flg & 0x20 != 0;
    method == 8 && window <= 7 && !fdict && (((cmf as u16) << 8) | flg as u16) % 31 == 0
}

/// Заголовок zlib совпадает с началом части несжатых документов (например,
/// корень String с длиной имени 0x1Dxx даёт `08 1D`). Поэтому поток считается
/// zlib, только если первый распакованный байт является кодом тега.
fn inflates_to_tag<R: Read>(r: R) -> bool {
    let mut first = [0u8; 1];
    match ZlibDecoder::new(r).read(&mut first) {
        Ok(1) => TagKind::from_byte(first[0]).is_ok(),
        _ => false,
    }
}

/// Определяет сжатие по первым байтам потока.
///
/// Позиция потока всегда возвращается к исходной, чтобы выбранный декодер
/// увидел заголовок. Несжатый вход не является ошибкой: возвращается `None`.
/// Ошибкой считаются только сбои ввода-вывода самой пробы.
pub fn probe_compression<R: Read + Seek>(r: &mut R) -> NbtResult<Option<CompressionMode>> {
    let start = r.stream_position()?;

    let mut header = [0u8; 2];
    let mut filled = 0;
    while filled < header.len() {
        match r.read(&mut header[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                r.seek(SeekFrom::Start(start))?;
                return Err(e.into());
            }
        }
    }
    r.seek(SeekFrom::Start(start))?;

    let mode = match classify_header(&header[..filled]) {
        Some(CompressionMode::Zlib) => {
            let valid = inflates_to_tag(&mut *r);
            r.seek(SeekFrom::Start(start))?;
            if !valid {
                debug!("Header looks like zlib but does not inflate, reading raw");
            }
            valid.then_some(CompressionMode::Zlib)
        }
        other => other,
    };
    debug!(
        "Compression probe: {}",
        mode.unwrap_or(CompressionMode::Uncompressed)
    );
    Ok(mode)
}

/// Дочитывает распаковщик до конца потока.
///
/// Декодер останавливается на последнем End корня, а хвост deflate и
/// контрольная сумма (CRC32 у gzip, Adler-32 у zlib) остаются непрочитанными.
/// Обрезанный хвост даёт `Truncated`, неверная сумма даёт `Io`.
pub fn finish_decompression<R: Read + ?Sized>(r: &mut R) -> NbtResult<u64> {
    Ok(io::copy(r, &mut io::sink())?)
}

/// Оборачивает источник в распаковщик согласно режиму.
pub fn decompressor<'a, R: Read + 'a>(
    r: R,
    mode: CompressionMode,
) -> Box<dyn Read + 'a> {
    match mode {
        CompressionMode::Gzip => Box::new(GzDecoder::new(r)),
        CompressionMode::Zlib => Box::new(ZlibDecoder::new(r)),
        CompressionMode::Uncompressed => Box::new(r),
    }
}

/// Приёмник, сжимающий данные согласно режиму.
///
/// После записи нужно вызвать [`CompressedWriter::finish`], иначе хвост
/// сжатого потока не будет записан.
pub enum CompressedWriter<W: Write> {
    Gzip(GzEncoder<W>),
    Zlib(ZlibEncoder<W>),
    Plain(W),
}

impl<W: Write> CompressedWriter<W> {
    pub fn new(
        w: W,
        mode: CompressionMode,
    ) -> Self {
        match mode {
            CompressionMode::Gzip => Self::Gzip(GzEncoder::new(w, Compression::default())),
            CompressionMode::Zlib => Self::Zlib(ZlibEncoder::new(w, Compression::default())),
            CompressionMode::Uncompressed => Self::Plain(w),
        }
    }

    /// Дописывает хвост сжатого потока и возвращает исходный приёмник.
    pub fn finish(self) -> io::Result<W> {
        match self {
            Self::Gzip(e) => e.finish(),
            Self::Zlib(e) => e.finish(),
            Self::Plain(mut w) => {
                w.flush()?;
                Ok(w)
            }
        }
    }
}

impl<W: Write> Write for CompressedWriter<W> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match self {
            Self::Gzip(e) => e.write(buf),
            Self::Zlib(e) => e.write(buf),
            Self::Plain(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Gzip(e) => e.flush(),
            Self::Zlib(e) => e.flush(),
            Self::Plain(w) => w.flush(),
        }
    }
}
