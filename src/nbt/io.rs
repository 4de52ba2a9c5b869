//! Примитивы ввода-вывода поверх `byteorder`: строки с префиксом длины,
//! массивы с ограниченным предвыделением и reader со счётчиком смещения.

use std::io::{self, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use nbtree_error::{NbtError, NbtResult};

use super::mutf8;

/// Максимальная длина строки в байтах (префикс `u16`).
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// Максимальная длина массива или списка (префикс `i32`).
pub const MAX_SEQUENCE_LEN: usize = i32::MAX as usize;

/// Сколько элементов выделяется заранее за один шаг. Объявленная длина не
/// сверяется с остатком входа, поэтому буфер растёт по мере чтения.
const PREALLOC_LIMIT: usize = 4096;

/// Чтение примитивов формата.
pub trait NbtReadExt: Read {
    /// Строка: `u16` длина, затем байты modified UTF-8.
    fn read_nbt_string(&mut self) -> NbtResult<String> {
        let len = self.read_u16::<BigEndian>()? as usize;
        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf)?;
        Ok(mutf8::decode(&buf)?.into_owned())
    }

    /// Длина массива или списка. Отрицательные значения трактуются как 0.
    fn read_nbt_len(&mut self) -> NbtResult<usize> {
        let len = self.read_i32::<BigEndian>()?;
        Ok(len.max(0) as usize)
    }

    fn read_nbt_byte_array(&mut self) -> NbtResult<Vec<i8>> {
        let len = self.read_nbt_len()?;
        let mut out = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        let mut chunk = [0u8; PREALLOC_LIMIT];
        let mut left = len;
        while left > 0 {
            let n = left.min(PREALLOC_LIMIT);
            self.read_exact(&mut chunk[..n])?;
            out.extend(chunk[..n].iter().map(|&b| b as i8));
            left -= n;
        }
        Ok(out)
    }

    fn read_nbt_int_array(&mut self) -> NbtResult<Vec<i32>> {
        let len = self.read_nbt_len()?;
        let mut out = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        for _ in 0..len {
            out.push(self.read_i32::<BigEndian>()?);
        }
        Ok(out)
    }

    fn read_nbt_long_array(&mut self) -> NbtResult<Vec<i64>> {
        let len = self.read_nbt_len()?;
        let mut out = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        for _ in 0..len {
            out.push(self.read_i64::<BigEndian>()?);
        }
        Ok(out)
    }
}

impl<R: Read + ?Sized> NbtReadExt for R {}

/// Запись примитивов формата.
pub trait NbtWriteExt: Write {
    /// Строка: `u16` длина, затем байты modified UTF-8.
    ///
    /// Возвращает `SizeLimit`, если закодированная строка длиннее 65535 байт.
    fn write_nbt_string(
        &mut self,
        s: &str,
    ) -> NbtResult<()> {
        let bytes = mutf8::encode(s);
        if bytes.len() > MAX_STRING_LEN {
            return Err(NbtError::SizeLimit {
                what: "string",
                size: bytes.len(),
                limit: MAX_STRING_LEN,
            });
        }
        self.write_u16::<BigEndian>(bytes.len() as u16)?;
        self.write_all(&bytes)?;
        Ok(())
    }

    /// Длина массива или списка. Возвращает `SizeLimit` выше `i32::MAX`.
    fn write_nbt_len(
        &mut self,
        what: &'static str,
        len: usize,
    ) -> NbtResult<()> {
        if len > MAX_SEQUENCE_LEN {
            return Err(NbtError::SizeLimit {
                what,
                size: len,
                limit: MAX_SEQUENCE_LEN,
            });
        }
        self.write_i32::<BigEndian>(len as i32)?;
        Ok(())
    }

    fn write_nbt_byte_array(
        &mut self,
        values: &[i8],
    ) -> NbtResult<()> {
        self.write_nbt_len("byte array", values.len())?;
        let bytes: Vec<u8> = values.iter().map(|&b| b as u8).collect();
        self.write_all(&bytes)?;
        Ok(())
    }

    fn write_nbt_int_array(
        &mut self,
        values: &[i32],
    ) -> NbtResult<()> {
        self.write_nbt_len("int array", values.len())?;
        for &v in values {
            self.write_i32::<BigEndian>(v)?;
        }
        Ok(())
    }

    fn write_nbt_long_array(
        &mut self,
        values: &[i64],
    ) -> NbtResult<()> {
        self.write_nbt_len("long array", values.len())?;
        for &v in values {
            self.write_i64::<BigEndian>(v)?;
        }
        Ok(())
    }
}

impl<W: Write + ?Sized> NbtWriteExt for W {}

/// Reader, считающий прочитанные байты.
///
/// Смещение используется в сообщениях об ошибках (`UnknownTagKind`).
pub struct CountingReader<R: Read> {
    inner: R,
    bytes_read: u64,
}

impl<R: Read> CountingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            bytes_read: 0,
        }
    }

    /// Количество байт, прочитанных через обёртку.
    pub fn position(&self) -> u64 {
        self.bytes_read
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(
        &mut self,
        buf: &mut [u8],
    ) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.bytes_read += n as u64;
        Ok(n)
    }
}
