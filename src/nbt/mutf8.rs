//! Modified UTF-8 для имён и строковых тегов.
//!
//! Отличия от стандартного UTF-8:
//! - NUL кодируется двухбайтовой парой `C0 80`;
//! - символы выше U+FFFF кодируются суррогатной парой, каждая половина
//!   отдельной трёхбайтовой последовательностью (итого 6 байт).
//!
//! Для ASCII-строк без NUL оба представления совпадают, и кодек возвращает
//! заимствованные данные без копирования.

use std::borrow::Cow;

use nbtree_error::{NbtError, NbtResult};

/// Кодирует строку в modified UTF-8.
pub fn encode(s: &str) -> Cow<'_, [u8]> {
    if !needs_escape(s) {
        return Cow::Borrowed(s.as_bytes());
    }

    let mut out = Vec::with_capacity(encoded_len(s));
    for ch in s.chars() {
        match ch as u32 {
            0 => out.extend_from_slice(&[0xC0, 0x80]),
            cp if cp > 0xFFFF => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    push_three_bytes(&mut out, *unit);
                }
            }
            _ => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    out.into()
}

/// Длина строки в modified UTF-8 без выделения памяти.
pub fn encoded_len(s: &str) -> usize {
    s.chars()
        .map(|ch| match ch as u32 {
            0 => 2,
            cp if cp > 0xFFFF => 6,
            _ => ch.len_utf8(),
        })
        .sum()
}

/// Декодирует modified UTF-8.
///
/// Стандартный UTF-8 (включая четырёхбайтовые последовательности) также
/// принимается. Непарные суррогаты и обрезанные последовательности дают
/// `InvalidString`.
pub fn decode(bytes: &[u8]) -> NbtResult<Cow<'_, str>> {
    // Валидный стандартный UTF-8 не содержит ни `C0 80`, ни суррогатов.
    if let Ok(s) = std::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(s));
    }

    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b0 = bytes[i];
        let (cp, width) = if b0 < 0x80 {
            (b0 as u32, 1)
        } else if b0 & 0xE0 == 0xC0 {
            let b1 = continuation(bytes, i + 1)?;
            ((((b0 & 0x1F) as u32) << 6) | b1, 2)
        } else if b0 & 0xF0 == 0xE0 {
            let unit = three_byte_unit(bytes, i)?;
            if (0xD800..0xDC00).contains(&unit) {
                let low = three_byte_unit(bytes, i + 3).map_err(|_| unpaired(unit, i))?;
                if !(0xDC00..0xE000).contains(&low) {
                    return Err(unpaired(unit, i));
                }
                (0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00), 6)
            } else if (0xDC00..0xE000).contains(&unit) {
                return Err(unpaired(unit, i));
            } else {
                (unit, 3)
            }
        } else if b0 & 0xF8 == 0xF0 {
            let b1 = continuation(bytes, i + 1)?;
            let b2 = continuation(bytes, i + 2)?;
            let b3 = continuation(bytes, i + 3)?;
            ((((b0 & 0x07) as u32) << 18) | (b1 << 12) | (b2 << 6) | b3, 4)
        } else {
            return Err(NbtError::InvalidString {
                reason: format!("invalid lead byte 0x{b0:02X} at {i}"),
            });
        };

        let ch = char::from_u32(cp).ok_or_else(|| NbtError::InvalidString {
            reason: format!("invalid code point U+{cp:X} at {i}"),
        })?;
        out.push(ch);
        i += width;
    }

    Ok(Cow::Owned(out))
}

fn needs_escape(s: &str) -> bool {
    s.chars().any(|ch| ch == '\0' || ch as u32 > 0xFFFF)
}

fn push_three_bytes(
    out: &mut Vec<u8>,
    unit: u16,
) {
    out.push(0xE0 | (unit >> 12) as u8);
    out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
    out.push(0x80 | (unit & 0x3F) as u8);
}

fn continuation(
    bytes: &[u8],
    pos: usize,
) -> NbtResult<u32> {
    match bytes.get(pos) {
        Some(&b) if b & 0xC0 == 0x80 => Ok((b & 0x3F) as u32),
        Some(&b) => Err(NbtError::InvalidString {
            reason: format!("expected continuation byte at {pos}, got 0x{b:02X}"),
        }),
        None => Err(NbtError::InvalidString {
            reason: format!("sequence cut short at {pos}"),
        }),
    }
}

fn three_byte_unit(
    bytes: &[u8],
    pos: usize,
) -> NbtResult<u32> {
    let b0 = *bytes.get(pos).ok_or_else(|| NbtError::InvalidString {
        reason: format!("sequence cut short at {pos}"),
    })?;
    if b0 & 0xF0 != 0xE0 {
        return Err(NbtError::InvalidString {
            reason: format!("expected three-byte sequence at {pos}"),
        });
    }
    let b1 = continuation(bytes, pos + 1)?;
    let b2 = continuation(bytes, pos + 2)?;
    Ok((((b0 & 0x0F) as u32) << 12) | (b1 << 6) | b2)
}

fn unpaired(
    unit: u32,
    pos: usize,
) -> NbtError {
    NbtError::InvalidString {
        reason: format!("unpaired surrogate U+{unit:04X} at {pos}"),
    }
}
