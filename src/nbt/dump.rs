//! Отладочный вывод дерева тегов.
//!
//! Формат:
//!
//! ```text
//! TAG_Compound('hello world'): 1 entry
//! {
//!   TAG_String('name'): 'Bananrama'
//! }
//! ```
//!
//! Элементы списков безымянны и выводятся как `TAG_Int(None): 5`.
//! Содержимое контейнеров глубже [`DEFAULT_MAX_DEPTH`] заменяется на `...`.

use std::fmt::{self, Write};

use super::{decode::DEFAULT_MAX_DEPTH, NamedTag, Tag};

const INDENT: &str = "  ";

/// Рендерит корень в строку.
pub fn dump(root: &NamedTag) -> String {
    let mut out = String::new();
    // Запись в String не бывает неуспешной.
    let _ = write_dump(&mut out, Some(&root.name), &root.tag, 0);
    out
}

/// Пишет тег (и рекурсивно его детей) в `out`.
pub fn write_dump<W: Write>(
    out: &mut W,
    name: Option<&str>,
    tag: &Tag,
    level: usize,
) -> fmt::Result {
    let pad = INDENT.repeat(level);
    let kind = tag.kind();

    if matches!(tag, Tag::End) {
        return writeln!(out, "{pad}{kind}");
    }

    match name {
        Some(n) => write!(out, "{pad}{kind}('{n}'): ")?,
        None => write!(out, "{pad}{kind}(None): ")?,
    }

    match tag {
        Tag::End => Ok(()),
        Tag::Byte(v) => writeln!(out, "{v}"),
        Tag::Short(v) => writeln!(out, "{v}"),
        Tag::Int(v) => writeln!(out, "{v}"),
        Tag::Long(v) => writeln!(out, "{v}"),
        Tag::Float(v) => writeln!(out, "{v}"),
        Tag::Double(v) => writeln!(out, "{v}"),
        Tag::String(s) => writeln!(out, "'{s}'"),
        Tag::ByteArray(v) => writeln!(out, "[{} bytes]", v.len()),
        Tag::IntArray(v) => writeln!(out, "[{} ints]", v.len()),
        Tag::LongArray(v) => writeln!(out, "[{} longs]", v.len()),
        Tag::List(list) => {
            writeln!(
                out,
                "{} of {}",
                entries(list.len()),
                list.content_kind()
            )?;
            writeln!(out, "{pad}{{")?;
            if level >= DEFAULT_MAX_DEPTH {
                writeln!(out, "{pad}{INDENT}...")?;
            } else {
                for item in list {
                    write_dump(out, None, item, level + 1)?;
                }
            }
            writeln!(out, "{pad}}}")
        }
        Tag::Compound(compound) => {
            writeln!(out, "{}", entries(compound.len()))?;
            writeln!(out, "{pad}{{")?;
            if level >= DEFAULT_MAX_DEPTH {
                writeln!(out, "{pad}{INDENT}...")?;
            } else {
                for (child_name, child) in compound.iter() {
                    write_dump(out, Some(child_name), child, level + 1)?;
                }
            }
            writeln!(out, "{pad}}}")
        }
    }
}

fn entries(n: usize) -> String {
    if n == 1 {
        "1 entry".to_string()
    } else {
        format!("{n} entries")
    }
}
