use std::any::Any;

use crate::{ErrorExt, StatusCode};

/// Результат операций кодека и модели тегов.
pub type NbtResult<T> = Result<T, NbtError>;

/// Ошибка дерева тегов и бинарного кодека.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NbtError {
    /// Байт типа не соответствует ни одному из 13 известных тегов
    UnknownTagKind { kind: u8, offset: Option<u64> },

    /// Тип элемента не совпадает с объявленным типом списка
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Поток закончился посреди записи
    Truncated { context: String },

    /// Прочие ошибки ввода-вывода
    Io { reason: String },

    /// Индекс за пределами списка
    IndexOutOfRange { index: usize, len: usize },

    /// Превышена допустимая глубина вложенности
    DepthExceeded { depth: usize, max: usize },

    /// Некорректная строка в modified UTF-8
    InvalidString { reason: String },

    /// Превышен лимит размера (длина строки, массива или списка)
    SizeLimit {
        what: &'static str,
        size: usize,
        limit: usize,
    },

    /// Список с типом `TAG_End` и ненулевой длиной
    NonEmptyEndList { len: i64 },
}

impl NbtError {
    /// Добавляет смещение в потоке к ошибке, если вариант его поддерживает.
    pub fn with_offset(
        mut self,
        offset: u64,
    ) -> Self {
        if let Self::UnknownTagKind { offset: o, .. } = &mut self {
            *o = Some(offset);
        }
        self
    }

    /// Возвращает подсказку по восстановлению для пользователя.
    pub fn recovery_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnknownTagKind { .. } => {
                Some("Input may be compressed or not an NBT document. Try probing compression")
            }
            Self::Truncated { .. } => Some("File may be truncated. Check file integrity"),
            Self::DepthExceeded { .. } => Some("Increase max_depth if the input is trusted"),
            _ => None,
        }
    }

    /// Является ли ошибка следствием повреждённого или чужого входа (в
    /// отличие от ошибок построения дерева).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownTagKind { .. }
                | Self::Truncated { .. }
                | Self::InvalidString { .. }
                | Self::NonEmptyEndList { .. }
                | Self::DepthExceeded { .. }
        )
    }
}

impl std::fmt::Display for NbtError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::UnknownTagKind { kind, offset } => {
                write!(f, "Unknown tag kind 0x{kind:02X}")?;
                if let Some(o) = offset {
                    write!(f, " [offset: 0x{o:X}]")?;
                }
                Ok(())
            }
            Self::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: can't put {found} in list of {expected}")
            }
            Self::Truncated { context } => write!(f, "Unexpected end of input: {context}"),
            Self::Io { reason } => write!(f, "I/O error: {reason}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "Index {index} out of range (len: {len})")
            }
            Self::DepthExceeded { depth, max } => {
                write!(f, "Nesting depth {depth} exceeds limit {max}")
            }
            Self::InvalidString { reason } => write!(f, "Invalid modified UTF-8: {reason}"),
            Self::SizeLimit { what, size, limit } => {
                write!(f, "{what} size {size} exceeds limit {limit}")
            }
            Self::NonEmptyEndList { len } => {
                write!(f, "List of TAG_End must be empty, got length {len}")
            }
        }
    }
}

impl std::error::Error for NbtError {}

impl ErrorExt for NbtError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownTagKind { .. } => StatusCode::UnknownTag,
            Self::TypeMismatch { .. } => StatusCode::TypeMismatch,
            Self::Truncated { .. } => StatusCode::UnexpectedEof,
            Self::Io { .. } => StatusCode::Io,
            Self::IndexOutOfRange { .. } => StatusCode::IndexOutOfBounds,
            Self::DepthExceeded { .. } => StatusCode::DepthLimit,
            Self::InvalidString { .. } => StatusCode::InvalidUtf8,
            Self::SizeLimit { .. } => StatusCode::SizeLimit,
            Self::NonEmptyEndList { .. } => StatusCode::InvalidData,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn log_message(&self) -> String {
        let mut msg = format!("{self:?}");
        if let Some(hint) = self.recovery_hint() {
            msg.push_str(&format!(" | Hint: {hint}"));
        }
        msg
    }

    fn metrics_tags(&self) -> Vec<(&'static str, String)> {
        let mut tags = vec![
            ("error_type", self.type_name()),
            ("status_code", self.status_code().to_string()),
            ("input_error", self.is_input_error().to_string()),
        ];

        match self {
            Self::UnknownTagKind { kind, .. } => {
                tags.push(("tag_kind", format!("0x{kind:02X}")));
            }
            Self::SizeLimit { what, .. } => {
                tags.push(("limit_type", what.to_string()));
            }
            _ => {}
        }

        tags
    }
}

// Конверсия в std::io::Error для кода, работающего с io::Result
impl From<NbtError> for std::io::Error {
    fn from(e: NbtError) -> Self {
        let kind = match &e {
            NbtError::Truncated { .. } => std::io::ErrorKind::UnexpectedEof,
            NbtError::Io { .. } => std::io::ErrorKind::Other,
            NbtError::TypeMismatch { .. }
            | NbtError::IndexOutOfRange { .. }
            | NbtError::SizeLimit { .. } => std::io::ErrorKind::InvalidInput,
            NbtError::UnknownTagKind { .. }
            | NbtError::DepthExceeded { .. }
            | NbtError::InvalidString { .. }
            | NbtError::NonEmptyEndList { .. } => std::io::ErrorKind::InvalidData,
        };

        std::io::Error::new(kind, e.to_string())
    }
}

impl From<std::io::Error> for NbtError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => NbtError::Truncated {
                context: e.to_string(),
            },
            _ => NbtError::Io {
                reason: e.to_string(),
            },
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
