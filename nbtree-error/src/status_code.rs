use std::fmt;

use num_enum::TryFromPrimitive;

/// Коды статуса для категоризации ошибок.
///
/// # Диапазоны:
/// - 0xxx: Успех
/// - 1xxx: Общие ошибки
/// - 2xxx: Ошибки модели данных (дерево тегов)
/// - 5xxx: Сжатие и целостность документа
/// - 6xxx: IO
/// - 8xxx: Ошибки бинарного формата
///
/// # Реализация:
/// - `num_enum::TryFromPrimitive` даёт нативную реализацию `TryFrom<u32>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
#[non_exhaustive]
pub enum StatusCode {
    // === 0xxx: Успех ===
    Success = 0,

    // === 1xxx: Общие ошибки ===
    Unknown = 1000,
    Unsupported = 1001,
    Unexpected = 1002,
    Internal = 1003,
    InvalidArgs = 1004,
    InvalidOperation = 1005,

    // === 2xxx: Модель данных ===
    NotFound = 2000,
    TypeMismatch = 2001,
    IndexOutOfBounds = 2002,
    InvalidData = 2003,

    // === 5xxx: Сжатие/целостность ===
    CorruptedData = 5000,
    CompressionFailed = 5001,

    // === 6xxx: IO ===
    Io = 6000,
    PermissionDenied = 6001,
    UnexpectedEof = 6002,

    // === 8xxx: Бинарный формат ===
    UnknownTag = 8000,
    InvalidUtf8 = 8001,
    SizeLimit = 8002,
    DepthLimit = 8003,
    ParseError = 8004,
    EncodingError = 8005,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl StatusCode {
    /// Числовое представление кода статуса.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Пытается получить вариант `StatusCode` из `u32`.
    ///
    /// Возвращает `None`, если значение не соответствует ни одному варианту.
    pub fn from_u32(v: u32) -> Option<Self> {
        Self::try_from(v).ok()
    }

    /// Вернёт `true`, если переданный `code` означает успешный результат.
    pub fn is_success(code: u32) -> bool {
        Self::Success as u32 == code
    }

    /// Является ли код ошибкой со стороны вызывающего (проблема в аргументах
    /// или в построенном дереве).
    pub fn is_client_error(&self) -> bool {
        let c = self.code();
        if (2000..=2999).contains(&c) {
            return true;
        }
        matches!(self, Self::InvalidArgs | Self::InvalidOperation)
    }

    /// Является ли код внутренней или инфраструктурной ошибкой.
    pub fn is_server_error(&self) -> bool {
        let c = self.code();
        ((1000..=1999).contains(&c) && !self.is_client_error()) || (5000..=6999).contains(&c)
    }

    /// Ошибка бинарного формата: входной поток не является корректным
    /// документом (диапазон 8xxx).
    pub fn is_format_error(&self) -> bool {
        (8000..=8999).contains(&self.code())
    }

    /// Требуется ли логировать как критическую ошибку.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Self::Internal | Self::Unexpected | Self::CorruptedData
        )
    }

    /// Рекомендуемый уровень логирования для данного кода.
    pub fn log_level(&self) -> LogLevel {
        match self {
            Self::Success => LogLevel::Trace,
            Self::NotFound => LogLevel::Debug,
            Self::InvalidArgs
            | Self::InvalidOperation
            | Self::TypeMismatch
            | Self::IndexOutOfBounds
            | Self::InvalidData => LogLevel::Info,
            Self::Internal | Self::Unexpected | Self::CorruptedData => LogLevel::Error,
            _ => LogLevel::Warn,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для StatusCode
////////////////////////////////////////////////////////////////////////////////

impl From<StatusCode> for u32 {
    fn from(c: StatusCode) -> Self {
        c.code()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    /// Тест проверяет разделение клиентских и серверных ошибок.
    #[test]
    fn test_client_vs_server() {
        assert!(StatusCode::InvalidArgs.is_client_error());
        assert!(StatusCode::TypeMismatch.is_client_error());
        assert!(StatusCode::IndexOutOfBounds.is_client_error());
        assert!(StatusCode::Internal.is_server_error());
        assert!(StatusCode::Io.is_server_error());
        assert!(!StatusCode::InvalidOperation.is_server_error());
    }

    /// Тест проверяет конвертацию через `TryFrom<u32>` и вспомогательную
    /// `from_u32`.
    #[test]
    fn test_from_try_from_u32() {
        let n = StatusCode::UnknownTag.code();
        assert_eq!(StatusCode::try_from(n).unwrap(), StatusCode::UnknownTag);
        assert!(StatusCode::from_u32(99999).is_none());
    }

    /// Тест проверяет получение числового представления и конвертацию
    /// `From<StatusCode> for u32`.
    #[test]
    fn test_code_and_into() {
        let c = StatusCode::TypeMismatch;
        assert_eq!(c.code(), 2001);
        let n: u32 = c.into();
        assert_eq!(n, 2001);
        assert!(StatusCode::is_success(StatusCode::Success.code()));
        assert!(!StatusCode::is_success(StatusCode::NotFound.code()));
    }

    /// Тест проверяет определение ошибок формата (диапазон 8xxx).
    #[test]
    fn test_is_format_error() {
        assert!(StatusCode::UnknownTag.is_format_error());
        assert!(StatusCode::DepthLimit.is_format_error());
        assert!(!StatusCode::UnexpectedEof.is_format_error());
    }

    /// Тест проверяет, что критические ошибки помечаются корректно.
    #[test]
    fn test_is_critical() {
        assert!(StatusCode::Internal.is_critical());
        assert!(StatusCode::CorruptedData.is_critical());
        assert!(!StatusCode::NotFound.is_critical());
    }

    /// Тест проверяет отображаемый уровень логирования для разных кодов.
    #[test]
    fn test_log_level_mappings() {
        assert_eq!(StatusCode::Success.log_level(), LogLevel::Trace);
        assert_eq!(StatusCode::NotFound.log_level(), LogLevel::Debug);
        assert_eq!(StatusCode::TypeMismatch.log_level(), LogLevel::Info);
        assert_eq!(StatusCode::UnexpectedEof.log_level(), LogLevel::Warn);
        assert_eq!(StatusCode::Internal.log_level(), LogLevel::Error);
    }

    /// Тест проверяет формат `Display`: строка должна содержать имя варианта и
    /// числовой код.
    #[test]
    fn test_display_contains_name_and_code() {
        let s = format!("{}", StatusCode::UnknownTag);
        assert!(
            s.contains("8000"),
            "Display must contain code 8000, got: {s}"
        );
        assert!(
            s.contains("UnknownTag"),
            "Display must contain variant name 'UnknownTag', got: {s}"
        );
    }
}
