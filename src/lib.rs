/// Application settings (defaults, `nbtree.toml`, `NBTREE_*` environment).
pub mod config;
/// Logging setup (filters, formats).
pub mod logging;
/// Named binary tag format: tag model, codec, compression, documents.
pub mod nbt;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Settings.
pub use config::Settings;
/// Logging configuration and initialization.
pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingError};
/// Tag model, codec entry points and the document handle.
pub use nbt::{
    dump, probe_compression, read_tag, read_tag_with_depth, write_tag, CompressionMode,
    DecodeOptions, Document, NamedTag, Tag, TagCompound, TagKind, TagList, DEFAULT_MAX_DEPTH,
};
/// Error types shared with the error crate.
pub use nbtree_error::{NbtError, NbtResult, NbtreeResult, StackError, StatusCode};
