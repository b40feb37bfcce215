//! Layout-preserving properties store for JCamStream.
//!
//! [`OrderedConfigStore`] reads and writes `key = value` configuration files
//! the way a plain properties map would, but keeps the file's physical
//! layout: comments, blank lines and key order survive every load/modify/store
//! cycle, and new keys can be placed right before or after an existing one.
//!
//! # File format
//!
//! - ISO-8859-1 text; `\n`, `\r\n` or `\r` end a line on input, the
//!   configured [`LineSeparator`] ends every line on output.
//! - A line is blank, a comment (`#` or `!` after optional whitespace), or a
//!   single `key = value` pair (`=`, `:` or whitespace separate the key).
//! - Backslash escapes work within one line; there are no continuation lines.
//!
//! # Modules
//!
//! - [`store`]: the [`OrderedConfigStore`] itself
//! - [`line`]: [`LineRecord`] and single-line properties syntax
//! - [`codec`]: ISO-8859-1 decoding/encoding and line splitting
//! - [`config`]: [`StoreConfig`], [`LineSeparator`], [`MalformedLinePolicy`]
//! - [`traits`]: [`PropertySource`], the read-only view consumers depend on
//! - [`error`]: [`PropsError`]

pub mod codec;
pub mod config;
pub mod error;
pub mod line;
pub mod store;
pub mod traits;

pub use config::{LineSeparator, MalformedLinePolicy, StoreConfig};
pub use error::{PropsError, PropsResult};
pub use line::LineRecord;
pub use store::OrderedConfigStore;
pub use traits::PropertySource;
