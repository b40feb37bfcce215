//! Typed access to the JCamStream configuration file.
//!
//! [`JcsConf`] owns the configuration file path and a layout-preserving
//! [`OrderedConfigStore`](jcs_props::OrderedConfigStore). The
//! [`MailSettings`] extension trait adds typed getters (SMTP host and port,
//! auth flags, subject, recipient sets) to anything that implements
//! [`PropertySource`](jcs_props::PropertySource).
//!
//! # Key Types
//!
//! - [`JcsConf`] -- file-backed configuration, reloadable and re-pointable
//! - [`MailSettings`] -- typed mail getters
//! - [`MailConfig`] -- snapshot of all mail settings
//! - [`keys`] -- property names and defaults

pub mod conf;
pub mod error;
pub mod keys;
pub mod mail;

pub use conf::JcsConf;
pub use error::{ConfError, ConfResult};
pub use mail::{parse_recipients, MailConfig, MailSettings};
