//! Convert a Go `vendor/modules.txt` into FreeBSD ports `GH_TUPLE` /
//! `GL_TUPLE` mirror tuples.
//!
//! The pipeline is: [`reader`] filters module lines and resolves them in
//! parallel ([`tuple`] parsing, [`resolve`] mirror lookup, [`normalize`]
//! remote fix-ups), [`postprocess`] reconciles the tuple set, and
//! [`render`] produces the ports text.

pub mod apis;
pub mod config;
pub mod error;
pub mod normalize;
pub mod postprocess;
pub mod reader;
pub mod render;
pub mod resolve;
pub mod tuple;

pub use config::Config;
pub use error::{Error, SoftError, SoftErrorKind};
pub use reader::{read, read_file, Resolution};
