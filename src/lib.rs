//! OGC Styled Layer Descriptor (SLD) reader and writer.
//!
//! [`SldStyleParser`] turns SLD 1.0.0 and 1.1.0 (Symbology Encoding)
//! documents into a version-agnostic [`model::Style`] and writes styles back
//! in either version.
//!
//! The binary `sldstyle` converts SLD files to JSON and back.

pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod style_parser;
pub mod translations;
pub mod unsupported;
pub mod version;

pub use config::{ParserConfig, ReaderOptions, WriterOptions};
pub use error::{Result, SldError};
pub use style_parser::{ReadStyleResult, SldStyleParser, WriteStyleResult};
pub use version::{SldVersion, SymbolizerUnits};
