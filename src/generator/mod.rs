//! Style model → SLD.
//!
//! - [`xml`] – Owned element tree and its `quick-xml` serialization
//! - [`expression`] – Literals, property references, functions and styling parameters
//! - [`filter`] – `<ogc:Filter>` operators
//! - [`symbolizer`] – Point, line, polygon and text symbolizers, label templates
//! - [`raster`] – Raster symbolizers
//! - [`style`] – The `StyledLayerDescriptor` skeleton and its rules

pub mod expression;
pub mod filter;
pub mod raster;
pub mod style;
pub mod symbolizer;
pub mod xml;

pub use symbolizer::{LabelToken, tokenize_label};
pub use xml::{Element, XmlNode};

use crate::config::ParserConfig;
use crate::error::Result;
use crate::model::Style;
use crate::version::SldVersion;

/// Read-only state shared by every encoder during one write.
#[derive(Debug, Clone, Copy)]
pub struct WriteContext<'c> {
    pub config: &'c ParserConfig,
    /// Version being written.
    pub version: SldVersion,
}

impl<'c> WriteContext<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self {
            config,
            version: config.sld_version,
        }
    }
}

/// Encode `style` and serialize it with the configured writer options.
pub fn write_document(style: &Style, config: &ParserConfig) -> Result<String> {
    let ctx = WriteContext::new(config);
    log::debug!("writing SLD {}", ctx.version);
    let root = style::style_element(style, &ctx)?;
    xml::serialize(&root, &config.writer)
}
