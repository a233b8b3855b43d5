//! SLD → style model.
//!
//! Sub-modules split the read side into focused areas:
//!
//! - [`helpers`] – Tree accessors (children, attributes, styling parameters)
//! - [`path`] – Dotted path queries built on the accessors
//! - [`expression`] – Literals, property references and functions
//! - [`filter`] – `<ogc:Filter>` operators
//! - [`symbolizer`] – Point, line, polygon and text symbolizers
//! - [`raster`] – Raster symbolizers
//! - [`rule`] – Rules and the enclosing style

pub mod expression;
pub mod filter;
pub mod helpers;
pub mod path;
pub mod raster;
pub mod rule;
pub mod symbolizer;

pub use helpers::{
    get_attribute, get_child, get_children, get_parameter_value, is_symbolizer,
};
pub use path::{Lookup, PathQuery, get, get_node, get_text, get_value};

use crate::config::ParserConfig;
use crate::error::Result;
use crate::model::Style;
use crate::translations::{MessageKey, translate};
use crate::version::SldVersion;
use roxmltree::Document;
use std::cell::RefCell;

/// State shared by every decoder during one read.
#[derive(Debug)]
pub struct ReadContext<'c> {
    pub config: &'c ParserConfig,
    /// Version of the document being read.
    pub version: SldVersion,
    warnings: RefCell<Vec<String>>,
}

impl<'c> ReadContext<'c> {
    pub fn new(config: &'c ParserConfig, version: SldVersion) -> Self {
        Self {
            config,
            version,
            warnings: RefCell::new(Vec::new()),
        }
    }

    /// Record a recoverable problem with the document.
    pub fn warn(&self, message: String) {
        log::warn!("{}", message);
        self.warnings.borrow_mut().push(message);
    }

    pub fn into_warnings(self) -> Vec<String> {
        self.warnings.into_inner()
    }

    pub fn message(&self, key: MessageKey) -> String {
        translate(&self.config.translations, &self.config.locale, key, &[]).unwrap_or_default()
    }
}

/// Decode a parsed document, returning the style and the warnings raised
/// on the way. The document's `version` attribute, or its use of the
/// Symbology Encoding namespace, wins over `config.reading_sld_version`.
pub fn read_document(doc: &Document, config: &ParserConfig) -> Result<(Style, Vec<String>)> {
    let root = rule::find_root(doc)?;
    let version = rule::declared_version(root).unwrap_or(config.reading_sld_version);
    log::debug!("reading SLD {}", version);
    let ctx = ReadContext::new(config, version);
    let style = rule::parse_style(root, &ctx)?;
    Ok((style, ctx.into_warnings()))
}
