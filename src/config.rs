//! Parser configuration. Built once and only ever read during a translation.

use serde::{Deserialize, Serialize};

use crate::translations::{DEFAULT_LOCALE, Translations, default_translations};
use crate::version::{SldVersion, SymbolizerUnits};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserConfig {
    /// Version written by `write_style`.
    pub sld_version: SldVersion,
    /// Version assumed by `read_style` when the document does not declare one.
    pub reading_sld_version: SldVersion,
    /// Filter properties whose compared literal is cast to a number even in
    /// `PropertyIsLike`. Other comparisons cast numeric literals anyway.
    pub numeric_filter_fields: Vec<String>,
    /// Filter properties whose compared literal is cast to a boolean.
    pub bool_filter_fields: Vec<String>,
    pub symbolizer_units: SymbolizerUnits,
    pub reader: ReaderOptions,
    pub writer: WriterOptions,
    pub locale: String,
    pub translations: Translations,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            sld_version: SldVersion::default(),
            reading_sld_version: SldVersion::default(),
            numeric_filter_fields: Vec::new(),
            bool_filter_fields: Vec::new(),
            symbolizer_units: SymbolizerUnits::default(),
            reader: ReaderOptions::default(),
            writer: WriterOptions::default(),
            locale: DEFAULT_LOCALE.to_string(),
            translations: default_translations(),
        }
    }
}

impl ParserConfig {
    pub fn is_numeric_field(&self, name: &str) -> bool {
        self.numeric_filter_fields.iter().any(|f| f == name)
    }

    pub fn is_bool_field(&self, name: &str) -> bool {
        self.bool_filter_fields.iter().any(|f| f == name)
    }
}

/// Options handed to the XML tokenizer (`roxmltree`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReaderOptions {
    pub allow_dtd: bool,
}

impl ReaderOptions {
    pub fn parsing_options(&self) -> roxmltree::ParsingOptions {
        let mut opts = roxmltree::ParsingOptions::default();
        opts.allow_dtd = self.allow_dtd;
        opts
    }
}

/// Options handed to the XML serializer (`quick-xml`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WriterOptions {
    /// Spaces per nesting level; `None` writes everything on one line.
    pub indent: Option<usize>,
    pub xml_declaration: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            indent: Some(2),
            xml_declaration: true,
        }
    }
}
