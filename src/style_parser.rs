//! The public read/write facade.

use camino::Utf8Path;
use roxmltree::Document;
use serde::Serialize;

use crate::config::ParserConfig;
use crate::error::{Result, SldError};
use crate::generator::write_document;
use crate::model::{Style, UnsupportedProperties};
use crate::parser::read_document;
use crate::translations::{MessageKey, translate};
use crate::unsupported::check_for_unsupported_properties;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadStyleResult {
    pub output: Style,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteStyleResult {
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsupported_properties: Option<UnsupportedProperties>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Translates between SLD documents and [`Style`]s. Holds only
/// configuration, so one parser can serve any number of calls, including
/// concurrent ones.
#[derive(Debug, Clone, Default)]
pub struct SldStyleParser {
    config: ParserConfig,
}

impl SldStyleParser {
    pub const TITLE: &'static str = "OGC Styled Layer Descriptor";

    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse an SLD document into a [`Style`].
    pub fn read_style(&self, sld: &str) -> Result<ReadStyleResult> {
        let doc = Document::parse_with_options(sld, self.config.reader.parsing_options())?;
        let (output, warnings) = read_document(&doc, &self.config)?;
        Ok(ReadStyleResult { output, warnings })
    }

    pub fn read_style_file(&self, path: &Utf8Path) -> Result<ReadStyleResult> {
        let sld = std::fs::read_to_string(path).map_err(|source| SldError::Io {
            path: path.to_string(),
            source,
        })?;
        self.read_style(&sld)
    }

    /// Encode `style` in the configured SLD version. Properties the version
    /// cannot fully express are reported alongside the document.
    pub fn write_style(&self, style: &Style) -> Result<WriteStyleResult> {
        let version = self.config.sld_version;
        let unsupported_properties = check_for_unsupported_properties(style, version);
        let mut warnings = Vec::new();
        if let Some(report) = &unsupported_properties {
            for (kind, properties) in &report.symbolizer {
                for property in properties.keys() {
                    warnings.push(format!(
                        "{}.{} is not fully supported by SLD {}",
                        kind, property, version
                    ));
                }
            }
        }
        for w in &warnings {
            log::warn!("{}", w);
        }
        Ok(WriteStyleResult {
            output: write_document(style, &self.config)?,
            unsupported_properties,
            warnings,
        })
    }

    /// Localized message for `key` in the configured locale.
    pub fn translate(&self, key: MessageKey, params: &[(&str, &str)]) -> Option<String> {
        translate(&self.config.translations, &self.config.locale, key, params)
    }

    /// Localized description of `error`, or its English text when it has no
    /// message template.
    pub fn describe_error(&self, error: &SldError) -> String {
        error
            .message_key()
            .and_then(|key| self.translate(key, &error.message_params()))
            .unwrap_or_else(|| error.to_string())
    }
}
