use thiserror::Error;

use crate::translations::MessageKey;

pub type Result<T, E = SldError> = std::result::Result<T, E>;

/// Everything that makes a read or write fail.
///
/// Absent optional nodes and unparseable numeric literals are not errors;
/// they degrade to missing values or string literals.
#[derive(Debug, Error)]
pub enum SldError {
    #[error("failed to parse SLD document: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize SLD document: {0}")]
    Write(String),

    #[error("no StyledLayerDescriptor element found")]
    MissingRoot,

    #[error("Failed to parse SymbolizerKind {name} from SldRule.")]
    UnknownSymbolizer { name: String },

    #[error("MarkSymbolizer cannot be parsed. WellKnownName {name} is not supported.")]
    UnknownWellKnownName { name: String },

    #[error("Not supported operator type {name}.")]
    UnknownOperator { name: String },

    #[error("Operator {operator} is missing an operand.")]
    MissingOperand { operator: String },

    #[error("Cannot parse ColorMapEntries. color is undefined.")]
    ColorUndefined,

    #[error("Cannot parse ContrastEnhancement. Histogram and Normalize are mutually exclusive.")]
    HistogramAndNormalize,

    #[error("Cannot parse ChannelSelection. RGB and Grayscale are mutually exclusive.")]
    RgbAndGray,

    #[error("Cannot parse ChannelSelection. Red, Green and Blue channels must be defined.")]
    RgbChannelsUndefined,

    #[error("invalid {kind}: {value}")]
    InvalidValue { kind: &'static str, value: String },
}

impl SldError {
    pub(crate) fn write(e: impl std::fmt::Display) -> Self {
        SldError::Write(e.to_string())
    }

    /// Translation key for errors that have a localized message.
    pub fn message_key(&self) -> Option<MessageKey> {
        match self {
            SldError::UnknownSymbolizer { .. } => Some(MessageKey::SymbolizerKindParseFailed),
            SldError::UnknownWellKnownName { .. } => {
                Some(MessageKey::MarksymbolizerParseFailedUnknownWellknownName)
            }
            SldError::ColorUndefined => Some(MessageKey::ColorMapEntriesParseFailedColorUndefined),
            SldError::HistogramAndNormalize => {
                Some(MessageKey::ContrastEnhancParseFailedHistoAndNormalizeMutuallyExclusive)
            }
            SldError::RgbAndGray => {
                Some(MessageKey::ChannelSelectionParseFailedRgbAndGrayscaleMutuallyExclusive)
            }
            SldError::RgbChannelsUndefined => {
                Some(MessageKey::ChannelSelectionParseFailedRgbChannelsUndefined)
            }
            _ => None,
        }
    }

    /// Template parameters for [`Self::message_key`].
    pub fn message_params(&self) -> Vec<(&'static str, &str)> {
        match self {
            SldError::UnknownSymbolizer { name } => vec![("sldSymbolizerName", name.as_str())],
            SldError::UnknownWellKnownName { name } => vec![("wellKnownName", name.as_str())],
            _ => Vec::new(),
        }
    }
}
