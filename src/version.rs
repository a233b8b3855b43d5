//! Version-dependent spelling of SLD tags, attributes and namespaces.
//!
//! Both directions resolve names through this module so that the 1.0.0 and
//! 1.1.0 (Symbology Encoding) dialects cannot drift apart. Reading compares
//! local names only, so only the write side needs prefixed names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SldError;

/// Symbology Encoding namespace, used by 1.1.0 documents only.
pub const SE_NAMESPACE: &str = "http://www.opengis.net/se";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SldVersion {
    #[default]
    #[serde(rename = "1.0.0")]
    V1_0_0,
    #[serde(rename = "1.1.0")]
    V1_1_0,
}

impl SldVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            SldVersion::V1_0_0 => "1.0.0",
            SldVersion::V1_1_0 => "1.1.0",
        }
    }

    /// Local name of the styling-parameter element.
    pub fn parameter_tag(self) -> &'static str {
        match self {
            SldVersion::V1_0_0 => "CssParameter",
            SldVersion::V1_1_0 => "SvgParameter",
        }
    }

    /// Escape attribute of `PropertyIsLike`.
    pub fn like_escape_attribute(self) -> &'static str {
        match self {
            SldVersion::V1_0_0 => "escape",
            SldVersion::V1_1_0 => "escapeChar",
        }
    }

    pub fn schema_location(self) -> &'static str {
        match self {
            SldVersion::V1_0_0 => "http://www.opengis.net/sld StyledLayerDescriptor.xsd",
            SldVersion::V1_1_0 => {
                "http://www.opengis.net/sld http://schemas.opengis.net/sld/1.1.0/StyledLayerDescriptor.xsd"
            }
        }
    }

    /// Namespace declarations of the `StyledLayerDescriptor` root.
    pub fn namespaces(self) -> &'static [(&'static str, &'static str)] {
        const COMMON: &[(&str, &str)] = &[
            ("xmlns", "http://www.opengis.net/sld"),
            ("xmlns:ogc", "http://www.opengis.net/ogc"),
            ("xmlns:xlink", "http://www.w3.org/1999/xlink"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ];
        const SE: &[(&str, &str)] = &[
            ("xmlns", "http://www.opengis.net/sld"),
            ("xmlns:ogc", "http://www.opengis.net/ogc"),
            ("xmlns:xlink", "http://www.w3.org/1999/xlink"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
            ("xmlns:se", SE_NAMESPACE),
        ];
        match self {
            SldVersion::V1_0_0 => COMMON,
            SldVersion::V1_1_0 => SE,
        }
    }

    /// Whether `UserStyle/Title` is wrapped in a Symbology Encoding
    /// `Description` element.
    pub fn wraps_description(self) -> bool {
        self == SldVersion::V1_1_0
    }
}

impl fmt::Display for SldVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SldVersion {
    type Err = SldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1.0.0" => Ok(SldVersion::V1_0_0),
            "1.1.0" => Ok(SldVersion::V1_1_0),
            other => Err(SldError::InvalidValue {
                kind: "SLD version",
                value: other.to_string(),
            }),
        }
    }
}

/// Unit of measure stamped as `uom` onto written symbolizers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolizerUnits {
    Metre,
    Foot,
    #[default]
    Pixel,
}

impl SymbolizerUnits {
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolizerUnits::Metre => "metre",
            SymbolizerUnits::Foot => "foot",
            SymbolizerUnits::Pixel => "pixel",
        }
    }

    pub fn uri(self) -> String {
        format!("http://www.opengeospatial.org/se/units/{}", self.as_str())
    }
}

impl FromStr for SymbolizerUnits {
    type Err = SldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metre" => Ok(SymbolizerUnits::Metre),
            "foot" => Ok(SymbolizerUnits::Foot),
            "pixel" => Ok(SymbolizerUnits::Pixel),
            other => Err(SldError::InvalidValue {
                kind: "symbolizer unit",
                value: other.to_string(),
            }),
        }
    }
}

/// Logical tag → (1.0.0 spelling, 1.1.0 spelling) for every tag that does not
/// follow the default rule (unprefixed in 1.0.0, `se:` in 1.1.0).
const TAG_TABLE: &[(&str, &str, &str)] = &[
    ("StyledLayerDescriptor", "StyledLayerDescriptor", "StyledLayerDescriptor"),
    ("NamedLayer", "NamedLayer", "NamedLayer"),
    ("UserStyle", "UserStyle", "UserStyle"),
    ("CssParameter", "CssParameter", "se:SvgParameter"),
    ("SvgParameter", "CssParameter", "se:SvgParameter"),
    ("Filter", "ogc:Filter", "ogc:Filter"),
    ("And", "ogc:And", "ogc:And"),
    ("Or", "ogc:Or", "ogc:Or"),
    ("Not", "ogc:Not", "ogc:Not"),
    ("Function", "ogc:Function", "ogc:Function"),
    ("PropertyName", "ogc:PropertyName", "ogc:PropertyName"),
    ("Literal", "ogc:Literal", "ogc:Literal"),
    ("LowerBoundary", "ogc:LowerBoundary", "ogc:LowerBoundary"),
    ("UpperBoundary", "ogc:UpperBoundary", "ogc:UpperBoundary"),
    ("PropertyIsEqualTo", "ogc:PropertyIsEqualTo", "ogc:PropertyIsEqualTo"),
    ("PropertyIsNotEqualTo", "ogc:PropertyIsNotEqualTo", "ogc:PropertyIsNotEqualTo"),
    ("PropertyIsLike", "ogc:PropertyIsLike", "ogc:PropertyIsLike"),
    ("PropertyIsLessThan", "ogc:PropertyIsLessThan", "ogc:PropertyIsLessThan"),
    (
        "PropertyIsLessThanOrEqualTo",
        "ogc:PropertyIsLessThanOrEqualTo",
        "ogc:PropertyIsLessThanOrEqualTo",
    ),
    ("PropertyIsGreaterThan", "ogc:PropertyIsGreaterThan", "ogc:PropertyIsGreaterThan"),
    (
        "PropertyIsGreaterThanOrEqualTo",
        "ogc:PropertyIsGreaterThanOrEqualTo",
        "ogc:PropertyIsGreaterThanOrEqualTo",
    ),
    ("PropertyIsNull", "ogc:PropertyIsNull", "ogc:PropertyIsNull"),
    ("PropertyIsBetween", "ogc:PropertyIsBetween", "ogc:PropertyIsBetween"),
];

/// Qualified tag name used when writing `tag` in the given version.
pub fn tag_name(tag: &str, version: SldVersion) -> String {
    if let Some((_, v10, v11)) = TAG_TABLE.iter().find(|(logical, _, _)| *logical == tag) {
        return match version {
            SldVersion::V1_0_0 => (*v10).to_string(),
            SldVersion::V1_1_0 => (*v11).to_string(),
        };
    }
    match version {
        SldVersion::V1_0_0 => tag.to_string(),
        SldVersion::V1_1_0 => format!("se:{}", tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_tag_follows_version() {
        assert_eq!(tag_name("CssParameter", SldVersion::V1_0_0), "CssParameter");
        assert_eq!(tag_name("CssParameter", SldVersion::V1_1_0), "se:SvgParameter");
        assert_eq!(SldVersion::V1_1_0.parameter_tag(), "SvgParameter");
    }

    #[test]
    fn filter_tags_keep_ogc_prefix() {
        for v in [SldVersion::V1_0_0, SldVersion::V1_1_0] {
            assert_eq!(tag_name("PropertyIsBetween", v), "ogc:PropertyIsBetween");
            assert_eq!(tag_name("Filter", v), "ogc:Filter");
        }
    }

    #[test]
    fn symbology_tags_get_se_prefix_in_1_1_0() {
        assert_eq!(tag_name("Rule", SldVersion::V1_0_0), "Rule");
        assert_eq!(tag_name("Rule", SldVersion::V1_1_0), "se:Rule");
        assert_eq!(tag_name("NamedLayer", SldVersion::V1_1_0), "NamedLayer");
    }

    #[test]
    fn version_strings_parse() {
        assert_eq!("1.1.0".parse::<SldVersion>().unwrap(), SldVersion::V1_1_0);
        assert!("2.0".parse::<SldVersion>().is_err());
        assert_eq!(
            SymbolizerUnits::Metre.uri(),
            "http://www.opengeospatial.org/se/units/metre"
        );
    }
}
