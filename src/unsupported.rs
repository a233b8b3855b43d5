//! Report of style properties the target SLD version cannot express.
//!
//! The check looks at the JSON keys of every symbolizer, so a property is
//! reported exactly when it is set on the model.

use indexmap::IndexMap;

use crate::model::{Style, Symbolizer, SupportInfo, SupportLevel, UnsupportedProperties};
use crate::version::SldVersion;

const FILL_OPACITY_INFO: &str =
    "General opacity is not supported. Use fillOpacity and strokeOpacity instead.";
const ICON_IMAGE_INFO: &str = "Only a literal image URL can be written as OnlineResource.";

/// Properties unsupported in every version, by symbolizer kind.
fn unsupported(kind: &str) -> &'static [&'static str] {
    match kind {
        "MarkSymbolizer" => &["blur", "visibility"],
        "IconSymbolizer" => &["color", "allowOverlap"],
        "LineSymbolizer" => &["blur", "gapWidth", "miterLimit", "spacing"],
        "FillSymbolizer" => &["opacity", "antialias"],
        "TextSymbolizer" => &[
            "letterSpacing",
            "lineHeight",
            "maxAngle",
            "maxWidth",
            "transform",
        ],
        "RasterSymbolizer" => &[
            "brightnessMax",
            "brightnessMin",
            "contrast",
            "hueRotate",
            "resampling",
            "saturation",
        ],
        _ => &[],
    }
}

/// Properties only partly supported in `version`.
fn partial(kind: &str, version: SldVersion) -> &'static [&'static str] {
    match (kind, version) {
        ("MarkSymbolizer" | "IconSymbolizer", SldVersion::V1_0_0) => &["offset"],
        _ => &[],
    }
}

/// Properties that can only be written as literals but hold a function.
fn computed_but_literal_only(symbolizer: &Symbolizer) -> &'static [&'static str] {
    match symbolizer {
        Symbolizer::Icon(icon) if icon.image.as_ref().is_some_and(|i| i.is_function()) => {
            &["image"]
        }
        _ => &[],
    }
}

fn support_info(kind: &str, property: &str, level: SupportLevel) -> SupportInfo {
    match (kind, property) {
        ("FillSymbolizer", "opacity") => SupportInfo::Detailed {
            support: level,
            info: FILL_OPACITY_INFO.to_string(),
        },
        ("IconSymbolizer", "image") => SupportInfo::Detailed {
            support: level,
            info: ICON_IMAGE_INFO.to_string(),
        },
        _ => SupportInfo::Level(level),
    }
}

fn set_properties(symbolizer: &Symbolizer) -> Vec<String> {
    match serde_json::to_value(symbolizer) {
        Ok(serde_json::Value::Object(map)) => map.into_iter().map(|(k, _)| k).collect(),
        Ok(_) => Vec::new(),
        Err(e) => {
            log::warn!("cannot inspect {}: {}", symbolizer.kind_name(), e);
            Vec::new()
        }
    }
}

/// Walk every symbolizer of `style`, or `None` when everything can be
/// written to `version`. Properties are listed in table order.
pub fn check_for_unsupported_properties(
    style: &Style,
    version: SldVersion,
) -> Option<UnsupportedProperties> {
    let mut report: IndexMap<String, IndexMap<String, SupportInfo>> = IndexMap::new();
    for symbolizer in style.rules.iter().flat_map(|r| &r.symbolizers) {
        let kind = symbolizer.kind_name();
        let set = set_properties(symbolizer);
        let levels = unsupported(kind)
            .iter()
            .map(|p| (*p, SupportLevel::None))
            .chain(partial(kind, version).iter().map(|p| (*p, SupportLevel::Partial)))
            .chain(
                computed_but_literal_only(symbolizer)
                    .iter()
                    .map(|p| (*p, SupportLevel::Partial)),
            );
        for (property, level) in levels {
            if !set.iter().any(|s| s == property) {
                continue;
            }
            log::debug!("{}.{} support: {:?}", kind, property, level);
            report
                .entry(kind.to_string())
                .or_default()
                .insert(property.to_string(), support_info(kind, property, level));
        }
    }
    let report = UnsupportedProperties { symbolizer: report };
    (!report.is_empty()).then_some(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;

    fn style_with(symbolizer: Symbolizer) -> Style {
        Style {
            name: "s".into(),
            rules: vec![Rule {
                name: "r".into(),
                symbolizers: vec![symbolizer],
                ..Default::default()
            }],
        }
    }

    #[test]
    fn clean_style_reports_nothing() {
        let style = style_with(Symbolizer::Line(LineSymbolizer {
            color: Some(Expression::string("#000000")),
            ..Default::default()
        }));
        assert_eq!(check_for_unsupported_properties(&style, SldVersion::V1_0_0), None);
    }

    #[test]
    fn fill_opacity_carries_info() {
        let style = style_with(Symbolizer::Fill(FillSymbolizer {
            opacity: Some(Expression::number(0.5)),
            ..Default::default()
        }));
        let report = check_for_unsupported_properties(&style, SldVersion::V1_1_0).unwrap();
        assert_eq!(
            report.symbolizer["FillSymbolizer"]["opacity"],
            SupportInfo::Detailed {
                support: SupportLevel::None,
                info: FILL_OPACITY_INFO.to_string(),
            }
        );
    }

    #[test]
    fn mark_offset_is_partial_in_1_0_0_only() {
        let style = style_with(Symbolizer::Mark(MarkSymbolizer {
            offset: Some([Expression::number(1.0), Expression::number(2.0)]),
            ..Default::default()
        }));
        let report = check_for_unsupported_properties(&style, SldVersion::V1_0_0).unwrap();
        assert_eq!(
            report.symbolizer["MarkSymbolizer"]["offset"],
            SupportInfo::Level(SupportLevel::Partial)
        );
        assert_eq!(check_for_unsupported_properties(&style, SldVersion::V1_1_0), None);
    }

    #[test]
    fn computed_icon_image_is_partial() {
        let computed = style_with(Symbolizer::Icon(IconSymbolizer {
            image: Some(Expression::property("url")),
            ..Default::default()
        }));
        let report = check_for_unsupported_properties(&computed, SldVersion::V1_1_0).unwrap();
        assert_eq!(
            report.symbolizer["IconSymbolizer"]["image"],
            SupportInfo::Detailed {
                support: SupportLevel::Partial,
                info: ICON_IMAGE_INFO.to_string(),
            }
        );

        let literal = style_with(Symbolizer::Icon(IconSymbolizer {
            image: Some(Expression::string("http://example.com/a.png")),
            ..Default::default()
        }));
        assert_eq!(check_for_unsupported_properties(&literal, SldVersion::V1_1_0), None);
    }
}
