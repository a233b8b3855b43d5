//! The `StyledLayerDescriptor` skeleton: one named layer holding one user
//! style holding one feature type style with every rule.

use crate::error::Result;
use crate::generator::WriteContext;
use crate::generator::filter::filter_document;
use crate::generator::symbolizer::symbolizer_element;
use crate::generator::xml::Element;
use crate::model::{Rule, Style};
use crate::version::tag_name;

pub fn style_element(style: &Style, ctx: &WriteContext) -> Result<Element> {
    let v = ctx.version;
    let title = Element::text(tag_name("Title", v), style.name.as_str());
    let title = if v.wraps_description() {
        Element::new(tag_name("Description", v)).with_child(title)
    } else {
        title
    };

    let mut feature_type_style = Element::new(tag_name("FeatureTypeStyle", v));
    for rule in &style.rules {
        feature_type_style.push(rule_element(rule, ctx)?);
    }

    let user_style = Element::new(tag_name("UserStyle", v))
        .with_child(Element::text(tag_name("Name", v), style.name.as_str()))
        .with_child(title)
        .with_child(feature_type_style);
    let named_layer = Element::new(tag_name("NamedLayer", v))
        .with_child(Element::text(tag_name("Name", v), style.name.as_str()))
        .with_child(user_style);

    let mut root = Element::new(tag_name("StyledLayerDescriptor", v))
        .with_attr("version", v.as_str())
        .with_attr("xsi:schemaLocation", v.schema_location());
    for (key, uri) in v.namespaces() {
        root = root.with_attr(*key, *uri);
    }
    Ok(root.with_child(named_layer))
}

pub fn rule_element(rule: &Rule, ctx: &WriteContext) -> Result<Element> {
    let v = ctx.version;
    let mut element =
        Element::new(tag_name("Rule", v)).with_child(Element::text(tag_name("Name", v), rule.name.as_str()));
    element.push_opt(rule.filter.as_ref().map(|f| filter_document(f, v)));
    if let Some(scale) = &rule.scale_denominator {
        element.push_opt(
            scale
                .min
                .map(|m| Element::text(tag_name("MinScaleDenominator", v), m.to_string())),
        );
        element.push_opt(
            scale
                .max
                .map(|m| Element::text(tag_name("MaxScaleDenominator", v), m.to_string())),
        );
    }
    for symbolizer in &rule.symbolizers {
        element.push(symbolizer_element(symbolizer, ctx)?);
    }
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::version::SldVersion;

    fn style() -> Style {
        Style {
            name: "Roads".into(),
            rules: vec![Rule {
                name: "all".into(),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn title_is_wrapped_in_1_1_0() {
        let config = ParserConfig {
            sld_version: SldVersion::V1_1_0,
            ..Default::default()
        };
        let root = style_element(&style(), &WriteContext::new(&config)).unwrap();
        assert_eq!(root.attr("version"), Some("1.1.0"));
        assert_eq!(root.attr("xmlns:se"), Some("http://www.opengis.net/se"));
        let user_style = root.child("NamedLayer").unwrap().child("UserStyle").unwrap();
        let description = user_style.child("se:Description").unwrap();
        assert_eq!(description.child("se:Title"), Some(&Element::text("se:Title", "Roads")));
    }

    #[test]
    fn skeleton_in_1_0_0() {
        let config = ParserConfig::default();
        let root = style_element(&style(), &WriteContext::new(&config)).unwrap();
        let rule = root
            .child("NamedLayer")
            .and_then(|l| l.child("UserStyle"))
            .and_then(|s| s.child("FeatureTypeStyle"))
            .and_then(|f| f.child("Rule"))
            .unwrap();
        assert_eq!(rule.child("Name"), Some(&Element::text("Name", "all")));
        assert!(rule.child("ogc:Filter").is_none());
    }
}
