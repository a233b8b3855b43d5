//! Rule and style assembly on the read side.

use crate::error::{Result, SldError};
use crate::model::{Rule, ScaleDenominator, Style, Symbolizer};
use crate::parser::ReadContext;
use crate::parser::filter::parse_rule_filter;
use crate::parser::helpers::{elements, get_attribute, get_children};
use crate::parser::path::get_text;
use crate::parser::symbolizer::parse_symbolizer;
use crate::version::{SE_NAMESPACE, SldVersion};
use roxmltree::Node;

/// Locate the `StyledLayerDescriptor` element of a document.
pub fn find_root<'a, 'input>(doc: &'a roxmltree::Document<'input>) -> Result<Node<'a, 'input>> {
    doc.descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "StyledLayerDescriptor")
        .ok_or(SldError::MissingRoot)
}

/// Version declared by the root's `version` attribute, else 1.1.0 when the
/// document uses the Symbology Encoding namespace anywhere.
pub fn declared_version(root: Node) -> Option<SldVersion> {
    if let Some(version) = get_attribute(root, "version").and_then(|v| v.parse().ok()) {
        return Some(version);
    }
    let uses_se = root.namespaces().any(|ns| ns.uri() == SE_NAMESPACE)
        || root
            .descendants()
            .any(|n| n.is_element() && n.tag_name().namespace() == Some(SE_NAMESPACE));
    uses_se.then_some(SldVersion::V1_1_0)
}

/// Build a [`Style`] from a `StyledLayerDescriptor` element.
pub fn parse_style(root: Node, ctx: &ReadContext) -> Result<Style> {
    Ok(Style {
        name: style_name(root, ctx),
        rules: parse_rules(root, ctx)?,
    })
}

/// The first user style's title, else the first named layer's name, else "".
pub fn style_name(root: Node, ctx: &ReadContext) -> String {
    let v = ctx.version;
    get_text(root, "NamedLayer.UserStyle.Title.#text", v)
        .or_else(|| get_text(root, "NamedLayer.UserStyle.Description.Title.#text", v))
        .or_else(|| get_text(root, "NamedLayer.Name.#text", v))
        .unwrap_or_default()
}

/// Rules of every named layer, user style and feature type style, in
/// document order.
pub fn parse_rules(root: Node, ctx: &ReadContext) -> Result<Vec<Rule>> {
    let mut rules = Vec::new();
    for layer in get_children(root, "NamedLayer") {
        for user_style in get_children(layer, "UserStyle") {
            for fts in get_children(user_style, "FeatureTypeStyle") {
                for rule in get_children(fts, "Rule") {
                    rules.push(parse_rule(rule, ctx)?);
                }
            }
        }
    }
    Ok(rules)
}

pub fn parse_rule(node: Node, ctx: &ReadContext) -> Result<Rule> {
    let v = ctx.version;
    let name = get_text(node, "Name.#text", v)
        .or_else(|| get_text(node, "Title.#text", v))
        .unwrap_or_default();
    log::debug!("reading rule {:?}", name);
    Ok(Rule {
        name,
        filter: parse_rule_filter(node, ctx)?,
        scale_denominator: parse_scale_denominator(node, ctx),
        symbolizers: parse_rule_symbolizers(node, ctx)?,
    })
}

pub fn parse_scale_denominator(node: Node, ctx: &ReadContext) -> Option<ScaleDenominator> {
    let bound = |path: &str| {
        let text = get_text(node, path, ctx.version)?;
        match text.trim().parse::<f64>() {
            Ok(n) => Some(n),
            Err(_) => {
                ctx.warn(format!("ignoring unparseable {}: {:?}", path, text));
                None
            }
        }
    };
    let min = bound("MinScaleDenominator.#text");
    let max = bound("MaxScaleDenominator.#text");
    (min.is_some() || max.is_some()).then_some(ScaleDenominator { min, max })
}

/// Symbolizer children in document order. Any `*Symbolizer` element is
/// decoded, so an unknown kind fails the read.
pub fn parse_rule_symbolizers(node: Node, ctx: &ReadContext) -> Result<Vec<Symbolizer>> {
    elements(node)
        .filter(|c| c.tag_name().name().ends_with("Symbolizer"))
        .map(|c| parse_symbolizer(c, ctx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn version_attribute_is_read() {
        let doc = Document::parse(r#"<StyledLayerDescriptor version="1.1.0"/>"#).unwrap();
        assert_eq!(declared_version(doc.root_element()), Some(SldVersion::V1_1_0));
    }

    #[test]
    fn se_namespace_implies_1_1_0() {
        let doc = Document::parse(
            r#"<StyledLayerDescriptor xmlns="http://www.opengis.net/sld">
                 <NamedLayer><se:Name xmlns:se="http://www.opengis.net/se">a</se:Name></NamedLayer>
               </StyledLayerDescriptor>"#,
        )
        .unwrap();
        assert_eq!(declared_version(doc.root_element()), Some(SldVersion::V1_1_0));
    }

    #[test]
    fn undeclared_version_is_unknown() {
        let doc =
            Document::parse(r#"<StyledLayerDescriptor xmlns="http://www.opengis.net/sld"/>"#).unwrap();
        assert_eq!(declared_version(doc.root_element()), None);
    }
}
