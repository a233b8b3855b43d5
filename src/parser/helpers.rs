//! Accessors over a parsed SLD tree.
//!
//! Tags and attributes are matched by local name, so namespace prefixes
//! (`se:`, `ogc:`, `sld:`, `xlink:`) never matter when reading.

use crate::model::Expression;
use crate::parser::expression::element_value;
use crate::version::SldVersion;
use roxmltree::Node;

/// Tags that [`is_symbolizer`] recognizes.
pub const SYMBOLIZER_TAGS: [&str; 5] = [
    "PointSymbolizer",
    "LineSymbolizer",
    "PolygonSymbolizer",
    "TextSymbolizer",
    "RasterSymbolizer",
];

/// Direct element children of `node`.
pub fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|c| c.is_element())
}

/// Direct element children named `tag`, in document order.
pub fn get_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    elements(node).filter(move |c| c.tag_name().name() == tag)
}

pub fn get_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    get_children(node, tag).next()
}

/// Attribute value by local name; a prefixed `name` such as `xlink:href`
/// matches on `href`.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    let local = name.rsplit_once(':').map_or(name, |(_, local)| local);
    node.attributes()
        .find(|a| a.name() == local)
        .map(|a| a.value())
}

/// Concatenated text of the direct text children, untrimmed.
pub fn text_content(node: Node) -> String {
    node.children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect()
}

fn parameters<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
    version: SldVersion,
) -> impl Iterator<Item = Node<'a, 'input>> {
    get_children(node, version.parameter_tag())
        .filter(move |p| get_attribute(*p, "name") == Some(name))
}

/// Value of the `CssParameter` (1.0.0) or `SvgParameter` (1.1.0) child of
/// `node` whose `name` attribute equals `name`.
pub fn get_parameter_value(node: Node, name: &str, version: SldVersion) -> Option<Expression> {
    parameters(node, name, version).find_map(element_value)
}

/// Like [`get_parameter_value`] for parameters that may repeat
/// (`font-family`).
pub fn get_parameter_values(node: Node, name: &str, version: SldVersion) -> Vec<Expression> {
    parameters(node, name, version)
        .filter_map(element_value)
        .collect()
}

pub fn is_symbolizer(node: Node) -> bool {
    node.is_element() && SYMBOLIZER_TAGS.contains(&node.tag_name().name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    const STROKE: &str = r##"<Stroke xmlns:se="http://www.opengis.net/se">
        <CssParameter name="stroke">#000000</CssParameter>
        <CssParameter name="stroke-width"><ogc:Literal xmlns:ogc="http://www.opengis.net/ogc">2</ogc:Literal></CssParameter>
        <se:SvgParameter name="stroke">#ffffff</se:SvgParameter>
        <CssParameter name="font-family">Arial</CssParameter>
        <CssParameter name="font-family">Sans</CssParameter>
    </Stroke>"##;

    #[test]
    fn parameter_lookup_is_version_aware() {
        let doc = Document::parse(STROKE).unwrap();
        let stroke = doc.root_element();
        assert_eq!(
            get_parameter_value(stroke, "stroke", SldVersion::V1_0_0),
            Some(Expression::string("#000000"))
        );
        assert_eq!(
            get_parameter_value(stroke, "stroke", SldVersion::V1_1_0),
            Some(Expression::string("#ffffff"))
        );
        assert_eq!(
            get_parameter_value(stroke, "stroke-width", SldVersion::V1_0_0),
            Some(Expression::string("2"))
        );
        assert_eq!(get_parameter_value(stroke, "stroke-width", SldVersion::V1_1_0), None);
        assert_eq!(
            get_parameter_values(stroke, "font-family", SldVersion::V1_0_0).len(),
            2
        );
    }

    #[test]
    fn children_and_attributes_ignore_prefixes() {
        let doc = Document::parse(
            r#"<a xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:se="http://www.opengis.net/se"><se:b/><c/><se:b xlink:href="x.png"/></a>"#,
        )
        .unwrap();
        let root = doc.root_element();
        assert_eq!(get_children(root, "b").count(), 2);
        let second = get_children(root, "b").nth(1).unwrap();
        assert_eq!(get_attribute(second, "xlink:href"), Some("x.png"));
        assert_eq!(get_attribute(second, "href"), Some("x.png"));
        assert_eq!(get_attribute(root, "missing"), None);
        assert!(get_child(root, "d").is_none());
    }

    #[test]
    fn symbolizer_detection() {
        let doc = Document::parse("<Rule><PointSymbolizer/><Name/></Rule>").unwrap();
        let kinds: Vec<bool> = elements(doc.root_element()).map(is_symbolizer).collect();
        assert_eq!(kinds, vec![true, false]);
    }
}
