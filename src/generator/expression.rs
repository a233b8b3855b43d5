//! Expressions → SLD content.

use crate::generator::xml::{Element, XmlNode};
use crate::model::{Expression, FunctionCall, Value};
use crate::version::{SldVersion, tag_name};

/// Content of an element holding a value (`<Size>`, `<CssParameter>`, ...):
/// literal text, or a single function / property reference child.
pub fn value_nodes(expr: &Expression, version: SldVersion) -> Vec<XmlNode> {
    match expr {
        Expression::Literal(Value::Null) => Vec::new(),
        Expression::Literal(v) => vec![XmlNode::Text(v.to_string())],
        Expression::Function(f) => vec![XmlNode::Element(function_element(f, version))],
    }
}

/// `<tag>value</tag>`.
pub fn value_element(tag: &str, expr: &Expression, version: SldVersion) -> Element {
    Element::new(tag_name(tag, version)).with_nodes(value_nodes(expr, version))
}

pub fn literal_element(value: &Value, version: SldVersion) -> Element {
    Element::text(tag_name("Literal", version), value.to_string())
}

pub fn property_element(name: &str, version: SldVersion) -> Element {
    Element::text(tag_name("PropertyName", version), name)
}

/// Encode a function call. `property` becomes `<PropertyName>`; every
/// other function keeps its arguments in order as `<Literal>` or nested
/// function children.
pub fn function_element(f: &FunctionCall, version: SldVersion) -> Element {
    if f.name == "property" {
        let name = f
            .args
            .first()
            .and_then(Expression::literal_text)
            .unwrap_or_default();
        return property_element(&name, version);
    }
    let mut element = Element::new(tag_name("Function", version)).with_attr("name", f.name.as_str());
    for arg in &f.args {
        element.push(match arg {
            Expression::Literal(v) => literal_element(v, version),
            Expression::Function(inner) => function_element(inner, version),
        });
    }
    element
}

/// `<CssParameter name="...">` or `<se:SvgParameter name="...">`.
pub fn parameter(name: &str, expr: &Expression, version: SldVersion) -> Element {
    Element::new(tag_name("CssParameter", version))
        .with_attr("name", name)
        .with_nodes(value_nodes(expr, version))
}

/// Parameters for the values that are present, in the given order.
pub fn parameters(params: &[(&str, Option<&Expression>)], version: SldVersion) -> Vec<Element> {
    params
        .iter()
        .filter_map(|(name, expr)| expr.map(|e| parameter(name, e, version)))
        .collect()
}

/// `stroke-dasharray` value: literal lengths joined by blanks, or the
/// function when the array is a single function.
pub fn dasharray_expression(values: &[Expression]) -> Option<Expression> {
    match values {
        [] => None,
        [single @ Expression::Function(_)] => Some(single.clone()),
        _ => {
            let joined = values
                .iter()
                .filter_map(Expression::literal_text)
                .collect::<Vec<_>>()
                .join(" ");
            Some(Expression::string(joined))
        }
    }
}
