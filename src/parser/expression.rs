//! Decoding of embedded literals, property references and `<Function>` calls.

use crate::model::{Expression, FunctionCall, Value};
use crate::parser::helpers::{elements, get_attribute, get_child, text_content};
use roxmltree::Node;

/// Value held by an element such as `<Size>`, `<CssParameter>` or
/// `<LowerBoundary>`: a nested function, property reference or literal,
/// or else the element's own trimmed text.
pub fn element_value(node: Node) -> Option<Expression> {
    if let Some(f) = get_child(node, "Function") {
        return Some(Expression::Function(parse_function(f)));
    }
    if let Some(p) = get_child(node, "PropertyName") {
        return Some(Expression::property(text_content(p).trim()));
    }
    if let Some(l) = get_child(node, "Literal") {
        return Some(Expression::string(text_content(l)));
    }
    let text = text_content(node);
    let text = text.trim();
    (!text.is_empty()).then(|| Expression::string(text))
}

/// Decode a `<Function name="...">` element. Arguments keep document order;
/// numeric literal arguments become numbers.
pub fn parse_function(node: Node) -> FunctionCall {
    let name = get_attribute(node, "name").unwrap_or_default();
    let mut args = Vec::new();
    for child in node.children() {
        if child.is_text() {
            let text = child.text().unwrap_or("");
            if !text.trim().is_empty() {
                args.push(number_expression(Expression::string(text.trim())));
            }
            continue;
        }
        if !child.is_element() {
            continue;
        }
        match child.tag_name().name() {
            "Function" => args.push(Expression::Function(parse_function(child))),
            "PropertyName" => args.push(Expression::property(text_content(child).trim())),
            "Literal" => args.push(number_expression(Expression::string(text_content(child)))),
            other => log::debug!("skipping <{}> inside function {}", other, name),
        }
    }
    FunctionCall::new(name, args)
}

/// Cast a string literal to a number where it parses as one. Anything else,
/// including text that is not numeric, is returned unchanged.
pub fn number_expression(expr: Expression) -> Expression {
    match expr {
        Expression::Literal(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Expression::number(n),
            _ => Expression::Literal(Value::String(s)),
        },
        other => other,
    }
}

/// Cast `"true"`/`"false"` (and `1`/`0`) literals to booleans.
pub fn bool_expression(expr: Expression) -> Expression {
    match expr {
        Expression::Literal(Value::String(s)) => match s.trim() {
            "true" | "1" => Expression::from(true),
            "false" | "0" => Expression::from(false),
            _ => Expression::Literal(Value::String(s)),
        },
        other => other,
    }
}

/// Numeric attribute values such as `ColorMapEntry/@quantity`.
pub fn number_from_text(text: &str) -> Expression {
    number_expression(Expression::string(text))
}

pub(crate) fn first_element<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    elements(node).next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn number_expression_is_lenient() {
        assert_eq!(number_expression(Expression::string("2.5")), Expression::number(2.5));
        assert_eq!(number_expression(Expression::string(" 7 ")), Expression::number(7.0));
        assert_eq!(
            number_expression(Expression::string("wide")),
            Expression::string("wide")
        );
        assert_eq!(number_expression(Expression::string("NaN")), Expression::string("NaN"));
        let f = Expression::property("width");
        assert_eq!(number_expression(f.clone()), f);
    }

    #[test]
    fn nested_functions_decode_in_order() {
        let doc = Document::parse(
            r#"<ogc:Function xmlns:ogc="http://www.opengis.net/ogc" name="Concatenate">
                 <ogc:PropertyName>name</ogc:PropertyName>
                 <ogc:Literal> - </ogc:Literal>
                 <ogc:Function name="strToUpperCase"><ogc:PropertyName>type</ogc:PropertyName></ogc:Function>
                 <ogc:Literal>3</ogc:Literal>
               </ogc:Function>"#,
        )
        .unwrap();
        let f = parse_function(doc.root_element());
        assert_eq!(f.name, "Concatenate");
        assert_eq!(
            f.args,
            vec![
                Expression::property("name"),
                Expression::string(" - "),
                Expression::function("strToUpperCase", vec![Expression::property("type")]),
                Expression::number(3.0),
            ]
        );
    }

    #[test]
    fn bool_casting() {
        assert_eq!(bool_expression(Expression::string("true")), Expression::from(true));
        assert_eq!(bool_expression(Expression::string("0")), Expression::from(false));
        assert_eq!(bool_expression(Expression::string("yes")), Expression::string("yes"));
    }
}
