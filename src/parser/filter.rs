//! `<ogc:Filter>` decoding.

use crate::error::{Result, SldError};
use crate::model::{ComparisonOperator, Expression, Filter, Value};
use crate::parser::ReadContext;
use crate::parser::expression::{
    bool_expression, element_value, first_element, number_expression, parse_function,
};
use crate::parser::helpers::{elements, get_attribute, get_child, text_content};
use crate::translations::MessageKey;
use roxmltree::Node;

/// SLD tag of every binary comparison operator.
pub const COMPARISON_TAGS: [(&str, ComparisonOperator); 7] = [
    ("PropertyIsEqualTo", ComparisonOperator::EqualTo),
    ("PropertyIsNotEqualTo", ComparisonOperator::NotEqualTo),
    ("PropertyIsLike", ComparisonOperator::Like),
    ("PropertyIsLessThan", ComparisonOperator::LessThan),
    ("PropertyIsLessThanOrEqualTo", ComparisonOperator::LessThanOrEqualTo),
    ("PropertyIsGreaterThan", ComparisonOperator::GreaterThan),
    ("PropertyIsGreaterThanOrEqualTo", ComparisonOperator::GreaterThanOrEqualTo),
];

pub fn comparison_operator(tag: &str) -> Option<ComparisonOperator> {
    COMPARISON_TAGS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, op)| *op)
}

pub fn comparison_tag(op: ComparisonOperator) -> &'static str {
    COMPARISON_TAGS
        .iter()
        .find(|(_, o)| *o == op)
        .map(|(t, _)| *t)
        .unwrap_or("PropertyIsEqualTo")
}

/// Filter of a `<Rule>`. A rule without a `<Filter>` (or with an empty one)
/// yields `None`.
pub fn parse_rule_filter(rule: Node, ctx: &ReadContext) -> Result<Option<Filter>> {
    let Some(operator) = get_child(rule, "Filter").and_then(first_element) else {
        log::debug!("{}", ctx.message(MessageKey::NoFilterDetected));
        return Ok(None);
    };
    parse_filter_node(operator, ctx).map(Some)
}

/// Decode one operator element (`PropertyIsEqualTo`, `And`, `Function`, ...).
pub fn parse_filter_node(node: Node, ctx: &ReadContext) -> Result<Filter> {
    let tag = node.tag_name().name();
    match tag {
        "And" | "Or" => {
            let filters = elements(node)
                .map(|child| parse_filter_node(child, ctx))
                .collect::<Result<Vec<_>>>()?;
            match filters.len() {
                0 => return Err(missing_operand(tag)),
                1 => ctx.warn(format!("{} with a single operand", tag)),
                _ => {}
            }
            Ok(if tag == "And" {
                Filter::And { filters }
            } else {
                Filter::Or { filters }
            })
        }
        "Not" => {
            let inner = first_element(node).ok_or_else(|| missing_operand(tag))?;
            let extra = elements(node).count() - 1;
            if extra > 0 {
                ctx.warn(format!("ignoring {} extra operand(s) of Not", extra));
            }
            Ok(Filter::Not {
                filter: Box::new(parse_filter_node(inner, ctx)?),
            })
        }
        "Function" => Ok(Filter::Function {
            function: parse_function(node),
        }),
        "PropertyIsNull" => {
            let property = operands(node)
                .next()
                .and_then(property_operand)
                .ok_or_else(|| missing_operand(tag))?;
            Ok(Filter::IsNull { property })
        }
        "PropertyIsBetween" => {
            let property = operands(node)
                .next()
                .and_then(property_operand)
                .ok_or_else(|| missing_operand(tag))?;
            let boundary = |name: &str| {
                get_child(node, name)
                    .and_then(element_value)
                    .map(number_expression)
                    .ok_or_else(|| missing_operand(tag))
            };
            Ok(Filter::Between {
                property,
                lower: boundary("LowerBoundary")?,
                upper: boundary("UpperBoundary")?,
            })
        }
        _ => {
            let operator = comparison_operator(tag).ok_or_else(|| SldError::UnknownOperator {
                name: tag.to_string(),
            })?;
            let mut it = operands(node);
            let property = it
                .next()
                .and_then(property_operand)
                .ok_or_else(|| missing_operand(tag))?;
            let value = it
                .next()
                .and_then(value_operand)
                .ok_or_else(|| missing_operand(tag))?;
            let numeric_field = property
                .as_str()
                .is_some_and(|name| ctx.config.is_numeric_field(name));
            let value = if operator == ComparisonOperator::Like && !numeric_field {
                normalize_like_pattern(node, value)
            } else {
                cast_value(&property, value, ctx)
            };
            Ok(Filter::Comparison {
                operator,
                property,
                value,
            })
        }
    }
}

fn missing_operand(tag: &str) -> SldError {
    SldError::MissingOperand {
        operator: tag.to_string(),
    }
}

/// Expression children of a comparison, skipping Between boundaries.
fn operands<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    elements(node).filter(|c| {
        !matches!(
            c.tag_name().name(),
            "LowerBoundary" | "UpperBoundary"
        )
    })
}

/// Left-hand operand: a property name is kept as a plain string.
fn property_operand(node: Node) -> Option<Expression> {
    match node.tag_name().name() {
        "PropertyName" => Some(Expression::string(text_content(node).trim())),
        "Function" => Some(Expression::Function(parse_function(node))),
        "Literal" => Some(Expression::string(text_content(node))),
        _ => None,
    }
}

/// Right-hand operand: a property reference becomes a `property` function.
fn value_operand(node: Node) -> Option<Expression> {
    match node.tag_name().name() {
        "PropertyName" => Some(Expression::property(text_content(node).trim())),
        "Function" => Some(Expression::Function(parse_function(node))),
        "Literal" => Some(Expression::string(text_content(node))),
        _ => None,
    }
}

/// Numeric literals become numbers unless the property is a configured
/// boolean field. Text that is not numeric stays a string.
fn cast_value(property: &Expression, value: Expression, ctx: &ReadContext) -> Expression {
    match property.as_str() {
        Some(name) if ctx.config.is_bool_field(name) => bool_expression(value),
        _ => number_expression(value),
    }
}

/// Rewrite a `PropertyIsLike` pattern from the document's wildcard
/// characters to `*`, `.` and `!`.
fn normalize_like_pattern(node: Node, value: Expression) -> Expression {
    let Expression::Literal(Value::String(pattern)) = value else {
        return value;
    };
    let marker = |names: &[&str], default: char| {
        names
            .iter()
            .find_map(|n| get_attribute(node, n))
            .and_then(|v| v.chars().next())
            .unwrap_or(default)
    };
    let wildcard = marker(&["wildCard"], '*');
    let single = marker(&["singleChar"], '.');
    let escape = marker(&["escape", "escapeChar"], '!');
    Expression::string(translate_like_pattern(&pattern, wildcard, single, escape))
}

/// Translate `pattern` written with the given wildcard, single-character
/// and escape markers into the `*`/`.`/`!` convention.
pub fn translate_like_pattern(pattern: &str, wildcard: char, single: char, escape: char) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        let literal = if c == escape {
            match chars.next() {
                Some(next) => next,
                None => break,
            }
        } else if c == wildcard {
            out.push('*');
            continue;
        } else if c == single {
            out.push('.');
            continue;
        } else {
            c
        };
        if matches!(literal, '*' | '.' | '!') {
            out.push('!');
        }
        out.push(literal);
    }
    out
}
