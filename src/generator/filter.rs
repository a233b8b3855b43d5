//! Filters → `<ogc:Filter>` content.

use crate::generator::expression::{function_element, literal_element, property_element};
use crate::generator::xml::Element;
use crate::model::{ComparisonOperator, Expression, Filter};
use crate::parser::filter::comparison_tag;
use crate::version::{SldVersion, tag_name};

/// `<ogc:Filter>` wrapping the encoded operator.
pub fn filter_document(filter: &Filter, version: SldVersion) -> Element {
    Element::new(tag_name("Filter", version)).with_child(filter_element(filter, version))
}

/// Encode one operator. Function filters are emitted as a bare
/// `<ogc:Function>`.
pub fn filter_element(filter: &Filter, version: SldVersion) -> Element {
    match filter {
        Filter::Comparison {
            operator,
            property,
            value,
        } => {
            let mut element = Element::new(tag_name(comparison_tag(*operator), version));
            if *operator == ComparisonOperator::Like {
                element = element
                    .with_attr("wildCard", "*")
                    .with_attr("singleChar", ".")
                    .with_attr(version.like_escape_attribute(), "!");
            }
            element
                .with_child(property_operand(property, version))
                .with_child(value_operand(value, version))
        }
        Filter::IsNull { property } => Element::new(tag_name("PropertyIsNull", version))
            .with_child(property_operand(property, version)),
        Filter::Between {
            property,
            lower,
            upper,
        } => Element::new(tag_name("PropertyIsBetween", version))
            .with_child(property_operand(property, version))
            .with_child(
                Element::new(tag_name("LowerBoundary", version))
                    .with_child(value_operand(lower, version)),
            )
            .with_child(
                Element::new(tag_name("UpperBoundary", version))
                    .with_child(value_operand(upper, version)),
            ),
        Filter::And { filters } => combination("And", filters, version),
        Filter::Or { filters } => combination("Or", filters, version),
        Filter::Not { filter } => {
            Element::new(tag_name("Not", version)).with_child(filter_element(filter, version))
        }
        Filter::Function { function } => function_element(function, version),
    }
}

fn combination(tag: &str, filters: &[Filter], version: SldVersion) -> Element {
    filters
        .iter()
        .fold(Element::new(tag_name(tag, version)), |e, f| {
            e.with_child(filter_element(f, version))
        })
}

/// A string literal on the left names a property.
fn property_operand(expr: &Expression, version: SldVersion) -> Element {
    match expr {
        Expression::Literal(v) => property_element(&v.to_string(), version),
        Expression::Function(f) => function_element(f, version),
    }
}

fn value_operand(expr: &Expression, version: SldVersion) -> Element {
    match expr {
        Expression::Literal(v) => literal_element(v, version),
        Expression::Function(f) => function_element(f, version),
    }
}
