//! Point, line, polygon and text symbolizer decoding.

use crate::error::{Result, SldError};
use crate::model::*;
use crate::parser::ReadContext;
use crate::parser::expression::{number_expression, parse_function};
use crate::parser::helpers::{get_child, get_parameter_values, text_content};
use crate::parser::path::{get_node, get_text, get_value};
use crate::parser::raster::parse_raster_symbolizer;
use roxmltree::Node;

/// Dispatch on the symbolizer tag.
pub fn parse_symbolizer(node: Node, ctx: &ReadContext) -> Result<Symbolizer> {
    match node.tag_name().name() {
        "PointSymbolizer" => parse_point_symbolizer(node, ctx).map(Symbolizer::from),
        "LineSymbolizer" => Ok(Symbolizer::Line(parse_line_symbolizer(node, ctx)?)),
        "PolygonSymbolizer" => Ok(Symbolizer::Fill(parse_fill_symbolizer(node, ctx)?)),
        "TextSymbolizer" => Ok(Symbolizer::Text(parse_text_symbolizer(node, ctx))),
        "RasterSymbolizer" => Ok(Symbolizer::Raster(parse_raster_symbolizer(node, ctx)?)),
        other => Err(SldError::UnknownSymbolizer {
            name: other.to_string(),
        }),
    }
}

/// Decode the `<Graphic>` below `node`, which is a `PointSymbolizer`,
/// `GraphicStroke` or `GraphicFill`. An `ExternalGraphic` makes it an icon,
/// anything else a mark.
pub fn parse_point_symbolizer(node: Node, ctx: &ReadContext) -> Result<GraphicSymbolizer> {
    if get_node(node, "Graphic.ExternalGraphic").is_some() {
        Ok(GraphicSymbolizer::Icon(parse_icon_symbolizer(node, ctx)))
    } else {
        parse_mark_symbolizer(node, ctx).map(GraphicSymbolizer::Mark)
    }
}

fn number(node: Node, path: &str, ctx: &ReadContext) -> Option<Expression> {
    get_value(node, path, ctx.version).map(number_expression)
}

fn offset(node: Node, base: &str, ctx: &ReadContext) -> Option<[Expression; 2]> {
    let x = number(node, &format!("{}.DisplacementX.#text", base), ctx);
    let y = number(node, &format!("{}.DisplacementY.#text", base), ctx);
    if x.is_none() && y.is_none() {
        return None;
    }
    Some([
        x.unwrap_or_else(|| Expression::number(0.0)),
        y.unwrap_or_else(|| Expression::number(0.0)),
    ])
}

/// `stroke-dasharray` is a blank-separated list of lengths.
fn dasharray(value: Option<Expression>) -> Option<Vec<Expression>> {
    match value? {
        Expression::Literal(Value::String(s)) => {
            let parts: Vec<Expression> = s
                .split_whitespace()
                .map(|p| number_expression(Expression::string(p)))
                .collect();
            (!parts.is_empty()).then_some(parts)
        }
        other => Some(vec![other]),
    }
}

pub fn parse_mark_symbolizer(node: Node, ctx: &ReadContext) -> Result<MarkSymbolizer> {
    let v = ctx.version;
    let well_known_name = match get_text(node, "Graphic.Mark.WellKnownName.#text", v) {
        Some(name) => name.parse()?,
        None => WellKnownName::default(),
    };
    // SLD sizes are diameters.
    let radius = number(node, "Graphic.Size.#text", ctx).map(|size| match size {
        Expression::Literal(Value::Number(n)) => Expression::number(n / 2.0),
        other => other,
    });
    Ok(MarkSymbolizer {
        well_known_name,
        color: get_value(node, "Graphic.Mark.Fill.$fill", v),
        fill_opacity: number(node, "Graphic.Mark.Fill.$fill-opacity", ctx),
        opacity: number(node, "Graphic.Opacity.#text", ctx),
        radius,
        rotate: number(node, "Graphic.Rotation.#text", ctx),
        offset: offset(node, "Graphic.Displacement", ctx),
        stroke_color: get_value(node, "Graphic.Mark.Stroke.$stroke", v),
        stroke_width: number(node, "Graphic.Mark.Stroke.$stroke-width", ctx),
        stroke_opacity: number(node, "Graphic.Mark.Stroke.$stroke-opacity", ctx),
        stroke_dasharray: dasharray(get_value(node, "Graphic.Mark.Stroke.$stroke-dasharray", v)),
        ..Default::default()
    })
}

pub fn parse_icon_symbolizer(node: Node, ctx: &ReadContext) -> IconSymbolizer {
    let v = ctx.version;
    IconSymbolizer {
        image: get_value(node, "Graphic.ExternalGraphic.OnlineResource.@xlink:href", v),
        format: get_text(node, "Graphic.ExternalGraphic.Format.#text", v),
        opacity: number(node, "Graphic.Opacity.#text", ctx),
        size: number(node, "Graphic.Size.#text", ctx),
        rotate: number(node, "Graphic.Rotation.#text", ctx),
        offset: offset(node, "Graphic.Displacement", ctx),
        ..Default::default()
    }
}

pub fn parse_line_symbolizer(node: Node, ctx: &ReadContext) -> Result<LineSymbolizer> {
    let v = ctx.version;
    let graphic = |path: &str| -> Result<Option<Box<GraphicSymbolizer>>> {
        get_node(node, path)
            .map(|g| parse_point_symbolizer(g, ctx).map(Box::new))
            .transpose()
    };
    Ok(LineSymbolizer {
        color: get_value(node, "Stroke.$stroke", v),
        width: number(node, "Stroke.$stroke-width", ctx),
        opacity: number(node, "Stroke.$stroke-opacity", ctx),
        join: get_value(node, "Stroke.$stroke-linejoin", v),
        cap: get_value(node, "Stroke.$stroke-linecap", v),
        dasharray: dasharray(get_value(node, "Stroke.$stroke-dasharray", v)),
        dash_offset: number(node, "Stroke.$stroke-dashoffset", ctx),
        perpendicular_offset: number(node, "PerpendicularOffset.#text", ctx),
        graphic_stroke: graphic("Stroke.GraphicStroke")?,
        graphic_fill: graphic("Stroke.GraphicFill")?,
        ..Default::default()
    })
}

pub fn parse_fill_symbolizer(node: Node, ctx: &ReadContext) -> Result<FillSymbolizer> {
    let v = ctx.version;
    let graphic_fill = get_node(node, "Fill.GraphicFill")
        .map(|g| parse_point_symbolizer(g, ctx).map(Box::new))
        .transpose()?;
    Ok(FillSymbolizer {
        color: get_value(node, "Fill.$fill", v),
        fill_opacity: number(node, "Fill.$fill-opacity", ctx),
        outline_color: get_value(node, "Stroke.$stroke", v),
        outline_width: number(node, "Stroke.$stroke-width", ctx),
        outline_opacity: number(node, "Stroke.$stroke-opacity", ctx),
        outline_dasharray: dasharray(get_value(node, "Stroke.$stroke-dasharray", v)),
        outline_cap: get_value(node, "Stroke.$stroke-linecap", v),
        outline_join: get_value(node, "Stroke.$stroke-linejoin", v),
        graphic_fill,
        ..Default::default()
    })
}

pub fn parse_text_symbolizer(node: Node, ctx: &ReadContext) -> TextSymbolizer {
    let v = ctx.version;
    let font = get_child(node, "Font")
        .map(|f| get_parameter_values(f, "font-family", v))
        .filter(|families| !families.is_empty());

    let point = get_node(node, "LabelPlacement.PointPlacement");
    let line = get_node(node, "LabelPlacement.LinePlacement");
    let placement = match (point, line) {
        (_, Some(_)) => Some(Placement::Line),
        (Some(_), None) => Some(Placement::Point),
        (None, None) => None,
    };
    let anchor = point.and_then(|p| {
        let x = get_text(p, "AnchorPoint.AnchorPointX.#text", v)?.parse().ok()?;
        let y = get_text(p, "AnchorPoint.AnchorPointY.#text", v)?.parse().ok()?;
        Some(Anchor::from_point(x, y))
    });

    TextSymbolizer {
        label: get_child(node, "Label").and_then(parse_label),
        font,
        font_style: get_value(node, "Font.$font-style", v),
        font_weight: get_value(node, "Font.$font-weight", v),
        size: number(node, "Font.$font-size", ctx),
        color: get_value(node, "Fill.$fill", v),
        opacity: number(node, "Fill.$fill-opacity", ctx),
        halo_width: number(node, "Halo.Radius.#text", ctx),
        halo_color: get_value(node, "Halo.Fill.$fill", v),
        halo_opacity: number(node, "Halo.Fill.$fill-opacity", ctx),
        placement,
        anchor,
        offset: offset(node, "LabelPlacement.PointPlacement.Displacement", ctx),
        rotate: number(node, "LabelPlacement.PointPlacement.Rotation.#text", ctx),
        perpendicular_offset: number(
            node,
            "LabelPlacement.LinePlacement.PerpendicularOffset.#text",
            ctx,
        ),
        ..Default::default()
    }
}

/// Turn a `<Label>` into a template string.
///
/// Literal text (raw or in `<Literal>`) is copied verbatim and every
/// `<PropertyName>` becomes `{{name}}`, in document order:
///
/// ```text
/// <Label><Literal>foo</Literal><PropertyName>bar</PropertyName></Label>  →  "foo{{bar}}"
/// ```
///
/// A label whose only content is a `<Function>` decodes to that function.
/// Functions mixed with text or properties are kept in order as the
/// arguments of a `Concatenate` call.
pub fn parse_label(label: Node) -> Option<Expression> {
    let mut parts = Vec::new();
    for child in label.children() {
        if child.is_text() {
            let text = child.text().unwrap_or("");
            if !text.trim().is_empty() {
                parts.push(LabelPart::Text(text.to_string()));
            }
            continue;
        }
        if !child.is_element() {
            continue;
        }
        match child.tag_name().name() {
            "Literal" => parts.push(LabelPart::Text(text_content(child))),
            "PropertyName" => parts.push(LabelPart::Property(text_content(child).trim().to_string())),
            "Function" => parts.push(LabelPart::Function(parse_function(child))),
            other => log::debug!("skipping <{}> inside Label", other),
        }
    }
    if !parts.iter().any(|p| matches!(p, LabelPart::Function(_))) {
        let template: String = parts
            .into_iter()
            .map(|p| match p {
                LabelPart::Property(name) => format!("{{{{{}}}}}", name),
                LabelPart::Text(text) => text,
                LabelPart::Function(_) => String::new(),
            })
            .collect();
        return (!template.is_empty()).then(|| Expression::string(template));
    }
    if parts.len() == 1 {
        if let Some(LabelPart::Function(f)) = parts.pop() {
            return Some(Expression::Function(f));
        }
    }
    let args = parts
        .into_iter()
        .map(|p| match p {
            LabelPart::Text(text) => Expression::string(text),
            LabelPart::Property(name) => Expression::property(name),
            LabelPart::Function(f) => Expression::Function(f),
        })
        .collect();
    Some(Expression::function("Concatenate", args))
}

enum LabelPart {
    Text(String),
    Property(String),
    Function(FunctionCall),
}
