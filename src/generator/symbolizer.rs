//! Point, line, polygon and text symbolizer encoding.

use crate::error::Result;
use crate::generator::WriteContext;
use crate::generator::expression::{
    dasharray_expression, function_element, parameter, parameters, value_element,
};
use crate::generator::raster::raster_symbolizer_element;
use crate::generator::xml::Element;
use crate::model::*;
use crate::version::{SldVersion, tag_name};

/// Encode one symbolizer, stamped with the configured unit of measure.
pub fn symbolizer_element(symbolizer: &Symbolizer, ctx: &WriteContext) -> Result<Element> {
    let element = match symbolizer {
        Symbolizer::Mark(mark) => point_symbolizer(mark_graphic(mark, ctx.version), ctx),
        Symbolizer::Icon(icon) => point_symbolizer(icon_graphic(icon, ctx.version), ctx),
        Symbolizer::Line(line) => line_symbolizer_element(line, ctx),
        Symbolizer::Fill(fill) => fill_symbolizer_element(fill, ctx),
        Symbolizer::Text(text) => text_symbolizer_element(text, ctx),
        Symbolizer::Raster(raster) => raster_symbolizer_element(raster, ctx)?,
    };
    Ok(element.with_attr("uom", ctx.config.symbolizer_units.uri()))
}

fn point_symbolizer(graphic: Element, ctx: &WriteContext) -> Element {
    Element::new(tag_name("PointSymbolizer", ctx.version)).with_child(graphic)
}

/// `<Graphic>` of a mark or icon, also used inside `GraphicStroke` and
/// `GraphicFill`.
pub fn graphic_element(graphic: &GraphicSymbolizer, version: SldVersion) -> Element {
    match graphic {
        GraphicSymbolizer::Mark(mark) => mark_graphic(mark, version),
        GraphicSymbolizer::Icon(icon) => icon_graphic(icon, version),
    }
}

fn displacement(tag: &str, offset: &Option<[Expression; 2]>, version: SldVersion) -> Option<Element> {
    let [x, y] = offset.as_ref()?;
    Some(
        Element::new(tag_name(tag, version))
            .with_child(value_element("DisplacementX", x, version))
            .with_child(value_element("DisplacementY", y, version)),
    )
}

fn optional(tag: &str, expr: Option<&Expression>, version: SldVersion) -> Option<Element> {
    expr.map(|e| value_element(tag, e, version))
}

/// Group `params` under `tag`, or nothing when none is set.
fn parameter_group(
    tag: &str,
    params: &[(&str, Option<&Expression>)],
    version: SldVersion,
) -> Option<Element> {
    let params = parameters(params, version);
    (!params.is_empty()).then(|| {
        params
            .into_iter()
            .fold(Element::new(tag_name(tag, version)), Element::with_child)
    })
}

/// Opacity, Size, Rotation and Displacement close every `<Graphic>`.
fn graphic_tail(
    graphic: &mut Element,
    opacity: Option<&Expression>,
    size: Option<&Expression>,
    rotate: Option<&Expression>,
    offset: &Option<[Expression; 2]>,
    version: SldVersion,
) {
    graphic.push_opt(optional("Opacity", opacity, version));
    graphic.push_opt(optional("Size", size, version));
    graphic.push_opt(optional("Rotation", rotate, version));
    graphic.push_opt(displacement("Displacement", offset, version));
}

fn mark_graphic(mark: &MarkSymbolizer, version: SldVersion) -> Element {
    let dasharray = mark
        .stroke_dasharray
        .as_deref()
        .and_then(dasharray_expression);
    let mut mark_element = Element::new(tag_name("Mark", version)).with_child(Element::text(
        tag_name("WellKnownName", version),
        mark.well_known_name.as_str(),
    ));
    mark_element.push_opt(parameter_group(
        "Fill",
        &[
            ("fill", mark.color.as_ref()),
            ("fill-opacity", mark.fill_opacity.as_ref()),
        ],
        version,
    ));
    mark_element.push_opt(parameter_group(
        "Stroke",
        &[
            ("stroke", mark.stroke_color.as_ref()),
            ("stroke-width", mark.stroke_width.as_ref()),
            ("stroke-opacity", mark.stroke_opacity.as_ref()),
            ("stroke-dasharray", dasharray.as_ref()),
        ],
        version,
    ));

    // SLD sizes are diameters.
    let size = mark.radius.as_ref().map(|r| match r {
        Expression::Literal(Value::Number(n)) => Expression::number(n * 2.0),
        other => other.clone(),
    });
    let mut graphic = Element::new(tag_name("Graphic", version)).with_child(mark_element);
    graphic_tail(
        &mut graphic,
        mark.opacity.as_ref(),
        size.as_ref(),
        mark.rotate.as_ref(),
        &mark.offset,
        version,
    );
    graphic
}

/// MIME type for an image reference, judged by its extension.
pub fn guess_image_format(image: &str) -> Option<&'static str> {
    let path = image.split(['?', '#']).next().unwrap_or(image);
    let ext = path.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

fn icon_graphic(icon: &IconSymbolizer, version: SldVersion) -> Element {
    let href = icon
        .image
        .as_ref()
        .and_then(Expression::literal_text)
        .unwrap_or_default();
    if icon.image.as_ref().is_some_and(Expression::is_function) {
        log::warn!("icon image functions cannot be written as OnlineResource");
    }
    let format = icon
        .format
        .clone()
        .or_else(|| guess_image_format(&href).map(str::to_string));

    let mut external = Element::new(tag_name("ExternalGraphic", version)).with_child(
        Element::new(tag_name("OnlineResource", version))
            .with_attr("xlink:type", "simple")
            .with_attr("xlink:href", href),
    );
    external.push_opt(format.map(|f| Element::text(tag_name("Format", version), f)));

    let mut graphic = Element::new(tag_name("Graphic", version)).with_child(external);
    graphic_tail(
        &mut graphic,
        icon.opacity.as_ref(),
        icon.size.as_ref(),
        icon.rotate.as_ref(),
        &icon.offset,
        version,
    );
    graphic
}

pub fn line_symbolizer_element(line: &LineSymbolizer, ctx: &WriteContext) -> Element {
    let v = ctx.version;
    let dasharray = line.dasharray.as_deref().and_then(dasharray_expression);
    let mut stroke = Element::new(tag_name("Stroke", v));
    if line.graphic_stroke.is_some() && line.graphic_fill.is_some() {
        log::warn!("LineSymbolizer has both graphicStroke and graphicFill, writing graphicStroke");
    }
    if let Some(g) = &line.graphic_stroke {
        stroke.push(Element::new(tag_name("GraphicStroke", v)).with_child(graphic_element(g, v)));
    } else if let Some(g) = &line.graphic_fill {
        stroke.push(Element::new(tag_name("GraphicFill", v)).with_child(graphic_element(g, v)));
    }
    for p in parameters(
        &[
            ("stroke", line.color.as_ref()),
            ("stroke-width", line.width.as_ref()),
            ("stroke-opacity", line.opacity.as_ref()),
            ("stroke-linejoin", line.join.as_ref()),
            ("stroke-linecap", line.cap.as_ref()),
            ("stroke-dasharray", dasharray.as_ref()),
            ("stroke-dashoffset", line.dash_offset.as_ref()),
        ],
        v,
    ) {
        stroke.push(p);
    }

    let mut element = Element::new(tag_name("LineSymbolizer", v));
    if stroke.has_children() {
        element.push(stroke);
    }
    element.push_opt(optional(
        "PerpendicularOffset",
        line.perpendicular_offset.as_ref(),
        v,
    ));
    element
}

pub fn fill_symbolizer_element(fill: &FillSymbolizer, ctx: &WriteContext) -> Element {
    let v = ctx.version;
    let mut fill_element = Element::new(tag_name("Fill", v));
    if let Some(g) = &fill.graphic_fill {
        fill_element.push(Element::new(tag_name("GraphicFill", v)).with_child(graphic_element(g, v)));
    }
    for p in parameters(
        &[
            ("fill", fill.color.as_ref()),
            ("fill-opacity", fill.fill_opacity.as_ref()),
        ],
        v,
    ) {
        fill_element.push(p);
    }
    let dasharray = fill.outline_dasharray.as_deref().and_then(dasharray_expression);
    let stroke = parameter_group(
        "Stroke",
        &[
            ("stroke", fill.outline_color.as_ref()),
            ("stroke-width", fill.outline_width.as_ref()),
            ("stroke-opacity", fill.outline_opacity.as_ref()),
            ("stroke-dasharray", dasharray.as_ref()),
            ("stroke-linecap", fill.outline_cap.as_ref()),
            ("stroke-linejoin", fill.outline_join.as_ref()),
        ],
        v,
    );

    let mut element = Element::new(tag_name("PolygonSymbolizer", v));
    if fill_element.has_children() {
        element.push(fill_element);
    }
    element.push_opt(stroke);
    element
}

/// One piece of a label template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelToken {
    Literal(String),
    Property(String),
}

/// Split a label template into literal runs and `{{property}}`
/// placeholders, in order. An unterminated `{{` is literal text.
pub fn tokenize_label(template: &str) -> Vec<LabelToken> {
    let mut tokens = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };
        if start > 0 {
            tokens.push(LabelToken::Literal(rest[..start].to_string()));
        }
        let name = rest[start + 2..start + 2 + len].trim();
        tokens.push(LabelToken::Property(name.to_string()));
        rest = &rest[start + 2 + len + 2..];
    }
    if !rest.is_empty() {
        tokens.push(LabelToken::Literal(rest.to_string()));
    }
    tokens
}

/// `<Label>` for a template or a computed label.
pub fn label_element(label: &Expression, version: SldVersion) -> Element {
    let mut element = Element::new(tag_name("Label", version));
    match label {
        Expression::Function(f) => element.push(function_element(f, version)),
        Expression::Literal(Value::String(template)) => {
            for token in tokenize_label(template) {
                element.push(match token {
                    LabelToken::Literal(text) => Element::text(tag_name("Literal", version), text),
                    LabelToken::Property(name) => {
                        Element::text(tag_name("PropertyName", version), name)
                    }
                });
            }
        }
        Expression::Literal(Value::Null) => {}
        Expression::Literal(other) => {
            element.push(Element::text(tag_name("Literal", version), other.to_string()))
        }
    }
    element
}

fn label_placement(text: &TextSymbolizer, version: SldVersion) -> Option<Element> {
    let line = text.placement == Some(Placement::Line)
        || (text.placement.is_none() && text.perpendicular_offset.is_some());
    let placement = if line {
        let mut line = Element::new(tag_name("LinePlacement", version));
        line.push_opt(optional(
            "PerpendicularOffset",
            text.perpendicular_offset.as_ref(),
            version,
        ));
        line
    } else {
        let mut point = Element::new(tag_name("PointPlacement", version));
        if let Some(anchor) = text.anchor {
            let (x, y) = anchor.to_point();
            point.push(
                Element::new(tag_name("AnchorPoint", version))
                    .with_child(Element::text(tag_name("AnchorPointX", version), x.to_string()))
                    .with_child(Element::text(tag_name("AnchorPointY", version), y.to_string())),
            );
        }
        point.push_opt(displacement("Displacement", &text.offset, version));
        point.push_opt(optional("Rotation", text.rotate.as_ref(), version));
        if text.placement.is_none() && !point.has_children() {
            return None;
        }
        point
    };
    Some(Element::new(tag_name("LabelPlacement", version)).with_child(placement))
}

pub fn text_symbolizer_element(text: &TextSymbolizer, ctx: &WriteContext) -> Element {
    let v = ctx.version;
    let mut element = Element::new(tag_name("TextSymbolizer", v));
    element.push_opt(text.label.as_ref().map(|l| label_element(l, v)));

    let mut font = Element::new(tag_name("Font", v));
    for family in text.font.iter().flatten() {
        font.push(parameter("font-family", family, v));
    }
    for p in parameters(
        &[
            ("font-style", text.font_style.as_ref()),
            ("font-weight", text.font_weight.as_ref()),
            ("font-size", text.size.as_ref()),
        ],
        v,
    ) {
        font.push(p);
    }
    if font.has_children() {
        element.push(font);
    }

    element.push_opt(label_placement(text, v));

    let halo_fill = parameter_group(
        "Fill",
        &[
            ("fill", text.halo_color.as_ref()),
            ("fill-opacity", text.halo_opacity.as_ref()),
        ],
        v,
    );
    if text.halo_width.is_some() || halo_fill.is_some() {
        let mut halo = Element::new(tag_name("Halo", v));
        halo.push_opt(optional("Radius", text.halo_width.as_ref(), v));
        halo.push_opt(halo_fill);
        element.push(halo);
    }

    element.push_opt(parameter_group(
        "Fill",
        &[
            ("fill", text.color.as_ref()),
            ("fill-opacity", text.opacity.as_ref()),
        ],
        v,
    ));
    element
}
