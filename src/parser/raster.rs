//! `RasterSymbolizer` decoding: color map, channel selection and contrast
//! enhancement.

use crate::error::{Result, SldError};
use crate::model::*;
use crate::parser::ReadContext;
use crate::parser::expression::{element_value, number_expression, number_from_text};
use crate::parser::helpers::{get_attribute, get_child, get_children, text_content};
use crate::parser::path::get_value;
use roxmltree::Node;

pub fn parse_raster_symbolizer(node: Node, ctx: &ReadContext) -> Result<RasterSymbolizer> {
    Ok(RasterSymbolizer {
        opacity: get_value(node, "Opacity.#text", ctx.version).map(number_expression),
        color_map: get_child(node, "ColorMap")
            .map(|c| parse_color_map(c, ctx))
            .transpose()?,
        channel_selection: get_child(node, "ChannelSelection")
            .map(parse_channel_selection)
            .transpose()?,
        contrast_enhancement: get_child(node, "ContrastEnhancement")
            .map(parse_contrast_enhancement)
            .transpose()?,
        ..Default::default()
    })
}

pub fn parse_color_map(node: Node, ctx: &ReadContext) -> Result<ColorMap> {
    let map_type = get_attribute(node, "type").and_then(|t| match t.parse() {
        Ok(t) => Some(t),
        Err(e) => {
            ctx.warn(format!("ignoring ColorMap type: {}", e));
            None
        }
    });
    let extended = get_attribute(node, "extended").map(|e| e.trim() == "true");
    let entries = get_children(node, "ColorMapEntry")
        .map(parse_color_map_entry)
        .collect::<Result<Vec<_>>>()?;
    Ok(ColorMap {
        map_type,
        extended,
        color_map_entries: (!entries.is_empty()).then_some(entries),
    })
}

/// Every entry must carry a `color`.
pub fn parse_color_map_entry(node: Node) -> Result<ColorMapEntry> {
    let color = get_attribute(node, "color").ok_or(SldError::ColorUndefined)?;
    Ok(ColorMapEntry {
        color: Some(Expression::string(color)),
        quantity: get_attribute(node, "quantity").map(number_from_text),
        label: get_attribute(node, "label").map(Expression::string),
        opacity: get_attribute(node, "opacity").map(number_from_text),
    })
}

/// `Histogram` and `Normalize` are mutually exclusive.
pub fn parse_contrast_enhancement(node: Node) -> Result<ContrastEnhancement> {
    let histogram = get_child(node, "Histogram").is_some();
    let normalize = get_child(node, "Normalize").is_some();
    let enhancement_type = match (histogram, normalize) {
        (true, true) => return Err(SldError::HistogramAndNormalize),
        (true, false) => Some(EnhancementType::Histogram),
        (false, true) => Some(EnhancementType::Normalize),
        (false, false) => None,
    };
    Ok(ContrastEnhancement {
        enhancement_type,
        gamma_value: get_child(node, "GammaValue")
            .and_then(element_value)
            .map(number_expression),
    })
}

pub fn parse_channel(node: Node) -> Result<Channel> {
    Ok(Channel {
        source_channel_name: get_child(node, "SourceChannelName")
            .map(|n| text_content(n).trim().to_string()),
        contrast_enhancement: get_child(node, "ContrastEnhancement")
            .map(parse_contrast_enhancement)
            .transpose()?,
    })
}

/// Either a gray channel or all three of red, green and blue.
pub fn parse_channel_selection(node: Node) -> Result<ChannelSelection> {
    let gray = get_child(node, "GrayChannel");
    let red = get_child(node, "RedChannel");
    let green = get_child(node, "GreenChannel");
    let blue = get_child(node, "BlueChannel");
    let any_rgb = red.is_some() || green.is_some() || blue.is_some();
    match (gray, red, green, blue) {
        (Some(_), ..) if any_rgb => Err(SldError::RgbAndGray),
        (Some(gray), ..) => Ok(ChannelSelection::Gray {
            gray_channel: parse_channel(gray)?,
        }),
        (None, Some(r), Some(g), Some(b)) => Ok(ChannelSelection::Rgb {
            red_channel: parse_channel(r)?,
            green_channel: parse_channel(g)?,
            blue_channel: parse_channel(b)?,
        }),
        _ => Err(SldError::RgbChannelsUndefined),
    }
}
