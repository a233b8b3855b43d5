//! `RasterSymbolizer` encoding.

use crate::error::{Result, SldError};
use crate::generator::WriteContext;
use crate::generator::expression::value_element;
use crate::generator::xml::Element;
use crate::model::*;
use crate::version::{SldVersion, tag_name};

pub fn raster_symbolizer_element(raster: &RasterSymbolizer, ctx: &WriteContext) -> Result<Element> {
    let v = ctx.version;
    let mut element = Element::new(tag_name("RasterSymbolizer", v));
    element.push_opt(raster.opacity.as_ref().map(|o| value_element("Opacity", o, v)));
    element.push_opt(
        raster
            .channel_selection
            .as_ref()
            .map(|c| channel_selection_element(c, v)),
    );
    element.push_opt(
        raster
            .color_map
            .as_ref()
            .map(|c| color_map_element(c, v))
            .transpose()?,
    );
    element.push_opt(
        raster
            .contrast_enhancement
            .as_ref()
            .map(|c| contrast_enhancement_element(c, v)),
    );
    Ok(element)
}

/// Entries become attributes, so their values must be literals. A missing
/// or computed `color` fails the write.
pub fn color_map_element(map: &ColorMap, version: SldVersion) -> Result<Element> {
    let mut element = Element::new(tag_name("ColorMap", version));
    if let Some(t) = map.map_type {
        element = element.with_attr("type", t.as_str());
    }
    if let Some(extended) = map.extended {
        element = element.with_attr("extended", extended.to_string());
    }
    for entry in map.color_map_entries.iter().flatten() {
        element.push(color_map_entry_element(entry, version)?);
    }
    Ok(element)
}

fn color_map_entry_element(entry: &ColorMapEntry, version: SldVersion) -> Result<Element> {
    let color = entry
        .color
        .as_ref()
        .filter(|c| !c.is_function())
        .and_then(Expression::literal_text)
        .ok_or(SldError::ColorUndefined)?;
    let mut element = Element::new(tag_name("ColorMapEntry", version)).with_attr("color", color);
    for (name, value) in [
        ("quantity", &entry.quantity),
        ("label", &entry.label),
        ("opacity", &entry.opacity),
    ] {
        match value {
            Some(Expression::Literal(v)) => element = element.with_attr(name, v.to_string()),
            Some(Expression::Function(f)) => {
                log::warn!("dropping ColorMapEntry {}: function {} is not a literal", name, f.name)
            }
            None => {}
        }
    }
    Ok(element)
}

pub fn contrast_enhancement_element(ce: &ContrastEnhancement, version: SldVersion) -> Element {
    let mut element = Element::new(tag_name("ContrastEnhancement", version));
    element.push_opt(ce.enhancement_type.map(|t| {
        Element::new(tag_name(
            match t {
                EnhancementType::Histogram => "Histogram",
                EnhancementType::Normalize => "Normalize",
            },
            version,
        ))
    }));
    element.push_opt(
        ce.gamma_value
            .as_ref()
            .map(|g| value_element("GammaValue", g, version)),
    );
    element
}

fn channel_element(tag: &str, channel: &Channel, version: SldVersion) -> Element {
    let mut element = Element::new(tag_name(tag, version));
    element.push_opt(
        channel
            .source_channel_name
            .as_ref()
            .map(|n| Element::text(tag_name("SourceChannelName", version), n.as_str())),
    );
    element.push_opt(
        channel
            .contrast_enhancement
            .as_ref()
            .map(|c| contrast_enhancement_element(c, version)),
    );
    element
}

pub fn channel_selection_element(selection: &ChannelSelection, version: SldVersion) -> Element {
    let element = Element::new(tag_name("ChannelSelection", version));
    match selection {
        ChannelSelection::Rgb {
            red_channel,
            green_channel,
            blue_channel,
        } => element
            .with_child(channel_element("RedChannel", red_channel, version))
            .with_child(channel_element("GreenChannel", green_channel, version))
            .with_child(channel_element("BlueChannel", blue_channel, version)),
        ChannelSelection::Gray { gray_channel } => {
            element.with_child(channel_element("GrayChannel", gray_channel, version))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_without_color_fails() {
        let map = ColorMap {
            color_map_entries: Some(vec![ColorMapEntry {
                quantity: Some(Expression::number(1.0)),
                ..Default::default()
            }]),
            ..Default::default()
        };
        assert!(matches!(
            color_map_element(&map, SldVersion::V1_0_0),
            Err(SldError::ColorUndefined)
        ));
    }

    #[test]
    fn entries_are_attributes() {
        let map = ColorMap {
            map_type: Some(ColorMapType::Intervals),
            extended: Some(true),
            color_map_entries: Some(vec![ColorMapEntry {
                color: Some(Expression::string("#00FF00")),
                quantity: Some(Expression::number(100.0)),
                label: Some(Expression::string("low")),
                opacity: None,
            }]),
        };
        let e = color_map_element(&map, SldVersion::V1_0_0).unwrap();
        assert_eq!(e.attr("type"), Some("intervals"));
        assert_eq!(e.attr("extended"), Some("true"));
        let entry = e.child("ColorMapEntry").unwrap();
        assert_eq!(entry.attr("quantity"), Some("100"));
        assert_eq!(entry.attr("label"), Some("low"));
        assert_eq!(entry.attr("opacity"), None);
    }
}
