//! Small path queries over the parsed tree.
//!
//! A path is a dot-separated list of segments:
//!
//! - `Tag` – first child element named `Tag`
//! - `Tag[n]` – the n-th (zero based) child element named `Tag`
//! - `#text` – value of the current element (text, literal or function)
//! - `@attr` – attribute value
//! - `$name` – styling-parameter value (`CssParameter`/`SvgParameter`)
//!
//! The last three are terminal. Examples:
//! `Graphic.Mark.WellKnownName.#text`,
//! `Graphic.ExternalGraphic.OnlineResource.@xlink:href`,
//! `Graphic.Mark.Fill.$fill-opacity`.

use crate::model::Expression;
use crate::parser::expression::element_value;
use crate::parser::helpers::{get_attribute, get_children, get_parameter_value};
use crate::version::SldVersion;
use roxmltree::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'p> {
    Child { tag: &'p str, index: usize },
    Text,
    Attribute(&'p str),
    Parameter(&'p str),
}

impl<'p> Segment<'p> {
    pub fn parse(s: &'p str) -> Option<Self> {
        if s == "#text" {
            return Some(Segment::Text);
        }
        if let Some(name) = s.strip_prefix('@') {
            return (!name.is_empty()).then_some(Segment::Attribute(name));
        }
        if let Some(name) = s.strip_prefix('$') {
            return (!name.is_empty()).then_some(Segment::Parameter(name));
        }
        if let Some((tag, rest)) = s.split_once('[') {
            let index = rest.strip_suffix(']')?.parse().ok()?;
            return (!tag.is_empty()).then_some(Segment::Child { tag, index });
        }
        (!s.is_empty()).then_some(Segment::Child { tag: s, index: 0 })
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Segment::Child { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery<'p> {
    segments: Vec<Segment<'p>>,
}

/// Result of resolving a [`PathQuery`].
#[derive(Debug, Clone)]
pub enum Lookup<'a, 'input> {
    Node(Node<'a, 'input>),
    Value(Expression),
}

impl<'a, 'input> Lookup<'a, 'input> {
    pub fn node(self) -> Option<Node<'a, 'input>> {
        match self {
            Lookup::Node(n) => Some(n),
            Lookup::Value(_) => None,
        }
    }

    pub fn value(self) -> Option<Expression> {
        match self {
            Lookup::Value(v) => Some(v),
            Lookup::Node(_) => None,
        }
    }
}

impl<'p> PathQuery<'p> {
    /// `None` for empty segments, malformed indices, or a terminal segment
    /// that is not last.
    pub fn parse(path: &'p str) -> Option<Self> {
        let segments = path
            .split('.')
            .map(Segment::parse)
            .collect::<Option<Vec<_>>>()?;
        let (_, init) = segments.split_last()?;
        if init.iter().any(Segment::is_terminal) {
            return None;
        }
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[Segment<'p>] {
        &self.segments
    }

    pub fn resolve<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        version: SldVersion,
    ) -> Option<Lookup<'a, 'input>> {
        let mut current = node;
        for segment in &self.segments {
            match *segment {
                Segment::Child { tag, index } => {
                    current = get_children(current, tag).nth(index)?;
                }
                Segment::Text => return element_value(current).map(Lookup::Value),
                Segment::Attribute(name) => {
                    return get_attribute(current, name)
                        .map(|v| Lookup::Value(Expression::string(v)));
                }
                Segment::Parameter(name) => {
                    return get_parameter_value(current, name, version).map(Lookup::Value);
                }
            }
        }
        Some(Lookup::Node(current))
    }
}

/// Resolve `path` below `node`. Never fails: malformed paths and missing
/// nodes both yield `None`.
pub fn get<'a, 'input>(
    node: Node<'a, 'input>,
    path: &str,
    version: SldVersion,
) -> Option<Lookup<'a, 'input>> {
    match PathQuery::parse(path) {
        Some(query) => query.resolve(node, version),
        None => {
            log::warn!("ignoring malformed path query {:?}", path);
            None
        }
    }
}

pub fn get_node<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    get(node, path, SldVersion::default()).and_then(Lookup::node)
}

pub fn get_value(node: Node, path: &str, version: SldVersion) -> Option<Expression> {
    get(node, path, version).and_then(Lookup::value)
}

/// Literal text at `path`; `None` if absent or a function.
pub fn get_text(node: Node, path: &str, version: SldVersion) -> Option<String> {
    match get_value(node, path, version)? {
        Expression::Literal(v) => Some(v.to_string()),
        Expression::Function(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FunctionCall;
    use roxmltree::Document;

    #[test]
    fn segments_parse_in_isolation() {
        assert_eq!(Segment::parse("#text"), Some(Segment::Text));
        assert_eq!(Segment::parse("@xlink:href"), Some(Segment::Attribute("xlink:href")));
        assert_eq!(Segment::parse("$fill"), Some(Segment::Parameter("fill")));
        assert_eq!(
            Segment::parse("NamedLayer[1]"),
            Some(Segment::Child { tag: "NamedLayer", index: 1 })
        );
        assert_eq!(
            Segment::parse("Graphic"),
            Some(Segment::Child { tag: "Graphic", index: 0 })
        );
        assert_eq!(Segment::parse("Tag[x]"), None);
        assert_eq!(Segment::parse("Tag[1"), None);
        assert_eq!(Segment::parse("@"), None);
        assert_eq!(Segment::parse(""), None);
    }

    #[test]
    fn terminal_segments_must_be_last() {
        assert!(PathQuery::parse("Graphic.#text.Size").is_none());
        assert!(PathQuery::parse("Graphic..Size").is_none());
        assert_eq!(PathQuery::parse("Graphic.Size.#text").unwrap().segments().len(), 3);
    }

    const POINT: &str = r##"<PointSymbolizer xmlns:ogc="http://www.opengis.net/ogc" xmlns:xlink="http://www.w3.org/1999/xlink">
      <Graphic>
        <Mark>
          <WellKnownName>circle</WellKnownName>
          <Fill><CssParameter name="fill">#FF0000</CssParameter></Fill>
        </Mark>
        <ExternalGraphic><OnlineResource xlink:href="a.png"/></ExternalGraphic>
        <ExternalGraphic><OnlineResource xlink:href="b.png"/></ExternalGraphic>
        <Size>
          10
        </Size>
        <Rotation><ogc:Function name="sqrt"><ogc:Literal>16</ogc:Literal></ogc:Function></Rotation>
      </Graphic>
    </PointSymbolizer>"##;

    #[test]
    fn resolves_each_segment_kind() {
        let doc = Document::parse(POINT).unwrap();
        let sym = doc.root_element();
        let v = SldVersion::V1_0_0;
        assert_eq!(
            get_text(sym, "Graphic.Mark.WellKnownName.#text", v).as_deref(),
            Some("circle")
        );
        assert_eq!(get_text(sym, "Graphic.Size.#text", v).as_deref(), Some("10"));
        assert_eq!(
            get_text(sym, "Graphic.ExternalGraphic[1].OnlineResource.@xlink:href", v).as_deref(),
            Some("b.png")
        );
        assert_eq!(
            get_text(sym, "Graphic.Mark.Fill.$fill", v).as_deref(),
            Some("#FF0000")
        );
        assert_eq!(
            get_value(sym, "Graphic.Rotation.#text", v),
            Some(Expression::Function(FunctionCall::new(
                "sqrt",
                vec![Expression::number(16.0)]
            )))
        );
        assert_eq!(
            get_node(sym, "Graphic.Mark").map(|n| n.tag_name().name()),
            Some("Mark")
        );
    }

    #[test]
    fn unresolved_paths_are_none() {
        let doc = Document::parse(POINT).unwrap();
        let sym = doc.root_element();
        let v = SldVersion::V1_0_0;
        assert!(get(sym, "Graphic.Opacity.#text", v).is_none());
        assert!(get(sym, "Graphic.ExternalGraphic[5]", v).is_none());
        assert!(get(sym, "Graphic.Mark.Fill.$fill", SldVersion::V1_1_0).is_none());
        assert!(get(sym, "Graphic.Mark.@missing", v).is_none());
        assert!(get(sym, "Graphic.#text.Mark", v).is_none());
    }
}
