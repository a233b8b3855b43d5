//! Owned XML tree assembled by the generators and serialized with
//! `quick-xml`.

use crate::config::WriterOptions;
use crate::error::{Result, SldError};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(Element),
    Text(String),
}

/// An element with ordered attributes and children. Names are written as
/// given, prefix included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// `<name>text</name>`, or `<name/>` for empty text.
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).with_text(text)
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.children.push(XmlNode::Text(text));
        }
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = XmlNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(XmlNode::Element(child));
    }

    pub fn push_opt(&mut self, child: Option<Element>) {
        if let Some(child) = child {
            self.push(child);
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements named `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter_map(move |c| match c {
            XmlNode::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find_map(|c| match c {
            XmlNode::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Serialize `root` as a document.
pub fn serialize(root: &Element, options: &WriterOptions) -> Result<String> {
    let cursor = Cursor::new(Vec::new());
    let mut writer = match options.indent {
        Some(n) => Writer::new_with_indent(cursor, b' ', n),
        None => Writer::new(cursor),
    };
    if options.xml_declaration {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(SldError::write)?;
    }
    write_element(&mut writer, root)?;
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(SldError::write)
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (k, v) in &element.attributes {
        start.push_attribute((k.as_str(), v.as_str()));
    }
    if element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(SldError::write);
    }
    writer
        .write_event(Event::Start(start))
        .map_err(SldError::write)?;
    for child in &element.children {
        match child {
            XmlNode::Element(e) => write_element(writer, e)?,
            XmlNode::Text(t) => writer
                .write_event(Event::Text(BytesText::new(t)))
                .map_err(SldError::write)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(SldError::write)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_nested_elements_with_escaping() {
        let root = Element::new("Rule")
            .with_attr("a", "x\"y")
            .with_child(Element::text("Name", "a < b & c"))
            .with_child(Element::new("Empty"));
        let xml = serialize(
            &root,
            &WriterOptions {
                indent: None,
                xml_declaration: false,
            },
        )
        .unwrap();
        assert_eq!(
            xml,
            r#"<Rule a="x&quot;y"><Name>a &lt; b &amp; c</Name><Empty/></Rule>"#
        );
    }

    #[test]
    fn declaration_and_indentation() {
        let root = Element::new("A").with_child(Element::text("B", "1"));
        let xml = serialize(&root, &WriterOptions::default()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("\n  <B>1</B>"));
    }

    #[test]
    fn child_lookup_outlives_the_name() {
        let root = Element::new("Graphic")
            .with_child(Element::text("Size", "4"))
            .with_child(Element::text("Size", "8"));
        let first = {
            let name = String::from("Size");
            root.child(&name)
        };
        assert_eq!(first.map(|e| e.children.len()), Some(1));
        assert_eq!(root.children_named("Size").count(), 2);
        assert!(root.child("Mark").is_none());
    }

    #[test]
    fn empty_text_collapses() {
        let e = Element::text("Name", "");
        assert!(!e.has_children());
    }
}
