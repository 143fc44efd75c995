//! The generic structured document — the in-memory tree the container
//! codec produces and consumes, serialized to/from XML text.
//!
//! The tree carries no schema knowledge: elements are just a name,
//! ordered attributes, optional text, and child elements. Validation
//! against any schema is explicitly out of scope.

use crate::error::DocumentError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::{Deserialize, Serialize};

/// One element of the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Tag name
    pub name: String,
    /// Attributes in document order
    #[serde(default)]
    pub attributes: Vec<(String, String)>,
    /// Text content, if any
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
    /// Child elements in document order
    #[serde(default)]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Get an attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A complete structured document: a single root element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Serialize as indented XML text with an XML declaration.
    pub fn to_xml(&self) -> Result<String, DocumentError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        write_element(&mut writer, &self.root)?;
        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        Ok(String::from_utf8(bytes)?)
    }

    /// Parse XML text into a document tree.
    ///
    /// Comments, processing instructions, and the declaration are
    /// dropped. Exactly one root element is required.
    pub fn from_xml(xml: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    if root.is_some() && stack.is_empty() {
                        return Err(DocumentError::TrailingContent);
                    }
                    stack.push(element_from_start(&e)?);
                }
                Event::Empty(e) => {
                    let element = element_from_start(&e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    // The reader rejects unmatched end tags before we
                    // get here, so the stack is never empty.
                    if let Some(element) = stack.pop() {
                        attach(&mut stack, &mut root, element)?;
                    }
                }
                Event::Text(e) => {
                    if let Some(top) = stack.last_mut() {
                        let unescaped = e.unescape()?;
                        match &mut top.text {
                            Some(text) => text.push_str(&unescaped),
                            None => top.text = Some(unescaped.into_owned()),
                        }
                    }
                }
                Event::CData(e) => {
                    if let Some(top) = stack.last_mut() {
                        let raw = String::from_utf8_lossy(&e).into_owned();
                        match &mut top.text {
                            Some(text) => text.push_str(&raw),
                            None => top.text = Some(raw),
                        }
                    }
                }
                Event::Eof => break,
                // Decl / Comment / PI / DocType
                _ => {}
            }
        }

        root.map(Document::new).ok_or(DocumentError::MissingRoot)
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), DocumentError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &element.text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

fn element_from_start(e: &BytesStart<'_>) -> Result<Element, DocumentError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut element = Element::new(name);
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), DocumentError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(DocumentError::TrailingContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Document {
        Document::new(
            Element::new("package")
                .attr("name", "town_common")
                .attr("count", "2")
                .child(
                    Element::new("entity")
                        .attr("type", "StaticModelEntity")
                        .child(Element::new("position").text("12.5 0.0 -3.25")),
                )
                .child(Element::new("entity").attr("type", "LightEntity")),
        )
    }

    #[test]
    fn xml_round_trip() {
        let doc = sample_document();
        let xml = doc.to_xml().unwrap();
        let parsed = Document::from_xml(&xml).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn serialized_form_is_indented_with_declaration() {
        let xml = sample_document().to_xml().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("\n  <entity"));
        assert!(xml.ends_with("</package>\n"));
    }

    #[test]
    fn special_characters_survive_round_trip() {
        let doc = Document::new(
            Element::new("node")
                .attr("label", "a < b & \"c\"")
                .text("1 < 2 && 3 > 2"),
        );
        let xml = doc.to_xml().unwrap();
        let parsed = Document::from_xml(&xml).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn empty_elements_parse_back() {
        let parsed = Document::from_xml("<root><leaf/><leaf a=\"1\"/></root>").unwrap();
        assert_eq!(parsed.root.children.len(), 2);
        assert_eq!(parsed.root.children[1].attribute("a"), Some("1"));
    }

    #[test]
    fn missing_root_is_rejected() {
        assert!(matches!(
            Document::from_xml("<?xml version=\"1.0\"?>"),
            Err(DocumentError::MissingRoot)
        ));
        assert!(matches!(Document::from_xml(""), Err(DocumentError::MissingRoot)));
    }

    #[test]
    fn trailing_root_is_rejected() {
        assert!(matches!(
            Document::from_xml("<a/><b/>"),
            Err(DocumentError::TrailingContent)
        ));
    }

    #[test]
    fn mismatched_tags_are_rejected() {
        assert!(Document::from_xml("<a><b></a></b>").is_err());
    }

    #[test]
    fn elements_serialize_to_json_for_tooling() {
        let json = serde_json::to_string(&sample_document()).unwrap();
        assert!(json.contains("\"name\":\"package\""));
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample_document());
    }
}
