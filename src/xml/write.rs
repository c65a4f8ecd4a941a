use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use std::io::{Cursor, Write};

use super::tree::{Document, Element, Node};
use crate::core::FixtureError;

fn xml_io(e: std::io::Error) -> FixtureError {
    FixtureError::Write(e.to_string())
}

/// Serializes a [`Document`] back to UTF-8 bytes.
///
/// No indentation is added; whitespace text nodes from the source are
/// written as they were parsed.
pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new() -> Result<Self, FixtureError> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner().into_inner()
    }

    fn newline(&mut self) -> Result<(), FixtureError> {
        // Raw bytes via the Cursor keep its position in sync with the writer.
        self.writer.get_mut().write_all(b"\n").map_err(xml_io)
    }

    pub fn document(&mut self, doc: &Document) -> Result<&mut Self, FixtureError> {
        self.newline()?;
        for node in &doc.prolog {
            self.node(node)?;
            self.newline()?;
        }
        self.element(&doc.root)?;
        for node in &doc.epilog {
            self.newline()?;
            self.node(node)?;
        }
        self.newline()?;
        Ok(self)
    }

    pub fn element(&mut self, el: &Element) -> Result<&mut Self, FixtureError> {
        let mut start = BytesStart::new(el.name.as_str());
        for (k, v) in &el.attributes {
            start.push_attribute((k.as_str(), v.as_str()));
        }

        if el.children.is_empty() {
            self.writer.write_event(Event::Empty(start)).map_err(xml_io)?;
            return Ok(self);
        }

        self.writer.write_event(Event::Start(start)).map_err(xml_io)?;
        for child in &el.children {
            self.node(child)?;
        }
        self.writer
            .write_event(Event::End(BytesEnd::new(el.name.as_str())))
            .map_err(xml_io)?;
        Ok(self)
    }

    fn node(&mut self, node: &Node) -> Result<(), FixtureError> {
        let event = match node {
            Node::Element(el) => {
                self.element(el)?;
                return Ok(());
            }
            Node::Text(t) => Event::Text(BytesText::from_escaped(partial_escape(t.as_str()))),
            Node::CData(t) => Event::CData(BytesCData::new(t.as_str())),
            Node::Comment(t) => Event::Comment(BytesText::from_escaped(t.as_str())),
            Node::ProcessingInstruction(t) => Event::PI(BytesPI::new(t.as_str())),
            Node::DocType(t) => Event::DocType(BytesText::from_escaped(t.as_str())),
        };
        self.writer.write_event(event).map_err(xml_io)
    }
}

impl Document {
    /// Serialize with an `<?xml version="1.0" encoding="UTF-8"?>` declaration.
    pub fn to_bytes(&self) -> Result<Vec<u8>, FixtureError> {
        let mut w = XmlWriter::new()?;
        w.document(self)?;
        Ok(w.into_bytes())
    }

    pub fn to_xml_string(&self) -> Result<String, FixtureError> {
        String::from_utf8(self.to_bytes()?)
            .map_err(|e| FixtureError::Write(format!("XML UTF-8 error: {e}")))
    }
}
