use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::tree::{Document, Element, Node};
use crate::core::FixtureError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

impl Document {
    /// Parse raw file contents. Only UTF-8 input is accepted.
    pub fn from_bytes(bytes: &[u8]) -> Result<Document, FixtureError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let xml = std::str::from_utf8(bytes)
            .map_err(|e| FixtureError::Parse(format!("invalid UTF-8: {e}")))?;
        Self::parse(xml)
    }

    /// Parse an XML string into a tree, keeping whitespace, comments and
    /// processing instructions.
    pub fn parse(xml: &str) -> Result<Document, FixtureError> {
        let mut reader = Reader::from_str(xml);
        let mut b = TreeBuilder::default();

        loop {
            let event = reader.read_event().map_err(|e| {
                FixtureError::Parse(format!("{e} at position {}", reader.buffer_position()))
            })?;
            match event {
                Event::Decl(_) => {}
                Event::Start(ref e) => {
                    let el = start_element(e)?;
                    b.open.push(el);
                }
                Event::Empty(ref e) => {
                    let el = start_element(e)?;
                    b.close(el)?;
                }
                Event::End(_) => {
                    let el = b
                        .open
                        .pop()
                        .ok_or_else(|| FixtureError::Parse("unmatched end tag".into()))?;
                    b.close(el)?;
                }
                Event::Text(ref e) => {
                    let text = e
                        .unescape()
                        .map_err(|e| FixtureError::Parse(e.to_string()))?;
                    b.text(Node::Text(text.into_owned()))?;
                }
                Event::CData(ref e) => {
                    b.text(Node::CData(utf8(e)?.to_string()))?;
                }
                Event::Comment(ref e) => b.misc(Node::Comment(utf8(e)?.to_string())),
                Event::PI(ref e) => b.misc(Node::ProcessingInstruction(utf8(e)?.to_string())),
                Event::DocType(ref e) => b.misc(Node::DocType(utf8(e)?.trim().to_string())),
                Event::Eof => break,
            }
        }

        b.finish()
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, FixtureError> {
    std::str::from_utf8(bytes).map_err(|e| FixtureError::Parse(format!("invalid UTF-8: {e}")))
}

fn start_element(e: &BytesStart<'_>) -> Result<Element, FixtureError> {
    let mut el = Element::new(utf8(e.name().as_ref())?);
    for attr in e.attributes() {
        let attr = attr.map_err(|e| FixtureError::Parse(format!("bad attribute: {e}")))?;
        let key = utf8(attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| FixtureError::Parse(e.to_string()))?;
        el.attributes.push((key, value.into_owned()));
    }
    Ok(el)
}

#[derive(Default)]
struct TreeBuilder {
    prolog: Vec<Node>,
    root: Option<Element>,
    epilog: Vec<Node>,
    open: Vec<Element>,
}

impl TreeBuilder {
    fn close(&mut self, el: Element) -> Result<(), FixtureError> {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(Node::Element(el)),
            None if self.root.is_some() => {
                return Err(FixtureError::Parse(format!(
                    "multiple root elements: <{}>",
                    el.name
                )));
            }
            None => self.root = Some(el),
        }
        Ok(())
    }

    fn text(&mut self, node: Node) -> Result<(), FixtureError> {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => {
                let blank = matches!(&node, Node::Text(t) if t.trim().is_empty());
                if !blank {
                    return Err(FixtureError::Parse("text outside the root element".into()));
                }
            }
        }
        Ok(())
    }

    fn misc(&mut self, node: Node) {
        match (self.open.last_mut(), self.root.is_some()) {
            (Some(parent), _) => parent.children.push(node),
            (None, false) => self.prolog.push(node),
            (None, true) => self.epilog.push(node),
        }
    }

    fn finish(self) -> Result<Document, FixtureError> {
        if let Some(el) = self.open.last() {
            return Err(FixtureError::Parse(format!(
                "unexpected end of input: <{}> is not closed",
                el.name
            )));
        }
        let root = self
            .root
            .ok_or_else(|| FixtureError::Parse("no root element".into()))?;
        Ok(Document {
            prolog: self.prolog,
            root,
            epilog: self.epilog,
        })
    }
}
