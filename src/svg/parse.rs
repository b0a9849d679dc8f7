use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::foundation::error::{FrameError, FrameResult};
use crate::svg::tree::{Element, NodeData, NodeId, SvgDocument};

impl SvgDocument {
    /// Parse frame markup into an owned document.
    ///
    /// Whitespace and comments are preserved so that serialization stays close to the source.
    pub fn parse(markup: &str) -> FrameResult<Self> {
        let mut reader = Reader::from_str(markup);

        let mut doc = SvgDocument {
            nodes: Vec::new(),
            top: Vec::new(),
            root: NodeId(usize::MAX),
        };
        let mut stack: Vec<NodeId> = Vec::new();
        let mut root = None;

        loop {
            let pos = reader.buffer_position();
            let event = reader
                .read_event()
                .map_err(|e| FrameError::parse(format!("xml error at byte {pos}: {e}")))?;

            let data = match event {
                Event::Start(ref e) => {
                    let id = doc.attach(NodeData::Element(element(e)?), &stack);
                    root.get_or_insert(id);
                    stack.push(id);
                    continue;
                }
                Event::Empty(ref e) => {
                    let id = doc.attach(NodeData::Element(element(e)?), &stack);
                    root.get_or_insert(id);
                    continue;
                }
                Event::End(_) => {
                    stack.pop();
                    continue;
                }
                Event::Text(e) => {
                    let raw = utf8(&e)?;
                    let text = quick_xml::escape::unescape(raw)
                        .map(Cow::into_owned)
                        .unwrap_or_else(|_| raw.to_owned());
                    NodeData::Text(text)
                }
                Event::CData(e) => NodeData::CData(utf8(&e)?.to_owned()),
                Event::Comment(e) => NodeData::Comment(utf8(&e)?.to_owned()),
                Event::PI(e) => NodeData::Pi(utf8(&e)?.to_owned()),
                Event::Decl(e) => NodeData::Decl(utf8(&e)?.to_owned()),
                Event::DocType(e) => NodeData::DocType(utf8(&e)?.to_owned()),
                Event::Eof => break,
            };
            doc.attach(data, &stack);
        }

        if !stack.is_empty() {
            return Err(FrameError::parse("unclosed element at end of document"));
        }
        doc.root = root.ok_or_else(|| FrameError::parse("document has no root element"))?;
        Ok(doc)
    }

    fn attach(&mut self, data: NodeData, stack: &[NodeId]) -> NodeId {
        let parent = stack.last().copied();
        let id = self.push_node(data, parent);
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.top.push(id),
        }
        id
    }
}

fn element(e: &BytesStart<'_>) -> FrameResult<Element> {
    let name = utf8(e.name().as_ref())?.to_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| FrameError::parse(format!("attribute of <{name}>: {err}")))?;
        let key = utf8(attr.key.as_ref())?.to_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| FrameError::parse(format!("attribute '{key}' of <{name}>: {err}")))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(Element { name, attributes })
}

fn utf8(bytes: &[u8]) -> FrameResult<&str> {
    std::str::from_utf8(bytes).map_err(|e| FrameError::parse(format!("invalid utf-8: {e}")))
}
