//! Schema-less XML parsing for processor responses.
//!
//! Response documents vary by operation and outcome, so nothing here is
//! typed against a particular schema. The root tag name is kept alongside the
//! tree as the only stable signal of which document family came back.

use crate::error::{GatewayError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;
use std::collections::BTreeMap;

/// One parsed element: text for leaves, a child map for elements with children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum XmlNode {
    Leaf(String),
    Node(BTreeMap<String, XmlNode>),
}

impl XmlNode {
    /// Looks up a direct child. Leaves have no children.
    pub fn get(&self, name: &str) -> Option<&XmlNode> {
        match self {
            Self::Node(children) => children.get(name),
            Self::Leaf(_) => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Leaf(text) => Some(text),
            Self::Node(_) => None,
        }
    }

    /// Text of a direct child leaf.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Self::text)
    }
}

/// A parsed response document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseTree {
    /// Tag name of the document's root element.
    pub container: String,
    pub root: XmlNode,
}

impl ResponseTree {
    pub fn get(&self, name: &str) -> Option<&XmlNode> {
        self.root.get(name)
    }

    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.root.child_text(name)
    }
}

/// Parses a raw response body.
pub fn parse_bytes(body: &[u8]) -> Result<ResponseTree> {
    let text = std::str::from_utf8(body)
        .map_err(|e| malformed(format!("response is not UTF-8: {e}")))?;
    parse(text)
}

/// Parses an XML document into a [`ResponseTree`].
///
/// Duplicate sibling tags collapse to the last one seen. Namespace prefixes
/// are dropped from tag names and need not be declared.
pub fn parse(xml: &str) -> Result<ResponseTree> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, XmlNode)> = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(malformed("content after the root element"));
                }
                stack.push(Frame::new(local_name(&start)?));
            }
            Event::Empty(start) => {
                let name = local_name(&start)?;
                attach(&mut stack, &mut root, name, XmlNode::Leaf(String::new()))?;
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| malformed("closing tag without an opening tag"))?;
                let (name, node) = frame.finish();
                attach(&mut stack, &mut root, name, node)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(malformed)?;
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(malformed("text outside the root element")),
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    let data = data.into_inner();
                    frame
                        .text
                        .push_str(std::str::from_utf8(&data).map_err(malformed)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(format!("unclosed element <{}>", open.name)));
    }
    let (container, root) = root.ok_or_else(|| malformed("document has no root element"))?;
    Ok(ResponseTree { container, root })
}

struct Frame {
    name: String,
    text: String,
    children: BTreeMap<String, XmlNode>,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: BTreeMap::new(),
        }
    }

    fn finish(self) -> (String, XmlNode) {
        let node = if self.children.is_empty() {
            XmlNode::Leaf(self.text.trim().to_string())
        } else {
            XmlNode::Node(self.children)
        };
        (self.name, node)
    }
}

fn attach(
    stack: &mut [Frame],
    root: &mut Option<(String, XmlNode)>,
    name: String,
    node: XmlNode,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.insert(name, node);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some((name, node));
            Ok(())
        }
        None => Err(malformed("multiple root elements")),
    }
}

fn local_name(start: &BytesStart<'_>) -> Result<String> {
    let name = start.local_name();
    std::str::from_utf8(name.as_ref())
        .map(str::to_string)
        .map_err(malformed)
}

fn malformed(reason: impl std::fmt::Display) -> GatewayError {
    GatewayError::MalformedResponse(reason.to_string())
}
