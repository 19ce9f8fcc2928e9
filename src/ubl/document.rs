use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use std::fmt;

use crate::core::EracunError;

/// A parsed, read-only XML document with resolved namespaces.
///
/// Elements live in a flat arena; [`Node`] is a cheap copyable handle into it.
/// The first element is always the root.
#[derive(Debug)]
pub struct Document {
    elements: Vec<Element>,
}

#[derive(Debug)]
struct Element {
    namespace: Option<String>,
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Content>,
}

#[derive(Debug)]
enum Content {
    Element(usize),
    Text(String),
}

impl Document {
    /// Parse raw bytes.
    ///
    /// Only UTF-8 input is accepted (a leading BOM is skipped); documents in
    /// other encodings such as windows-1250 are not transcoded. Non-UTF-8
    /// bytes are rejected with a diagnostic naming the declared encoding.
    ///
    /// On failure every diagnostic collected so far is returned together.
    pub fn parse(xml: &[u8]) -> Result<Self, EracunError> {
        let xml = std::str::from_utf8(xml).map_err(|e| match declared_encoding(xml) {
            Some(encoding) if !encoding.eq_ignore_ascii_case("utf-8") => EracunError::xml(format!(
                "unsupported encoding {encoding:?}, only UTF-8 is accepted: {e}"
            )),
            _ => EracunError::xml(format!("input is not valid UTF-8: {e}")),
        })?;
        Self::parse_str(xml)
    }

    pub fn parse_str(xml: &str) -> Result<Self, EracunError> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let mut reader = NsReader::from_str(xml);

        let mut elements: Vec<Element> = Vec::new();
        let mut open: Vec<usize> = Vec::new();
        let mut diagnostics: Vec<String> = Vec::new();

        loop {
            let (namespace, event) = match reader.read_resolved_event() {
                Ok((ns, event)) => (namespace_uri(&ns), event),
                Err(e) => {
                    diagnostics.push(format!("{e} (at byte {})", reader.buffer_position()));
                    break;
                }
            };

            match event {
                Event::Start(e) => {
                    let id = push_element(&mut elements, &open, namespace, &e, &mut diagnostics);
                    open.push(id);
                }
                Event::Empty(e) => {
                    push_element(&mut elements, &open, namespace, &e, &mut diagnostics);
                }
                Event::End(_) => {
                    open.pop();
                }
                Event::Text(e) => match e.unescape() {
                    Ok(text) => push_text(&mut elements, &open, &text, &mut diagnostics),
                    Err(err) => {
                        diagnostics.push(format!("{err} (at byte {})", reader.buffer_position()));
                        break;
                    }
                },
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    push_text(&mut elements, &open, &text, &mut diagnostics);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if diagnostics.is_empty() {
            if elements.is_empty() {
                diagnostics.push("document is empty: no root element".into());
            } else if !open.is_empty() {
                let names: Vec<&str> = open.iter().map(|&id| elements[id].name.as_str()).collect();
                diagnostics.push(format!(
                    "premature end of document: unclosed element(s) {}",
                    names.join(", ")
                ));
            }
        }

        if !diagnostics.is_empty() {
            return Err(EracunError::Xml { diagnostics });
        }
        Ok(Self { elements })
    }

    /// The document (root) element.
    pub fn root(&self) -> Node<'_> {
        Node { doc: self, id: 0 }
    }
}

/// `encoding` pseudo-attribute of the XML declaration, if any.
fn declared_encoding(xml: &[u8]) -> Option<String> {
    let head = &xml[..xml.len().min(256)];
    let end = head.windows(2).position(|w| w == b"?>")?;
    let decl = String::from_utf8_lossy(&head[..end]);
    let decl = decl.strip_prefix('\u{feff}').unwrap_or(&decl);
    let rest = decl.strip_prefix("<?xml")?.split_once("encoding")?.1;
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|q| matches!(q, '"' | '\''))?;
    let value = rest[1..].split(quote).next()?;
    Some(value.to_string())
}

fn namespace_uri(ns: &ResolveResult<'_>) -> Option<String> {
    match ns {
        ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
        _ => None,
    }
}

fn push_element(
    elements: &mut Vec<Element>,
    open: &[usize],
    namespace: Option<String>,
    start: &BytesStart<'_>,
    diagnostics: &mut Vec<String>,
) -> usize {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let attributes = match read_attributes(start) {
        Ok(attributes) => attributes,
        Err(e) => {
            diagnostics.push(format!("invalid attribute on <{name}>: {e}"));
            Vec::new()
        }
    };

    let id = elements.len();
    match open.last() {
        Some(&parent) => elements[parent].children.push(Content::Element(id)),
        None if id > 0 => diagnostics.push(format!(
            "extra content at the end of the document: <{name}> after the root element"
        )),
        None => {}
    }

    elements.push(Element {
        namespace,
        name,
        attributes,
        children: Vec::new(),
    });
    id
}

fn read_attributes(start: &BytesStart<'_>) -> Result<Vec<(String, String)>, String> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        attributes.push((key, value.into_owned()));
    }
    Ok(attributes)
}

fn push_text(elements: &mut [Element], open: &[usize], text: &str, diagnostics: &mut Vec<String>) {
    match open.last() {
        Some(&id) => elements[id].children.push(Content::Text(text.to_string())),
        None if !text.trim().is_empty() => {
            diagnostics.push("text content outside the root element".into());
        }
        None => {}
    }
}

/// Handle to one element of a [`Document`].
#[derive(Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    id: usize,
}

impl<'a> Node<'a> {
    fn element(&self) -> &'a Element {
        &self.doc.elements[self.id]
    }

    /// Local name without prefix.
    pub fn name(&self) -> &'a str {
        &self.element().name
    }

    /// Resolved namespace URI, `None` for unqualified elements.
    pub fn namespace(&self) -> Option<&'a str> {
        self.element().namespace.as_deref()
    }

    pub fn is(&self, namespace: Option<&str>, name: &str) -> bool {
        self.namespace() == namespace && self.name() == name
    }

    /// Value of an unprefixed attribute, matched by local name.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.element()
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + use<'a> {
        let doc = self.doc;
        self.element().children.iter().filter_map(move |c| match c {
            Content::Element(id) => Some(Node { doc, id: *id }),
            Content::Text(_) => None,
        })
    }

    /// Concatenated text of this element and all descendants (untrimmed).
    pub fn text(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<std::slice::Iter<'a, Content>> = vec![self.element().children.iter()];
        while let Some(iter) = stack.last_mut() {
            match iter.next() {
                Some(Content::Text(text)) => out.push_str(text),
                Some(Content::Element(id)) => {
                    stack.push(self.doc.elements[*id].children.iter());
                }
                None => {
                    stack.pop();
                }
            }
        }
        out
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("namespace", &self.namespace())
            .field("name", &self.name())
            .finish()
    }
}
