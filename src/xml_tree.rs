//! Owned, mutable XML tree built from quick-xml events
//!
//! Documentation files are small, so they are read completely into an
//! element tree, edited in place and written back. Writing is stable: a
//! tree that was parsed from the writer's own output serializes to the same
//! bytes again.
//!
//! Whitespace-only text that contains a line break is indentation and is
//! dropped while parsing. Elements whose children include text are written
//! inline, everything else is indented with two spaces per level.

use std::borrow::Cow;
use quick_xml::escape::{escape, partial_escape, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Errors that can occur while reading an XML document
#[derive(Error, Debug)]
pub enum XmlTreeError {
    /// The underlying reader rejected the input
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),
    /// UTF-8 string conversion failed
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Well-formedness problems the reader does not report itself
    #[error("{0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    CData(String),
    Comment(String),
}

impl XmlNode {
    pub fn text(text: impl Into<String>) -> Self {
        XmlNode::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(e) => Some(e),
            _ => None,
        }
    }

    fn is_textual(&self) -> bool {
        matches!(self, XmlNode::Text(_) | XmlNode::CData(_))
    }

    fn is_indentation(&self) -> bool {
        match self {
            XmlNode::Text(t) => t.contains('\n') && t.trim().is_empty(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|n| match n {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|e| e.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.child_elements_mut().find(|e| e.name == name)
    }

    /// Follow a chain of first-matching child names
    pub fn descend(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter().try_fold(self, |el, name| el.child(name))
    }

    pub fn descend_mut(&mut self, path: &[&str]) -> Option<&mut XmlElement> {
        let mut current = self;
        for name in path {
            current = current.child_mut(name)?;
        }
        Some(current)
    }

    /// First element in document order (self included) matching `pred`
    pub fn find(&self, pred: &dyn Fn(&XmlElement) -> bool) -> Option<&XmlElement> {
        if pred(self) {
            return Some(self);
        }
        self.child_elements().find_map(|c| c.find(pred))
    }

    /// Concatenated text of all descendants
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(t) | XmlNode::CData(t) => out.push_str(t),
                XmlNode::Element(e) => e.collect_text(out),
                XmlNode::Comment(_) => {}
            }
        }
    }

    /// Replace all content with a single text node
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children.push(XmlNode::text(text));
        }
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn append<I: IntoIterator<Item = XmlNode>>(&mut self, nodes: I) {
        for node in nodes {
            self.push_node(node);
        }
    }

    /// Detach and return every child from index `at` onwards
    pub fn split_off(&mut self, at: usize) -> Vec<XmlNode> {
        if at >= self.children.len() {
            return Vec::new();
        }
        self.children.split_off(at)
    }

    fn push_node(&mut self, node: XmlNode) {
        // Adjacent text merges, as it would after a reload
        if let XmlNode::Text(text) = &node {
            if text.is_empty() {
                return;
            }
            if let Some(XmlNode::Text(last)) = self.children.last_mut() {
                last.push_str(text);
                return;
            }
        }
        self.children.push(node);
    }
}

/// A parsed XML file: leading comments plus the root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub prolog: Vec<XmlNode>,
    pub root: XmlElement,
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        Self {
            prolog: Vec::new(),
            root,
        }
    }

    pub fn parse(content: &str) -> Result<Self, XmlTreeError> {
        let mut reader = Reader::from_str(content);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut prolog = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => stack.push(element_from_start(&e)?),
                Event::Empty(e) => {
                    let element = element_from_start(&e)?;
                    attach(&mut stack, &mut root, &mut prolog, XmlNode::Element(element))?;
                }
                Event::End(_) => {
                    let mut element = stack
                        .pop()
                        .ok_or_else(|| XmlTreeError::Malformed("unexpected closing tag".to_string()))?;
                    element.children.retain(|n| !n.is_indentation());
                    attach(&mut stack, &mut root, &mut prolog, XmlNode::Element(element))?;
                }
                Event::Text(e) => {
                    let raw = std::str::from_utf8(&e)?;
                    let text = unescape(raw).map_err(|err| XmlTreeError::Malformed(err.to_string()))?;
                    if let Some(parent) = stack.last_mut() {
                        parent.push_node(XmlNode::Text(text.into_owned()));
                    }
                }
                Event::GeneralRef(e) => {
                    let name = std::str::from_utf8(&e)?;
                    let resolved = resolve_reference(name)?;
                    if let Some(parent) = stack.last_mut() {
                        parent.push_node(XmlNode::Text(resolved.into_owned()));
                    }
                }
                Event::CData(e) => {
                    let text = std::str::from_utf8(&e)?.to_string();
                    if let Some(parent) = stack.last_mut() {
                        parent.push_node(XmlNode::CData(text));
                    }
                }
                Event::Comment(e) => {
                    let text = std::str::from_utf8(&e)?.to_string();
                    attach(&mut stack, &mut root, &mut prolog, XmlNode::Comment(text))?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(XmlTreeError::Malformed(format!("unclosed element <{}>", open.name)));
        }
        let root = root.ok_or_else(|| XmlTreeError::Malformed("document has no root element".to_string()))?;
        Ok(Self { prolog, root })
    }

    /// Serialize without an XML declaration, ending with a newline
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        for node in &self.prolog {
            write_node(&mut out, node, 0, true);
            out.push('\n');
        }
        write_element(&mut out, &self.root, 0, true);
        out.push('\n');
        out
    }
}

fn element_from_start(start: &BytesStart) -> Result<XmlElement, XmlTreeError> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    let mut element = XmlElement::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlTreeError::Malformed(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let raw = std::str::from_utf8(&attr.value)?;
        let value = unescape(raw).map_err(|e| XmlTreeError::Malformed(e.to_string()))?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    prolog: &mut Vec<XmlNode>,
    node: XmlNode,
) -> Result<(), XmlTreeError> {
    if let Some(parent) = stack.last_mut() {
        parent.push_node(node);
        return Ok(());
    }
    match node {
        XmlNode::Element(element) => {
            if root.is_some() {
                return Err(XmlTreeError::Malformed("more than one root element".to_string()));
            }
            *root = Some(element);
        }
        // Comments after the root are dropped along with the declaration
        other if root.is_none() => prolog.push(other),
        _ => {}
    }
    Ok(())
}

fn resolve_reference(name: &str) -> Result<Cow<'static, str>, XmlTreeError> {
    let predefined = match name {
        "lt" => Some("<"),
        "gt" => Some(">"),
        "amp" => Some("&"),
        "apos" => Some("'"),
        "quot" => Some("\""),
        _ => None,
    };
    if let Some(s) = predefined {
        return Ok(Cow::Borrowed(s));
    }

    let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = name.strip_prefix('#') {
        dec.parse::<u32>().ok()
    } else {
        None
    };
    code.and_then(char::from_u32)
        .map(|c| Cow::Owned(c.to_string()))
        .ok_or_else(|| XmlTreeError::Malformed(format!("unknown entity reference &{};", name)))
}

fn push_indent(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_node(out: &mut String, node: &XmlNode, depth: usize, indent: bool) {
    match node {
        XmlNode::Element(e) => write_element(out, e, depth, indent),
        XmlNode::Text(t) => out.push_str(&partial_escape(t.as_str())),
        XmlNode::CData(t) => {
            out.push_str("<![CDATA[");
            out.push_str(t);
            out.push_str("]]>");
        }
        XmlNode::Comment(t) => {
            out.push_str("<!--");
            out.push_str(t);
            out.push_str("-->");
        }
    }
}

fn write_element(out: &mut String, element: &XmlElement, depth: usize, indent: bool) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }
    if element.children.is_empty() {
        out.push_str(" />");
        return;
    }
    out.push('>');

    // Once text shows up, the rest of the subtree is written as-is
    let indent_children = indent && !element.children.iter().any(XmlNode::is_textual);
    for child in &element.children {
        if indent_children {
            push_indent(out, depth + 1);
        }
        write_node(out, child, depth + 1, indent_children);
    }
    if indent_children {
        push_indent(out, depth);
    }

    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

#[cfg(test)]
#[path = "xml_tree_tests.rs"]
mod tests;
