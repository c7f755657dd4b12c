//! Documentation tree for a single type
//!
//! Members are addressed as `Type/Members/Member[@MemberName=...]`, taking
//! the first match. Each member node carries `ReturnValue/ReturnType` and
//! `Docs/summary` / `Docs/remarks`.

use crate::constants::{
    ATTR_MEMBER_NAME, EL_DOCS, EL_MEMBER, EL_MEMBERS, EL_REMARKS, EL_RETURN_TYPE, EL_RETURN_VALUE,
    EL_SUMMARY, EL_TYPE,
};
use crate::xml_tree::{XmlDocument, XmlElement, XmlNode, XmlTreeError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTree {
    doc: XmlDocument,
}

impl DocumentTree {
    pub fn parse(content: &str) -> Result<Self, XmlTreeError> {
        // Files written by other tools may carry a byte-order mark
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        Ok(Self {
            doc: XmlDocument::parse(content)?,
        })
    }

    pub fn to_xml_string(&self) -> String {
        self.doc.to_xml_string()
    }

    pub fn member(&self, name: &str) -> Option<&XmlElement> {
        if self.doc.root.name != EL_TYPE {
            return None;
        }
        self.doc
            .root
            .child(EL_MEMBERS)?
            .child_elements()
            .find(|m| m.name == EL_MEMBER && m.attribute(ATTR_MEMBER_NAME) == Some(name))
    }

    pub fn member_mut(&mut self, name: &str) -> Option<MemberDocs<'_>> {
        if self.doc.root.name != EL_TYPE {
            return None;
        }
        self.doc
            .root
            .child_mut(EL_MEMBERS)?
            .child_elements_mut()
            .find(|m| m.name == EL_MEMBER && m.attribute(ATTR_MEMBER_NAME) == Some(name))
            .map(|node| MemberDocs { node })
    }
}

/// Mutable view of one member's documentation node
#[derive(Debug)]
pub struct MemberDocs<'a> {
    node: &'a mut XmlElement,
}

impl MemberDocs<'_> {
    pub fn name(&self) -> &str {
        self.node.attribute(ATTR_MEMBER_NAME).unwrap_or_default()
    }

    pub fn return_type(&self) -> Option<String> {
        self.node
            .descend(&[EL_RETURN_VALUE, EL_RETURN_TYPE])
            .map(XmlElement::text)
    }

    /// Both `Docs/summary` and `Docs/remarks` are present
    pub fn has_doc_fields(&self) -> bool {
        self.node.descend(&[EL_DOCS, EL_SUMMARY]).is_some()
            && self.node.descend(&[EL_DOCS, EL_REMARKS]).is_some()
    }

    pub fn summary(&self) -> Option<&XmlElement> {
        self.node.descend(&[EL_DOCS, EL_SUMMARY])
    }

    pub fn remarks(&self) -> Option<&XmlElement> {
        self.node.descend(&[EL_DOCS, EL_REMARKS])
    }

    /// Overwrite summary and remarks with plain text.
    ///
    /// Returns false, leaving the node untouched, when either field is missing.
    pub fn set_docs_text(&mut self, summary: &str, remarks: &str) -> bool {
        if !self.has_doc_fields() {
            return false;
        }
        if let Some(el) = self.node.descend_mut(&[EL_DOCS, EL_SUMMARY]) {
            el.set_text(summary);
        }
        if let Some(el) = self.node.descend_mut(&[EL_DOCS, EL_REMARKS]) {
            el.set_text(remarks);
        }
        true
    }

    /// Put `content` into the summary, then move every node after the first
    /// `summary_nodes` into the remarks, replacing what the remarks held.
    ///
    /// Returns false, leaving the node untouched, when either field is missing.
    pub fn splice_content(&mut self, content: Vec<XmlNode>, summary_nodes: usize) -> bool {
        if !self.has_doc_fields() {
            return false;
        }
        let rest = match self.node.descend_mut(&[EL_DOCS, EL_SUMMARY]) {
            Some(summary) => {
                summary.clear();
                summary.append(content);
                summary.split_off(summary_nodes)
            }
            None => return false,
        };
        if let Some(remarks) = self.node.descend_mut(&[EL_DOCS, EL_REMARKS]) {
            remarks.clear();
            remarks.append(rest);
        }
        true
    }
}
