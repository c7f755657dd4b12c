//! External documentation fragments
//!
//! When external merging is enabled, notification fields get their prose
//! from an outside documentation set. The provider is a trait so the
//! merge engine does not care where fragments come from.

use std::fs;
use std::path::PathBuf;
use log::warn;
use crate::error::{DocFixError, DocFixResult, IoContext};
use crate::metadata::TypeInfo;
use crate::xml_tree::{XmlDocument, XmlElement, XmlNode};

/// Source of documentation fragments for exported symbols
pub trait ExternalDocProvider {
    /// Fragment documenting `symbol` on `type_info`, or `None` if there is none
    fn member_docs(&self, type_info: &TypeInfo, symbol: &str) -> Option<XmlElement>;

    /// Content nodes of the relevant section of a fragment
    fn extract_section(&self, fragment: XmlElement) -> Vec<XmlNode> {
        fragment.children
    }
}

/// Reads fragments from `<root>/<TypeName>/<symbol>.xml`.
///
/// A fragment's section is the first `section` element (or element with a
/// `section` class) in document order, or the whole root when there is none.
#[derive(Debug, Clone)]
pub struct DirectoryDocProvider {
    root: PathBuf,
}

impl DirectoryDocProvider {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn fragment_path(&self, type_info: &TypeInfo, symbol: &str) -> Option<PathBuf> {
        let safe = |s: &str| !s.is_empty() && !s.contains(['/', '\\']) && s != "..";
        if !safe(&type_info.name) || !safe(symbol) {
            return None;
        }
        Some(self.root.join(&type_info.name).join(format!("{}.xml", symbol)))
    }

    /// Read and parse a fragment.
    ///
    /// `Ok(None)` means there is no fragment for the symbol. A fragment that
    /// exists but cannot be read or parsed is an error.
    pub fn load_fragment(&self, type_info: &TypeInfo, symbol: &str) -> DocFixResult<Option<XmlElement>> {
        let Some(path) = self.fragment_path(type_info, symbol) else {
            return Ok(None);
        };
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_io_context(&format!("Failed to read fragment {}", path.display()))?;
        let doc = XmlDocument::parse(content.strip_prefix('\u{feff}').unwrap_or(&content))
            .map_err(|source| DocFixError::Xml { file: path, source })?;
        Ok(Some(doc.root))
    }
}

fn is_section(element: &XmlElement) -> bool {
    element.name == "section"
        || element
            .attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == "section"))
}

impl ExternalDocProvider for DirectoryDocProvider {
    fn member_docs(&self, type_info: &TypeInfo, symbol: &str) -> Option<XmlElement> {
        match self.load_fragment(type_info, symbol) {
            Ok(fragment) => fragment,
            Err(e) => {
                warn!("Unusable fragment for {} - {}: {}", type_info.name, symbol, e);
                None
            }
        }
    }

    fn extract_section(&self, fragment: XmlElement) -> Vec<XmlNode> {
        if let Some(section) = fragment.find(&is_section) {
            return section.children.clone();
        }
        fragment.children
    }
}
