//! Documentation store
//!
//! Loads each type's documentation file at most once per run, hands out
//! the cached tree for editing, and writes every loaded tree back at the
//! end. Files that were never loaded are never touched.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, warn};
use crate::docs::document::DocumentTree;
use crate::error::{DocFixError, DocFixResult, IoContext};
use crate::metadata::TypeInfo;

#[derive(Debug)]
struct LoadedDoc {
    path: PathBuf,
    tree: DocumentTree,
}

/// Load-once cache of documentation trees keyed by type full name
#[derive(Debug)]
pub struct DocStore {
    /// The language directory (`<root>/en`)
    docs_root: PathBuf,
    docs: BTreeMap<String, LoadedDoc>,
}

impl DocStore {
    pub fn new(docs_root: PathBuf) -> Self {
        Self {
            docs_root,
            docs: BTreeMap::new(),
        }
    }

    /// `<docs_root>/<Namespace>/<Name>.xml`
    pub fn path_for(&self, type_info: &TypeInfo) -> PathBuf {
        self.docs_root
            .join(&type_info.namespace)
            .join(format!("{}.xml", type_info.name))
    }

    /// Get the documentation tree for a type, loading it on first use.
    ///
    /// Returns `None` when the file does not exist yet or cannot be parsed.
    /// Neither case is cached, and neither creates a file.
    pub fn get(&mut self, type_info: &TypeInfo) -> Option<&mut DocumentTree> {
        let key = type_info.full_name();
        if !self.docs.contains_key(&key) {
            let path = self.path_for(type_info);
            if !path.is_file() {
                warn!("Doc regeneration pending for type: {}", key);
                return None;
            }
            match load_tree(&path) {
                Ok(tree) => {
                    debug!("Loaded documentation for {} from {}", key, path.display());
                    self.docs.insert(key.clone(), LoadedDoc { path, tree });
                }
                Err(e) => {
                    warn!("Failure while loading {}: {}", path.display(), e);
                    return None;
                }
            }
        }
        self.docs.get_mut(&key).map(|loaded| &mut loaded.tree)
    }

    pub fn is_loaded(&self, full_name: &str) -> bool {
        self.docs.contains_key(full_name)
    }

    pub fn loaded_types(&self) -> impl Iterator<Item = &str> {
        self.docs.keys().map(String::as_str)
    }

    /// Write every loaded tree back to the file it came from.
    ///
    /// Returns the number of files written.
    pub fn save_all(&self) -> DocFixResult<usize> {
        for (full_name, loaded) in &self.docs {
            fs::write(&loaded.path, loaded.tree.to_xml_string()).with_io_context(&format!(
                "Failed to save documentation for {} to {}",
                full_name,
                loaded.path.display()
            ))?;
            debug!("Saved {}", loaded.path.display());
        }
        Ok(self.docs.len())
    }
}

fn load_tree(path: &Path) -> DocFixResult<DocumentTree> {
    let content = fs::read_to_string(path)
        .with_io_context(&format!("Failed to read {}", path.display()))?;
    DocumentTree::parse(&content).map_err(|source| DocFixError::Xml {
        file: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
