//! Metadata index produced by the binding generator
//!
//! The generator emits one JSON file describing every type it declared,
//! the members of each type, and the declarative attributes the
//! documentation fixer cares about: exported field symbols on members and
//! the binding descriptor (delegate-backed events) on types.

use std::collections::HashMap;
use std::path::Path;
use serde::Deserialize;
use crate::constants::VOID_TYPE;
use crate::error::{DocFixError, DocFixResult, IoContext, JsonContext};

/// Whether a member is property-like or method-like
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    #[default]
    Property,
    Method,
}

/// Native symbol a generated member wraps
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExportDescriptor {
    pub symbol_name: String,
}

/// A property or method declared on a type
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemberInfo {
    pub name: String,
    #[serde(default)]
    pub kind: MemberKind,
    /// Fully qualified return type; absent means no value
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub export: Option<ExportDescriptor>,
}

impl MemberInfo {
    /// True when the member produces a value (anything but void)
    pub fn returns_value(&self) -> bool {
        match self.return_type.as_deref() {
            None => false,
            Some(t) => !t.is_empty() && t != VOID_TYPE && t != "void",
        }
    }
}

/// Delegate-backed events a bound type exposes.
///
/// `events[i]` is the delegate-bearing type and `delegates[i]` the property
/// used to store it; the two lists pair up by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BindingDescriptor {
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub delegates: Vec<String>,
}

/// One delegate type paired with its backing property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventGroup<'a> {
    pub delegate_type: &'a str,
    pub property: &'a str,
}

impl BindingDescriptor {
    pub fn event_groups(&self) -> impl Iterator<Item = EventGroup<'_>> {
        self.events
            .iter()
            .zip(self.delegates.iter())
            .map(|(delegate_type, property)| EventGroup {
                delegate_type: delegate_type.as_str(),
                property: property.as_str(),
            })
    }
}

/// A type declared by the generator
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeInfo {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub members: Vec<MemberInfo>,
    #[serde(default)]
    pub binding: Option<BindingDescriptor>,
}

impl TypeInfo {
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    pub fn methods(&self) -> impl Iterator<Item = &MemberInfo> {
        self.members.iter().filter(|m| m.kind == MemberKind::Method)
    }

    pub fn exported_members(&self) -> impl Iterator<Item = (&MemberInfo, &ExportDescriptor)> {
        self.members
            .iter()
            .filter_map(|m| m.export.as_ref().map(|export| (m, export)))
    }
}

#[derive(Debug, Deserialize)]
struct MetadataFile {
    #[serde(default)]
    types: Vec<TypeInfo>,
}

/// All declared types, in declaration order, with lookup by full name
#[derive(Debug, Default)]
pub struct MetadataIndex {
    types: Vec<TypeInfo>,
    by_full_name: HashMap<String, usize>,
}

impl MetadataIndex {
    /// Load the index from the generator's JSON output
    pub fn load(path: &Path) -> DocFixResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_io_context(&format!("Failed to read metadata source {}", path.display()))?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> DocFixResult<Self> {
        let file: MetadataFile = serde_json::from_str(content)
            .with_json_context("Failed to parse metadata index")?;
        Self::from_types(file.types)
    }

    pub fn from_types(types: Vec<TypeInfo>) -> DocFixResult<Self> {
        let mut by_full_name = HashMap::new();
        for (i, t) in types.iter().enumerate() {
            if let Some(binding) = &t.binding {
                if binding.events.len() != binding.delegates.len() {
                    return Err(DocFixError::Metadata {
                        message: format!(
                            "binding descriptor of {} lists {} events but {} delegates",
                            t.full_name(),
                            binding.events.len(),
                            binding.delegates.len()
                        ),
                    });
                }
            }
            let full_name = t.full_name();
            if by_full_name.contains_key(&full_name) {
                log::warn!("Duplicate type {} in metadata, keeping the first one", full_name);
                continue;
            }
            by_full_name.insert(full_name, i);
        }
        Ok(Self { types, by_full_name })
    }

    pub fn types(&self) -> &[TypeInfo] {
        &self.types
    }

    pub fn lookup(&self, full_name: &str) -> Option<&TypeInfo> {
        self.by_full_name.get(full_name).map(|&i| &self.types[i])
    }
}
