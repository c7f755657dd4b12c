//! Merge engine
//!
//! For one bound type, runs two independent passes over its documentation:
//!
//! - exported fields: notification-name fields optionally get their summary
//!   and remarks from an external fragment
//! - events: every method of every delegate type listed in the binding
//!   descriptor gets fixed summary and remarks text naming the backing
//!   property
//!
//! A member that has no node in the documentation is reported as stale and
//! skipped. Nothing here fails the run.

use log::{debug, warn};
use crate::constants::{
    delegate_remarks, event_remarks, DEFAULT_NOTIFICATION_TYPE, DELEGATE_SUMMARY, EVENT_SUMMARY,
    NOTIFICATION_SUFFIX, SUMMARY_NODE_COUNT,
};
use crate::docs::document::DocumentTree;
use crate::docs::external::ExternalDocProvider;
use crate::metadata::{BindingDescriptor, EventGroup, ExportDescriptor, MemberInfo, MetadataIndex, TypeInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Import external fragments for notification fields
    pub merge_external: bool,
    /// Return type identifying notification-name fields
    pub notification_type: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            merge_external: false,
            notification_type: DEFAULT_NOTIFICATION_TYPE.to_string(),
        }
    }
}

/// What happened while merging one type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeReport {
    /// Fields whose summary/remarks came from an external fragment
    pub fields_merged: usize,
    /// Delegate methods that got event or delegate prose
    pub events_documented: usize,
    /// Members present in metadata but not in the documentation
    pub stale_members: usize,
    /// Notification fields with no external fragment
    pub external_failures: usize,
    /// Event groups whose delegate type is not in the metadata index
    pub unresolved_delegates: usize,
}

impl std::ops::AddAssign for TypeReport {
    fn add_assign(&mut self, other: TypeReport) {
        self.fields_merged += other.fields_merged;
        self.events_documented += other.events_documented;
        self.stale_members += other.stale_members;
        self.external_failures += other.external_failures;
        self.unresolved_delegates += other.unresolved_delegates;
    }
}

pub struct MergeEngine {
    options: MergeOptions,
    provider: Option<Box<dyn ExternalDocProvider>>,
}

impl std::fmt::Debug for MergeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeEngine")
            .field("options", &self.options)
            .field("provider", &self.provider.as_ref().map(|_| "<ExternalDocProvider>"))
            .finish()
    }
}

impl MergeEngine {
    pub fn new(options: MergeOptions, provider: Option<Box<dyn ExternalDocProvider>>) -> Self {
        Self { options, provider }
    }

    /// Run both passes for a type carrying a binding descriptor
    pub fn process_type(
        &self,
        type_info: &TypeInfo,
        binding: &BindingDescriptor,
        doc: &mut DocumentTree,
        index: &MetadataIndex,
    ) -> TypeReport {
        let mut report = TypeReport::default();

        for (member, export) in type_info.exported_members() {
            self.process_field(type_info, doc, member, export, &mut report);
        }

        for group in binding.event_groups() {
            self.populate_events(doc, group, index, &mut report);
        }

        report
    }

    fn process_field(
        &self,
        type_info: &TypeInfo,
        doc: &mut DocumentTree,
        member: &MemberInfo,
        export: &ExportDescriptor,
        report: &mut TypeReport,
    ) {
        let Some(mut node) = doc.member_mut(&member.name) else {
            warn!(
                "{} document is not up-to-date with the latest assembly (member {})",
                type_info.full_name(),
                member.name
            );
            report.stale_members += 1;
            return;
        };

        if !self.options.merge_external {
            return;
        }

        let symbol = export.symbol_name.as_str();
        let is_notification = node.return_type().as_deref() == Some(self.options.notification_type.as_str())
            && symbol.ends_with(NOTIFICATION_SUFFIX);
        if !is_notification {
            return;
        }

        if !node.has_doc_fields() {
            warn!(
                "{} document is not up-to-date with the latest assembly (member {} has no summary/remarks)",
                type_info.full_name(),
                member.name
            );
            report.stale_members += 1;
            return;
        }

        let fragment = self
            .provider
            .as_ref()
            .and_then(|provider| provider.member_docs(type_info, symbol).map(|f| (provider, f)));
        let Some((provider, fragment)) = fragment else {
            warn!("Failed to load docs for {} - {}", type_info.name, symbol);
            report.external_failures += 1;
            return;
        };

        let section = provider.extract_section(fragment);
        debug!(
            "Merging {} external nodes into {}.{}",
            section.len(),
            type_info.full_name(),
            member.name
        );
        node.splice_content(section, SUMMARY_NODE_COUNT);
        report.fields_merged += 1;
    }

    fn populate_events(
        &self,
        doc: &mut DocumentTree,
        group: EventGroup<'_>,
        index: &MetadataIndex,
        report: &mut TypeReport,
    ) {
        let Some(delegate_type) = index.lookup(group.delegate_type) else {
            warn!(
                "Delegate type {} (property {}) is not in the metadata, skipping its events",
                group.delegate_type, group.property
            );
            report.unresolved_delegates += 1;
            return;
        };

        for method in delegate_type.methods() {
            let Some(mut node) = doc.member_mut(&method.name) else {
                warn!(
                    "Documentation not up to date for {}, member {} was not found",
                    group.delegate_type, method.name
                );
                report.stale_members += 1;
                continue;
            };

            let written = if method.returns_value() {
                node.set_docs_text(DELEGATE_SUMMARY, &delegate_remarks(group.property))
            } else {
                node.set_docs_text(EVENT_SUMMARY, &event_remarks(group.property))
            };

            if written {
                report.events_documented += 1;
            } else {
                warn!(
                    "Documentation not up to date for {}, member {} has no summary/remarks",
                    group.delegate_type, method.name
                );
                report.stale_members += 1;
            }
        }
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
