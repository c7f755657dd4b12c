//! Run coordinator
//!
//! Discover every type in the metadata index, merge documentation for the
//! ones carrying a binding descriptor, then persist every loaded document.

use log::{debug, info};
use crate::config::RunConfig;
use crate::docs::{DirectoryDocProvider, DocStore, ExternalDocProvider, MergeEngine, MergeOptions, TypeReport};
use crate::error::DocFixResult;
use crate::metadata::MetadataIndex;

/// Totals for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Bound types whose documentation was loaded and merged
    pub types_processed: usize,
    /// Bound types skipped because their documentation is missing or unparsable
    pub types_skipped: usize,
    pub documents_saved: usize,
    pub merge: TypeReport,
}

#[derive(Debug)]
pub struct Coordinator<'a> {
    index: &'a MetadataIndex,
    store: DocStore,
    engine: MergeEngine,
    only_type: Option<String>,
}

impl<'a> Coordinator<'a> {
    pub fn new(index: &'a MetadataIndex, store: DocStore, engine: MergeEngine) -> Self {
        Self {
            index,
            store,
            engine,
            only_type: None,
        }
    }

    /// Process only the type with this full name
    pub fn with_type_filter(mut self, only_type: Option<String>) -> Self {
        self.only_type = only_type;
        self
    }

    pub fn store(&self) -> &DocStore {
        &self.store
    }

    pub fn run(&mut self) -> DocFixResult<RunReport> {
        let index = self.index;
        let mut report = RunReport::default();

        for type_info in index.types() {
            if let Some(only) = &self.only_type {
                if type_info.full_name() != *only {
                    continue;
                }
            }
            let Some(binding) = &type_info.binding else {
                continue;
            };

            let Some(doc) = self.store.get(type_info) else {
                report.types_skipped += 1;
                continue;
            };

            debug!("Processing {}", type_info.full_name());
            let type_report = self.engine.process_type(type_info, binding, doc, index);
            report.merge += type_report;
            report.types_processed += 1;
        }

        println!("saving");
        report.documents_saved = self.store.save_all()?;
        Ok(report)
    }
}

/// Build the store, merge engine and provider described by `config` and run
pub fn run_with_config(config: &RunConfig, index: &MetadataIndex) -> DocFixResult<RunReport> {
    let provider: Option<Box<dyn ExternalDocProvider>> = if config.merge_external {
        info!("Merging external documentation from {}", config.appledocs_dir.display());
        Some(Box::new(DirectoryDocProvider::new(config.appledocs_dir.clone())))
    } else {
        None
    };
    let engine = MergeEngine::new(
        MergeOptions {
            merge_external: config.merge_external,
            notification_type: config.notification_type.clone(),
        },
        provider,
    );
    let store = DocStore::new(config.language_root());

    Coordinator::new(index, store, engine)
        .with_type_filter(config.only_type.clone())
        .run()
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
