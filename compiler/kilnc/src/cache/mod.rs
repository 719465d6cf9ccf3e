//! Parsed documents keyed by file name.

use std::sync::Arc;

use kiln_ir::Document;
use rustc_hash::FxHashMap;

/// At most one document per file name; a later insert replaces the earlier.
#[derive(Clone, Debug, Default)]
pub struct DocumentCache {
    documents: FxHashMap<Arc<str>, Arc<Document>>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `document` under `name`, returning the document it replaces.
    pub fn insert(&mut self, name: Arc<str>, document: Arc<Document>) -> Option<Arc<Document>> {
        self.documents.insert(name, document)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Document>> {
        self.documents.get(name).cloned()
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<Document>> {
        self.documents.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
