//! Append-only in-memory log of analyzed articles.

use std::sync::Arc;

use newswire_core::AnalyzedArticle;
use parking_lot::RwLock;

/// All records produced since the last run start, in append order.
///
/// Records are stored behind `Arc` so broadcast and export reference the
/// same immutable instance the log owns. The single collection backs both
/// export and the clear-results operation.
#[derive(Debug, Default)]
pub struct ResultLog {
    records: RwLock<Vec<Arc<AnalyzedArticle>>>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns the shared handle to it.
    pub fn append(&self, record: AnalyzedArticle) -> Arc<AnalyzedArticle> {
        let record = Arc::new(record);
        self.records.write().push(record.clone());
        record
    }

    /// Snapshot of all records in append order.
    pub fn snapshot(&self) -> Vec<Arc<AnalyzedArticle>> {
        self.records.read().clone()
    }

    pub fn clear(&self) {
        self.records.write().clear();
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
