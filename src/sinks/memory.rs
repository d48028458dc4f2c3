//! In-memory sink
//!
//! Records every batch it receives. Clones share the same record, so one
//! clone can be handed to a writer and another kept for inspection.

use crate::core::{Result, Sink, DEFAULT_LINE_SEPARATOR};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct MemorySink {
    batches: Arc<Mutex<Vec<String>>>,
    separator: String,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_LINE_SEPARATOR)
    }

    /// Use `separator` when splitting batches back into lines
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            batches: Arc::new(Mutex::new(Vec::new())),
            separator: separator.into(),
        }
    }

    /// Every batch received so far, in delivery order
    pub fn batches(&self) -> Vec<String> {
        self.batches.lock().clone()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().len()
    }

    /// All received batches split back into lines
    pub fn lines(&self) -> Vec<String> {
        self.batches
            .lock()
            .iter()
            .flat_map(|batch| batch.split(self.separator.as_str()))
            .map(String::from)
            .collect()
    }

    pub fn clear(&self) {
        self.batches.lock().clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn write_batch(&mut self, batch: &str) -> Result<()> {
        self.batches.lock().push(batch.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_record() {
        let sink = MemorySink::new();
        let mut writer_side = sink.clone();

        writer_side.write_batch("a\nb").unwrap();
        writer_side.write_batch("c").unwrap();

        assert_eq!(sink.batch_count(), 2);
        assert_eq!(sink.lines(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_clear() {
        let mut sink = MemorySink::new();
        sink.write_batch("x").unwrap();
        sink.clear();
        assert!(sink.batches().is_empty());
    }
}
