//! Debug channel sink
//!
//! Writes each line of a batch to stderr behind a `[category]` tag, so
//! debug output from several writers can be told apart. The category is
//! shared and can be changed while the writer is running.

use crate::core::{Result, Sink};
use parking_lot::RwLock;
use std::io::{self, Write};
use std::sync::Arc;

#[cfg(feature = "console")]
use colored::Colorize;

pub struct DebugSink {
    category: Arc<RwLock<String>>,
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
    separator: String,
}

impl DebugSink {
    pub fn new(category: impl Into<String>) -> Self {
        Self::with_shared_category(Arc::new(RwLock::new(category.into())))
    }

    /// Tag lines with a category owned elsewhere
    pub fn with_shared_category(category: Arc<RwLock<String>>) -> Self {
        Self {
            category,
            use_colors: cfg!(feature = "console"),
            separator: crate::core::DEFAULT_LINE_SEPARATOR.to_string(),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Separator used to split batches back into lines
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Handle for changing the category after the sink moved into a writer
    pub fn category_handle(&self) -> Arc<RwLock<String>> {
        Arc::clone(&self.category)
    }

    pub fn category(&self) -> String {
        self.category.read().clone()
    }

    fn tag(&self) -> String {
        let tag = format!("[{}]", self.category.read());
        #[cfg(feature = "console")]
        {
            if self.use_colors {
                return tag.dimmed().to_string();
            }
        }
        tag
    }

    fn render(&self, batch: &str) -> String {
        let tag = self.tag();
        let mut output = String::with_capacity(batch.len() + tag.len() + 2);
        for line in batch.split(self.separator.as_str()) {
            output.push_str(&tag);
            output.push(' ');
            output.push_str(line);
            output.push('\n');
        }
        output
    }
}

impl Sink for DebugSink {
    fn write_batch(&mut self, batch: &str) -> Result<()> {
        let output = self.render(batch);
        io::stderr().lock().write_all(output.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "debug"
    }
}
