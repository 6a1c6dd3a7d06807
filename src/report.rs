//! Batch processing diagnostics

/// Batch processing [Event]s
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Table is about to be processed (verbose mode only)
    Processing { table: String, column: String },
    /// Table was not found and has been skipped
    Skipped { table: String },
    /// Table has been processed and written back to the store.
    /// `rows` is the number of samples (time axis length for panels).
    Updated { table: String, rows: usize },
}

/// [Report] lists [Event]s that happened during a batch, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub events: Vec<Event>,
}

impl Report {
    pub(crate) fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Tables that were skipped (not found)
    pub fn skipped(&self) -> impl Iterator<Item = &str> + '_ {
        self.events.iter().filter_map(|e| match e {
            Event::Skipped { table } => Some(table.as_str()),
            _ => None,
        })
    }

    /// Tables that were written back to the store
    pub fn updated(&self) -> impl Iterator<Item = &str> + '_ {
        self.events.iter().filter_map(|e| match e {
            Event::Updated { table, .. } => Some(table.as_str()),
            _ => None,
        })
    }
}
