use anyhow::Result;

use super::result::OutputRow;

/// Destination for finished pigment rows.
///
/// The sweep hands over each row once it is complete; implementations should
/// flush per row so that a long sweep never holds more than one row in memory.
pub trait RowSink {
    fn write_row(&mut self, row: &OutputRow) -> Result<()>;

    /// Called once after the last row.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Keeps every row in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub rows: Vec<OutputRow>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }
}

impl RowSink for MemorySink {
    fn write_row(&mut self, row: &OutputRow) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }
}
