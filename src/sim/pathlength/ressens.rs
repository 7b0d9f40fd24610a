//! Resolution and sensitivity from path-length rows.
//!
//! Only the consumer contract lives here. The absorption model that turns path
//! lengths into resolution and sensitivity matrices has not been written yet.

use anyhow::Result;

use super::result::OutputRow;

/// Resolution and sensitivity per pigment row, in sweep row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionSensitivity {
    pub resolution: Vec<f64>,
    pub sensitivity: Vec<f64>,
}

/// Turns a finished sweep into resolution and sensitivity values.
pub trait ResolutionSensitivityEngine {
    fn consume(&mut self, rows: &[OutputRow]) -> Result<ResolutionSensitivity>;
}
