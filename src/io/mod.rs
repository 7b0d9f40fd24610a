//! Parameter input and path-length table output.

pub mod params;
pub mod table;

pub use params::{parse_parameter_csv, parse_parameter_json, read_parameters};
pub use table::{TableWriter, output_path, write_sweep};
