//! Parameter files.
//!
//! CSV files hold one eye per line, ten comma-separated fields:
//!
//! ```text
//! species, rhabdom_length, rhabdom_width, eye_diameter, facet_width,
//! aperture_diameter, cytoplasm_ri, rhabdom_ri, blur_circle_extent, proximal_rhabdom_angle
//! ```
//!
//! Blank lines and lines starting with `#` are ignored, as is a header line
//! naming the columns. Files with a `.json` extension hold a JSON array of
//! [`EyeParameters`] objects (or a single object).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::eye::EyeParameters;

const NUM_FIELDS: usize = 10;

const NUMERIC_FIELDS: [&str; NUM_FIELDS - 1] = [
    "rhabdom length",
    "rhabdom width",
    "eye diameter",
    "facet width",
    "aperture diameter",
    "cytoplasm refractive index",
    "rhabdom refractive index",
    "blur circle extent",
    "proximal rhabdom angle",
];

/// Reads all parameter sets from a CSV or JSON file.
pub fn read_parameters(path: &Path) -> Result<Vec<EyeParameters>> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let params = if is_json {
        let file = File::open(path)
            .with_context(|| format!("Failed to open parameter file: {}", path.display()))?;
        parse_parameter_json(BufReader::new(file))
            .with_context(|| format!("Failed to parse parameter file: {}", path.display()))?
    } else {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read parameter file: {}", path.display()))?;
        parse_parameter_csv(&content)
            .with_context(|| format!("Failed to parse parameter file: {}", path.display()))?
    };

    if params.is_empty() {
        anyhow::bail!("No valid parameter sets found in {}", path.display());
    }
    info!(
        "Read {} parameter set(s) from {}",
        params.len(),
        path.display()
    );
    Ok(params)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonParameters {
    Many(Vec<EyeParameters>),
    One(EyeParameters),
}

/// Parses a JSON array of parameter sets, or a single set.
pub fn parse_parameter_json<R: std::io::Read>(reader: R) -> Result<Vec<EyeParameters>> {
    let parsed: JsonParameters = serde_json::from_reader(reader)?;
    Ok(match parsed {
        JsonParameters::Many(list) => list,
        JsonParameters::One(params) => vec![params],
    })
}

/// Parses CSV parameter lines.
///
/// Lines with the wrong number of fields are skipped with a warning. A numeric
/// field that does not parse is an error.
pub fn parse_parameter_csv(content: &str) -> Result<Vec<EyeParameters>> {
    let mut params = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != NUM_FIELDS {
            warn!(
                "Skipping line {line_no}: expected {NUM_FIELDS} fields, got {}",
                fields.len()
            );
            continue;
        }
        if is_header(&fields) {
            continue;
        }

        let mut values = [0.0; NUM_FIELDS - 1];
        for (value, (field, text)) in values
            .iter_mut()
            .zip(NUMERIC_FIELDS.into_iter().zip(&fields[1..]))
        {
            *value = text.parse().map_err(|_| ConfigError::InvalidField {
                line: line_no,
                field,
                value: text.to_string(),
            })?;
        }

        params.push(EyeParameters {
            species: fields[0].to_string(),
            rhabdom_length: values[0],
            rhabdom_width: values[1],
            eye_diameter: values[2],
            facet_width: values[3],
            aperture_diameter: values[4],
            cytoplasm_refractive_index: values[5],
            rhabdom_refractive_index: values[6],
            blur_circle_extent: values[7],
            proximal_rhabdom_angle: values[8],
        });
    }

    Ok(params)
}

fn is_header(fields: &[&str]) -> bool {
    fields[1].eq_ignore_ascii_case("rhabdom_length")
        || fields[1].eq_ignore_ascii_case("rhabdom length")
}
