//! Path-length table output.
//!
//! Each pigment row is written as
//!
//! ```text
//! <tapetal>          (two decimals)
//! <shielding>        (two decimals)
//! <path>,<path>,...,998
//! 0,0,<path>,...,998
//! UNREAL ANGLE AT CORNEA
//! 999
//! ```
//!
//! Path lengths use six decimals, missed rhabdoms are written as `0`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::sim::pathlength::{
    FACET_END, OutputRow, PathlengthSweep, ROW_END, RowSink, SweepSummary, Token,
};

/// Writes rows in the text table format, flushing after each row.
pub struct TableWriter<W: Write> {
    writer: W,
}

impl TableWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RowSink for TableWriter<W> {
    fn write_row(&mut self, row: &OutputRow) -> Result<()> {
        let w = &mut self.writer;
        writeln!(w, "{:.2}", row.tapetal_pigment)?;
        writeln!(w, "{:.2}", row.shielding_pigment)?;
        for token in &row.tokens {
            match token {
                Token::Path(v) => write!(w, "{v:.6},")?,
                Token::Missed => write!(w, "0,")?,
                Token::FacetEnd => writeln!(w, "{FACET_END}")?,
                Token::Anomaly(a) => writeln!(w, "{}", a.marker())?,
                Token::RowEnd => writeln!(w, "{ROW_END}")?,
            }
        }
        w.flush().context("Failed to flush path-length row")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Output file name for one species.
pub fn output_path(dir: &Path, species: &str) -> PathBuf {
    dir.join(format!("{species}_pathlengths.csv"))
}

/// Runs `sweep` and writes its table into `dir`.
pub fn write_sweep(sweep: &PathlengthSweep, dir: &Path) -> Result<(PathBuf, SweepSummary)> {
    let path = output_path(dir, &sweep.params().species);
    let mut writer = TableWriter::create(&path)?;
    let summary = sweep
        .run(&mut writer)
        .with_context(|| format!("Failed to write path lengths to: {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok((path, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainAnomaly;
    use crate::eye::EyeParameters;
    use crate::sim::pathlength::{Pigments, SweepConfig};
    use tempfile::tempdir;

    fn render(row: &OutputRow) -> String {
        let mut writer = TableWriter::new(Vec::new());
        writer.write_row(row).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_single_facet_row() {
        let mut row = OutputRow::new(Pigments::new(0.0, 0.0));
        row.push(Token::Path(84.0));
        row.push(Token::FacetEnd);
        assert_eq!(render(&row), "0.00\n0.00\n84.000000,998\n");
    }

    #[test]
    fn test_missed_anomaly_and_row_end() {
        let mut row = OutputRow::new(Pigments::new(8.4, 16.8));
        row.push(Token::Path(84.0));
        row.push(Token::FacetEnd);
        row.push(Token::Anomaly(DomainAnomaly::UnrealCorneaAngle {
            facet: 1,
            inter_ommatidial_angle: 60.0,
        }));
        row.push(Token::Missed);
        row.push(Token::Missed);
        row.push(Token::Path(19.123456789));
        row.push(Token::FacetEnd);
        row.push(Token::RowEnd);

        assert_eq!(
            render(&row),
            "8.40\n16.80\n84.000000,998\nUNREAL ANGLE AT CORNEA\n0,0,19.123457,998\n999\n"
        );
    }

    #[test]
    fn test_output_path() {
        let path = output_path(Path::new("out"), "astacodes");
        assert_eq!(path, Path::new("out").join("astacodes_pathlengths.csv"));
    }

    #[test]
    fn test_write_sweep_to_file() -> Result<()> {
        let dir = tempdir()?;
        let sweep = PathlengthSweep::new(&EyeParameters::astacodes(), SweepConfig::default())?;
        let (path, summary) = write_sweep(&sweep, dir.path())?;

        assert!(path.ends_with("astacodes_pathlengths.csv"));
        assert_eq!(summary.rows, 121);

        let content = std::fs::read_to_string(&path)?;
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("0.00"));
        assert_eq!(lines.next(), Some("0.00"));
        assert_eq!(lines.next(), Some("84.000000,998"));
        assert_eq!(content.lines().filter(|l| *l == "999").count(), 121);
        assert!(content.ends_with("999\n"));

        // The outermost facet leaves the valid exit-angle range
        let markers = content
            .lines()
            .filter(|l| *l == "EXIT ANGLE OUT OF RANGE")
            .count();
        assert!(markers > 0);
        assert_eq!(markers, summary.anomalies);
        Ok(())
    }

    #[test]
    fn test_species_cannot_escape_output_dir() {
        let params = EyeParameters {
            species: "../escaped".to_string(),
            ..EyeParameters::astacodes()
        };
        assert!(PathlengthSweep::new(&params, SweepConfig::default()).is_err());
    }

    #[test]
    fn test_write_sweep_missing_dir() {
        let sweep = PathlengthSweep::new(&EyeParameters::astacodes(), SweepConfig::default()).unwrap();
        let err = write_sweep(&sweep, Path::new("/nonexistent/dir/for/output")).unwrap_err();
        assert!(err.to_string().contains("astacodes_pathlengths.csv"));
    }
}
