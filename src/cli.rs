use std::path::PathBuf;

use clap::Parser;

pub const CITATION: &str = "\
Gaten, E., Moss, S., Johnson, M. 2013. The Reniform Reflecting Superposition Compound Eyes of Nephrops Norvegicus:
Optics, Susceptibility to Light-Induced Damage, Electrophysiology and a Ray Tracing Model. In: M. L. Johnson and M. P. Johnson, ed(s).
Advances in Marine Biology: The Ecology and Biology of Nephrops norvegicus. Oxford: Academic Press, 107:148.";

pub const LICENSE: &str = "\
pathlength - calculates path lengths of light in reflecting superposition compound eyes.

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Parameter file (CSV, or JSON with a .json extension)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Built-in species used when no parameter file is given
    #[arg(long, default_value = "astacodes")]
    pub preset: String,

    /// Directory for the <species>_pathlengths.csv tables
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Start every pigment row with a fresh exit angle and adjustment factor
    #[arg(long, default_value_t = false)]
    pub reset_rows: bool,

    /// Print citation information and exit
    #[arg(short, long, default_value_t = false)]
    pub citation: bool,

    /// Print license information and exit
    #[arg(long, default_value_t = false)]
    pub license: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["pathlength"]).unwrap();
        assert_eq!(args.file, None);
        assert_eq!(args.preset, "astacodes");
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert!(!args.reset_rows);
        assert!(!args.citation);
        assert!(!args.license);
    }

    #[test]
    fn test_file_and_output_dir() {
        let args =
            Args::try_parse_from(["pathlength", "-f", "eyes.csv", "-o", "out", "--reset-rows"])
                .unwrap();
        assert_eq!(args.file, Some(PathBuf::from("eyes.csv")));
        assert_eq!(args.output_dir, PathBuf::from("out"));
        assert!(args.reset_rows);
    }

    #[test]
    fn test_unknown_flag() {
        assert!(Args::try_parse_from(["pathlength", "--graphics"]).is_err());
    }
}
