mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use pathlength::io::{read_parameters, write_sweep};
use pathlength::{EyeParameters, PathlengthSweep, RowStatePolicy, SweepConfig};

use cli::{Args, CITATION, LICENSE};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.citation {
        println!("{CITATION}");
        return Ok(());
    }
    if args.license {
        println!("{LICENSE}");
        return Ok(());
    }

    let species = match &args.file {
        Some(path) => read_parameters(path)?,
        None => {
            let params = EyeParameters::preset(&args.preset)
                .with_context(|| format!("Unknown preset: {}", args.preset))?;
            vec![params]
        }
    };

    let mut config = SweepConfig::new();
    if args.reset_rows {
        config.row_state = RowStatePolicy::Reset;
    }

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            args.output_dir.display()
        )
    })?;

    for params in &species {
        let sweep = PathlengthSweep::new(params, config.clone())
            .with_context(|| format!("Invalid parameters for {}", params.species))?;
        let (path, summary) = write_sweep(&sweep, &args.output_dir)?;
        info!(
            "{}: {} rows written to {} ({} anomalies, {} truncated facets)",
            params.species,
            summary.rows,
            path.display(),
            summary.anomalies,
            summary.truncated_facets
        );
    }

    Ok(())
}
