//! Conversion between continuous coordinates and loci

use anyhow::Result;
use genoscale_core::{CoordinateSpace, Locus};
use serde::Serialize;

use crate::commands::{parse_region, print_json};
use crate::config::Config;
use crate::error::{CliError, CliResult};

#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Located {
    Position { continuous: f64, locus: Locus, label: String },
    Interval { interval: [u64; 2], label: String },
}

pub fn execute(config: &Config, query: &str) -> Result<()> {
    let genome = config.load_genome()?;
    let located = locate(&genome, query)?;

    if config.general.json {
        return print_json(&located);
    }
    match located {
        Located::Position { continuous, label, .. } => println!("{}\t{}", continuous, label),
        Located::Interval { interval, label } => {
            println!("{}-{}\t{}", interval[0], interval[1], label)
        }
    }
    Ok(())
}

pub fn locate(genome: &CoordinateSpace, query: &str) -> CliResult<Located> {
    if let Ok(continuous) = query.trim().parse::<f64>() {
        let out_of_genome = || CliError::OutOfGenome {
            position: continuous,
            assembly: genome.name().to_string(),
        };
        let locus = genome.to_chromosomal(continuous).ok_or_else(out_of_genome)?;
        let label = genome.format_locus(continuous).ok_or_else(out_of_genome)?;
        return Ok(Located::Position {
            continuous,
            locus,
            label,
        });
    }

    let interval = parse_region(genome, query)?;
    let label = genome
        .format_interval([interval[0] as f64, interval[1] as f64])
        .unwrap_or_else(|| query.to_string());
    Ok(Located::Interval { interval, label })
}
