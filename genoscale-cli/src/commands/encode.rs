//! Split-float vertex encoding of genomic positions

use anyhow::Result;
use genoscale_core::{CoordinateSpace, ScaleType};
use genoscale_render::Precision;
use serde::Serialize;

use crate::commands::{parse_position, print_json};
use crate::config::Config;
use crate::error::CliResult;

#[derive(Debug, Serialize, PartialEq)]
pub struct Encoded {
    pub input: String,
    pub continuous: f64,
    pub encoded: [f32; 2],
}

pub fn execute(config: &Config, positions: &[String]) -> Result<()> {
    let genome = config.load_genome()?;
    let precision = Precision::for_scale(ScaleType::Locus, genome.extent());
    log::info!("Encoding with {:?} for a {} bp assembly", precision, genome.total_size());

    let encoded = encode(&genome, precision, positions)?;
    if config.general.json {
        return print_json(&encoded);
    }
    for e in &encoded {
        println!("{}\t{}\t{}\t{}", e.input, e.continuous, e.encoded[0], e.encoded[1]);
    }
    Ok(())
}

pub fn encode(genome: &CoordinateSpace, precision: Precision, positions: &[String]) -> CliResult<Vec<Encoded>> {
    positions
        .iter()
        .map(|input| {
            let continuous = parse_position(genome, input)?;
            Ok(Encoded {
                input: input.clone(),
                continuous,
                encoded: precision.encode(continuous),
            })
        })
        .collect()
}
