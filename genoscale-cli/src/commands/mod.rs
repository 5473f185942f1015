//! Command implementations for the GenoScale CLI

pub mod encode;
pub mod info;
pub mod locate;
pub mod split;
pub mod ticks;

use genoscale_core::{CoordinateSpace, GenomicPos};
use serde::Serialize;

use crate::error::{CliError, CliResult};

/// A position given either as a plain continuous number or as a locus.
pub(crate) fn parse_position(genome: &CoordinateSpace, text: &str) -> CliResult<f64> {
    match text.trim().parse::<f64>() {
        Ok(pos) => Ok(pos),
        Err(_) => parse_region(genome, text).map(|[lo, _]| lo as f64),
    }
}

pub(crate) fn parse_region(genome: &CoordinateSpace, text: &str) -> CliResult<[GenomicPos; 2]> {
    genome
        .parse_interval(text)
        .ok_or_else(|| CliError::invalid_interval(text, genome.name()))
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use genoscale_core::{ContigSize, CoordinateSpace};

    pub fn toy_genome() -> CoordinateSpace {
        CoordinateSpace::from_sizes(
            "toy",
            [
                ContigSize::new("chr1", 1000),
                ContigSize::new("chr2", 500),
                ContigSize::new("chr3", 2000),
            ],
        )
    }
}
