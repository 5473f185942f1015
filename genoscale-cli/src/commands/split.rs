//! Per-chromosome pieces of an interval

use anyhow::Result;
use genoscale_core::{CoordinateSpace, DiscreteChromosomeInterval};

use crate::commands::{parse_region, print_json};
use crate::config::Config;
use crate::error::{CliError, CliResult};

pub fn execute(config: &Config, interval: &str) -> Result<()> {
    let genome = config.load_genome()?;
    let pieces = split(&genome, interval)?;
    log::info!("{} spans {} chromosome(s)", interval, pieces.len());

    if config.general.json {
        return print_json(&pieces);
    }
    // BED-style, zero-based half-open
    for piece in &pieces {
        println!("{}\t{}\t{}", piece.chrom, piece.start_pos, piece.end_pos);
    }
    Ok(())
}

pub fn split(genome: &CoordinateSpace, text: &str) -> CliResult<Vec<DiscreteChromosomeInterval>> {
    let [lo, hi] = parse_region(genome, text)?;
    if lo == hi {
        return Ok(Vec::new());
    }
    let loci = genome
        .to_chromosomal_interval([lo as f64, hi as f64])
        .ok_or_else(|| CliError::invalid_interval(text, genome.name()))?;
    genome
        .to_discrete_chromosome_intervals(&loci)
        .map_err(|_| CliError::invalid_interval(text, genome.name()))
}
