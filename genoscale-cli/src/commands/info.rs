//! Chromosome listing

use anyhow::Result;
use genoscale_core::genome::Chromosome;
use serde::Serialize;

use crate::commands::print_json;
use crate::config::Config;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssemblyInfo<'a> {
    name: &'a str,
    total_size: u64,
    chromosomes: &'a [Chromosome],
}

pub fn execute(config: &Config) -> Result<()> {
    let genome = config.load_genome()?;
    let info = AssemblyInfo {
        name: genome.name(),
        total_size: genome.total_size(),
        chromosomes: genome.chromosomes(),
    };

    if config.general.json {
        return print_json(&info);
    }

    println!("Assembly {} ({} bp)", info.name, info.total_size);
    println!("{:<16} {:>12} {:>14} {:>14}", "name", "size", "start", "end");
    for chrom in info.chromosomes {
        println!(
            "{:<16} {:>12} {:>14} {:>14}",
            chrom.name, chrom.size, chrom.continuous_start, chrom.continuous_end
        );
    }
    Ok(())
}
