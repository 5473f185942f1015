//! Axis tick preview for a locus scale

use anyhow::Result;
use genoscale_core::{CoordinateSpace, LocusScale};
use serde::Serialize;
use std::sync::Arc;

use crate::commands::{parse_region, print_json};
use crate::config::Config;

#[derive(Debug, Serialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

pub fn execute(config: &Config, interval: Option<&str>, count: Option<usize>) -> Result<()> {
    let genome = Arc::new(config.load_genome()?);
    let count = count.unwrap_or(config.general.tick_count);
    let ticks = preview(&genome, interval, count)?;

    if config.general.json {
        return print_json(&ticks);
    }
    for tick in &ticks {
        println!("{}\t{}", tick.position, tick.label);
    }
    Ok(())
}

pub fn preview(genome: &Arc<CoordinateSpace>, interval: Option<&str>, count: usize) -> Result<Vec<Tick>> {
    let domain = match interval {
        Some(text) => {
            let [lo, hi] = parse_region(genome, text)?;
            [lo as f64, hi as f64]
        }
        None => genome.extent(),
    };

    let mut scale = LocusScale::new(Arc::clone(genome));
    scale.set_domain(domain);
    let formatter = scale.tick_format(count, None)?;
    log::debug!("Domain {:?}, label format {:?}", scale.domain(), formatter.number_format());

    Ok(scale
        .ticks(count)
        .into_iter()
        .map(|position| Tick {
            position,
            label: formatter.format(position),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::toy_genome;

    #[test]
    fn test_ticks_stay_in_domain() {
        let genome = Arc::new(toy_genome());
        let ticks = preview(&genome, Some("chr3"), 5).unwrap();
        assert!(!ticks.is_empty());
        for tick in &ticks {
            assert!(tick.position >= 1500.0 && tick.position < 3500.0);
        }
    }

    #[test]
    fn test_labels_are_chromosome_relative() {
        let genome = Arc::new(toy_genome());
        let ticks = preview(&genome, None, 10).unwrap();
        let chr3: Vec<_> = ticks.iter().filter(|t| t.position >= 1500.0).collect();
        assert!(!chr3.is_empty());
        for tick in chr3 {
            let relative = tick.position - 1500.0 + 1.0;
            assert_eq!(tick.label.replace(',', ""), relative.to_string());
        }
    }

    #[test]
    fn test_unknown_region_fails() {
        let genome = Arc::new(toy_genome());
        assert!(preview(&genome, Some("chrM"), 5).is_err());
    }
}
