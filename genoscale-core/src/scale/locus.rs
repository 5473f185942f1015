//! Locus scale: an index scale over a coordinate space, with one-based
//! chromosome-relative ticks and labels.

use std::sync::Arc;

use super::index::IndexScale;
use super::ticks::{tick_step, NumberFormat, TickFormatter};
use crate::error::{Result, ScaleError};
use crate::genome::CoordinateSpace;

#[derive(Debug, Clone)]
pub struct LocusScale {
    index: IndexScale,
    genome: Arc<CoordinateSpace>,
}

impl LocusScale {
    pub fn new(genome: Arc<CoordinateSpace>) -> Self {
        let mut index = IndexScale::new();
        index.set_numbering_offset(1.0);
        Self { index, genome }
    }

    pub fn genome(&self) -> &Arc<CoordinateSpace> {
        &self.genome
    }

    pub fn index(&self) -> &IndexScale {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut IndexScale {
        &mut self.index
    }

    pub fn domain(&self) -> [f64; 2] {
        self.index.domain()
    }

    pub fn set_domain(&mut self, domain: [f64; 2]) {
        self.index.set_domain(domain);
    }

    pub fn apply(&self, x: f64) -> f64 {
        self.index.apply(x)
    }

    pub fn invert(&self, y: f64) -> f64 {
        self.index.invert(y)
    }

    /// Ticks aligned to the start of each visible chromosome, so labels read
    /// as round chromosome-relative positions.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let [d0, d1] = self.index.domain();
        let total = self.genome.total_size() as f64;
        let offset = self.index.numbering_offset();

        let (Some(first), Some(last)) = (
            self.genome.to_chromosome(d0.max(0.0)),
            self.genome.to_chromosome(d1.min(total - 1.0)),
        ) else {
            return Vec::new();
        };

        let step = tick_step(d0, d1, count as f64).max(1.0);
        let mut ticks = Vec::new();

        for chrom in &self.genome.chromosomes()[first.index..=last.index] {
            let start = chrom.continuous_start as f64;
            let end = chrom.continuous_end as f64;
            let from = (start + step).max(d0 - ((d0 - start) % step));
            let to = (end - step / 4.0).min(d1 + 1.0);

            let mut pos = from;
            while pos <= to {
                let tick = pos - offset;
                if tick >= d0 && tick < d1 {
                    ticks.push(tick);
                }
                pos += step;
            }
        }

        ticks
    }

    pub fn tick_format(&self, count: usize, specifier: Option<&str>) -> Result<TickFormatter> {
        if let Some(specifier) = specifier {
            return Err(ScaleError::UnsupportedFormat(specifier.to_string()));
        }
        let format = if self.index.tick_step(count) < 1e6 {
            NumberFormat::Grouped
        } else {
            NumberFormat::Si { precision: 3 }
        };
        Ok(TickFormatter::new(format, self.index.numbering_offset())
            .with_genome(Arc::clone(&self.genome)))
    }
}

impl PartialEq for LocusScale {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && Arc::ptr_eq(&self.genome, &other.genome)
    }
}
