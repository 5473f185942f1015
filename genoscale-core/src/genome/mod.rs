//! Coordinate spaces: chromosomes laid end to end on a single continuous axis.
//!
//! A [`CoordinateSpace`] is built once from a list of chromosome sizes and is
//! immutable afterwards. Loci (`chrom`, `pos`) are the complex representation
//! of a position, plain numbers the continuous one.

pub mod interval;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::GenomeError;
use crate::types::{DiscreteChromosomeInterval, GenomicPos, Locus, LocusBound};

pub use interval::{format_range, parse_interval};

pub type GenomeResult<T> = std::result::Result<T, GenomeError>;

/// Name and length of a single chromosome, as listed in a sizes table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContigSize {
    pub name: String,
    pub size: GenomicPos,
}

impl ContigSize {
    pub fn new(name: impl Into<String>, size: GenomicPos) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chromosome {
    pub name: String,
    pub size: GenomicPos,
    /// Zero-based position in declaration order
    pub index: usize,
    /// One-based position in declaration order
    pub number: u32,
    pub continuous_start: GenomicPos,
    /// Exclusive
    pub continuous_end: GenomicPos,
    /// Alternating flag for banded backgrounds, set on the 1st, 3rd, ... chromosome
    pub odd: bool,
}

impl Chromosome {
    pub fn contains(&self, continuous_pos: GenomicPos) -> bool {
        continuous_pos >= self.continuous_start && continuous_pos < self.continuous_end
    }
}

/// Key accepted by [`CoordinateSpace::to_continuous`]: an alias or a one-based number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromKey<'a> {
    Name(&'a str),
    Number(u32),
}

impl<'a> From<&'a str> for ChromKey<'a> {
    fn from(name: &'a str) -> Self {
        ChromKey::Name(name)
    }
}

impl<'a> From<&'a String> for ChromKey<'a> {
    fn from(name: &'a String) -> Self {
        ChromKey::Name(name.as_str())
    }
}

impl From<u32> for ChromKey<'_> {
    fn from(number: u32) -> Self {
        ChromKey::Number(number)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoordinateSpace {
    name: String,
    chromosomes: Vec<Chromosome>,
    aliases: HashMap<String, usize>,
    total_size: GenomicPos,
}

impl CoordinateSpace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn from_sizes<I>(name: impl Into<String>, sizes: I) -> Self
    where
        I: IntoIterator<Item = ContigSize>,
    {
        let mut space = Self::new(name);
        space.set_chromosomes(sizes);
        space
    }

    /// Lays out the chromosomes contiguously in the given order and records
    /// their aliases. Replaces any previous layout. Offsets saturate at the
    /// end of the axis; sizes files are rejected before that point.
    pub fn set_chromosomes<I>(&mut self, sizes: I)
    where
        I: IntoIterator<Item = ContigSize>,
    {
        self.chromosomes.clear();
        self.aliases.clear();

        let mut offset: GenomicPos = 0;
        for (index, contig) in sizes.into_iter().enumerate() {
            let number = index as u32 + 1;
            self.chromosomes.push(Chromosome {
                name: contig.name,
                size: contig.size,
                index,
                number,
                continuous_start: offset,
                continuous_end: offset.saturating_add(contig.size),
                odd: index % 2 == 0,
            });
            offset = offset.saturating_add(contig.size);
        }
        self.total_size = offset;

        for chrom in &self.chromosomes {
            let plain = strip_chr_prefix(&chrom.name);
            let aliases = [
                format!("chr{}", plain),
                format!("CHR{}", plain),
                format!("Chr{}", plain),
                chrom.number.to_string(),
                plain.to_string(),
            ];
            for alias in aliases {
                self.aliases.entry(alias).or_insert(chrom.index);
            }
        }
        // Exact names always win over aliases of other chromosomes
        for chrom in &self.chromosomes {
            self.aliases.insert(chrom.name.clone(), chrom.index);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn total_size(&self) -> GenomicPos {
        self.total_size
    }

    pub fn extent(&self) -> [f64; 2] {
        [0.0, self.total_size as f64]
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn has_chr_prefix(&self) -> bool {
        self.chromosomes.iter().any(|c| c.name.starts_with("chr"))
    }

    /// Looks up a chromosome by its name or any of its aliases.
    pub fn chromosome(&self, alias: &str) -> Option<&Chromosome> {
        self.aliases.get(alias).map(|&i| &self.chromosomes[i])
    }

    fn resolve(&self, key: ChromKey<'_>) -> GenomeResult<&Chromosome> {
        match key {
            ChromKey::Name(name) => self
                .chromosome(name)
                .ok_or_else(|| GenomeError::UnknownChromosome(name.to_string())),
            ChromKey::Number(number) => number
                .checked_sub(1)
                .and_then(|i| self.chromosomes.get(i as usize))
                .ok_or_else(|| GenomeError::UnknownChromosome(number.to_string())),
        }
    }

    /// Maps a locus to the continuous axis. Positions are not clamped to the
    /// chromosome.
    pub fn to_continuous<'a>(
        &self,
        key: impl Into<ChromKey<'a>>,
        pos: GenomicPos,
    ) -> GenomeResult<GenomicPos> {
        let chrom = self.resolve(key.into())?;
        chrom
            .continuous_start
            .checked_add(pos)
            .ok_or_else(|| GenomeError::PositionOverflow {
                chrom: chrom.name.clone(),
                pos,
            })
    }

    /// Returns the chromosome containing the continuous position. The total
    /// size itself belongs to the last chromosome.
    pub fn to_chromosome(&self, continuous_pos: f64) -> Option<&Chromosome> {
        if continuous_pos.is_nan() || continuous_pos < 0.0 || continuous_pos > self.total_size as f64 {
            return None;
        }
        let pos = continuous_pos.floor() as GenomicPos;
        let i = self
            .chromosomes
            .partition_point(|c| c.continuous_start <= pos);
        i.checked_sub(1).map(|i| &self.chromosomes[i])
    }

    pub fn to_chromosomal(&self, continuous_pos: f64) -> Option<Locus> {
        let chrom = self.to_chromosome(continuous_pos)?;
        Some(Locus {
            chrom: chrom.name.clone(),
            pos: continuous_pos.floor() as GenomicPos - chrom.continuous_start,
        })
    }

    /// Converts a half-open continuous interval into loci. The lower end is
    /// rounded, the upper end is treated as exclusive.
    pub fn to_chromosomal_interval(&self, interval: [f64; 2]) -> Option<[Locus; 2]> {
        let begin = self.to_chromosomal(interval[0] + 0.5)?;
        let mut end = self.to_chromosomal(interval[1] - 0.5)?;
        end.pos += 1;
        Some([begin, end])
    }

    /// Converts a pair of locus bounds into a continuous interval. With a
    /// single bound the whole chromosome is covered.
    pub fn to_continuous_interval(
        &self,
        start: &LocusBound,
        end: Option<&LocusBound>,
    ) -> GenomeResult<[GenomicPos; 2]> {
        let end = end.unwrap_or(start);
        let lo = self.to_continuous(&start.chrom, start.pos.unwrap_or(0))?;
        let end_pos = match end.pos {
            Some(pos) => pos,
            None => self.resolve(ChromKey::Name(&end.chrom))?.size,
        };
        let hi = self.to_continuous(&end.chrom, end_pos)?;
        Ok([lo, hi])
    }

    /// Splits a locus interval into per-chromosome pieces clipped to the
    /// chromosome bounds. Empty pieces at chromosome boundaries are dropped.
    pub fn to_discrete_chromosome_intervals(
        &self,
        interval: &[Locus; 2],
    ) -> GenomeResult<Vec<DiscreteChromosomeInterval>> {
        let [a, b] = interval;
        let first = self.resolve(ChromKey::Name(&a.chrom))?;
        let last = self.resolve(ChromKey::Name(&b.chrom))?;

        if first.index == last.index {
            return Ok(vec![DiscreteChromosomeInterval {
                chrom: first.name.clone(),
                start_pos: a.pos,
                end_pos: b.pos,
            }]);
        }

        let mut intervals = Vec::with_capacity(last.index.saturating_sub(first.index) + 1);
        intervals.push(DiscreteChromosomeInterval {
            chrom: first.name.clone(),
            start_pos: a.pos,
            end_pos: first.size,
        });
        for chrom in self.chromosomes.iter().take(last.index).skip(first.index + 1) {
            intervals.push(DiscreteChromosomeInterval {
                chrom: chrom.name.clone(),
                start_pos: 0,
                end_pos: chrom.size,
            });
        }
        intervals.push(DiscreteChromosomeInterval {
            chrom: last.name.clone(),
            start_pos: 0,
            end_pos: b.pos,
        });

        intervals.retain(|piece| piece.end_pos > piece.start_pos);
        Ok(intervals)
    }

    pub fn continuous_to_discrete_chromosome_intervals(
        &self,
        interval: [f64; 2],
    ) -> Option<Vec<DiscreteChromosomeInterval>> {
        let a = self.to_chromosomal(interval[0])?;
        let b = self.to_chromosomal(interval[1])?;
        self.to_discrete_chromosome_intervals(&[a, b]).ok()
    }

    /// UCSC-style one-based presentation of a continuous interval.
    pub fn format_interval(&self, interval: [f64; 2]) -> Option<String> {
        let [begin, end] = self.to_chromosomal_interval(interval)?;
        Some(format_range(&begin, &end))
    }

    /// One-based presentation of a single continuous position.
    pub fn format_locus(&self, continuous_pos: f64) -> Option<String> {
        let locus = self.to_chromosomal(continuous_pos)?;
        Some(format!("{}:{}", locus.chrom, locus.pos + 1))
    }

    /// Parses `chr`, `chr:pos`, `chr:start-end` or `chr:start-chr:end`. Malformed
    /// input and unknown chromosomes yield `None`.
    pub fn parse_interval(&self, text: &str) -> Option<[GenomicPos; 2]> {
        parse_interval(self, text)
    }
}

fn strip_chr_prefix(name: &str) -> &str {
    match name.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("chr") => &name[3..],
        _ => name,
    }
}

/// Named assemblies available to locus scales.
#[derive(Debug, Clone, Default)]
pub struct GenomeStore {
    genomes: HashMap<String, Arc<CoordinateSpace>>,
    default_assembly: Option<String>,
}

impl GenomeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an assembly under its name. The first one added becomes the default.
    pub fn add(&mut self, genome: CoordinateSpace) -> Arc<CoordinateSpace> {
        let name = genome.name().to_string();
        let genome = Arc::new(genome);
        log::info!(
            "Registered assembly {} with {} chromosomes",
            name,
            genome.chromosomes().len()
        );
        if self.default_assembly.is_none() {
            self.default_assembly = Some(name.clone());
        }
        self.genomes.insert(name, Arc::clone(&genome));
        genome
    }

    pub fn set_default(&mut self, name: &str) -> GenomeResult<()> {
        if !self.genomes.contains_key(name) {
            return Err(GenomeError::UnknownAssembly(name.to_string()));
        }
        self.default_assembly = Some(name.to_string());
        Ok(())
    }

    /// Returns the named assembly, or the default one when no name is given.
    pub fn get(&self, assembly: Option<&str>) -> GenomeResult<Arc<CoordinateSpace>> {
        match assembly {
            Some(name) => self
                .genomes
                .get(name)
                .cloned()
                .ok_or_else(|| GenomeError::UnknownAssembly(name.to_string())),
            None => self
                .default_assembly
                .as_deref()
                .and_then(|name| self.genomes.get(name))
                .cloned()
                .ok_or(GenomeError::NoGenome),
        }
    }

    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }
}
