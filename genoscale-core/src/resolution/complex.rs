//! Conversions between continuous values and their "complex" form: a locus on
//! locus scales, the number itself elsewhere.

use serde::{Deserialize, Serialize};

use crate::error::{GenomeError, Result};
use crate::genome::CoordinateSpace;
use crate::scale::DomainSpec;
use crate::types::{Locus, LocusBound};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComplexValue {
    Number(f64),
    Locus(Locus),
}

impl From<f64> for ComplexValue {
    fn from(value: f64) -> Self {
        ComplexValue::Number(value)
    }
}

impl From<Locus> for ComplexValue {
    fn from(locus: Locus) -> Self {
        ComplexValue::Locus(locus)
    }
}

/// Without a genome the value stays numeric. Values outside the genome also
/// stay numeric.
pub fn to_complex(genome: Option<&CoordinateSpace>, value: f64) -> ComplexValue {
    genome
        .and_then(|genome| genome.to_chromosomal(value))
        .map(ComplexValue::Locus)
        .unwrap_or(ComplexValue::Number(value))
}

pub fn from_complex(genome: Option<&CoordinateSpace>, value: &ComplexValue) -> Result<f64> {
    match value {
        ComplexValue::Number(x) => Ok(*x),
        ComplexValue::Locus(locus) => {
            let genome = genome.ok_or(GenomeError::NoGenome)?;
            Ok(genome.to_continuous(locus.chrom.as_str(), locus.pos)? as f64)
        }
    }
}

/// Linearizes an interval. Locus bounds without a position cover the whole
/// chromosome: the start of the first and the end of the last.
pub fn from_complex_interval(genome: Option<&CoordinateSpace>, spec: &DomainSpec) -> Result<Vec<f64>> {
    match spec {
        DomainSpec::Numbers(values) => Ok(values.clone()),
        DomainSpec::Loci(bounds) => {
            let Some(first) = bounds.first() else {
                return Ok(Vec::new());
            };
            let genome = genome.ok_or(GenomeError::NoGenome)?;
            let last: Option<&LocusBound> = bounds.get(1);
            let [start, end] = genome.to_continuous_interval(first, last)?;
            Ok(vec![start as f64, end as f64])
        }
        DomainSpec::Categories(_) => Ok(Vec::new()),
    }
}

/// A continuous interval as loci, or as numbers when there is no genome.
pub fn complex_domain(genome: Option<&CoordinateSpace>, interval: [f64; 2]) -> [ComplexValue; 2] {
    match genome.and_then(|genome| genome.to_chromosomal_interval(interval)) {
        Some([begin, end]) => [ComplexValue::Locus(begin), ComplexValue::Locus(end)],
        None => [ComplexValue::Number(interval[0]), ComplexValue::Number(interval[1])],
    }
}
