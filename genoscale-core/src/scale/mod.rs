//! Scales map domain values (numbers, loci or categories) to range values.
//!
//! [`Scale`] is a closed set of scale families. Each operation dispatches with a
//! `match`, so adding a family means handling it everywhere the compiler asks.

pub mod continuous;
pub mod discrete;
pub mod index;
pub mod locus;
pub mod props;
pub mod ticks;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::{GenomeError, Result, ScaleError};
use crate::genome::CoordinateSpace;

pub use continuous::{ContinuousScale, Transform};
pub use discrete::{BandScale, OrdinalScale};
pub use index::{IndexScale, MIN_DOMAIN_SPAN};
pub use locus::LocusScale;
pub use props::{DomainSpec, RangeElement, ScaleProps, ZoomParams, ZoomSpec};
pub use ticks::{NumberFormat, TickFormatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleType {
    Linear,
    Log,
    Pow,
    Sqrt,
    Index,
    Locus,
    Ordinal,
    Band,
    Point,
    Null,
}

impl ScaleType {
    pub fn is_continuous(self) -> bool {
        matches!(
            self,
            ScaleType::Linear
                | ScaleType::Log
                | ScaleType::Pow
                | ScaleType::Sqrt
                | ScaleType::Index
                | ScaleType::Locus
        )
    }

    pub fn is_discrete(self) -> bool {
        matches!(self, ScaleType::Ordinal | ScaleType::Band | ScaleType::Point)
    }

    /// Families that have a pan/zoom transform
    pub fn supports_zoom(self) -> bool {
        self.is_continuous()
    }

    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Linear => "linear",
            ScaleType::Log => "log",
            ScaleType::Pow => "pow",
            ScaleType::Sqrt => "sqrt",
            ScaleType::Index => "index",
            ScaleType::Locus => "locus",
            ScaleType::Ordinal => "ordinal",
            ScaleType::Band => "band",
            ScaleType::Point => "point",
            ScaleType::Null => "null",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The domain of a live scale.
#[derive(Debug, Clone, PartialEq)]
pub enum Domain {
    Continuous([f64; 2]),
    Discrete(Vec<String>),
}

impl Domain {
    /// Placeholder domain of a continuous scale that has not seen data yet
    pub const UNINITIALIZED: Domain = Domain::Continuous([0.0, 0.0]);

    pub fn as_interval(&self) -> Option<[f64; 2]> {
        match self {
            Domain::Continuous(interval) => Some(*interval),
            Domain::Discrete(_) => None,
        }
    }

    pub fn span(&self) -> Option<f64> {
        self.as_interval().map(|[lo, hi]| hi - lo)
    }

    pub fn is_initialized(&self) -> bool {
        match self {
            Domain::Continuous(interval) => *interval != [0.0, 0.0],
            Domain::Discrete(values) => !values.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scale {
    Index(IndexScale),
    Locus(LocusScale),
    Continuous(ContinuousScale),
    Ordinal(OrdinalScale),
    Band(BandScale),
    /// Passes values through unchanged
    Null,
}

impl Scale {
    /// Instantiates an unconfigured scale. Locus scales need a coordinate space.
    pub fn create(scale_type: ScaleType, genome: Option<Arc<CoordinateSpace>>) -> Result<Scale> {
        Ok(match scale_type {
            ScaleType::Linear => Scale::Continuous(ContinuousScale::linear()),
            ScaleType::Log => Scale::Continuous(ContinuousScale::log(10.0)),
            ScaleType::Pow => Scale::Continuous(ContinuousScale::pow(1.0)),
            ScaleType::Sqrt => Scale::Continuous(ContinuousScale::sqrt()),
            ScaleType::Index => Scale::Index(IndexScale::new()),
            ScaleType::Locus => Scale::Locus(LocusScale::new(genome.ok_or(GenomeError::NoGenome)?)),
            ScaleType::Ordinal => Scale::Ordinal(OrdinalScale::new()),
            ScaleType::Band => Scale::Band(BandScale::band()),
            ScaleType::Point => Scale::Band(BandScale::point()),
            ScaleType::Null => Scale::Null,
        })
    }

    pub fn scale_type(&self) -> ScaleType {
        match self {
            Scale::Index(_) => ScaleType::Index,
            Scale::Locus(_) => ScaleType::Locus,
            Scale::Continuous(s) => s.scale_type(),
            Scale::Ordinal(_) => ScaleType::Ordinal,
            Scale::Band(s) if s.is_point() => ScaleType::Point,
            Scale::Band(_) => ScaleType::Band,
            Scale::Null => ScaleType::Null,
        }
    }

    pub fn is_continuous(&self) -> bool {
        self.scale_type().is_continuous()
    }

    pub fn is_discrete(&self) -> bool {
        self.scale_type().is_discrete()
    }

    pub fn genome(&self) -> Option<&Arc<CoordinateSpace>> {
        match self {
            Scale::Locus(s) => Some(s.genome()),
            _ => None,
        }
    }

    /// Band alignment of index-based scales
    pub fn align(&self) -> Option<f64> {
        match self {
            Scale::Index(s) => Some(s.align()),
            Scale::Locus(s) => Some(s.index().align()),
            _ => None,
        }
    }

    /// Null scales report the uninitialized placeholder.
    pub fn domain(&self) -> Domain {
        match self {
            Scale::Index(s) => Domain::Continuous(s.domain()),
            Scale::Locus(s) => Domain::Continuous(s.domain()),
            Scale::Continuous(s) => Domain::Continuous(s.domain()),
            Scale::Ordinal(s) => Domain::Discrete(s.domain().to_vec()),
            Scale::Band(s) => Domain::Discrete(s.domain().to_vec()),
            Scale::Null => Domain::UNINITIALIZED,
        }
    }

    pub fn set_domain(&mut self, domain: &Domain) -> Result<()> {
        let scale_type = self.scale_type();
        match (self, domain) {
            (Scale::Index(s), Domain::Continuous(d)) => s.set_domain(*d),
            (Scale::Locus(s), Domain::Continuous(d)) => s.set_domain(*d),
            (Scale::Continuous(s), Domain::Continuous(d)) => s.set_domain(*d),
            (Scale::Ordinal(s), Domain::Discrete(values)) => s.set_domain(values.iter().cloned()),
            (Scale::Band(s), Domain::Discrete(values)) => s.set_domain(values.iter().cloned()),
            (Scale::Null, _) => {}
            _ => return Err(ScaleError::IncompatibleDomain(scale_type)),
        }
        Ok(())
    }

    pub fn range(&self) -> Vec<f64> {
        match self {
            Scale::Index(s) => s.range().to_vec(),
            Scale::Locus(s) => s.index().range().to_vec(),
            Scale::Continuous(s) => s.range().to_vec(),
            Scale::Ordinal(s) => s.range().to_vec(),
            Scale::Band(s) => s.range().to_vec(),
            Scale::Null => Vec::new(),
        }
    }

    /// Interval scales use the first and last values; ordinal scales take all.
    pub fn set_range(&mut self, values: &[f64]) {
        let interval = match (values.first(), values.last()) {
            (Some(&first), Some(&last)) => [first, last],
            _ => return,
        };
        match self {
            Scale::Index(s) => s.set_range(interval),
            Scale::Locus(s) => s.index_mut().set_range(interval),
            Scale::Continuous(s) => s.set_range(interval),
            Scale::Ordinal(s) => s.set_range(values.to_vec()),
            Scale::Band(s) => s.set_range(interval),
            Scale::Null => {}
        }
    }

    /// Applies the family-specific properties (alignment, padding, exponent,
    /// base). Domain and range are configured separately.
    pub fn apply_props(&mut self, props: &ScaleProps) {
        match self {
            Scale::Index(s) => configure_index(s, props),
            Scale::Locus(s) => configure_index(s.index_mut(), props),
            Scale::Continuous(s) => {
                if let Some(exponent) = props.exponent {
                    s.set_exponent(exponent);
                }
                if let Some(base) = props.base {
                    s.set_base(base);
                }
            }
            Scale::Band(s) => {
                if let Some(padding) = props.padding {
                    s.set_padding(padding);
                }
                if let Some(padding) = props.padding_inner {
                    s.set_padding_inner(padding);
                }
                if let Some(padding) = props.padding_outer {
                    s.set_padding_outer(padding);
                }
                if let Some(align) = props.align {
                    s.set_align(align);
                }
            }
            Scale::Ordinal(_) | Scale::Null => {}
        }
    }

    /// Turns off implicit domain growth of ordinal scales.
    pub fn disable_implicit_domain(&mut self) {
        if let Scale::Ordinal(s) = self {
            s.set_implicit(false);
        }
    }

    /// Pan/zoom transform of zoomable families
    pub fn zoom_transform(&self) -> Option<Transform> {
        match self {
            Scale::Index(_) | Scale::Locus(_) => Some(Transform::Linear),
            Scale::Continuous(s) => Some(s.transform()),
            _ => None,
        }
    }

    /// Maps a number. Categorical scales return `None`.
    pub fn apply(&self, x: f64) -> Option<f64> {
        match self {
            Scale::Index(s) => Some(s.apply(x)),
            Scale::Locus(s) => Some(s.apply(x)),
            Scale::Continuous(s) => Some(s.apply(x)),
            Scale::Null => Some(x),
            Scale::Ordinal(_) | Scale::Band(_) => None,
        }
    }

    /// Maps a category without growing the domain.
    pub fn apply_category(&self, value: &str) -> Option<f64> {
        match self {
            Scale::Ordinal(s) => s.get(value),
            Scale::Band(s) => s.get(value),
            _ => None,
        }
    }

    pub fn invert(&self, y: f64) -> Result<f64> {
        match self {
            Scale::Index(s) => Ok(s.invert(y)),
            Scale::Locus(s) => Ok(s.invert(y)),
            Scale::Continuous(s) => Ok(s.invert(y)),
            Scale::Null => Ok(y),
            Scale::Ordinal(_) | Scale::Band(_) => Err(ScaleError::NotInvertible(self.scale_type())),
        }
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Scale::Index(s) => s.ticks(count),
            Scale::Locus(s) => s.ticks(count),
            Scale::Continuous(s) => s.ticks(count),
            Scale::Ordinal(_) | Scale::Band(_) | Scale::Null => Vec::new(),
        }
    }

    pub fn tick_format(&self, count: usize, specifier: Option<&str>) -> Result<TickFormatter> {
        match self {
            Scale::Index(s) => s.tick_format(count, specifier),
            Scale::Locus(s) => s.tick_format(count, specifier),
            Scale::Continuous(s) => s.tick_format(count, specifier),
            Scale::Ordinal(_) | Scale::Band(_) | Scale::Null => {
                Ok(TickFormatter::new(NumberFormat::Grouped, 0.0))
            }
        }
    }
}

fn configure_index(scale: &mut IndexScale, props: &ScaleProps) {
    if let Some(padding) = props.padding {
        scale.set_padding(padding);
    }
    if let Some(padding) = props.padding_inner {
        scale.set_padding_inner(padding);
    }
    if let Some(padding) = props.padding_outer {
        scale.set_padding_outer(padding);
    }
    if let Some(align) = props.align {
        scale.set_align(align);
    }
}
