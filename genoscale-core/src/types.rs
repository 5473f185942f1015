use serde::{Deserialize, Serialize};
use std::fmt;

pub type GenomicPos = u64;

/// A position on a named chromosome. Positions are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locus {
    pub chrom: String,
    pub pos: GenomicPos,
}

impl Locus {
    pub fn new(chrom: impl Into<String>, pos: GenomicPos) -> Self {
        Self {
            chrom: chrom.into(),
            pos,
        }
    }
}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chrom, self.pos)
    }
}

/// An interval endpoint whose position may be left out. A missing start
/// position means the start of the chromosome, a missing end position its end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocusBound {
    pub chrom: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<GenomicPos>,
}

impl LocusBound {
    pub fn chrom(chrom: impl Into<String>) -> Self {
        Self {
            chrom: chrom.into(),
            pos: None,
        }
    }

    pub fn at(chrom: impl Into<String>, pos: GenomicPos) -> Self {
        Self {
            chrom: chrom.into(),
            pos: Some(pos),
        }
    }
}

impl From<Locus> for LocusBound {
    fn from(locus: Locus) -> Self {
        Self {
            chrom: locus.chrom,
            pos: Some(locus.pos),
        }
    }
}

/// A piece of an interval restricted to a single chromosome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscreteChromosomeInterval {
    pub chrom: String,
    pub start_pos: GenomicPos,
    pub end_pos: GenomicPos,
}

/// Visual encoding channels that may share a scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    X,
    X2,
    Y,
    Y2,
    Color,
    Fill,
    Stroke,
    Opacity,
    FillOpacity,
    StrokeOpacity,
    Size,
    Shape,
    StrokeWidth,
    Angle,
    Dx,
    Dy,
    Sample,
}

impl Channel {
    /// `x2` and `y2` piggyback on the scale of their primary channel.
    pub fn is_secondary(self) -> bool {
        matches!(self, Channel::X2 | Channel::Y2)
    }

    pub fn primary(self) -> Channel {
        match self {
            Channel::X2 => Channel::X,
            Channel::Y2 => Channel::Y,
            other => other,
        }
    }

    pub fn is_positional(self) -> bool {
        matches!(self.primary(), Channel::X | Channel::Y)
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::X => "x",
            Channel::X2 => "x2",
            Channel::Y => "y",
            Channel::Y2 => "y2",
            Channel::Color => "color",
            Channel::Fill => "fill",
            Channel::Stroke => "stroke",
            Channel::Opacity => "opacity",
            Channel::FillOpacity => "fillOpacity",
            Channel::StrokeOpacity => "strokeOpacity",
            Channel::Size => "size",
            Channel::Shape => "shape",
            Channel::StrokeWidth => "strokeWidth",
            Channel::Angle => "angle",
            Channel::Dx => "dx",
            Channel::Dy => "dy",
            Channel::Sample => "sample",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Measurement type of the data encoded on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    Nominal,
    Ordinal,
    Quantitative,
    Index,
    Locus,
}

impl DataType {
    pub fn is_discrete(self) -> bool {
        matches!(self, DataType::Nominal | DataType::Ordinal)
    }

    pub fn name(self) -> &'static str {
        match self {
            DataType::Nominal => "nominal",
            DataType::Ordinal => "ordinal",
            DataType::Quantitative => "quantitative",
            DataType::Index => "index",
            DataType::Locus => "locus",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
