//! Error types shared across the core library

use thiserror::Error;

use crate::scale::ScaleType;
use crate::types::{Channel, DataType, GenomicPos};

/// Errors raised by coordinate-space lookups and assembly resolution
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenomeError {
    #[error("Unknown chromosome: {0}")]
    UnknownChromosome(String),

    #[error("Unknown assembly: {0}")]
    UnknownAssembly(String),

    #[error("No genome has been configured")]
    NoGenome,

    #[error("Position {0} is outside the coordinate space")]
    OutOfBounds(f64),

    #[error("Position {pos} on {chrom} overflows the continuous axis")]
    PositionOverflow { chrom: String, pos: GenomicPos },
}

/// Errors raised while configuring, resolving or zooming scales
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScaleError {
    #[error(transparent)]
    Genome(#[from] GenomeError),

    #[error("Index scale's tickFormat does not support a specifier: {0}")]
    UnsupportedFormat(String),

    #[error("Shared scales have conflicting names: \"{existing}\" vs. \"{requested}\"")]
    ConflictingScaleName { existing: String, requested: String },

    #[error("Cannot share the {channel} scale: conflicting data types {existing} and {requested}")]
    IncompatibleDataTypes {
        channel: Channel,
        existing: DataType,
        requested: DataType,
    },

    #[error("The {channel} channel has no data type")]
    MissingDataType { channel: Channel },

    #[error("The {channel} channel does not support {data_type} data")]
    IncompatibleChannel { channel: Channel, data_type: DataType },

    #[error("Zooming is not implemented for {0} scales")]
    ZoomNotSupported(ScaleType),

    #[error("{0} scales cannot be inverted")]
    NotInvertible(ScaleType),

    #[error("Domain does not fit a {0} scale")]
    IncompatibleDomain(ScaleType),

    #[error("Cannot combine {existing} and {requested} domains")]
    IncompatibleDomains {
        existing: &'static str,
        requested: &'static str,
    },

    #[error("Unknown parameter in range expression: {0}")]
    UnknownParam(String),

    #[error("The scale has not been initialized")]
    Uninitialized,
}

pub type Result<T, E = ScaleError> = std::result::Result<T, E>;
