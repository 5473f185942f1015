//! GenoScale Core Library
//!
//! Genomic coordinate spaces, index and locus scales, binned range indexing
//! for geometry batches, and scale resolution shared between linked views.

pub mod types;
pub mod error;
pub mod config;
pub mod genome;
pub mod io;
pub mod scale;
pub mod binning;
pub mod resolution;

// Re-export commonly used types and functions
pub use types::{Channel, DataType, DiscreteChromosomeInterval, GenomicPos, Locus, LocusBound};
pub use error::{GenomeError, Result, ScaleError};
pub use config::EngineConfig;
pub use genome::{ContigSize, CoordinateSpace, GenomeStore};
pub use io::ChromSizesParser;
pub use scale::{Domain, DomainSpec, IndexScale, LocusScale, Scale, ScaleProps, ScaleType};
pub use binning::{RangeBinIndexer, RangeIndex, VertexRange};
pub use resolution::{Animator, ScaleResolution};

/// Version information for the GenoScale core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
