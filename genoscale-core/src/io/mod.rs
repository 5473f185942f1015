//! File format I/O for GenoScale
//!
//! Currently a single reader: tab-separated chromosome sizes tables
//! (`name<TAB>size`, as produced by UCSC `fetchChromSizes`).

pub mod chrom_sizes;

pub use chrom_sizes::{ChromSizesError, ChromSizesParser};
