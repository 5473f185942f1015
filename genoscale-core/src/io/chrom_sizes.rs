//! Chromosome sizes table parser
//!
//! Reads `name<TAB>size` rows. Blank lines and `#` comments are skipped; any
//! trailing columns are ignored. Files ending in `.gz` are decompressed on the fly.

use flate2::read::GzDecoder;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

use crate::genome::{ContigSize, CoordinateSpace};
use crate::types::GenomicPos;

#[derive(Debug, Error)]
pub enum ChromSizesError {
    #[error("Line {line}: expected <name><TAB><size>, got {content:?}")]
    MissingColumn { line: usize, content: String },
    #[error("Line {line}: invalid chromosome size {value:?}")]
    InvalidSize { line: usize, value: String },
    #[error("Line {line}: duplicate chromosome {name}")]
    DuplicateChromosome { line: usize, name: String },
    #[error("Line {line}: total genome size overflows")]
    SizeOverflow { line: usize },
    #[error("No chromosomes found")]
    Empty,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct ChromSizesParser;

impl ChromSizesParser {
    /// Parse a sizes file into a coordinate space named after the file stem
    /// (minus `.chrom.sizes` / `.gz` suffixes).
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<CoordinateSpace, ChromSizesError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let path_str = path.to_string_lossy();

        let sizes = if path_str.ends_with(".gz") {
            Self::parse_reader(BufReader::new(GzDecoder::new(file)))?
        } else {
            Self::parse_reader(BufReader::new(file))?
        };

        let name = assembly_name(path);
        log::info!("Loaded {} chromosomes for assembly {}", sizes.len(), name);
        Ok(CoordinateSpace::from_sizes(name, sizes))
    }

    /// Parse sizes rows from any BufRead source
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<ContigSize>, ChromSizesError> {
        let mut sizes: Vec<ContigSize> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut total: GenomicPos = 0;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim_end();
            if trimmed.trim().is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let contig = Self::parse_line(trimmed, line_num + 1)?;
            if !seen.insert(contig.name.clone()) {
                return Err(ChromSizesError::DuplicateChromosome {
                    line: line_num + 1,
                    name: contig.name,
                });
            }
            total = total
                .checked_add(contig.size)
                .ok_or(ChromSizesError::SizeOverflow { line: line_num + 1 })?;
            sizes.push(contig);
        }

        if sizes.is_empty() {
            return Err(ChromSizesError::Empty);
        }
        Ok(sizes)
    }

    pub fn parse_str(data: &str) -> Result<Vec<ContigSize>, ChromSizesError> {
        Self::parse_reader(data.as_bytes())
    }

    fn parse_line(line: &str, line_num: usize) -> Result<ContigSize, ChromSizesError> {
        let mut fields = line.split('\t');
        let (Some(name), Some(size)) = (fields.next(), fields.next()) else {
            return Err(ChromSizesError::MissingColumn {
                line: line_num,
                content: line.to_string(),
            });
        };
        let size = size.trim().parse().map_err(|_| ChromSizesError::InvalidSize {
            line: line_num,
            value: size.to_string(),
        })?;
        Ok(ContigSize::new(name.trim(), size))
    }
}

fn assembly_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = file_name.as_str();
    for suffix in [".gz", ".txt", ".sizes", ".chrom", ".chromSizes"] {
        name = name.strip_suffix(suffix).unwrap_or(name);
    }
    name.to_string()
}
