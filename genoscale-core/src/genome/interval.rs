//! UCSC-style interval strings, e.g. `chr1:1,000-2,000` or `chr1:500-chr2:800`.

use regex::Regex;
use std::sync::OnceLock;

use super::CoordinateSpace;
use crate::types::{GenomicPos, Locus};

fn interval_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9_.]+)(?::([0-9,]+)(?:-(?:([A-Za-z0-9_.]+):)?([0-9,]+))?)?$")
            .expect("interval pattern is valid")
    })
}

fn parse_position(text: &str) -> Option<GenomicPos> {
    text.replace(',', "").parse().ok()
}

/// Parses an interval string into a continuous half-open interval.
///
/// A bare chromosome name covers the whole chromosome. Positions are one-based
/// and inclusive, so `chr1:1-10` becomes the first ten bases. Returns `None` for
/// malformed input, unknown chromosomes, a zero start or a reversed interval.
pub fn parse_interval(genome: &CoordinateSpace, text: &str) -> Option<[GenomicPos; 2]> {
    let caps = interval_regex().captures(text.trim())?;
    let start_chrom = caps.get(1)?.as_str();

    let Some(start) = caps.get(2) else {
        let chrom = genome.chromosome(start_chrom)?;
        return Some([chrom.continuous_start, chrom.continuous_end]);
    };

    let start = parse_position(start.as_str())?;
    let end = match caps.get(4) {
        Some(end) => parse_position(end.as_str())?,
        None => start,
    };
    let end_chrom = caps.get(3).map_or(start_chrom, |m| m.as_str());

    let lo = genome.to_continuous(start_chrom, start.checked_sub(1)?).ok()?;
    let hi = genome.to_continuous(end_chrom, end).ok()?;
    (hi >= lo).then_some([lo, hi])
}

/// Formats a locus pair as a one-based closed range. Ranges spanning several
/// chromosomes name the end chromosome too.
pub fn format_range(begin: &Locus, end: &Locus) -> String {
    if begin.chrom == end.chrom {
        format!("{}:{}-{}", begin.chrom, begin.pos + 1, end.pos)
    } else {
        format!("{}:{}-{}:{}", begin.chrom, begin.pos + 1, end.chrom, end.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::ContigSize;

    fn genome() -> CoordinateSpace {
        CoordinateSpace::from_sizes(
            "test",
            vec![
                ContigSize::new("chr1", 10),
                ContigSize::new("chr2", 20),
                ContigSize::new("chr3", 30),
                ContigSize::new("chrX", 40),
            ],
        )
    }

    #[test]
    fn test_parse_whole_chromosome() {
        assert_eq!(parse_interval(&genome(), "chr2"), Some([10, 30]));
        assert_eq!(parse_interval(&genome(), "chr9"), None);
    }

    #[test]
    fn test_parse_ranges() {
        let genome = genome();
        assert_eq!(parse_interval(&genome, "chr1:1-10"), Some([0, 10]));
        assert_eq!(parse_interval(&genome, "chr2:5"), Some([14, 15]));
        assert_eq!(parse_interval(&genome, "chr2:6-chr3:7"), Some([15, 37]));
        assert_eq!(parse_interval(&genome, "chrX:1,0-2,0"), Some([69, 80]));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let genome = genome();
        assert_eq!(parse_interval(&genome, ""), None);
        assert_eq!(parse_interval(&genome, "chr1:"), None);
        assert_eq!(parse_interval(&genome, "chr1:a-b"), None);
        assert_eq!(parse_interval(&genome, "chr1:0-5"), None);
        assert_eq!(parse_interval(&genome, "chr2:8-3"), None);
    }

    #[test]
    fn test_parse_huge_positions() {
        let genome = genome();
        assert_eq!(parse_interval(&genome, "chr2:1-18446744073709551615"), None);
        assert_eq!(parse_interval(&genome, "chrX:18446744073709551615"), None);
        assert_eq!(parse_interval(&genome, "chr1:1-99999999999999999999999"), None);
    }

    #[test]
    fn test_format_round_trip() {
        let genome = genome();
        for text in ["chr1:1-10", "chr2:6-chr3:7", "chrX:3-40"] {
            let interval = parse_interval(&genome, text).unwrap();
            let formatted = genome
                .format_interval([interval[0] as f64, interval[1] as f64])
                .unwrap();
            assert_eq!(formatted, text);
        }
    }
}
