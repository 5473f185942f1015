use genoscale_core::io::ChromSizesParser;
use genoscale_core::{ContigSize, CoordinateSpace, Locus};
use proptest::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn small_genome() -> CoordinateSpace {
    CoordinateSpace::from_sizes(
        "small",
        vec![
            ContigSize::new("chr1", 10),
            ContigSize::new("chr2", 20),
            ContigSize::new("chr3", 30),
            ContigSize::new("chrX", 40),
        ],
    )
}

#[test]
fn locus_to_continuous_and_back() {
    let genome = small_genome();
    assert_eq!(genome.total_size(), 100);
    assert_eq!(genome.to_continuous("chrX", 2).unwrap(), 62);
    assert_eq!(genome.to_chromosomal(62.0), Some(Locus::new("chrX", 2)));
}

#[test]
fn interval_rounding_is_asymmetric() {
    let genome = small_genome();
    let [begin, end] = genome.to_chromosomal_interval([10.0, 100.0]).unwrap();
    assert_eq!(begin, Locus::new("chr2", 0));
    assert_eq!(end, Locus::new("chrX", 40));
}

#[test]
fn end_of_genome() {
    let genome = small_genome();
    assert_eq!(genome.to_chromosomal(100.0), Some(Locus::new("chrX", 40)));
    assert_eq!(genome.to_chromosomal(101.0), None);
}

#[test]
fn sizes_file_loads_into_coordinate_space() {
    let mut file = NamedTempFile::new().expect("create temp sizes file");
    writeln!(file, "# hg-like").unwrap();
    writeln!(file, "chr1\t1000").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "chr2\t500\textra").unwrap();

    let genome = ChromSizesParser::parse_file(file.path()).expect("parse sizes");
    assert_eq!(genome.chromosomes().len(), 2);
    assert_eq!(genome.extent(), [0.0, 1500.0]);
    assert_eq!(genome.parse_interval("chr2:1-100"), Some([1000, 1100]));
}

#[test]
fn gzipped_sizes_file() {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("toy.chrom.sizes.gz");
    let mut encoder = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
    encoder.write_all(b"chrA\t7\nchrB\t3\n").unwrap();
    encoder.finish().unwrap();

    let genome = ChromSizesParser::parse_file(&path).expect("parse gz sizes");
    assert_eq!(genome.name(), "toy");
    assert_eq!(genome.total_size(), 10);
}

fn sizes_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..10_000, 1..12)
}

proptest! {
    #[test]
    fn every_locus_round_trips(sizes in sizes_strategy(), pick in any::<prop::sample::Index>(), frac in 0.0f64..1.0) {
        let genome = CoordinateSpace::from_sizes(
            "prop",
            sizes.iter().enumerate().map(|(i, &size)| ContigSize::new(format!("chr{}", i + 1), size)),
        );
        let chrom = &genome.chromosomes()[pick.index(sizes.len())];
        let pos = ((chrom.size as f64) * frac).floor() as u64;

        let continuous = genome.to_continuous(&chrom.name, pos).unwrap();
        let locus = genome.to_chromosomal(continuous as f64).unwrap();
        prop_assert_eq!(locus, Locus::new(chrom.name.clone(), pos));
    }

    #[test]
    fn continuous_positions_are_monotonic(sizes in sizes_strategy()) {
        let genome = CoordinateSpace::from_sizes(
            "prop",
            sizes.iter().enumerate().map(|(i, &size)| ContigSize::new(format!("chr{}", i + 1), size)),
        );
        let mut previous = None;
        for chrom in genome.chromosomes() {
            for pos in [0, chrom.size / 2, chrom.size - 1] {
                let x = genome.to_continuous(&chrom.name, pos).unwrap();
                if let Some(prev) = previous {
                    prop_assert!(x >= prev);
                }
                previous = Some(x);
            }
        }
    }
}
