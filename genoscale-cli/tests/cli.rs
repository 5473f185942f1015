use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn sizes_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "chr1\t1000\nchr2\t500\nchr3\t2000").unwrap();
    file
}

fn genoscale(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_genoscale"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn locate_prints_one_based_locus() {
    let sizes = sizes_file();
    let out = genoscale(&["locate", "--sizes", sizes.path().to_str().unwrap(), "1200"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "1200\tchr2:201");
}

#[test]
fn split_emits_json_pieces() {
    let sizes = sizes_file();
    let out = genoscale(&[
        "split",
        "--json",
        "--sizes",
        sizes.path().to_str().unwrap(),
        "chr1:901-chr3:50",
    ]);
    assert!(out.status.success());
    let pieces: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(pieces.as_array().unwrap().len(), 3);
    assert_eq!(pieces[1]["chrom"], "chr2");
    assert_eq!(pieces[2]["endPos"], 50);
}

#[test]
fn unknown_chromosome_fails_with_suggestions() {
    let sizes = sizes_file();
    let out = genoscale(&["locate", "--sizes", sizes.path().to_str().unwrap(), "chrZ:1-5"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Suggestions:"));
}

#[test]
fn missing_sizes_is_reported() {
    let out = genoscale(&["info"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("--sizes"));
}
