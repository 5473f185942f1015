//! Splitting 64-bit coordinates into pairs of 32-bit floats.
//!
//! A genome-wide continuous coordinate exceeds the 24-bit mantissa of an
//! `f32`. The vertex stores a coarse part and a low part; the shader adds them
//! back after subtracting the domain start from the coarse part.

use genoscale_core::ScaleType;

const LOW_BITS: i32 = 12;
const BLOCK: f64 = (1u64 << LOW_BITS) as f64;

/// How x coordinates are written into vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Plain `f32`, second component zero
    Single,
    /// `[x - low, low]` where `low` is the remainder modulo 4096
    Split,
    /// `[(x - low) / 4096, low]`, for domains beyond `u32::MAX`
    SplitLarge,
}

impl Precision {
    pub fn for_scale(scale_type: ScaleType, domain: [f64; 2]) -> Self {
        if !is_high_precision(scale_type) {
            Precision::Single
        } else if is_large_domain(domain) {
            Precision::SplitLarge
        } else {
            Precision::Split
        }
    }

    pub fn encode(self, x: f64) -> [f32; 2] {
        match self {
            Precision::Single => [x as f32, 0.0],
            Precision::Split => split_high_precision(x),
            Precision::SplitLarge => split_large_high_precision(x),
        }
    }
}

/// Index and locus scales carry integer genomic positions.
pub fn is_high_precision(scale_type: ScaleType) -> bool {
    matches!(scale_type, ScaleType::Index | ScaleType::Locus)
}

pub fn is_large_domain(domain: [f64; 2]) -> bool {
    domain[1] > u32::MAX as f64
}

pub fn split_high_precision(x: f64) -> [f32; 2] {
    let lo = x.rem_euclid(BLOCK);
    [(x - lo) as f32, lo as f32]
}

pub fn split_large_high_precision(x: f64) -> [f32; 2] {
    let lo = x.rem_euclid(BLOCK);
    [((x - lo) / BLOCK) as f32, lo as f32]
}
