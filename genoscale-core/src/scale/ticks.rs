//! "Nice" tick generation and tick label formatting.
//!
//! Tick steps are powers of ten multiplied by 1, 2 or 5, picked so that roughly
//! `count` ticks fall inside the interval.

use std::sync::Arc;

use crate::genome::CoordinateSpace;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Rounds halves towards positive infinity
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Returns `(i1, i2, inc)`; a negative `inc` denotes the reciprocal step `1 / -inc`.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scale = 10f64.powf(-power) / factor;
        i1 = round_half_up(start * scale);
        i2 = round_half_up(stop * scale);
        if i1 / scale < start {
            i1 += 1.0;
        }
        if i2 / scale > stop {
            i2 -= 1.0;
        }
        inc = -scale;
    } else {
        let step = 10f64.powf(power) * factor;
        i1 = round_half_up(start / step);
        i2 = round_half_up(stop / step);
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        inc = step;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Evenly spaced, nicely rounded values within `[start, stop]`.
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1) as usize + 1;
    let value = |i: f64| if inc < 0.0 { i / -inc } else { i * inc };
    (0..n)
        .map(|k| {
            let k = k as f64;
            if reverse {
                value(i2 - k)
            } else {
                value(i1 + k)
            }
        })
        .collect()
}

pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    tick_spec(start, stop, count).2
}

/// Distance between adjacent ticks, signed by the direction of the interval.
pub fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let reverse = stop < start;
    let inc = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse {
        -step
    } else {
        step
    }
}

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Label formats used by index and locus axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// Thousands-separated, e.g. `12,345`
    Grouped,
    /// SI prefixed with the given number of significant digits, e.g. `1.50M`
    Si { precision: usize },
}

impl NumberFormat {
    pub fn format(&self, x: f64) -> String {
        match *self {
            NumberFormat::Grouped => format_grouped(x),
            NumberFormat::Si { precision } => format_si(x, precision.max(1)),
        }
    }
}

fn format_grouped(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let text = if x.fract() == 0.0 {
        format!("{:.0}", x.abs())
    } else {
        trim_fraction(&format!("{:.12}", x.abs()))
    };
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 2);
    if x < 0.0 {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

fn trim_fraction(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}

/// Significant digits (without the decimal point) and the decimal exponent
fn decimal_parts(x: f64, precision: usize) -> (String, i32) {
    let formatted = format!("{:.*e}", precision - 1, x);
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits, exponent.parse().unwrap_or(0))
}

fn format_si(x: f64, precision: usize) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let (coefficient, exponent) = decimal_parts(x.abs(), precision);
    let prefix_exponent = (exponent as f64 / 3.0).floor().clamp(-8.0, 8.0) as i32;
    let i = exponent - prefix_exponent * 3 + 1;
    let n = coefficient.len() as i32;

    let body = if i == n {
        coefficient
    } else if i > n {
        format!("{}{}", coefficient, "0".repeat((i - n) as usize))
    } else if i > 0 {
        let (head, tail) = coefficient.split_at(i as usize);
        format!("{}.{}", head, tail)
    } else {
        let (digits, _) = decimal_parts(x.abs(), (precision as i32 + i - 1).max(1) as usize);
        format!("0.{}{}", "0".repeat((-i) as usize), digits)
    };

    let sign = if x < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, body, SI_PREFIXES[(8 + prefix_exponent) as usize])
}

/// Formats tick values as axis labels.
///
/// Locus formatters print positions relative to the containing chromosome.
#[derive(Debug, Clone)]
pub struct TickFormatter {
    format: NumberFormat,
    numbering_offset: f64,
    genome: Option<Arc<CoordinateSpace>>,
}

impl TickFormatter {
    pub fn new(format: NumberFormat, numbering_offset: f64) -> Self {
        Self {
            format,
            numbering_offset,
            genome: None,
        }
    }

    pub fn with_genome(mut self, genome: Arc<CoordinateSpace>) -> Self {
        self.genome = Some(genome);
        self
    }

    pub fn number_format(&self) -> NumberFormat {
        self.format
    }

    pub fn format(&self, x: f64) -> String {
        let relative = match self
            .genome
            .as_deref()
            .and_then(|genome| genome.to_chromosome(x))
        {
            Some(chrom) => x - chrom.continuous_start as f64,
            None => x,
        };
        self.format.format(relative + self.numbering_offset)
    }
}

/// Parses the subset of format specifiers understood by continuous scales:
/// `,` for grouping and `.Ns` for SI prefixes.
pub fn parse_specifier(specifier: &str) -> Option<NumberFormat> {
    match specifier {
        "," | ",d" => Some(NumberFormat::Grouped),
        "s" => Some(NumberFormat::Si { precision: 3 }),
        other => other
            .strip_prefix('.')
            .and_then(|rest| rest.strip_suffix('s'))
            .and_then(|digits| digits.parse().ok())
            .map(|precision| NumberFormat::Si { precision }),
    }
}
