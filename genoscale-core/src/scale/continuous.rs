//! Quantitative scales: linear, logarithmic and power.

use super::ticks::{parse_specifier, tick_step, ticks, NumberFormat, TickFormatter};
use super::ScaleType;
use crate::error::{Result, ScaleError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Linear,
    Log { base: f64 },
    Pow { exponent: f64 },
}

impl Transform {
    pub(crate) fn forward(&self, x: f64, negative: bool) -> f64 {
        match *self {
            Transform::Linear => x,
            Transform::Log { .. } if negative => -(-x).ln(),
            Transform::Log { .. } => x.ln(),
            Transform::Pow { exponent } => x.signum() * x.abs().powf(exponent),
        }
    }

    pub(crate) fn backward(&self, y: f64, negative: bool) -> f64 {
        match *self {
            Transform::Linear => y,
            Transform::Log { .. } if negative => -(-y).exp(),
            Transform::Log { .. } => y.exp(),
            Transform::Pow { exponent } => y.signum() * y.abs().powf(1.0 / exponent),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousScale {
    scale_type: ScaleType,
    transform: Transform,
    domain: [f64; 2],
    range: [f64; 2],
}

impl ContinuousScale {
    pub fn linear() -> Self {
        Self::with_transform(ScaleType::Linear, Transform::Linear)
    }

    pub fn log(base: f64) -> Self {
        let mut scale = Self::with_transform(ScaleType::Log, Transform::Log { base });
        scale.domain = [1.0, 10.0];
        scale
    }

    pub fn pow(exponent: f64) -> Self {
        Self::with_transform(ScaleType::Pow, Transform::Pow { exponent })
    }

    pub fn sqrt() -> Self {
        Self::with_transform(ScaleType::Sqrt, Transform::Pow { exponent: 0.5 })
    }

    fn with_transform(scale_type: ScaleType, transform: Transform) -> Self {
        Self {
            scale_type,
            transform,
            domain: [0.0, 1.0],
            range: [0.0, 1.0],
        }
    }

    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn set_domain(&mut self, domain: [f64; 2]) {
        self.domain = domain;
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    pub fn set_range(&mut self, range: [f64; 2]) {
        self.range = range;
    }

    pub fn set_exponent(&mut self, exponent: f64) {
        if let Transform::Pow { .. } = self.transform {
            if self.scale_type == ScaleType::Pow {
                self.transform = Transform::Pow { exponent };
            }
        }
    }

    pub fn set_base(&mut self, base: f64) {
        if let Transform::Log { .. } = self.transform {
            self.transform = Transform::Log { base };
        }
    }

    fn negative(&self) -> bool {
        self.domain[0] < 0.0
    }

    pub fn apply(&self, x: f64) -> f64 {
        let neg = self.negative();
        let t0 = self.transform.forward(self.domain[0], neg);
        let t1 = self.transform.forward(self.domain[1], neg);
        let span = t1 - t0;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (self.transform.forward(x, neg) - t0) / span
        };
        self.range[0] + normalized * (self.range[1] - self.range[0])
    }

    pub fn invert(&self, y: f64) -> f64 {
        let neg = self.negative();
        let t0 = self.transform.forward(self.domain[0], neg);
        let t1 = self.transform.forward(self.domain[1], neg);
        let range_span = self.range[1] - self.range[0];
        let normalized = if range_span == 0.0 {
            0.5
        } else {
            (y - self.range[0]) / range_span
        };
        self.transform.backward(t0 + normalized * (t1 - t0), neg)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let [d0, d1] = self.domain;
        match self.transform {
            Transform::Log { base } => log_ticks(d0, d1, base, count),
            _ => ticks(d0, d1, count as f64),
        }
    }

    pub fn tick_format(&self, count: usize, specifier: Option<&str>) -> Result<TickFormatter> {
        let format = match specifier {
            Some(specifier) => parse_specifier(specifier)
                .ok_or_else(|| ScaleError::UnsupportedFormat(specifier.to_string()))?,
            None => {
                let step = tick_step(self.domain[0], self.domain[1], count as f64).abs();
                if step < 1e6 {
                    NumberFormat::Grouped
                } else {
                    NumberFormat::Si { precision: 3 }
                }
            }
        };
        Ok(TickFormatter::new(format, 0.0))
    }
}

/// Powers of the base, filled with integer multiples when the domain covers
/// only a few of them.
fn log_ticks(d0: f64, d1: f64, base: f64, count: usize) -> Vec<f64> {
    let (lo, hi) = (d0.min(d1), d0.max(d1));
    if !(lo > 0.0) || !hi.is_finite() || !(base > 1.0) {
        return ticks(lo, hi, count as f64);
    }
    let i = (lo.ln() / base.ln()).floor() as i32;
    let j = (hi.ln() / base.ln()).ceil() as i32;

    let mut values = Vec::new();
    if ((j - i) as usize) < count && base.fract() == 0.0 {
        for k in i..=j {
            let p = base.powi(k);
            for m in 1..base as u32 {
                let v = p * m as f64;
                if v >= lo && v <= hi {
                    values.push(v);
                }
            }
        }
    } else {
        for k in i..=j {
            let v = base.powi(k);
            if v >= lo && v <= hi {
                values.push(v);
            }
        }
    }
    if d1 < d0 {
        values.reverse();
    }
    values
}
