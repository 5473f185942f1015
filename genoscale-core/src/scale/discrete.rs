//! Categorical scales: ordinal lookups and band/point layouts.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
struct Categories {
    values: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Categories {
    fn set(&mut self, values: impl IntoIterator<Item = String>) {
        self.values.clear();
        self.positions.clear();
        for value in values {
            self.push(value);
        }
    }

    fn push(&mut self, value: String) -> usize {
        if let Some(&i) = self.positions.get(&value) {
            return i;
        }
        let i = self.values.len();
        self.positions.insert(value.clone(), i);
        self.values.push(value);
        i
    }

    fn position(&self, value: &str) -> Option<usize> {
        self.positions.get(value).copied()
    }
}

/// Maps categories to range values by position, cycling through the range.
///
/// With an implicit domain, unseen categories are appended on first use.
/// Scale resolution turns this off, so lookups never mutate the domain there.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale {
    domain: Categories,
    range: Vec<f64>,
    implicit: bool,
}

impl Default for OrdinalScale {
    fn default() -> Self {
        Self {
            domain: Categories::default(),
            range: Vec::new(),
            implicit: true,
        }
    }
}

impl OrdinalScale {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain(&self) -> &[String] {
        &self.domain.values
    }

    pub fn set_domain(&mut self, values: impl IntoIterator<Item = String>) {
        self.domain.set(values);
    }

    pub fn range(&self) -> &[f64] {
        &self.range
    }

    pub fn set_range(&mut self, range: Vec<f64>) {
        self.range = range;
    }

    pub fn is_implicit(&self) -> bool {
        self.implicit
    }

    pub fn set_implicit(&mut self, implicit: bool) {
        self.implicit = implicit;
    }

    /// Looks up a category without touching the domain.
    pub fn get(&self, value: &str) -> Option<f64> {
        let i = self.domain.position(value)?;
        self.range_at(i)
    }

    /// Looks up a category, growing an implicit domain when needed.
    pub fn map(&mut self, value: &str) -> Option<f64> {
        let i = match self.domain.position(value) {
            Some(i) => i,
            None if self.implicit => self.domain.push(value.to_string()),
            None => return None,
        };
        self.range_at(i)
    }

    fn range_at(&self, i: usize) -> Option<f64> {
        if self.range.is_empty() {
            None
        } else {
            Some(self.range[i % self.range.len()])
        }
    }
}

/// Evenly spaced bands over a continuous range. A point scale is a band scale
/// whose inner padding is fixed at 1, collapsing every band to a point.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Categories,
    range: [f64; 2],
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    point: bool,
    step: f64,
    bandwidth: f64,
    positions: Vec<f64>,
}

impl BandScale {
    pub fn band() -> Self {
        let mut scale = Self {
            domain: Categories::default(),
            range: [0.0, 1.0],
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            point: false,
            step: 1.0,
            bandwidth: 1.0,
            positions: Vec::new(),
        };
        scale.rescale();
        scale
    }

    pub fn point() -> Self {
        let mut scale = Self::band();
        scale.point = true;
        scale.padding_inner = 1.0;
        scale.rescale();
        scale
    }

    pub fn is_point(&self) -> bool {
        self.point
    }

    pub fn domain(&self) -> &[String] {
        &self.domain.values
    }

    pub fn set_domain(&mut self, values: impl IntoIterator<Item = String>) {
        self.domain.set(values);
        self.rescale();
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    pub fn set_range(&mut self, range: [f64; 2]) {
        self.range = range;
        self.rescale();
    }

    pub fn set_padding(&mut self, padding: f64) {
        self.padding_outer = padding;
        if !self.point {
            self.padding_inner = padding.min(1.0);
        }
        self.rescale();
    }

    pub fn set_padding_inner(&mut self, padding: f64) {
        if !self.point {
            self.padding_inner = padding.min(1.0);
            self.rescale();
        }
    }

    pub fn set_padding_outer(&mut self, padding: f64) {
        self.padding_outer = padding;
        self.rescale();
    }

    pub fn padding_inner(&self) -> f64 {
        self.padding_inner
    }

    pub fn padding_outer(&self) -> f64 {
        self.padding_outer
    }

    pub fn set_align(&mut self, align: f64) {
        self.align = align.clamp(0.0, 1.0);
        self.rescale();
    }

    pub fn align(&self) -> f64 {
        self.align
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Start of the category's band, or the point itself
    pub fn get(&self, value: &str) -> Option<f64> {
        self.domain.position(value).map(|i| self.positions[i])
    }

    fn rescale(&mut self) {
        let n = self.domain.values.len() as f64;
        let reverse = self.range[1] < self.range[0];
        let (mut start, stop) = if reverse {
            (self.range[1], self.range[0])
        } else {
            (self.range[0], self.range[1])
        };

        self.step = (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        start += (stop - start - self.step * (n - self.padding_inner)) * self.align;
        self.bandwidth = self.step * (1.0 - self.padding_inner);

        let step = self.step;
        self.positions = (0..self.domain.values.len())
            .map(|i| start + step * i as f64)
            .collect();
        if reverse {
            self.positions.reverse();
        }
    }
}
