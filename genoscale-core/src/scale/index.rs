//! Index scale: a band-like continuous scale over integer indices.
//!
//! Items sit at integer positions and are centred inside their band through
//! `align`. Unlike a band scale the domain is numeric, so it can be zoomed and
//! panned like a linear scale.

use super::ticks::{tick_step, ticks, NumberFormat, TickFormatter};
use crate::error::{Result, ScaleError};

/// Domains narrower than this are widened around their centre.
pub const MIN_DOMAIN_SPAN: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct IndexScale {
    domain: [f64; 2],
    range: [f64; 2],
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
    numbering_offset: f64,
}

impl Default for IndexScale {
    fn default() -> Self {
        Self {
            domain: [0.0, 1.0],
            range: [0.0, 1.0],
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
            numbering_offset: 0.0,
        }
    }
}

impl IndexScale {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    /// Sets the domain to the extent of the two values, never narrower than
    /// [`MIN_DOMAIN_SPAN`].
    pub fn set_domain(&mut self, domain: [f64; 2]) {
        let mut lo = domain[0].min(domain[1]);
        let mut hi = domain[0].max(domain[1]);
        if hi - lo < MIN_DOMAIN_SPAN {
            let centroid = (lo + hi) / 2.0;
            lo = centroid - MIN_DOMAIN_SPAN / 2.0;
            hi = centroid + MIN_DOMAIN_SPAN / 2.0;
        }
        self.domain = [lo, hi];
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    pub fn set_range(&mut self, range: [f64; 2]) {
        self.range = range;
    }

    pub fn align(&self) -> f64 {
        self.align
    }

    pub fn set_align(&mut self, align: f64) {
        self.align = align.clamp(0.0, 1.0);
    }

    /// Sets the outer padding and the inner padding (capped at 1) at once.
    pub fn set_padding(&mut self, padding: f64) {
        self.padding_outer = padding;
        self.padding_inner = padding.min(1.0);
    }

    pub fn padding_inner(&self) -> f64 {
        self.padding_inner
    }

    pub fn set_padding_inner(&mut self, padding: f64) {
        self.padding_inner = padding.min(1.0);
    }

    pub fn padding_outer(&self) -> f64 {
        self.padding_outer
    }

    pub fn set_padding_outer(&mut self, padding: f64) {
        self.padding_outer = padding;
    }

    pub fn numbering_offset(&self) -> f64 {
        self.numbering_offset
    }

    pub fn set_numbering_offset(&mut self, offset: f64) {
        self.numbering_offset = offset;
    }

    fn domain_span(&self) -> f64 {
        self.domain[1] - self.domain[0]
    }

    fn range_span(&self) -> f64 {
        self.range[1] - self.range[0]
    }

    pub fn apply(&self, x: f64) -> f64 {
        ((x + self.align - self.domain[0]) / self.domain_span()) * self.range_span() + self.range[0]
    }

    pub fn invert(&self, y: f64) -> f64 {
        ((y - self.range[0]) / self.range_span()) * self.domain_span() + self.domain[0] - self.align
    }

    /// Range units per index
    pub fn step(&self) -> f64 {
        self.range_span() / self.domain_span()
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    fn tick_count(&self, count: usize) -> f64 {
        (count as f64).min(self.domain_span().ceil())
    }

    /// Integer-valued ticks whose bands are visible.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let offset = self.numbering_offset;
        ticks(
            self.domain[0] - self.align + offset,
            self.domain[1] - self.align + offset,
            self.tick_count(count),
        )
        .into_iter()
        .filter(|x| x.fract() == 0.0)
        .map(|x| x - offset)
        .collect()
    }

    pub(crate) fn tick_step(&self, count: usize) -> f64 {
        tick_step(self.domain[0], self.domain[1], self.tick_count(count))
    }

    /// Label formatter for the ticks. Small steps are thousands-grouped, large
    /// ones SI-prefixed.
    pub fn tick_format(&self, count: usize, specifier: Option<&str>) -> Result<TickFormatter> {
        if let Some(specifier) = specifier {
            return Err(ScaleError::UnsupportedFormat(specifier.to_string()));
        }
        let format = if self.tick_step(count) < 100_000.0 {
            NumberFormat::Grouped
        } else {
            NumberFormat::Si { precision: 3 }
        };
        Ok(TickFormatter::new(format, self.numbering_offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_domain_expands() {
        let mut scale = IndexScale::new();
        scale.set_domain([5.0, 5.0]);
        assert_eq!(scale.domain(), [4.5, 5.5]);

        scale.set_domain([10.0, 2.0]);
        assert_eq!(scale.domain(), [2.0, 10.0]);
    }

    #[test]
    fn test_mapping_includes_align() {
        let mut scale = IndexScale::new();
        scale.set_domain([0.0, 10.0]);
        scale.set_range([0.0, 100.0]);
        assert_eq!(scale.apply(0.0), 5.0);
        assert_eq!(scale.apply(9.0), 95.0);

        scale.set_align(0.0);
        assert_eq!(scale.apply(3.0), 30.0);
        assert_eq!(scale.invert(30.0), 3.0);

        scale.set_align(7.0);
        assert_eq!(scale.align(), 1.0);
    }

    #[test]
    fn test_invert_is_inverse() {
        let mut scale = IndexScale::new();
        scale.set_domain([-3.0, 17.0]);
        scale.set_range([20.0, 420.0]);
        for x in [-3.0, 0.25, 4.0, 16.5] {
            assert!((scale.invert(scale.apply(x)) - x).abs() < 1e-9);
        }
    }

    #[test]
    fn test_padding() {
        let mut scale = IndexScale::new();
        scale.set_padding(1.5);
        assert_eq!(scale.padding_outer(), 1.5);
        assert_eq!(scale.padding_inner(), 1.0);

        scale.set_padding(0.2);
        scale.set_domain([0.0, 10.0]);
        scale.set_range([0.0, 100.0]);
        assert_eq!(scale.step(), 10.0);
        assert!((scale.bandwidth() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_ticks_are_integers() {
        let mut scale = IndexScale::new();
        scale.set_domain([0.0, 10.0]);
        assert_eq!(scale.ticks(20), (0..=9).map(f64::from).collect::<Vec<_>>());

        scale.set_domain([0.0, 3.0]);
        assert_eq!(scale.ticks(10), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_numbering_offset_shifts_labels() {
        let mut scale = IndexScale::new();
        scale.set_numbering_offset(1.0);
        scale.set_domain([0.0, 10.0]);
        let ticks = scale.ticks(5);
        assert_eq!(ticks, vec![1.0, 3.0, 5.0, 7.0, 9.0]);

        let format = scale.tick_format(5, None).unwrap();
        assert_eq!(format.format(1.0), "2");
    }

    #[test]
    fn test_tick_format() {
        let mut scale = IndexScale::new();
        scale.set_domain([0.0, 5_000_000.0]);
        assert_eq!(scale.tick_format(10, None).unwrap().format(1_500_000.0), "1.50M");

        scale.set_domain([0.0, 50_000.0]);
        assert_eq!(scale.tick_format(10, None).unwrap().format(12_000.0), "12,000");

        assert_eq!(
            scale.tick_format(10, Some(".2f")).unwrap_err(),
            ScaleError::UnsupportedFormat(".2f".to_string())
        );
    }
}
