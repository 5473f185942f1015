//! Binned range index for sorted geometry batches.
//!
//! Ranges (or points) are fed in start order together with the vertex
//! interval each one produced. The index divides the domain into a fixed number
//! of buckets and records, per bucket, the smallest start vertex and the largest
//! end vertex of anything overlapping it. A lookup then returns a conservative
//! vertex interval for a visible window without scanning the data.
//!
//! Feeding items out of order disables the index: [`RangeBinIndexer::finish`]
//! returns [`RangeIndex::Unavailable`] and callers draw the whole batch.

const UNSET: u32 = u32::MAX;

/// Half-open interval of vertex offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VertexRange {
    pub start: u32,
    pub end: u32,
}

impl VertexRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

#[derive(Debug, Clone)]
pub struct RangeBinIndexer {
    size: usize,
    domain_start: f64,
    divisor: f64,
    start_indices: Vec<u32>,
    end_indices: Vec<u32>,
    last_pos: f64,
    last_vertex: u32,
    ordered: bool,
    usable: bool,
}

impl RangeBinIndexer {
    /// Creates an indexer with `size` buckets over `domain`. A zero-width or
    /// non-finite domain yields an indexer whose result is unavailable.
    pub fn new(size: usize, domain: [f64; 2]) -> Self {
        let span = domain[1] - domain[0];
        let usable = size > 0 && span.is_finite() && span > 0.0 && domain[0].is_finite();
        Self {
            size,
            domain_start: domain[0],
            divisor: if usable { span / size as f64 } else { 1.0 },
            start_indices: vec![UNSET; size],
            end_indices: vec![0; size],
            last_pos: f64::NEG_INFINITY,
            last_vertex: 0,
            ordered: true,
            usable,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    fn bin(&self, pos: f64) -> usize {
        bin_of(pos, self.domain_start, self.divisor, self.size)
    }

    /// Last bucket touched by a range ending at `end` (exclusive)
    fn end_bin(&self, end: f64, start_bin: usize) -> usize {
        let upper = ((end - self.domain_start) / self.divisor).ceil() - 1.0;
        let upper = upper.clamp(0.0, (self.size - 1) as f64) as usize;
        upper.max(start_bin)
    }

    fn check_order(&mut self, pos: f64, start_vertex: u32) {
        if !self.ordered {
            return;
        }
        if pos < self.last_pos || start_vertex < self.last_vertex {
            self.ordered = false;
            log::debug!("Items are not ordered properly. Disabling binned index.");
            return;
        }
        self.last_pos = pos;
        self.last_vertex = start_vertex;
    }

    /// Records a range `[start, end)` that produced vertices
    /// `[start_vertex, end_vertex)`.
    pub fn add_range(&mut self, start: f64, end: f64, start_vertex: u32, end_vertex: u32) {
        self.check_order(start, start_vertex);
        if !self.ordered || !self.usable {
            return;
        }

        let start_bin = self.bin(start);
        let end_bin = if end > start {
            self.end_bin(end, start_bin)
        } else {
            start_bin
        };

        for bin in start_bin..=end_bin {
            if self.start_indices[bin] > start_vertex {
                self.start_indices[bin] = start_vertex;
            }
            if self.end_indices[bin] < end_vertex {
                self.end_indices[bin] = end_vertex;
            }
        }
    }

    pub fn add_point(&mut self, pos: f64, start_vertex: u32, end_vertex: u32) {
        self.add_range(pos, pos, start_vertex, end_vertex);
    }

    /// Finalizes the buckets. End indices become a running maximum; start
    /// indices a running minimum from the right, with trailing empty buckets
    /// pointing at the end of the data.
    pub fn finish(mut self) -> RangeIndex {
        if !self.ordered || !self.usable {
            return RangeIndex::Unavailable;
        }

        for i in 1..self.size {
            if self.end_indices[i] < self.end_indices[i - 1] {
                self.end_indices[i] = self.end_indices[i - 1];
            }
        }

        let mut tail = true;
        for i in (0..self.size).rev() {
            if tail && self.start_indices[i] == UNSET {
                self.start_indices[i] = self.end_indices[i];
            } else {
                tail = false;
            }
            if i + 1 < self.size && self.start_indices[i] > self.start_indices[i + 1] {
                self.start_indices[i] = self.start_indices[i + 1];
            }
        }

        RangeIndex::Available(BinnedIndex {
            size: self.size,
            domain_start: self.domain_start,
            divisor: self.divisor,
            start_indices: self.start_indices,
            end_indices: self.end_indices,
        })
    }
}

fn bin_of(pos: f64, domain_start: f64, divisor: f64, size: usize) -> usize {
    let bin = ((pos - domain_start) / divisor).floor();
    bin.clamp(0.0, (size - 1) as f64) as usize
}

/// A finalized, immutable bucket table
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedIndex {
    size: usize,
    domain_start: f64,
    divisor: f64,
    start_indices: Vec<u32>,
    end_indices: Vec<u32>,
}

impl BinnedIndex {
    /// Vertex interval covering every item that overlaps `[start, end]`.
    pub fn lookup(&self, start: f64, end: f64) -> VertexRange {
        let first = self.start_indices[bin_of(start, self.domain_start, self.divisor, self.size)];
        let last = self.end_indices[bin_of(end, self.domain_start, self.divisor, self.size)];
        VertexRange::new(first, last.max(first))
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RangeIndex {
    Available(BinnedIndex),
    Unavailable,
}

impl RangeIndex {
    pub fn is_available(&self) -> bool {
        matches!(self, RangeIndex::Available(_))
    }

    pub fn lookup(&self, start: f64, end: f64) -> Option<VertexRange> {
        match self {
            RangeIndex::Available(index) => Some(index.lookup(start, end)),
            RangeIndex::Unavailable => None,
        }
    }
}

/// Indexes sorted items that each emit `vertex_count(item)` consecutive vertices.
pub fn index_ranges<T, S, E, V>(
    size: usize,
    domain: [f64; 2],
    items: &[T],
    start: S,
    end: E,
    vertex_count: V,
) -> RangeIndex
where
    S: Fn(&T) -> f64,
    E: Fn(&T) -> f64,
    V: Fn(&T) -> u32,
{
    let mut indexer = RangeBinIndexer::new(size, domain);
    let mut offset = 0u32;
    for item in items {
        let count = vertex_count(item);
        indexer.add_range(start(item), end(item), offset, offset + count);
        offset += count;
    }
    indexer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_index(points: &[f64]) -> RangeIndex {
        index_ranges(10, [0.0, 100.0], points, |&x| x, |&x| x, |_| 2)
    }

    #[test]
    fn test_point_lookup() {
        let index = point_index(&[0.0, 1.0, 4.0, 10.0, 35.0, 35.0, 36.0, 80.0]);
        assert_eq!(index.lookup(0.0, 1.0), Some(VertexRange::new(0, 6)));
        assert_eq!(index.lookup(90.0, 100.0), Some(VertexRange::new(16, 16)));
        assert_eq!(index.lookup(30.0, 40.0), Some(VertexRange::new(8, 14)));
        assert_eq!(index.lookup(-50.0, 500.0), Some(VertexRange::new(0, 16)));
    }

    #[test]
    fn test_empty_middle_buckets_inherit_next_start() {
        let index = point_index(&[0.0, 80.0]);
        assert_eq!(index.lookup(40.0, 60.0), Some(VertexRange::new(2, 2)));
    }

    #[test]
    fn test_ranges_cover_spanned_buckets() {
        let ranges = [(0.0, 30.0), (5.0, 8.0), (50.0, 60.0)];
        let index = index_ranges(10, [0.0, 100.0], &ranges, |r| r.0, |r| r.1, |_| 6);
        // the first range reaches into bucket 2
        assert_eq!(index.lookup(25.0, 26.0), Some(VertexRange::new(0, 12)));
        // [50, 60) stays out of bucket 6
        assert_eq!(index.lookup(60.0, 70.0), Some(VertexRange::new(18, 18)));
    }

    #[test]
    fn test_disorder_disables_index() {
        let index = point_index(&[10.0, 5.0]);
        assert_eq!(index, RangeIndex::Unavailable);
        assert_eq!(index.lookup(0.0, 100.0), None);

        let mut indexer = RangeBinIndexer::new(10, [0.0, 100.0]);
        indexer.add_point(1.0, 4, 6);
        indexer.add_point(2.0, 0, 2);
        assert!(!indexer.is_ordered());
        assert!(!indexer.finish().is_available());
    }

    #[test]
    fn test_degenerate_domain_is_unavailable() {
        let mut indexer = RangeBinIndexer::new(10, [5.0, 5.0]);
        indexer.add_point(5.0, 0, 2);
        assert_eq!(indexer.finish(), RangeIndex::Unavailable);
        assert!(!RangeBinIndexer::new(0, [0.0, 1.0]).finish().is_available());
    }

    #[test]
    fn test_vertex_range() {
        let range = VertexRange::new(4, 10);
        assert_eq!(range.len(), 6);
        assert!(!range.is_empty());
        assert!(VertexRange::new(3, 3).is_empty());
    }
}
