//! Choosing the vertex range to draw for the current x domain.

use genoscale_core::{Domain, Scale, ScaleType};
use serde::Serialize;

use crate::batch::RangeEntry;

/// A contiguous slice of the vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrawRange {
    pub offset: u32,
    pub count: u32,
}

/// Maps the visible domain to a draw range per batch entry. Batches without
/// an index, or with a non-continuous x scale, are drawn whole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPlanner {
    continuous: bool,
    domain_start_offset: f64,
}

impl DrawPlanner {
    pub fn new(scale_type: Option<ScaleType>) -> Self {
        let continuous = scale_type.is_some_and(ScaleType::is_continuous);
        // Index and locus items start at integer positions but occupy the
        // whole band up to the next position.
        let domain_start_offset = match scale_type {
            Some(ScaleType::Index | ScaleType::Locus) => -1.0,
            _ => 0.0,
        };
        Self {
            continuous,
            domain_start_offset,
        }
    }

    pub fn for_scale(scale: Option<&Scale>) -> Self {
        Self::new(scale.map(Scale::scale_type))
    }

    /// `None` when nothing in the entry is visible.
    pub fn plan(&self, entry: &RangeEntry, domain: &Domain) -> Option<DrawRange> {
        let indexed = match domain.as_interval() {
            Some([lo, hi]) if self.continuous => entry.x_index.lookup(lo + self.domain_start_offset, hi),
            _ => None,
        };

        let range = match indexed {
            Some(vertices) => DrawRange {
                offset: vertices.start,
                count: vertices.len(),
            },
            None => DrawRange {
                offset: entry.offset,
                count: entry.count,
            },
        };
        (range.count > 0).then_some(range)
    }
}
