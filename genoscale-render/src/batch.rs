//! Geometry batches: one vertex buffer shared by several keyed sub-ranges
//! (facets), each with its own binned x index.

use std::collections::HashMap;

use genoscale_core::binning::{RangeBinIndexer, RangeIndex};
use genoscale_core::EngineConfig;
use thiserror::Error;

use crate::vertex::MarkGeometry;

/// Facet key. `None` is the unfaceted batch.
pub type BatchKey = Option<String>;

#[derive(Debug, Error, PartialEq)]
pub enum BatchError {
    #[error("Vertex buffer exceeds {} vertices", u32::MAX)]
    TooManyVertices,
}

/// Location of a batch in the vertex buffer
#[derive(Debug, Clone, PartialEq)]
pub struct RangeEntry {
    pub offset: u32,
    pub count: u32,
    pub x_index: RangeIndex,
}

pub struct GeometryBuilder<G: MarkGeometry> {
    geometry: G,
    bin_count: usize,
    vertices: Vec<G::Vertex>,
    ranges: HashMap<BatchKey, RangeEntry>,
    last_offset: usize,
}

impl<G: MarkGeometry> GeometryBuilder<G> {
    pub fn new(geometry: G, config: &EngineConfig) -> Self {
        Self {
            geometry,
            bin_count: config.bin_count,
            vertices: Vec::new(),
            ranges: HashMap::new(),
            last_offset: 0,
        }
    }

    pub fn with_capacity(mut self, vertices: usize) -> Self {
        self.vertices.reserve(vertices);
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Emits vertices for `items` and registers them under `key`. Batches
    /// that produce no vertices are not registered.
    pub fn add_batch(&mut self, key: BatchKey, items: &[G::Item]) -> Result<(), BatchError> {
        let mut indexer = self.prepare_x_indexer(items);
        let mut last_count = to_u32(self.vertices.len())?;

        for item in items {
            self.geometry.push_vertices(item, &mut self.vertices);
            let count = to_u32(self.vertices.len())?;
            if let Some(indexer) = indexer.as_mut() {
                if count > last_count {
                    indexer.add_range(self.geometry.x(item), self.geometry.x2(item), last_count, count);
                }
            }
            last_count = count;
        }

        self.register_batch(key, indexer)
    }

    pub fn add_batches<'a, I>(&mut self, batches: I) -> Result<(), BatchError>
    where
        I: IntoIterator<Item = (BatchKey, &'a [G::Item])>,
        G::Item: 'a,
    {
        for (key, items) in batches {
            self.add_batch(key, items)?;
        }
        Ok(())
    }

    /// The x extent is taken from the first item's start and the last item's
    /// end. Zero-width extents get no index.
    fn prepare_x_indexer(&self, items: &[G::Item]) -> Option<RangeBinIndexer> {
        if !self.geometry.indexable() {
            return None;
        }
        let (first, last) = (items.first()?, items.last()?);
        let domain = [self.geometry.x(first), self.geometry.x2(last)];
        if domain[1] > domain[0] {
            Some(RangeBinIndexer::new(self.bin_count, domain))
        } else {
            None
        }
    }

    fn register_batch(&mut self, key: BatchKey, indexer: Option<RangeBinIndexer>) -> Result<(), BatchError> {
        let offset = self.last_offset;
        let end = self.vertices.len();
        if end > offset {
            let x_index = indexer.map_or(RangeIndex::Unavailable, RangeBinIndexer::finish);
            if !x_index.is_available() {
                log::debug!("Batch {:?} has no x index", key);
            }
            self.ranges.insert(
                key,
                RangeEntry {
                    offset: to_u32(offset)?,
                    count: to_u32(end - offset)?,
                    x_index,
                },
            );
        }
        self.last_offset = end;
        Ok(())
    }

    pub fn finish(self) -> GeometryBatch<G::Vertex> {
        GeometryBatch {
            vertices: self.vertices,
            ranges: self.ranges,
        }
    }
}

fn to_u32(n: usize) -> Result<u32, BatchError> {
    u32::try_from(n).map_err(|_| BatchError::TooManyVertices)
}

#[derive(Debug, Clone)]
pub struct GeometryBatch<V> {
    vertices: Vec<V>,
    ranges: HashMap<BatchKey, RangeEntry>,
}

impl<V: bytemuck::Pod> GeometryBatch<V> {
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Raw vertex data for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn range(&self, key: &BatchKey) -> Option<&RangeEntry> {
        self.ranges.get(key)
    }

    pub fn ranges(&self) -> impl Iterator<Item = (&BatchKey, &RangeEntry)> {
        self.ranges.iter()
    }

    /// Unfaceted data is drawn for every facet. Otherwise the facet's own
    /// entry is used.
    pub fn entry_for(&self, facet: Option<&str>) -> Option<&RangeEntry> {
        match self.ranges.get(&None) {
            Some(entry) if entry.count > 0 => Some(entry),
            _ => self.ranges.get(&facet.map(str::to_string)),
        }
    }
}
