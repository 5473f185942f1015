/*!
# GenoScale Geometry Batches

Builds vertex buffers for genomic marks and decides, per frame, which slice of
each buffer is visible.

## Pipeline

1. A [`GeometryBuilder`] turns sorted data items into `bytemuck` vertices,
   one keyed batch (facet) after another, and feeds a binned x index per batch.
2. The finished [`GeometryBatch`] is uploaded as raw bytes.
3. At render time a [`DrawPlanner`] maps the shared x scale's domain to a
   vertex range through the batch's index.

Genomic x coordinates are split into two `f32` values (see [`precision`]) so
that base-pair resolution survives on whole-genome axes.
*/

pub mod batch;
pub mod draw;
pub mod precision;
pub mod vertex;

pub use batch::{BatchError, BatchKey, GeometryBatch, GeometryBuilder, RangeEntry};
pub use draw::{DrawPlanner, DrawRange};
pub use precision::{split_high_precision, Precision};
pub use vertex::{MarkGeometry, PointDatum, PointMark, PointVertex, RectDatum, RectMark, RectVertex};
