//! Vertex layouts and the marks that emit them.

use bytemuck::{Pod, Zeroable};

use crate::precision::Precision;

/// One vertex per point, drawn as `POINTS`
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub x: [f32; 2],
    pub y: f32,
    pub size: f32,
}

/// Six vertices per rect in a triangle strip. The first and last are
/// duplicated to produce degenerate triangles between rects.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct RectVertex {
    pub x: [f32; 2],
    pub x2: [f32; 2],
    pub y: f32,
    pub y2: f32,
    /// Position of the vertex within the rect
    pub frac: [f32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointDatum {
    pub x: f64,
    pub y: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectDatum {
    pub x: f64,
    pub x2: f64,
    pub y: f32,
    pub y2: f32,
}

/// Turns data items into vertices. `x` and `x2` give the item's extent on the
/// continuous x axis; items must arrive sorted by `x` for the batch to be
/// indexed.
pub trait MarkGeometry {
    type Item;
    type Vertex: Pod;

    fn x(&self, item: &Self::Item) -> f64;

    fn x2(&self, item: &Self::Item) -> f64 {
        self.x(item)
    }

    /// Whether the x channel is continuous and can be indexed
    fn indexable(&self) -> bool {
        true
    }

    fn push_vertices(&self, item: &Self::Item, out: &mut Vec<Self::Vertex>);
}

#[derive(Debug, Clone, Copy)]
pub struct PointMark {
    pub precision: Precision,
}

impl MarkGeometry for PointMark {
    type Item = PointDatum;
    type Vertex = PointVertex;

    fn x(&self, item: &PointDatum) -> f64 {
        item.x
    }

    fn push_vertices(&self, item: &PointDatum, out: &mut Vec<PointVertex>) {
        out.push(PointVertex {
            x: self.precision.encode(item.x),
            y: item.y,
            size: item.size,
        });
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RectMark {
    pub precision: Precision,
    /// Rects entirely outside are skipped, the rest truncated to it
    pub visible_range: [f64; 2],
}

impl RectMark {
    pub fn new(precision: Precision) -> Self {
        Self {
            precision,
            visible_range: [f64::NEG_INFINITY, f64::INFINITY],
        }
    }
}

impl MarkGeometry for RectMark {
    type Item = RectDatum;
    type Vertex = RectVertex;

    fn x(&self, item: &RectDatum) -> f64 {
        item.x
    }

    fn x2(&self, item: &RectDatum) -> f64 {
        item.x2
    }

    fn push_vertices(&self, item: &RectDatum, out: &mut Vec<RectVertex>) {
        let (mut x, mut x2) = if item.x > item.x2 {
            (item.x2, item.x)
        } else {
            (item.x, item.x2)
        };
        let [lower, upper] = self.visible_range;
        if x2 < lower || x > upper {
            return;
        }
        x = x.max(lower);
        x2 = x2.min(upper);

        let (y, y2) = if item.y > item.y2 {
            (item.y2, item.y)
        } else {
            (item.y, item.y2)
        };

        let vertex = |frac: [f32; 2]| RectVertex {
            x: self.precision.encode(x),
            x2: self.precision.encode(x2),
            y,
            y2,
            frac,
        };

        out.push(vertex([0.0, 0.0]));
        for side in [0.0, 1.0] {
            out.push(vertex([side, 0.0]));
            out.push(vertex([side, 1.0]));
        }
        out.push(vertex([1.0, 1.0]));
    }
}
