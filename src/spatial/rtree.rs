//! R-tree based spatial index using the rstar crate.
//!
//! Used by the physics step to find particles near the cursor without
//! testing the whole batch.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::graph::ParticleBatch;

/// A particle position in the spatial index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticlePoint {
    /// Index into the particle batch.
    pub index: u32,
    pub x: f32,
    pub y: f32,
}

impl RTreeObject for ParticlePoint {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for ParticlePoint {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over a particle batch.
///
/// Rebuilt by bulk load whenever positions change; batches are small enough
/// that a full rebuild per frame is cheaper than tracking moved points.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<ParticlePoint>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Rebuild the index from the batch's current positions.
    pub fn rebuild(&mut self, batch: &ParticleBatch) {
        let points = batch
            .positions_x()
            .iter()
            .zip(batch.positions_y())
            .enumerate()
            .map(|(i, (&x, &y))| ParticlePoint { index: i as u32, x, y })
            .collect();
        self.tree = RTree::bulk_load(points);
    }

    /// Indices of particles strictly closer than `radius` to `(x, y)`.
    pub fn in_radius(&self, x: f32, y: f32, radius: f32) -> Vec<u32> {
        let radius_sq = radius * radius;
        self.tree
            .locate_within_distance([x, y], radius_sq)
            .filter(|point| point.distance_2(&[x, y]) < radius_sq)
            .map(|point| point.index)
            .collect()
    }

    /// Number of indexed particles.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
