//! Spatial indexing for cursor proximity queries.
//!
//! This module provides an R-tree based spatial index over particle
//! positions, used to find repulsion candidates around the pointer.

mod rtree;

pub use rtree::SpatialIndex;
