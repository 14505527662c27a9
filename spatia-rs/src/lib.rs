#![doc = document_features::document_features!()]
//! Qualitative spatial relations between 2D shapes, on the Euclidean plane and on the sphere.
//!
//! Every pair of shapes relates as one of [`SpatialRelation`](geometry::geo_enums::SpatialRelation)'s
//! four variants. Shapes are created through a [`SpatialContext`](context::SpatialContext),
//! which decides the coordinate model (planar or geodetic), validates coordinates and supplies
//! the [`DistanceCalculator`](distance::DistanceCalculator) used by circles.

/// The factory through which all shapes are created and validated
pub mod context;

/// Distance, bearing, bounding box and area formulas per coordinate model
pub mod distance;

/// Shapes, their relations and the algorithms to compute them
pub mod geometry;

/// Importing shapes from and exporting shapes to external (serializable) representations
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
