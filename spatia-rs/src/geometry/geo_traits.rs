use crate::context::SpatialContext;
use crate::geometry::any_shape::AnyShape;
use crate::geometry::geo_enums::SpatialRelation;
use crate::geometry::primitives::{Point, Rect};
use anyhow::Result;

/// Trait for types that can compute their [`SpatialRelation`] to `T`.
///
/// `self` and `other` must have been created by the same [`SpatialContext`] as `ctx`.
pub trait Relate<T> {
    fn relate(&self, other: &T, ctx: &SpatialContext) -> SpatialRelation;
}

/// Trait for shared properties of shapes.
pub trait Shape {
    /// Smallest enclosing axis-aligned rectangle, [`Rect::EMPTY`] for an empty shape
    fn bbox(&self) -> Rect;

    /// Center of the shape, [`Point::EMPTY`] for an empty shape
    fn center(&self) -> Point;

    /// Area of the interior of the shape, in square degrees on the sphere
    fn area(&self, ctx: &SpatialContext) -> f64;

    /// Whether the shape has a non-zero area
    fn has_area(&self) -> bool;

    /// Whether this is the empty shape, which is disjoint from everything
    fn is_empty(&self) -> bool;

    /// Shape grown by `distance` in every direction
    fn buffered(&self, distance: f64, ctx: &SpatialContext) -> Result<AnyShape>;
}
