use std::hash::{Hash, Hasher};

use crate::context::SpatialContext;
use crate::geometry::any_shape::AnyShape;
use crate::geometry::geo_enums::SpatialRelation;
use crate::geometry::geo_traits::{Relate, Shape};
use crate::geometry::primitives::Rect;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Geometric primitive representing a point.
/// A NaN x coordinate marks the empty point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub const EMPTY: Point = Point(f64::NAN, f64::NAN);

    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }

    /// Overwrites the coordinates in place, avoiding a new allocation in hot loops.
    pub fn reset(&mut self, x: f64, y: f64) {
        debug_assert!(!x.is_nan(), "resetting to the empty point");
        self.0 = x;
        self.1 = y;
    }

    /// Euclidean distance, ignoring the coordinate model.
    pub fn distance(&self, other: &Point) -> f64 {
        self.sq_distance(other).sqrt()
    }

    pub fn sq_distance(&self, other: &Point) -> f64 {
        (self.0 - other.0).powi(2) + (self.1 - other.1).powi(2)
    }
}

impl Relate<Point> for Point {
    fn relate(&self, other: &Point, _ctx: &SpatialContext) -> SpatialRelation {
        match !self.is_empty() && self == other {
            true => SpatialRelation::Contains,
            false => SpatialRelation::Disjoint,
        }
    }
}

impl Shape for Point {
    fn bbox(&self) -> Rect {
        Rect::from_point(*self)
    }

    fn center(&self) -> Point {
        *self
    }

    fn area(&self, _ctx: &SpatialContext) -> f64 {
        0.0
    }

    fn has_area(&self) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        self.0.is_nan()
    }

    fn buffered(&self, distance: f64, ctx: &SpatialContext) -> Result<AnyShape> {
        ctx.make_circle(*self, distance)
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        //adding 0.0 folds -0.0 into 0.0, which compare equal
        let x = (self.0 + 0.0).to_bits();
        let y = (self.1 + 0.0).to_bits();
        x.hash(state);
        y.hash(state);
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.0, p.1)
    }
}

impl From<(f64, f64)> for Point {
    fn from(p: (f64, f64)) -> Self {
        Point(p.0, p.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_relate_by_equality() {
        let ctx = SpatialContext::cartesian();
        let p = Point(1.0, 2.0);
        assert_eq!(p.relate(&Point(1.0, 2.0), &ctx), SpatialRelation::Contains);
        assert_eq!(p.relate(&Point(1.0, 2.5), &ctx), SpatialRelation::Disjoint);
        assert_eq!(
            Point::EMPTY.relate(&Point::EMPTY, &ctx),
            SpatialRelation::Disjoint
        );
    }

    #[test]
    fn empty_point() {
        assert!(Point::EMPTY.is_empty());
        assert!(!Point(0.0, f64::NAN).is_empty());
        assert!(Point::EMPTY.bbox().is_empty());
        assert!(!Point(3.0, 4.0).has_area());
    }

    #[test]
    fn negative_zero_hashes_like_zero() {
        use std::collections::HashSet;
        let set: HashSet<Point> = [Point(0.0, -0.0), Point(-0.0, 0.0)].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn buffered_point_is_a_circle() {
        let ctx = SpatialContext::cartesian();
        let buffered = Point(1.0, 1.0).buffered(2.0, &ctx).unwrap();
        match buffered {
            AnyShape::Circle(c) => {
                assert_eq!(c.center(), Point(1.0, 1.0));
                assert_eq!(c.radius(), 2.0);
            }
            other => panic!("expected a circle, got {other:?}"),
        }
    }
}
