use crate::context::SpatialContext;
use crate::geometry::primitives::{Point, Rect};
use std::f64::consts::PI;

/// Euclidean distance on the plane.
///
/// With `squared` set, [`CartesianDistance::distance`] omits the square root.
/// Only useful to sort by distance, all other operations are unaffected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CartesianDistance {
    pub squared: bool,
}

impl CartesianDistance {
    pub fn distance(&self, from: Point, x: f64, y: f64) -> f64 {
        let sq = sq_distance(from, x, y);
        match self.squared {
            true => sq,
            false => sq.sqrt(),
        }
    }

    pub fn within(&self, from: Point, x: f64, y: f64, distance: f64) -> bool {
        debug_assert!(distance >= 0.0 || distance.is_nan());
        sq_distance(from, x, y) <= distance * distance
    }

    pub fn point_on_bearing(&self, from: Point, dist: f64, bearing_deg: f64) -> Point {
        if dist == 0.0 {
            return from;
        }
        let bearing_rad = bearing_deg.to_radians();
        Point(
            from.x() + bearing_rad.sin() * dist,
            from.y() + bearing_rad.cos() * dist,
        )
    }

    /// Square around `from`, clipped to the world bounds of `ctx`.
    pub fn calc_box_by_dist_from_pt(&self, from: Point, dist: f64, ctx: &SpatialContext) -> Rect {
        let bounds = ctx.world_bounds();
        Rect::new(
            f64::max(bounds.min_x(), from.x() - dist),
            f64::min(bounds.max_x(), from.x() + dist),
            f64::max(bounds.min_y(), from.y() - dist),
            f64::min(bounds.max_y(), from.y() + dist),
        )
    }

    pub fn area_rect(&self, rect: &Rect) -> f64 {
        rect.width() * rect.height()
    }

    pub fn area_circle(&self, radius: f64) -> f64 {
        PI * radius * radius
    }
}

fn sq_distance(from: Point, x: f64, y: f64) -> f64 {
    let (dx, dy) = (from.x() - x, from.y() - y);
    dx * dx + dy * dy
}
