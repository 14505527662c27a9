mod cartesian;
mod geodesic;
pub mod units;

#[doc(inline)]
pub use cartesian::CartesianDistance;
#[doc(inline)]
pub use geodesic::{GeodesicSphereDistance, SphereFormula};
pub use geodesic::{
    calc_box_by_dist_from_pt_deg, calc_box_by_dist_from_pt_lat_horiz_axis_deg,
    dist_haversine_rad, dist_law_of_cosines_rad, dist_vincenty_rad, point_on_bearing_rad,
};

use crate::context::SpatialContext;
use crate::geometry::primitives::{Point, Rect};

/// Distance, bearing, bounding box and area formulas of a coordinate model.
///
/// All distances are expressed in the unit of the coordinates:
/// degrees of arc on the sphere, unitless on the plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceCalculator {
    Cartesian(CartesianDistance),
    GeodesicSphere(GeodesicSphereDistance),
}

impl DistanceCalculator {
    pub const CARTESIAN: Self = DistanceCalculator::Cartesian(CartesianDistance { squared: false });
    pub const CARTESIAN_SQUARED: Self =
        DistanceCalculator::Cartesian(CartesianDistance { squared: true });
    pub const HAVERSINE: Self = DistanceCalculator::GeodesicSphere(GeodesicSphereDistance {
        formula: SphereFormula::Haversine,
    });
    pub const LAW_OF_COSINES: Self = DistanceCalculator::GeodesicSphere(GeodesicSphereDistance {
        formula: SphereFormula::LawOfCosines,
    });
    pub const VINCENTY: Self = DistanceCalculator::GeodesicSphere(GeodesicSphereDistance {
        formula: SphereFormula::Vincenty,
    });

    pub fn is_geodesic(&self) -> bool {
        matches!(self, DistanceCalculator::GeodesicSphere(_))
    }

    pub fn distance(&self, from: Point, to: Point) -> f64 {
        self.distance_xy(from, to.x(), to.y())
    }

    pub fn distance_xy(&self, from: Point, x: f64, y: f64) -> f64 {
        match self {
            DistanceCalculator::Cartesian(c) => c.distance(from, x, y),
            DistanceCalculator::GeodesicSphere(g) => g.distance(from, x, y),
        }
    }

    /// Unsquared distance, regardless of [`CartesianDistance::squared`].
    /// Relations that add distances together need this one.
    pub fn metric_distance(&self, from: Point, to: Point) -> f64 {
        match self {
            DistanceCalculator::Cartesian(c) if c.squared => c.distance(from, to.x(), to.y()).sqrt(),
            _ => self.distance(from, to),
        }
    }

    /// Whether (`x`, `y`) lies within `distance` of `from`, boundary included.
    pub fn within(&self, from: Point, x: f64, y: f64, distance: f64) -> bool {
        match self {
            DistanceCalculator::Cartesian(c) => c.within(from, x, y, distance),
            DistanceCalculator::GeodesicSphere(g) => g.within(from, x, y, distance),
        }
    }

    /// Point reached from `from` after `dist` along the bearing `bearing_deg` (0 = north, 90 = east).
    ///
    /// A zero `dist` returns `from` unchanged. On the sphere the result is normalized
    /// to a longitude in [-180, 180) and a latitude in [-90, 90].
    pub fn point_on_bearing(&self, from: Point, dist: f64, bearing_deg: f64) -> Point {
        match self {
            DistanceCalculator::Cartesian(c) => c.point_on_bearing(from, dist, bearing_deg),
            DistanceCalculator::GeodesicSphere(g) => g.point_on_bearing(from, dist, bearing_deg),
        }
    }

    /// Smallest rectangle enclosing every point within `dist` of `from`.
    pub fn calc_box_by_dist_from_pt(&self, from: Point, dist: f64, ctx: &SpatialContext) -> Rect {
        match self {
            DistanceCalculator::Cartesian(c) => c.calc_box_by_dist_from_pt(from, dist, ctx),
            DistanceCalculator::GeodesicSphere(g) => g.calc_box_by_dist_from_pt(from, dist),
        }
    }

    /// Y coordinate at which the circle of `dist` around `from` is widest.
    pub fn calc_box_by_dist_from_pt_y_horiz_axis(&self, from: Point, dist: f64) -> f64 {
        match self {
            DistanceCalculator::Cartesian(_) => from.y(),
            DistanceCalculator::GeodesicSphere(_) => {
                calc_box_by_dist_from_pt_lat_horiz_axis_deg(from.y(), dist)
            }
        }
    }

    pub fn area_rect(&self, rect: &Rect) -> f64 {
        match self {
            DistanceCalculator::Cartesian(c) => c.area_rect(rect),
            DistanceCalculator::GeodesicSphere(g) => g.area_rect(rect),
        }
    }

    pub fn area_circle(&self, radius: f64) -> f64 {
        match self {
            DistanceCalculator::Cartesian(c) => c.area_circle(radius),
            DistanceCalculator::GeodesicSphere(g) => g.area_circle(radius),
        }
    }
}
