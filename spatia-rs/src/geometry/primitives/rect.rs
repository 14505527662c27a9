use crate::context::SpatialContext;
use crate::distance::units::{calc_box_by_dist_from_pt_delta_lon_deg, norm_lon_deg};
use crate::geometry::any_shape::AnyShape;
use crate::geometry::geo_enums::SpatialRelation;
use crate::geometry::geo_traits::{Relate, Shape};
use crate::geometry::primitives::{Point, Range};
use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle.
///
/// `min_y <= max_y` always holds. In a geodetic context `min_x > max_x` is legal and means the
/// rectangle crosses the antimeridian, its width then being `max_x - min_x + 360`.
/// A NaN `min_x` marks the empty rectangle.
#[derive(Clone, Debug, PartialEq, Copy, Serialize, Deserialize)]
pub struct Rect {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        min_x: f64::NAN,
        max_x: f64::NAN,
        min_y: f64::NAN,
        max_y: f64::NAN,
    };

    /// The whole globe in a geodetic context.
    pub const GEO_WORLD: Rect = Rect {
        min_x: -180.0,
        max_x: 180.0,
        min_y: -90.0,
        max_y: 90.0,
    };

    /// Creates a rectangle without validation, see [`SpatialContext::make_rect`] for the checked variant.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        debug_assert!(!(min_y > max_y), "min_y {min_y} > max_y {max_y}");
        Rect {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub fn from_point(p: Point) -> Self {
        Rect::new(p.x(), p.x(), p.y(), p.y())
    }

    /// Overwrites the bounds in place, avoiding a new allocation in hot loops.
    pub fn reset(&mut self, min_x: f64, max_x: f64, min_y: f64, max_y: f64) {
        debug_assert!(!min_x.is_nan(), "resetting to the empty rectangle");
        *self = Rect::new(min_x, max_x, min_y, max_y);
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Width, including the 360 degrees added for a rectangle crossing the antimeridian.
    pub fn width(&self) -> f64 {
        let w = self.max_x - self.min_x;
        if w < 0.0 { w + 360.0 } else { w }
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn crosses_dateline(&self) -> bool {
        self.min_x > self.max_x
    }

    /// Returns the four corners of `self`, ordered in the same way as quadrants in a cartesian plane:
    /// <https://en.wikipedia.org/wiki/Quadrant_(plane_geometry)>
    pub fn corners(&self) -> [Point; 4] {
        [
            Point(self.max_x, self.max_y),
            Point(self.min_x, self.max_y),
            Point(self.min_x, self.min_y),
            Point(self.max_x, self.min_y),
        ]
    }

    /// Relation of `self`'s Y extent to [`ext_min_y`, `ext_max_y`].
    pub fn relate_y_range(&self, ext_min_y: f64, ext_max_y: f64) -> SpatialRelation {
        relate_range(self.min_y, self.max_y, ext_min_y, ext_max_y)
    }

    /// Relation of `self`'s X extent to [`ext_min_x`, `ext_max_x`], circular in a geodetic context.
    pub fn relate_x_range(
        &self,
        ext_min_x: f64,
        ext_max_x: f64,
        ctx: &SpatialContext,
    ) -> SpatialRelation {
        let (mut min_x, mut max_x) = (self.min_x, self.max_x);
        let (mut ext_min_x, mut ext_max_x) = (ext_min_x, ext_max_x);
        if ctx.is_geo() {
            //unwrap both so that min <= max, a full world-wrap spans up to 540
            let ext_width = Range::Longitude {
                min: ext_min_x,
                max: ext_max_x,
            }
            .width();
            ext_max_x = match ext_width < 360.0 {
                true => ext_min_x + ext_width,
                false => 180.0 + 360.0,
            };
            let width = self.width();
            max_x = match width < 360.0 {
                true => min_x + width,
                false => 180.0 + 360.0,
            };
            //shift one of them to overlap the other if possible
            if max_x < ext_min_x {
                min_x += 360.0;
                max_x += 360.0;
            } else if ext_max_x < min_x {
                ext_min_x += 360.0;
                ext_max_x += 360.0;
            }
        }
        relate_range(min_x, max_x, ext_min_x, ext_max_x)
    }

    /// `self` grown by `distance` in every direction.
    ///
    /// On the sphere, growth reaching a pole collapses into a latitude band spanning all
    /// longitudes, as does growth making the rectangle 360 degrees wide.
    /// On the plane the result is clipped to the world bounds.
    pub fn buffered_rect(&self, distance: f64, ctx: &SpatialContext) -> Result<Rect> {
        if !ctx.is_geo() {
            let bounds = ctx.world_bounds();
            return ctx.make_rect(
                f64::max(bounds.min_x, self.min_x - distance),
                f64::min(bounds.max_x, self.max_x + distance),
                f64::max(bounds.min_y, self.min_y - distance),
                f64::min(bounds.max_y, self.max_y + distance),
            );
        }
        if self.max_y + distance >= 90.0 {
            debug!("[RECT] buffer reaches the north pole, widening to all longitudes");
            ctx.make_rect(-180.0, 180.0, f64::max(-90.0, self.min_y - distance), 90.0)
        } else if self.min_y - distance <= -90.0 {
            debug!("[RECT] buffer reaches the south pole, widening to all longitudes");
            ctx.make_rect(-180.0, 180.0, -90.0, self.max_y + distance)
        } else {
            let closest_to_pole_y = match self.max_y.abs() > self.min_y.abs() {
                true => self.max_y,
                false => self.min_y,
            };
            let lon_distance = calc_box_by_dist_from_pt_delta_lon_deg(closest_to_pole_y, distance);
            let (min_y, max_y) = (self.min_y - distance, self.max_y + distance);
            if lon_distance * 2.0 + self.width() >= 360.0 {
                debug!("[RECT] buffer wraps around the world, widening to all longitudes");
                return ctx.make_rect(-180.0, 180.0, min_y, max_y);
            }
            ctx.make_rect(
                norm_lon_deg(self.min_x - lon_distance),
                norm_lon_deg(self.max_x + lon_distance),
                min_y,
                max_y,
            )
        }
    }
}

/// Relation of the interval [`int_min`, `int_max`] to [`ext_min`, `ext_max`].
fn relate_range(int_min: f64, int_max: f64, ext_min: f64, ext_max: f64) -> SpatialRelation {
    if ext_min > int_max || ext_max < int_min {
        SpatialRelation::Disjoint
    } else if ext_min >= int_min && ext_max <= int_max {
        SpatialRelation::Contains
    } else if ext_min <= int_min && ext_max >= int_max {
        SpatialRelation::Within
    } else {
        SpatialRelation::Intersects
    }
}

impl Relate<Point> for Rect {
    /// The boundary belongs to the rectangle.
    fn relate(&self, point: &Point, ctx: &SpatialContext) -> SpatialRelation {
        if self.is_empty() || point.is_empty() {
            return SpatialRelation::Disjoint;
        }
        if point.y() > self.max_y || point.y() < self.min_y {
            return SpatialRelation::Disjoint;
        }
        let (min_x, mut max_x) = (self.min_x, self.max_x);
        let mut p_x = point.x();
        if ctx.is_geo() {
            //unwrap the dateline
            if max_x < min_x {
                max_x = min_x + (max_x - min_x + 360.0);
            }
            //shift the point to potentially overlap
            if p_x < min_x {
                p_x += 360.0;
            } else if p_x > max_x {
                p_x -= 360.0;
            } else {
                return SpatialRelation::Contains;
            }
        }
        match p_x < min_x || p_x > max_x {
            true => SpatialRelation::Disjoint,
            false => SpatialRelation::Contains,
        }
    }
}

impl Relate<Rect> for Rect {
    fn relate(&self, other: &Rect, ctx: &SpatialContext) -> SpatialRelation {
        if self.is_empty() || other.is_empty() {
            return SpatialRelation::Disjoint;
        }
        let y_sect = self.relate_y_range(other.min_y, other.max_y);
        if y_sect == SpatialRelation::Disjoint {
            return SpatialRelation::Disjoint;
        }
        let x_sect = self.relate_x_range(other.min_x, other.max_x, ctx);
        if x_sect == SpatialRelation::Disjoint {
            return SpatialRelation::Disjoint;
        }
        if x_sect == y_sect {
            return x_sect;
        }
        //if one axis is equal, the other decides
        if self.min_x == other.min_x && self.max_x == other.max_x {
            return y_sect;
        }
        if self.min_y == other.min_y && self.max_y == other.max_y {
            return x_sect;
        }
        SpatialRelation::Intersects
    }
}

impl Shape for Rect {
    fn bbox(&self) -> Rect {
        *self
    }

    fn center(&self) -> Point {
        if self.is_empty() {
            return Point::EMPTY;
        }
        let y = self.height() / 2.0 + self.min_y;
        let x = self.width() / 2.0 + self.min_x;
        match self.crosses_dateline() {
            true => Point(norm_lon_deg(x), y),
            false => Point(x, y),
        }
    }

    fn area(&self, ctx: &SpatialContext) -> f64 {
        match self.is_empty() {
            true => 0.0,
            false => ctx.calculator().area_rect(self),
        }
    }

    fn has_area(&self) -> bool {
        !self.is_empty() && self.width() != 0.0 && self.height() != 0.0
    }

    fn is_empty(&self) -> bool {
        self.min_x.is_nan()
    }

    fn buffered(&self, distance: f64, ctx: &SpatialContext) -> Result<AnyShape> {
        self.buffered_rect(distance, ctx).map(AnyShape::Rect)
    }
}
