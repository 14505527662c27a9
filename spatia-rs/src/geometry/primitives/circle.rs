use crate::context::SpatialContext;
use crate::geometry::any_shape::AnyShape;
use crate::geometry::geo_enums::SpatialRelation;
use crate::geometry::geo_traits::{Relate, Shape};
use crate::geometry::primitives::{Point, Rect};
use anyhow::Result;

/// Set of points within `radius` of `center`, as measured by the context's
/// [`DistanceCalculator`](crate::distance::DistanceCalculator).
///
/// The enclosing bounding box is computed once at construction.
#[derive(Clone, Debug)]
pub struct Circle {
    center: Point,
    radius: f64,
    bbox: Rect,
}

impl Circle {
    pub fn new(center: Point, radius: f64, ctx: &SpatialContext) -> Self {
        debug_assert!(!(radius < 0.0), "invalid circle radius: {radius}");
        let bbox = match center.is_empty() {
            true => Rect::EMPTY,
            false => ctx
                .calculator()
                .calc_box_by_dist_from_pt(center, radius, ctx),
        };
        Circle {
            center,
            radius,
            bbox,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Overwrites center and radius in place, avoiding a new allocation in hot loops.
    pub fn reset(&mut self, x: f64, y: f64, radius: f64, ctx: &SpatialContext) {
        debug_assert!(!x.is_nan(), "resetting to the empty circle");
        *self = Circle::new(Point(x, y), radius, ctx);
    }

    /// Whether (`x`, `y`) lies inside or on the circle.
    pub fn contains(&self, x: f64, y: f64, ctx: &SpatialContext) -> bool {
        ctx.calculator().within(self.center, x, y, self.radius)
    }

    /// Relation to `rect`, resolved by the cached bounding box if possible.
    ///
    /// `y_axis` is the latitude at which the circle is widest, the center's y on a plane.
    pub(crate) fn relate_rect_with_axis(
        &self,
        rect: &Rect,
        y_axis: f64,
        ctx: &SpatialContext,
    ) -> SpatialRelation {
        let bbox_sect = self.bbox.relate(rect, ctx);
        match bbox_sect {
            SpatialRelation::Disjoint | SpatialRelation::Within => bbox_sect,
            //the circle can never contain its own bounding box
            SpatialRelation::Contains if self.bbox == *rect => SpatialRelation::Within,
            _ => self.relate_rect_phase2(rect, bbox_sect, y_axis, ctx),
        }
    }

    /// Relation to `rect` knowing the bounding box intersects or contains it.
    /// Can only be Disjoint, Intersects or Contains. Not suited to rectangles or circles
    /// crossing the antimeridian.
    pub(crate) fn relate_rect_phase2(
        &self,
        rect: &Rect,
        bbox_sect: SpatialRelation,
        y_axis: f64,
        ctx: &SpatialContext,
    ) -> SpatialRelation {
        let x_axis = self.center.x();
        let (closest_x, farthest_x) = closest_and_farthest(x_axis, rect.min_x(), rect.max_x());
        let (closest_y, farthest_y) = closest_and_farthest(y_axis, rect.min_y(), rect.max_y());

        //a rectangle spanning an axis cannot be disjoint, the bounding box check ruled that out
        if x_axis != closest_x && y_axis != closest_y && !self.contains(closest_x, closest_y, ctx)
        {
            return SpatialRelation::Disjoint;
        }

        //containing the rectangle requires the bounding box to contain it too
        if bbox_sect != SpatialRelation::Contains {
            return SpatialRelation::Intersects;
        }
        if !self.contains(farthest_x, farthest_y, ctx) {
            return SpatialRelation::Intersects;
        }

        //on the sphere, a rectangle spanning the widest latitude might have its farthest
        //corner on the other horizontal edge
        if self.center.y() != y_axis && y_axis == closest_y {
            let other_y = match farthest_y == rect.max_y() {
                true => rect.min_y(),
                false => rect.max_y(),
            };
            if !self.contains(farthest_x, other_y, ctx) {
                return SpatialRelation::Intersects;
            }
        }
        SpatialRelation::Contains
    }

    /// Relation between two circles, from their center distance and radii.
    pub(crate) fn relate_circle(
        center: Point,
        radius: f64,
        other_center: Point,
        other_radius: f64,
        ctx: &SpatialContext,
    ) -> SpatialRelation {
        let cross_dist = ctx.calculator().metric_distance(center, other_center);
        if cross_dist > radius + other_radius {
            SpatialRelation::Disjoint
        } else if cross_dist == 0.0 && radius == other_radius {
            SpatialRelation::Contains
        } else if cross_dist + other_radius <= radius {
            SpatialRelation::Contains
        } else if cross_dist + radius <= other_radius {
            SpatialRelation::Within
        } else {
            SpatialRelation::Intersects
        }
    }
}

/// Closest and farthest value of [`min`, `max`] to `axis`.
/// If `axis` lies within the range, it is returned as the closest value.
fn closest_and_farthest(axis: f64, min: f64, max: f64) -> (f64, f64) {
    if axis < min {
        (min, max)
    } else if axis > max {
        (max, min)
    } else if max - axis > axis - min {
        (axis, max)
    } else {
        (axis, min)
    }
}

impl PartialEq for Circle {
    /// The bounding box follows from center and radius.
    fn eq(&self, other: &Self) -> bool {
        self.center == other.center && self.radius == other.radius
    }
}

impl Relate<Point> for Circle {
    fn relate(&self, point: &Point, ctx: &SpatialContext) -> SpatialRelation {
        if self.is_empty() || point.is_empty() {
            return SpatialRelation::Disjoint;
        }
        match self.contains(point.x(), point.y(), ctx) {
            true => SpatialRelation::Contains,
            false => SpatialRelation::Disjoint,
        }
    }
}

impl Relate<Rect> for Circle {
    fn relate(&self, rect: &Rect, ctx: &SpatialContext) -> SpatialRelation {
        if self.is_empty() || rect.is_empty() {
            return SpatialRelation::Disjoint;
        }
        self.relate_rect_with_axis(rect, self.center.y(), ctx)
    }
}

impl Relate<Circle> for Circle {
    fn relate(&self, other: &Circle, ctx: &SpatialContext) -> SpatialRelation {
        if self.is_empty() || other.is_empty() {
            return SpatialRelation::Disjoint;
        }
        Circle::relate_circle(self.center, self.radius, other.center, other.radius, ctx)
    }
}

impl Shape for Circle {
    fn bbox(&self) -> Rect {
        self.bbox
    }

    fn center(&self) -> Point {
        self.center
    }

    fn area(&self, ctx: &SpatialContext) -> f64 {
        match self.is_empty() {
            true => 0.0,
            false => ctx.calculator().area_circle(self.radius),
        }
    }

    fn has_area(&self) -> bool {
        !self.is_empty() && self.radius > 0.0
    }

    fn is_empty(&self) -> bool {
        self.center.is_empty()
    }

    fn buffered(&self, distance: f64, ctx: &SpatialContext) -> Result<AnyShape> {
        ctx.make_circle(self.center, self.radius + distance)
    }
}
