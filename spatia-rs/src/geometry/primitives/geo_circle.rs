use crate::context::SpatialContext;
use crate::distance::units::{norm_lon_deg, ulp};
use crate::geometry::any_shape::AnyShape;
use crate::geometry::geo_enums::SpatialRelation;
use crate::geometry::geo_traits::{Relate, Shape};
use crate::geometry::primitives::{Circle, Point, Range, Rect};
use crate::util::assertions;
use anyhow::Result;

/// [`Circle`] on the sphere: all points within `radius` degrees of arc from `center`.
///
/// Handles circles crossing the antimeridian, enclosing a pole and spanning more than half the globe.
/// Derived values are computed once at construction:
/// * `horiz_axis_y`: the latitude at which the circle is widest, which is generally not the center's
/// * `inverse`: for a radius beyond 90, the (slightly shrunk) circle around the antipode covering
///   the rest of the globe
#[derive(Clone, Debug)]
pub struct GeoCircle {
    circle: Circle,
    horiz_axis_y: f64,
    inverse: Option<Box<GeoCircle>>,
}

impl GeoCircle {
    pub fn new(center: Point, radius: f64, ctx: &SpatialContext) -> Self {
        debug_assert!(ctx.is_geo());
        let circle = Circle::new(center, radius, ctx);
        let bbox = circle.bbox();
        let (horiz_axis_y, inverse) = if radius > 90.0 {
            let back_radius = 180.0 - radius;
            let inverse = match back_radius > 0.0 {
                true => {
                    let back_x = norm_lon_deg(center.x() + 180.0);
                    let back_y = -center.y();
                    //shrink just enough to never overlap the circle itself
                    let shrink = f64::max(
                        ulp(back_y.abs() + back_radius),
                        ulp(back_x.abs() + back_radius),
                    );
                    let inverse = GeoCircle::new(Point(back_x, back_y), back_radius - shrink, ctx);
                    debug_assert!(assertions::inverse_circle_is_antipodal(
                        center,
                        radius,
                        &inverse
                    ));
                    Some(Box::new(inverse))
                }
                //the whole globe
                false => None,
            };
            (center.y(), inverse)
        } else {
            let y = ctx
                .calculator()
                .calc_box_by_dist_from_pt_y_horiz_axis(center, radius);
            //rounding can put the axis barely outside of the box
            (y.clamp(bbox.min_y(), bbox.max_y()), None)
        };
        GeoCircle {
            circle,
            horiz_axis_y,
            inverse,
        }
    }

    pub fn radius(&self) -> f64 {
        self.circle.radius()
    }

    pub fn horiz_axis_y(&self) -> f64 {
        self.horiz_axis_y
    }

    /// Circle around the antipode covering the rest of the globe, only present for radii between
    /// 90 and 180 degrees.
    pub fn inverse(&self) -> Option<&GeoCircle> {
        self.inverse.as_deref()
    }

    /// Overwrites center and radius in place, recomputing all derived values.
    pub fn reset(&mut self, x: f64, y: f64, radius: f64, ctx: &SpatialContext) {
        debug_assert!(!x.is_nan(), "resetting to the empty circle");
        *self = GeoCircle::new(Point(x, y), radius, ctx);
    }

    pub fn contains(&self, x: f64, y: f64, ctx: &SpatialContext) -> bool {
        self.circle.contains(x, y, ctx)
    }

    fn relate_rect_phase2(
        &self,
        r: &Rect,
        bbox_sect: SpatialRelation,
        ctx: &SpatialContext,
    ) -> SpatialRelation {
        if let Some(inverse) = &self.inverse {
            return inverse.relate(r, ctx).inverse();
        }
        let bbox = self.circle.bbox();
        if bbox.width() == 360.0 {
            return self.relate_rect_around_pole(r, ctx);
        }
        if !bbox.crosses_dateline() && !r.crosses_dateline() {
            return self
                .circle
                .relate_rect_phase2(r, bbox_sect, self.horiz_axis_y, ctx);
        }
        //a band around the world has no corners to test
        if r.width() == 360.0 {
            return SpatialRelation::Intersects;
        }
        match self.n_corners_inside(r, ctx) {
            4 => match r.relate_x_range(bbox.min_x(), bbox.max_x(), ctx) {
                //otherwise r reaches around the globe to the other side of the circle
                SpatialRelation::Within => SpatialRelation::Contains,
                _ => SpatialRelation::Intersects,
            },
            1..=3 => SpatialRelation::Intersects,
            _ => {
                //no corners inside, but r can still cross one of the circle's axes
                let center = self.center();
                if r.relate_y_range(self.horiz_axis_y, self.horiz_axis_y).intersects()
                    && r.relate_x_range(bbox.min_x(), bbox.max_x(), ctx).intersects()
                {
                    return SpatialRelation::Intersects;
                }
                if r.relate_x_range(center.x(), center.x(), ctx).intersects()
                    && r.relate_y_range(bbox.min_y(), bbox.max_y()).intersects()
                {
                    return SpatialRelation::Intersects;
                }
                SpatialRelation::Disjoint
            }
        }
    }

    /// Relation to `r` for a circle enclosing exactly one pole, its bounding box spanning all longitudes.
    ///
    /// Along any meridian, the circle covers a latitude interval starting at the pole.
    /// That interval is longest on the circle's own meridian and shortest on its back meridian,
    /// shrinking monotonically in between.
    fn relate_rect_around_pole(&self, r: &Rect, ctx: &SpatialContext) -> SpatialRelation {
        let radius = self.radius();
        if radius >= 180.0 {
            return SpatialRelation::Contains;
        }
        let center = self.center();
        let y_top = center.y() + radius;
        let y_bot = center.y() - radius;
        let north = y_top >= 90.0;
        //latitude to which the circle reaches on its own meridian and on its back meridian
        let (front_lat, back_lat) = match north {
            true => (y_bot, 180.0 - y_top),
            false => (y_top, -180.0 - y_bot),
        };
        //the latitude band around the pole entirely within the circle
        let in_band = match north {
            true => r.min_y() >= back_lat,
            false => r.max_y() <= back_lat,
        };
        if in_band {
            return SpatialRelation::Contains;
        }
        if r.width() == 360.0 {
            return SpatialRelation::Intersects;
        }
        let x_range = Range::x_range(r, ctx);
        let crosses_meridian =
            |lon: f64| x_range.contains(lon) || (lon.abs() == 180.0 && x_range.contains(-lon));
        let crosses_back_meridian = crosses_meridian(norm_lon_deg(center.x() + 180.0));
        match self.n_corners_inside(r, ctx) {
            4 => {
                //the edge closest to the equator bulges out of the circle at the back meridian
                let bulges_out = match north {
                    true => r.min_y() < back_lat,
                    false => r.max_y() > back_lat,
                };
                match crosses_back_meridian && bulges_out {
                    true => SpatialRelation::Intersects,
                    false => SpatialRelation::Contains,
                }
            }
            0 => {
                //the edge closest to the pole can only dip into the circle at one of its meridians
                let reaches = |lat: f64| match north {
                    true => r.max_y() >= lat,
                    false => r.min_y() <= lat,
                };
                if (crosses_meridian(center.x()) && reaches(front_lat))
                    || (crosses_back_meridian && reaches(back_lat))
                {
                    SpatialRelation::Intersects
                } else {
                    SpatialRelation::Disjoint
                }
            }
            _ => SpatialRelation::Intersects,
        }
    }

    fn n_corners_inside(&self, r: &Rect, ctx: &SpatialContext) -> usize {
        r.corners()
            .iter()
            .filter(|p| self.contains(p.x(), p.y(), ctx))
            .count()
    }
}

impl PartialEq for GeoCircle {
    fn eq(&self, other: &Self) -> bool {
        self.circle == other.circle
    }
}

impl Relate<Point> for GeoCircle {
    fn relate(&self, point: &Point, ctx: &SpatialContext) -> SpatialRelation {
        self.circle.relate(point, ctx)
    }
}

impl Relate<Rect> for GeoCircle {
    fn relate(&self, rect: &Rect, ctx: &SpatialContext) -> SpatialRelation {
        if self.is_empty() || rect.is_empty() {
            return SpatialRelation::Disjoint;
        }
        let bbox = self.circle.bbox();
        let bbox_sect = bbox.relate(rect, ctx);
        match bbox_sect {
            SpatialRelation::Disjoint | SpatialRelation::Within => bbox_sect,
            SpatialRelation::Contains if bbox == *rect => SpatialRelation::Within,
            _ => self.relate_rect_phase2(rect, bbox_sect, ctx),
        }
    }
}

impl Relate<GeoCircle> for GeoCircle {
    fn relate(&self, other: &GeoCircle, ctx: &SpatialContext) -> SpatialRelation {
        self.relate(&other.circle, ctx)
    }
}

impl Relate<Circle> for GeoCircle {
    fn relate(&self, other: &Circle, ctx: &SpatialContext) -> SpatialRelation {
        if self.is_empty() || other.is_empty() {
            return SpatialRelation::Disjoint;
        }
        //distances wrap around the globe, d + r <= 180 does not hold for the globe itself
        match (self.radius() >= 180.0, other.radius() >= 180.0) {
            (true, _) => SpatialRelation::Contains,
            (false, true) => SpatialRelation::Within,
            (false, false) => self.circle.relate(other, ctx),
        }
    }
}

impl Shape for GeoCircle {
    fn bbox(&self) -> Rect {
        self.circle.bbox()
    }

    fn center(&self) -> Point {
        self.circle.center()
    }

    fn area(&self, ctx: &SpatialContext) -> f64 {
        self.circle.area(ctx)
    }

    fn has_area(&self) -> bool {
        self.circle.has_area()
    }

    fn is_empty(&self) -> bool {
        self.circle.is_empty()
    }

    fn buffered(&self, distance: f64, ctx: &SpatialContext) -> Result<AnyShape> {
        self.circle.buffered(distance, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::units::SPHERE_RADIUS_DEG;
    use crate::geometry::geo_enums::SpatialRelation::*;
    use float_cmp::approx_eq;
    use std::f64::consts::PI;
    use test_case::test_case;

    fn geo_circle(x: f64, y: f64, r: f64) -> GeoCircle {
        GeoCircle::new(Point(x, y), r, &SpatialContext::geo())
    }

    fn geo_rect(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Rect {
        SpatialContext::geo()
            .make_rect(min_x, max_x, min_y, max_y)
            .unwrap()
    }

    #[test]
    fn widest_latitude_is_poleward_of_the_center() {
        let c = geo_circle(0.0, 45.0, 10.0);
        assert!(c.horiz_axis_y() > 45.0 && c.horiz_axis_y() < 55.0);
        let c = geo_circle(0.0, -45.0, 10.0);
        assert!(c.horiz_axis_y() < -45.0 && c.horiz_axis_y() > -55.0);
        assert_eq!(geo_circle(0.0, 0.0, 10.0).horiz_axis_y(), 0.0);
    }

    #[test]
    fn large_circles_carry_an_antipodal_inverse() {
        let c = geo_circle(10.0, 20.0, 120.0);
        let inverse = c.inverse().unwrap();
        assert_eq!(inverse.center(), Point(-170.0, -20.0));
        assert!(inverse.radius() < 60.0 && inverse.radius() > 59.999_999);
        assert!(geo_circle(10.0, 20.0, 180.0).inverse().is_none());
        assert!(geo_circle(10.0, 20.0, 90.0).inverse().is_none());
    }

    #[test_case(geo_rect(-10.0, 10.0, -10.0, 10.0), Contains; "small square at the center")]
    #[test_case(geo_rect(-100.0, -95.0, -10.0, 10.0), Disjoint; "beyond the rim")]
    #[test_case(geo_rect(-95.0, -85.0, -10.0, 10.0), Intersects; "across the rim")]
    #[test_case(geo_rect(-180.0, 180.0, -90.0, 90.0), Within; "the globe")]
    fn hemisphere_relate_rect(rect: Rect, expected: SpatialRelation) {
        let ctx = SpatialContext::geo();
        let c = geo_circle(0.0, 0.0, 90.0);
        assert_eq!(c.relate(&rect, &ctx), expected);
    }

    #[test_case(geo_rect(177.0, -177.0, -3.0, 3.0), Contains; "across the dateline")]
    #[test_case(geo_rect(160.0, 170.0, -3.0, 3.0), Disjoint; "west of the circle")]
    #[test_case(geo_rect(172.0, 176.0, -20.0, 20.0), Intersects; "tall rectangle through the circle")]
    #[test_case(geo_rect(170.0, -170.0, -3.0, 3.0), Intersects; "wider than the circle")]
    #[test_case(geo_rect(-180.0, 180.0, 0.0, 1.0), Intersects; "band around the world")]
    fn dateline_relate_rect(rect: Rect, expected: SpatialRelation) {
        let ctx = SpatialContext::geo();
        let c = geo_circle(180.0, 0.0, 5.0);
        assert_eq!(c.relate(&rect, &ctx), expected);
    }

    #[test_case(geo_rect(-180.0, 180.0, 85.0, 90.0), Contains; "polar cap")]
    #[test_case(geo_rect(0.0, 20.0, 75.0, 80.0), Contains; "near the center")]
    #[test_case(geo_rect(170.0, -170.0, 75.0, 80.0), Disjoint; "beyond the back rim")]
    #[test_case(geo_rect(170.0, -170.0, 75.0, 85.0), Intersects; "across the back rim")]
    #[test_case(geo_rect(-40.0, 40.0, 50.0, 61.0), Disjoint; "below the front rim")]
    #[test_case(geo_rect(-40.0, 40.0, 50.0, 63.0), Intersects; "dipping into the front rim")]
    #[test_case(geo_rect(-180.0, 180.0, 70.0, 72.0), Intersects; "band through the circle")]
    fn polar_relate_rect(rect: Rect, expected: SpatialRelation) {
        let ctx = SpatialContext::geo();
        //reaches from 62 on the 0 meridian over the pole down to 82 on the 180 meridian
        let c = geo_circle(0.0, 80.0, 18.0);
        assert_eq!(c.bbox().width(), 360.0);
        assert_eq!(c.relate(&rect, &ctx), expected);
    }

    #[test_case(geo_rect(-10.0, 10.0, -10.0, 10.0), Contains; "near the center")]
    #[test_case(geo_rect(-178.0, -176.0, -1.0, 1.0), Disjoint; "at the antipode")]
    #[test_case(geo_rect(-180.0, 180.0, -90.0, 90.0), Within; "the globe")]
    #[test_case(geo_rect(165.0, 175.0, -5.0, 5.0), Intersects; "across the rim")]
    fn large_circle_relate_rect(rect: Rect, expected: SpatialRelation) {
        let ctx = SpatialContext::geo();
        let c = geo_circle(0.0, 0.0, 170.0);
        assert_eq!(c.relate(&rect, &ctx), expected);
    }

    #[test]
    fn whole_globe() {
        let ctx = SpatialContext::geo();
        let c = geo_circle(30.0, 30.0, 180.0);
        assert_eq!(c.relate(&geo_rect(100.0, 110.0, -80.0, -70.0), &ctx), Contains);
        assert_eq!(c.relate(&Point(-150.0, -30.0), &ctx), Contains);
        let expected = 4.0 * PI * SPHERE_RADIUS_DEG * SPHERE_RADIUS_DEG;
        assert!(approx_eq!(f64, c.area(&ctx), expected, epsilon = 1e-6));
    }

    #[test]
    fn whole_globe_relate_circle() {
        let ctx = SpatialContext::geo();
        let globe = geo_circle(0.0, 0.0, 180.0);
        //close to the antipode of the globe's center
        let c = geo_circle(175.0, 0.0, 10.0);
        assert_eq!(globe.relate(&c, &ctx), Contains);
        assert_eq!(c.relate(&globe, &ctx), Within);
        assert_eq!(globe.relate(&c.bbox(), &ctx), Contains);
        assert_eq!(globe.relate(&geo_circle(30.0, 30.0, 180.0), &ctx), Contains);
    }

    #[test_case(geo_circle(10.0, 0.0, 5.0), Contains; "inside")]
    #[test_case(geo_circle(180.0, 0.0, 5.0), Disjoint; "at the antipode")]
    #[test_case(geo_circle(-170.0, 0.0, 20.0), Intersects; "around the antipode")]
    fn large_circle_relate_circle(other: GeoCircle, expected: SpatialRelation) {
        let ctx = SpatialContext::geo();
        let c = geo_circle(0.0, 0.0, 170.0);
        assert_eq!(c.relate(&other, &ctx), expected);
    }

    #[test]
    fn equality_ignores_derived_values() {
        assert_eq!(geo_circle(1.0, 2.0, 3.0), geo_circle(1.0, 2.0, 3.0));
        assert_ne!(geo_circle(1.0, 2.0, 3.0), geo_circle(1.0, 2.0, 4.0));
    }
}
