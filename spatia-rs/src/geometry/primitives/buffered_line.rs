use crate::context::SpatialContext;
use crate::geometry::any_shape::AnyShape;
use crate::geometry::geo_enums::SpatialRelation;
use crate::geometry::geo_traits::{Relate, Shape};
use crate::geometry::primitives::{Circle, GeoCircle, InfBufLine, Point, Rect};
use crate::util::assertions;
use anyhow::Result;

/// Line segment from `a` to `b` grown by `buf`, both around the segment and beyond its endpoints.
///
/// The resulting oriented rectangle is the intersection of two [`InfBufLine`]s:
/// `primary` through `a` and `b` with buffer `buf`, and `perp` perpendicular to it through the
/// midpoint, with buffer `|ab| / 2 + buf`.
/// A zero-length segment yields a square of half-width `buf` around the point.
///
/// The shape itself is planar, also in a geodetic context.
/// Only relations to a [`GeoCircle`] measure distances along great circles.
#[derive(Clone, Debug)]
pub struct BufferedLine {
    a: Point,
    b: Point,
    buf: f64,
    primary: InfBufLine,
    perp: InfBufLine,
    bbox: Rect,
}

impl BufferedLine {
    pub fn new(a: Point, b: Point, buf: f64, ctx: &SpatialContext) -> Self {
        debug_assert!(buf >= 0.0, "invalid buffer: {buf}");
        let (dx, dy) = (b.x() - a.x(), b.y() - a.y());
        let center = Point(a.x() + dx / 2.0, a.y() + dy / 2.0);

        let (primary, perp) = match dx == 0.0 && dy == 0.0 {
            true => (
                InfBufLine::new(0.0, center, buf),
                InfBufLine::new(f64::INFINITY, center, buf),
            ),
            false => (
                InfBufLine::new(dy / dx, center, buf),
                InfBufLine::new(-dx / dy, center, a.distance(&b) / 2.0 + buf),
            ),
        };

        let (min_x, max_x, min_y, max_y) = match dx == 0.0 {
            true => (
                a.x() - buf,
                a.x() + buf,
                f64::min(a.y(), b.y()) - buf,
                f64::max(a.y(), b.y()) + buf,
            ),
            false => {
                //extent of the rotated corners along both axes
                let bbox_buf = buf * (1.0 + primary.slope().abs()) * primary.dist_denom_inv();
                debug_assert!(bbox_buf >= buf * 0.999_999 && bbox_buf <= buf * 1.5);
                (
                    f64::min(a.x(), b.x()) - bbox_buf,
                    f64::max(a.x(), b.x()) + bbox_buf,
                    f64::min(a.y(), b.y()) - bbox_buf,
                    f64::max(a.y(), b.y()) + bbox_buf,
                )
            }
        };
        let world = ctx.world_bounds();
        let bbox = Rect::new(
            f64::max(world.min_x(), min_x),
            f64::min(world.max_x(), max_x),
            f64::max(world.min_y(), min_y),
            f64::min(world.max_y(), max_y),
        );

        let line = BufferedLine {
            a,
            b,
            buf,
            primary,
            perp,
            bbox,
        };
        debug_assert!(assertions::rect_within_world(&line.bbox, ctx));
        debug_assert!(assertions::bbox_encloses_corners(
            &line.footprint().corners(),
            &line.bbox,
            ctx
        ));
        line
    }

    pub fn a(&self) -> Point {
        self.a
    }

    pub fn b(&self) -> Point {
        self.b
    }

    pub fn buf(&self) -> f64 {
        self.buf
    }

    /// The buffered line through `a` and `b`.
    pub fn primary(&self) -> &InfBufLine {
        &self.primary
    }

    /// The buffered line perpendicular to `primary` through the midpoint of the segment.
    pub fn perp(&self) -> &InfBufLine {
        &self.perp
    }

    pub fn contains(&self, p: &Point) -> bool {
        self.primary.contains(p) && self.perp.contains(p)
    }

    /// Corners of the oriented rectangle covered by the line, in winding order.
    pub fn corners(&self) -> [Point; 4] {
        self.footprint().corners()
    }

    fn footprint(&self) -> Footprint {
        Footprint::new(self.a, self.b, self.buf)
    }

    fn relate_circle(&self, center: Point, radius: f64) -> SpatialRelation {
        let f = self.footprint();
        if f.distance(&center) > radius {
            return SpatialRelation::Disjoint;
        }
        let (du, dv) = f.local(&center);
        if du.abs() + radius <= f.half_len && dv.abs() + radius <= f.half_width {
            return SpatialRelation::Contains;
        }
        if f.corners().iter().all(|c| c.distance(&center) <= radius) {
            return SpatialRelation::Within;
        }
        SpatialRelation::Intersects
    }

    /// The footprint keeps its planar shape in degrees, but all distances to the circle's center
    /// are great-circle distances.
    fn relate_geo_circle(&self, circle: &GeoCircle, ctx: &SpatialContext) -> SpatialRelation {
        let f = self.footprint();
        let calc = ctx.calculator();
        let (center, radius) = (circle.center(), circle.radius());
        let dist = |p: Point| calc.distance(center, p);
        let corners = f.corners();
        let edges = [0, 1, 2, 3].map(|i| (corners[i], corners[(i + 1) % 4]));

        let center_inside = f.contains(&f.unwrap_lon(center));
        let closest = edges
            .iter()
            .map(|&(p, q)| min_along_segment(p, q, dist))
            .fold(f64::INFINITY, f64::min);
        if !center_inside && closest > radius {
            return SpatialRelation::Disjoint;
        }
        let rim_inside = || {
            (0..N_RIM_SAMPLES).all(|i| {
                let bearing = 360.0 * i as f64 / N_RIM_SAMPLES as f64;
                let p = calc.point_on_bearing(center, radius, bearing);
                f.contains(&f.unwrap_lon(p))
            })
        };
        if center_inside && rim_inside() {
            return SpatialRelation::Contains;
        }
        let farthest = edges
            .iter()
            .map(|&(p, q)| -min_along_segment(p, q, |x| -dist(x)))
            .fold(f64::NEG_INFINITY, f64::max);
        match farthest <= radius {
            true => SpatialRelation::Within,
            false => SpatialRelation::Intersects,
        }
    }
}

const N_RIM_SAMPLES: usize = 72;
const N_SEGMENT_SAMPLES: usize = 16;
const N_SEGMENT_REFINEMENTS: usize = 40;

/// Minimum of `f` along the segment from `p` to `q`.
/// The best of evenly spaced samples is refined with a ternary search around it.
fn min_along_segment(p: Point, q: Point, f: impl Fn(Point) -> f64) -> f64 {
    let at = |t: f64| f(Point(p.x() + (q.x() - p.x()) * t, p.y() + (q.y() - p.y()) * t));
    let step = 1.0 / N_SEGMENT_SAMPLES as f64;

    let (mut best_t, mut best) = (0.0, at(0.0));
    for i in 1..=N_SEGMENT_SAMPLES {
        let t = i as f64 * step;
        let v = at(t);
        if v < best {
            (best_t, best) = (t, v);
        }
    }
    let (mut lo, mut hi) = (f64::max(best_t - step, 0.0), f64::min(best_t + step, 1.0));
    for _ in 0..N_SEGMENT_REFINEMENTS {
        let (m1, m2) = (lo + (hi - lo) / 3.0, hi - (hi - lo) / 3.0);
        match at(m1) < at(m2) {
            true => hi = m2,
            false => lo = m1,
        }
    }
    f64::min(best, at((lo + hi) / 2.0))
}

impl PartialEq for BufferedLine {
    fn eq(&self, other: &Self) -> bool {
        self.a == other.a && self.b == other.b && self.buf == other.buf
    }
}

impl Relate<Point> for BufferedLine {
    fn relate(&self, point: &Point, ctx: &SpatialContext) -> SpatialRelation {
        if point.is_empty() || self.bbox.relate(point, ctx) == SpatialRelation::Disjoint {
            return SpatialRelation::Disjoint;
        }
        match self.contains(point) {
            true => SpatialRelation::Contains,
            false => SpatialRelation::Disjoint,
        }
    }
}

impl Relate<Rect> for BufferedLine {
    /// Both lines have to agree: the rectangle is contained in the segment only if it is
    /// contained in both buffered lines.
    fn relate(&self, rect: &Rect, ctx: &SpatialContext) -> SpatialRelation {
        if rect.is_empty() {
            return SpatialRelation::Disjoint;
        }
        let bbox_sect = self.bbox.relate(rect, ctx);
        if matches!(
            bbox_sect,
            SpatialRelation::Disjoint | SpatialRelation::Within
        ) {
            return bbox_sect;
        }
        let rect_center = rect.center();
        let primary_sect = self.primary.relate(rect, &rect_center);
        if primary_sect == SpatialRelation::Disjoint {
            return SpatialRelation::Disjoint;
        }
        let perp_sect = self.perp.relate(rect, &rect_center);
        if perp_sect == SpatialRelation::Disjoint {
            return SpatialRelation::Disjoint;
        }
        match primary_sect == perp_sect {
            true => primary_sect,
            false => SpatialRelation::Intersects,
        }
    }
}

impl Relate<Circle> for BufferedLine {
    fn relate(&self, circle: &Circle, _ctx: &SpatialContext) -> SpatialRelation {
        if circle.is_empty() {
            return SpatialRelation::Disjoint;
        }
        self.relate_circle(circle.center(), circle.radius())
    }
}

impl Relate<GeoCircle> for BufferedLine {
    fn relate(&self, circle: &GeoCircle, ctx: &SpatialContext) -> SpatialRelation {
        if circle.is_empty() {
            return SpatialRelation::Disjoint;
        }
        if circle.radius() >= 180.0 {
            return SpatialRelation::Within;
        }
        self.relate_geo_circle(circle, ctx)
    }
}

impl Relate<BufferedLine> for BufferedLine {
    fn relate(&self, other: &BufferedLine, ctx: &SpatialContext) -> SpatialRelation {
        if self.bbox.relate(&other.bbox, ctx) == SpatialRelation::Disjoint {
            return SpatialRelation::Disjoint;
        }
        let (f, g) = (self.footprint(), other.footprint());
        if f.separated_from(&g) || g.separated_from(&f) {
            return SpatialRelation::Disjoint;
        }
        if g.corners().iter().all(|c| f.contains(c)) {
            SpatialRelation::Contains
        } else if f.corners().iter().all(|c| g.contains(c)) {
            SpatialRelation::Within
        } else {
            SpatialRelation::Intersects
        }
    }
}

impl Shape for BufferedLine {
    fn bbox(&self) -> Rect {
        self.bbox
    }

    fn center(&self) -> Point {
        Point(
            (self.a.x() + self.b.x()) / 2.0,
            (self.a.y() + self.b.y()) / 2.0,
        )
    }

    fn area(&self, _ctx: &SpatialContext) -> f64 {
        self.primary.buf() * self.perp.buf() * 4.0
    }

    fn has_area(&self) -> bool {
        self.buf > 0.0
    }

    fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    fn buffered(&self, distance: f64, ctx: &SpatialContext) -> Result<AnyShape> {
        ctx.make_buffered_line(self.a, self.b, self.buf + distance)
            .map(AnyShape::BufferedLine)
    }
}

/// Oriented rectangle covered by a buffered segment, in the frame of the segment:
/// `u` along the segment, `n` perpendicular to it.
#[derive(Clone, Copy, Debug)]
struct Footprint {
    center: Point,
    u: (f64, f64),
    n: (f64, f64),
    half_len: f64,
    half_width: f64,
}

impl Footprint {
    fn new(a: Point, b: Point, buf: f64) -> Self {
        let (dx, dy) = (b.x() - a.x(), b.y() - a.y());
        let len = a.distance(&b);
        let u = match len > 0.0 {
            true => (dx / len, dy / len),
            false => (1.0, 0.0),
        };
        Footprint {
            center: Point(a.x() + dx / 2.0, a.y() + dy / 2.0),
            u,
            n: (-u.1, u.0),
            half_len: len / 2.0 + buf,
            half_width: buf,
        }
    }

    /// Coordinates of `p` relative to the center, along `u` and `n`.
    fn local(&self, p: &Point) -> (f64, f64) {
        let (dx, dy) = (p.x() - self.center.x(), p.y() - self.center.y());
        (dx * self.u.0 + dy * self.u.1, dx * self.n.0 + dy * self.n.1)
    }

    fn contains(&self, p: &Point) -> bool {
        let (du, dv) = self.local(p);
        du.abs() <= self.half_len && dv.abs() <= self.half_width
    }

    /// `p` moved by a full turn of longitude when that brings it closer to the center.
    fn unwrap_lon(&self, p: Point) -> Point {
        match p.x() - self.center.x() {
            dx if dx > 180.0 => Point(p.x() - 360.0, p.y()),
            dx if dx < -180.0 => Point(p.x() + 360.0, p.y()),
            _ => p,
        }
    }

    /// Distance from `p` to the footprint, 0 inside.
    fn distance(&self, p: &Point) -> f64 {
        let (du, dv) = self.local(p);
        let ou = f64::max(du.abs() - self.half_len, 0.0);
        let ov = f64::max(dv.abs() - self.half_width, 0.0);
        ou.hypot(ov)
    }

    fn corners(&self) -> [Point; 4] {
        let Point(cx, cy) = self.center;
        let (lu, wn) = (
            (self.u.0 * self.half_len, self.u.1 * self.half_len),
            (self.n.0 * self.half_width, self.n.1 * self.half_width),
        );
        [
            Point(cx + lu.0 + wn.0, cy + lu.1 + wn.1),
            Point(cx - lu.0 + wn.0, cy - lu.1 + wn.1),
            Point(cx - lu.0 - wn.0, cy - lu.1 - wn.1),
            Point(cx + lu.0 - wn.0, cy + lu.1 - wn.1),
        ]
    }

    /// Whether one of `self`'s axes separates it from `other`.
    fn separated_from(&self, other: &Footprint) -> bool {
        let other_corners = other.corners();
        [(self.u, self.half_len), (self.n, self.half_width)]
            .into_iter()
            .any(|(axis, extent)| {
                let project = |p: &Point| p.x() * axis.0 + p.y() * axis.1;
                let (min, max) = other_corners
                    .iter()
                    .map(project)
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                        (lo.min(v), hi.max(v))
                    });
                let c = project(&self.center);
                min > c + extent || max < c - extent
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geo_enums::SpatialRelation::*;
    use float_cmp::approx_eq;
    use test_case::test_case;

    fn line(ax: f64, ay: f64, bx: f64, by: f64, buf: f64) -> BufferedLine {
        BufferedLine::new(Point(ax, ay), Point(bx, by), buf, &SpatialContext::cartesian())
    }

    #[test]
    fn bbox_of_a_horizontal_segment() {
        assert_eq!(
            line(0.0, 0.0, 10.0, 0.0, 1.0).bbox(),
            Rect::new(-1.0, 11.0, -1.0, 1.0)
        );
    }

    #[test]
    fn bbox_of_a_vertical_segment() {
        assert_eq!(
            line(0.0, 10.0, 0.0, 0.0, 1.0).bbox(),
            Rect::new(-1.0, 1.0, -1.0, 11.0)
        );
    }

    #[test]
    fn bbox_of_a_diagonal_segment() {
        let bbox = line(0.0, 0.0, 10.0, 10.0, 1.0).bbox();
        let d = std::f64::consts::SQRT_2;
        assert!(approx_eq!(f64, bbox.min_x(), -d, ulps = 4));
        assert!(approx_eq!(f64, bbox.max_y(), 10.0 + d, ulps = 4));
    }

    #[test]
    fn bbox_is_clipped_to_the_world() {
        let ctx = SpatialContext::geo();
        let l = BufferedLine::new(Point(170.0, 85.0), Point(179.0, 89.0), 2.0, &ctx);
        assert_eq!(l.bbox().max_y(), 90.0);
        assert_eq!(l.bbox().max_x(), 180.0);
    }

    #[test]
    fn zero_length_segment_is_a_square() {
        let ctx = SpatialContext::cartesian();
        let l = line(5.0, 5.0, 5.0, 5.0, 1.0);
        assert_eq!(l.bbox(), Rect::new(4.0, 6.0, 4.0, 6.0));
        assert_eq!(l.area(&ctx), 4.0);
        assert_eq!(l.relate(&Point(5.9, 4.1), &ctx), Contains);
        assert_eq!(l.relate(&Point(6.1, 5.0), &ctx), Disjoint);
    }

    #[test_case(Point(5.0, 0.5), Contains; "beside the segment")]
    #[test_case(Point(10.5, 0.0), Contains; "beyond an endpoint")]
    #[test_case(Point(5.0, 1.5), Disjoint; "outside the buffer")]
    #[test_case(Point(11.5, 0.0), Disjoint; "beyond the buffered endpoint")]
    fn relate_point(p: Point, expected: SpatialRelation) {
        let ctx = SpatialContext::cartesian();
        assert_eq!(line(0.0, 0.0, 10.0, 0.0, 1.0).relate(&p, &ctx), expected);
    }

    #[test_case(Rect::new(2.0, 4.0, -0.5, 0.5), Contains; "inside")]
    #[test_case(Rect::new(2.0, 4.0, 0.5, 3.0), Intersects; "across the side")]
    #[test_case(Rect::new(10.5, 12.0, -0.5, 0.5), Intersects; "across the end")]
    #[test_case(Rect::new(2.0, 4.0, 2.0, 3.0), Disjoint; "above")]
    #[test_case(Rect::new(-5.0, 15.0, -5.0, 5.0), Within; "around")]
    fn relate_rect(rect: Rect, expected: SpatialRelation) {
        let ctx = SpatialContext::cartesian();
        assert_eq!(line(0.0, 0.0, 10.0, 0.0, 1.0).relate(&rect, &ctx), expected);
    }

    #[test]
    fn diagonal_relate_rect() {
        let ctx = SpatialContext::cartesian();
        let l = line(0.0, 0.0, 10.0, 10.0, 1.0);
        //near the bbox corner, but far from the segment
        assert_eq!(l.relate(&Rect::new(9.0, 11.0, -1.0, 1.0), &ctx), Disjoint);
        assert_eq!(l.relate(&Rect::new(4.8, 5.2, 4.8, 5.2), &ctx), Contains);
        assert_eq!(l.relate(&Rect::new(4.0, 6.0, 0.0, 10.0), &ctx), Intersects);
    }

    #[test_case(Point(5.0, 0.0), 0.5, Contains; "small circle on the segment")]
    #[test_case(Point(5.0, 0.0), 20.0, Within; "large circle around")]
    #[test_case(Point(5.0, 3.0), 1.5, Disjoint; "beside")]
    #[test_case(Point(5.0, 1.5), 1.0, Intersects; "across the side")]
    #[test_case(Point(12.0, 1.5), 1.0, Disjoint; "beside the buffered corner")]
    fn relate_circle(center: Point, radius: f64, expected: SpatialRelation) {
        let ctx = SpatialContext::cartesian();
        let c = Circle::new(center, radius, &ctx);
        assert_eq!(line(0.0, 0.0, 10.0, 0.0, 1.0).relate(&c, &ctx), expected);
    }

    #[test]
    fn relate_large_geo_circle() {
        let ctx = SpatialContext::geo();
        let l = BufferedLine::new(Point(0.0, 0.0), Point(10.0, 0.0), 1.0, &ctx);
        let around = GeoCircle::new(Point(5.0, 0.0), 150.0, &ctx);
        assert_eq!(l.relate(&around, &ctx), Within);
        let opposite = GeoCircle::new(Point(-175.0, 0.0), 150.0, &ctx);
        assert_eq!(l.relate(&opposite, &ctx), Disjoint);
        let globe = GeoCircle::new(Point(0.0, 0.0), 180.0, &ctx);
        assert_eq!(l.relate(&globe, &ctx), Within);
    }

    #[test]
    fn geo_circle_distances_are_great_circle_distances() {
        let ctx = SpatialContext::geo();
        let l = BufferedLine::new(Point(14.0, 60.0), Point(16.0, 60.0), 0.1, &ctx);
        //at 60 degrees north, 15 degrees of longitude are about 7.5 degrees of arc
        let c = GeoCircle::new(Point(0.0, 60.0), 10.0, &ctx);
        assert_eq!(c.relate(&Point(15.0, 60.0), &ctx), Contains);
        assert_eq!(l.relate(&c, &ctx), Within);
        let narrow = GeoCircle::new(Point(0.0, 60.0), 7.5, &ctx);
        assert_eq!(l.relate(&narrow, &ctx), Intersects);
        let short = GeoCircle::new(Point(0.0, 60.0), 6.0, &ctx);
        assert_eq!(l.relate(&short, &ctx), Disjoint);
    }

    #[test]
    fn small_geo_circle_inside_the_line() {
        let ctx = SpatialContext::geo();
        let l = BufferedLine::new(Point(14.0, 60.0), Point(16.0, 60.0), 0.1, &ctx);
        let c = GeoCircle::new(Point(15.0, 60.0), 0.05, &ctx);
        assert_eq!(l.relate(&c, &ctx), Contains);
        let line = AnyShape::BufferedLine(l);
        assert_eq!(AnyShape::GeoCircle(c).relate(&line, &ctx), Within);
    }

    #[test]
    fn geo_circle_across_the_dateline() {
        let ctx = SpatialContext::geo();
        let l = BufferedLine::new(Point(178.0, 0.0), Point(179.5, 0.0), 0.2, &ctx);
        let c = GeoCircle::new(Point(-179.0, 0.0), 2.0, &ctx);
        assert_eq!(l.relate(&c, &ctx), Intersects);
        let wide = GeoCircle::new(Point(-179.0, 0.0), 5.0, &ctx);
        assert_eq!(l.relate(&wide, &ctx), Within);
    }

    #[test_case(line(0.0, 5.0, 10.0, 5.0, 1.0), Disjoint; "parallel")]
    #[test_case(line(5.0, -5.0, 5.0, 5.0, 1.0), Intersects; "crossing")]
    #[test_case(line(2.0, 0.0, 8.0, 0.0, 0.5), Contains; "inside")]
    #[test_case(line(-2.0, 0.0, 12.0, 0.0, 2.0), Within; "around")]
    #[test_case(line(13.0, 0.0, 20.0, 7.0, 1.0), Disjoint; "diagonal beyond the end")]
    #[test_case(line(0.0, 0.0, 10.0, 0.0, 1.0), Contains; "equal")]
    fn relate_line(other: BufferedLine, expected: SpatialRelation) {
        let ctx = SpatialContext::cartesian();
        assert_eq!(line(0.0, 0.0, 10.0, 0.0, 1.0).relate(&other, &ctx), expected);
    }

    #[test]
    fn buffering_grows_the_buffer() {
        let ctx = SpatialContext::cartesian();
        match line(0.0, 0.0, 10.0, 0.0, 1.0).buffered(0.5, &ctx).unwrap() {
            AnyShape::BufferedLine(l) => assert_eq!(l, line(0.0, 0.0, 10.0, 0.0, 1.5)),
            other => panic!("expected a buffered line, got {other:?}"),
        }
    }
}
