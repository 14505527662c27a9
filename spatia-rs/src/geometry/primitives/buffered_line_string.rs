use crate::context::SpatialContext;
use crate::distance::units::calc_lon_degrees_at_lat;
use crate::geometry::any_shape::AnyShape;
use crate::geometry::geo_enums::SpatialRelation;
use crate::geometry::geo_traits::{Relate, Shape};
use crate::geometry::primitives::{BufferedLine, Point, Rect, ShapeCollection};
use anyhow::Result;

/// Polyline grown by `buf`, made up of one [`BufferedLine`] per pair of consecutive points.
///
/// A single point results in one zero-length segment, no points in an empty shape.
/// Relations, bounding box and area are those of the [`ShapeCollection`] of its segments.
#[derive(Clone, Debug)]
pub struct BufferedLineString {
    points: Vec<Point>,
    buf: f64,
    expand_buf_for_longitude_skew: bool,
    segments: ShapeCollection,
}

impl BufferedLineString {
    pub fn new(
        points: Vec<Point>,
        buf: f64,
        expand_buf_for_longitude_skew: bool,
        ctx: &SpatialContext,
    ) -> Self {
        let segment = |a: Point, b: Point| {
            let seg_buf = match expand_buf_for_longitude_skew {
                true => expand_buf_for_longitude_skew_at(a, b, buf),
                false => buf,
            };
            AnyShape::BufferedLine(BufferedLine::new(a, b, seg_buf, ctx))
        };
        let segments = match points.as_slice() {
            [] => vec![],
            [p] => vec![segment(*p, *p)],
            _ => points.windows(2).map(|w| segment(w[0], w[1])).collect(),
        };
        BufferedLineString {
            points,
            buf,
            expand_buf_for_longitude_skew,
            segments: ShapeCollection::new(segments, ctx),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn buf(&self) -> f64 {
        self.buf
    }

    pub fn expands_buf_for_longitude_skew(&self) -> bool {
        self.expand_buf_for_longitude_skew
    }

    pub fn segments(&self) -> &ShapeCollection {
        &self.segments
    }
}

/// Buffer widened by the convergence of meridians at the highest latitude of the segment `a`-`b`.
///
/// Over-buffers the parts of the segment closer to the equator.
pub fn expand_buf_for_longitude_skew_at(a: Point, b: Point, buf: f64) -> f64 {
    let max_lat = f64::max(a.y().abs(), b.y().abs());
    let new_buf = calc_lon_degrees_at_lat(max_lat, buf);
    debug_assert!(new_buf >= buf || new_buf == 180.0);
    new_buf
}

impl PartialEq for BufferedLineString {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points && self.buf == other.buf
    }
}

impl Relate<AnyShape> for BufferedLineString {
    fn relate(&self, other: &AnyShape, ctx: &SpatialContext) -> SpatialRelation {
        self.segments.relate(other, ctx)
    }
}

impl Shape for BufferedLineString {
    fn bbox(&self) -> Rect {
        self.segments.bbox()
    }

    fn center(&self) -> Point {
        self.segments.center()
    }

    fn area(&self, ctx: &SpatialContext) -> f64 {
        self.segments.area(ctx)
    }

    fn has_area(&self) -> bool {
        self.segments.has_area()
    }

    fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn buffered(&self, distance: f64, ctx: &SpatialContext) -> Result<AnyShape> {
        ctx.make_buffered_line_string(
            self.points.clone(),
            self.buf + distance,
            self.expand_buf_for_longitude_skew,
        )
        .map(AnyShape::BufferedLineString)
    }
}
