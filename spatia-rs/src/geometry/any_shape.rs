use crate::context::SpatialContext;
use crate::geometry::geo_enums::SpatialRelation;
use crate::geometry::geo_traits::{Relate, Shape};
use crate::geometry::primitives::{
    BufferedLine, BufferedLineString, Circle, GeoCircle, Point, Rect, ShapeCollection,
};
use anyhow::Result;

/// Closed union of all shape kinds.
///
/// Relating two shapes asks the more specific kind of the two to compute the relation.
/// Each kind knows how to relate to the kinds listed before it and to itself:
/// [`Point`] < [`Rect`] < [`Circle`]/[`GeoCircle`] < [`BufferedLine`] < collections.
/// Any other pairing is computed the other way around and transposed.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyShape {
    Point(Point),
    Rect(Rect),
    Circle(Circle),
    GeoCircle(GeoCircle),
    BufferedLine(BufferedLine),
    BufferedLineString(BufferedLineString),
    Collection(ShapeCollection),
}

impl AnyShape {
    /// Short lowercase name of the kind of shape
    pub fn kind(&self) -> &'static str {
        match self {
            AnyShape::Point(_) => "point",
            AnyShape::Rect(_) => "rectangle",
            AnyShape::Circle(_) => "circle",
            AnyShape::GeoCircle(_) => "geo_circle",
            AnyShape::BufferedLine(_) => "buffered_line",
            AnyShape::BufferedLineString(_) => "line_string",
            AnyShape::Collection(_) => "collection",
        }
    }
}

impl Relate<AnyShape> for AnyShape {
    fn relate(&self, other: &AnyShape, ctx: &SpatialContext) -> SpatialRelation {
        use AnyShape as S;
        if self.is_empty() || other.is_empty() {
            return SpatialRelation::Disjoint;
        }
        match (self, other) {
            (S::Collection(c), _) => c.relate(other, ctx),
            (S::BufferedLineString(ls), _) => ls.relate(other, ctx),

            (S::Point(a), S::Point(b)) => a.relate(b, ctx),

            (S::Rect(a), S::Point(b)) => a.relate(b, ctx),
            (S::Rect(a), S::Rect(b)) => a.relate(b, ctx),

            (S::Circle(a), S::Point(b)) => a.relate(b, ctx),
            (S::Circle(a), S::Rect(b)) => a.relate(b, ctx),
            (S::Circle(a), S::Circle(b)) => a.relate(b, ctx),

            (S::GeoCircle(a), S::Point(b)) => a.relate(b, ctx),
            (S::GeoCircle(a), S::Rect(b)) => a.relate(b, ctx),
            (S::GeoCircle(a), S::Circle(b)) => a.relate(b, ctx),
            (S::GeoCircle(a), S::GeoCircle(b)) => a.relate(b, ctx),

            (S::BufferedLine(a), S::Point(b)) => a.relate(b, ctx),
            (S::BufferedLine(a), S::Rect(b)) => a.relate(b, ctx),
            (S::BufferedLine(a), S::Circle(b)) => a.relate(b, ctx),
            (S::BufferedLine(a), S::GeoCircle(b)) => a.relate(b, ctx),
            (S::BufferedLine(a), S::BufferedLine(b)) => a.relate(b, ctx),

            _ => other.relate(self, ctx).transpose(),
        }
    }
}

impl Relate<AnyShape> for Rect {
    fn relate(&self, other: &AnyShape, ctx: &SpatialContext) -> SpatialRelation {
        AnyShape::Rect(*self).relate(other, ctx)
    }
}

impl Relate<AnyShape> for Point {
    fn relate(&self, other: &AnyShape, ctx: &SpatialContext) -> SpatialRelation {
        AnyShape::Point(*self).relate(other, ctx)
    }
}

impl Shape for AnyShape {
    fn bbox(&self) -> Rect {
        match self {
            AnyShape::Point(s) => s.bbox(),
            AnyShape::Rect(s) => s.bbox(),
            AnyShape::Circle(s) => s.bbox(),
            AnyShape::GeoCircle(s) => s.bbox(),
            AnyShape::BufferedLine(s) => s.bbox(),
            AnyShape::BufferedLineString(s) => s.bbox(),
            AnyShape::Collection(s) => s.bbox(),
        }
    }

    fn center(&self) -> Point {
        match self {
            AnyShape::Point(s) => s.center(),
            AnyShape::Rect(s) => s.center(),
            AnyShape::Circle(s) => s.center(),
            AnyShape::GeoCircle(s) => s.center(),
            AnyShape::BufferedLine(s) => s.center(),
            AnyShape::BufferedLineString(s) => s.center(),
            AnyShape::Collection(s) => s.center(),
        }
    }

    fn area(&self, ctx: &SpatialContext) -> f64 {
        match self {
            AnyShape::Point(s) => s.area(ctx),
            AnyShape::Rect(s) => s.area(ctx),
            AnyShape::Circle(s) => s.area(ctx),
            AnyShape::GeoCircle(s) => s.area(ctx),
            AnyShape::BufferedLine(s) => s.area(ctx),
            AnyShape::BufferedLineString(s) => s.area(ctx),
            AnyShape::Collection(s) => s.area(ctx),
        }
    }

    fn has_area(&self) -> bool {
        match self {
            AnyShape::Point(s) => s.has_area(),
            AnyShape::Rect(s) => s.has_area(),
            AnyShape::Circle(s) => s.has_area(),
            AnyShape::GeoCircle(s) => s.has_area(),
            AnyShape::BufferedLine(s) => s.has_area(),
            AnyShape::BufferedLineString(s) => s.has_area(),
            AnyShape::Collection(s) => s.has_area(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            AnyShape::Point(s) => s.is_empty(),
            AnyShape::Rect(s) => s.is_empty(),
            AnyShape::Circle(s) => s.is_empty(),
            AnyShape::GeoCircle(s) => s.is_empty(),
            AnyShape::BufferedLine(s) => s.is_empty(),
            AnyShape::BufferedLineString(s) => s.is_empty(),
            AnyShape::Collection(s) => s.is_empty(),
        }
    }

    fn buffered(&self, distance: f64, ctx: &SpatialContext) -> Result<AnyShape> {
        match self {
            AnyShape::Point(s) => s.buffered(distance, ctx),
            AnyShape::Rect(s) => s.buffered(distance, ctx),
            AnyShape::Circle(s) => s.buffered(distance, ctx),
            AnyShape::GeoCircle(s) => s.buffered(distance, ctx),
            AnyShape::BufferedLine(s) => s.buffered(distance, ctx),
            AnyShape::BufferedLineString(s) => s.buffered(distance, ctx),
            AnyShape::Collection(s) => s.buffered(distance, ctx),
        }
    }
}

impl From<Point> for AnyShape {
    fn from(p: Point) -> Self {
        AnyShape::Point(p)
    }
}

impl From<Rect> for AnyShape {
    fn from(r: Rect) -> Self {
        AnyShape::Rect(r)
    }
}

impl From<Circle> for AnyShape {
    fn from(c: Circle) -> Self {
        AnyShape::Circle(c)
    }
}

impl From<GeoCircle> for AnyShape {
    fn from(c: GeoCircle) -> Self {
        AnyShape::GeoCircle(c)
    }
}

impl From<BufferedLine> for AnyShape {
    fn from(l: BufferedLine) -> Self {
        AnyShape::BufferedLine(l)
    }
}

impl From<BufferedLineString> for AnyShape {
    fn from(ls: BufferedLineString) -> Self {
        AnyShape::BufferedLineString(ls)
    }
}

impl From<ShapeCollection> for AnyShape {
    fn from(c: ShapeCollection) -> Self {
        AnyShape::Collection(c)
    }
}
