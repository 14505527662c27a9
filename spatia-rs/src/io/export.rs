use crate::geometry::any_shape::AnyShape;
use crate::geometry::geo_enums::SpatialRelation;
use crate::geometry::geo_traits::Shape;
use crate::io::ext_repr::{ExtRelation, ExtShape};
use itertools::Itertools;

/// Exports a shape by reading back the values which define it.
/// A single [`BufferedLine`](crate::geometry::primitives::BufferedLine) becomes a line string of two points.
pub fn export_shape(shape: &AnyShape) -> ExtShape {
    match shape {
        AnyShape::Point(p) => ExtShape::Point { x: p.x(), y: p.y() },
        AnyShape::Rect(r) => ExtShape::Rectangle {
            min_x: r.min_x(),
            max_x: r.max_x(),
            min_y: r.min_y(),
            max_y: r.max_y(),
        },
        AnyShape::Circle(c) => ExtShape::Circle {
            x: c.center().x(),
            y: c.center().y(),
            radius: c.radius(),
        },
        AnyShape::GeoCircle(c) => ExtShape::Circle {
            x: c.center().x(),
            y: c.center().y(),
            radius: c.radius(),
        },
        AnyShape::BufferedLine(l) => ExtShape::LineString {
            points: vec![l.a().into(), l.b().into()],
            buffer: l.buf(),
            expand_buf_for_longitude_skew: false,
        },
        AnyShape::BufferedLineString(ls) => ExtShape::LineString {
            points: ls.points().iter().map(|&p| p.into()).collect_vec(),
            buffer: ls.buf(),
            expand_buf_for_longitude_skew: ls.expands_buf_for_longitude_skew(),
        },
        AnyShape::Collection(c) => {
            ExtShape::Collection(c.shapes().iter().map(export_shape).collect_vec())
        }
    }
}

/// Pairs up relations with the indices of the shapes they relate.
pub fn export_relations(
    pairs: &[(usize, usize)],
    relations: &[SpatialRelation],
) -> Vec<ExtRelation> {
    debug_assert_eq!(pairs.len(), relations.len());
    pairs
        .iter()
        .zip(relations)
        .map(|(&(a, b), &relation)| ExtRelation { a, b, relation })
        .collect_vec()
}
