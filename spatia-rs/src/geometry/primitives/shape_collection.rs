use crate::context::SpatialContext;
use crate::geometry::any_shape::AnyShape;
use crate::geometry::geo_enums::SpatialRelation;
use crate::geometry::geo_traits::{Relate, Shape};
use crate::geometry::primitives::{Point, Range, Rect};
use crate::util::assertions;
use anyhow::Result;
use itertools::Itertools;
use log::debug;

/// Ordered, heterogeneous collection of shapes, related to other shapes as their union.
///
/// The members' relations are folded with [`SpatialRelation::combine`] in order.
/// When `contains_short_circuit` is set (the default), folding stops at the first member
/// containing the other shape. Collections with overlapping members might then miss a
/// later member which makes the true relation [`SpatialRelation::Intersects`].
/// [`ShapeCollection::members_mutually_disjoint`] verifies whether this can happen.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeCollection {
    shapes: Vec<AnyShape>,
    bbox: Rect,
    contains_short_circuit: bool,
}

impl ShapeCollection {
    pub fn new(shapes: Vec<AnyShape>, ctx: &SpatialContext) -> Self {
        let bbox = compute_bbox(&shapes, ctx);
        debug_assert!(assertions::bbox_covers_members(&shapes, &bbox, ctx));
        ShapeCollection {
            shapes,
            bbox,
            contains_short_circuit: true,
        }
    }

    /// Whether folding member relations may stop at the first member containing the other shape.
    /// Relations with points always stop there.
    pub fn with_contains_short_circuit(mut self, contains_short_circuit: bool) -> Self {
        self.contains_short_circuit = contains_short_circuit;
        self
    }

    pub fn contains_short_circuit(&self) -> bool {
        self.contains_short_circuit
    }

    pub fn shapes(&self) -> &[AnyShape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Verifies whether no two members share any point, in which case short-circuiting on
    /// [`SpatialRelation::Contains`] never changes the outcome of a relation.
    /// Compares all pairs of members.
    pub fn members_mutually_disjoint(&self, ctx: &SpatialContext) -> bool {
        let first_overlap = self
            .shapes
            .iter()
            .enumerate()
            .tuple_combinations()
            .find(|((_, a), (_, b))| a.relate(*b, ctx) != SpatialRelation::Disjoint);
        match first_overlap {
            Some(((i, _), (j, _))) => {
                debug!("[COLL] members {i} and {j} overlap");
                false
            }
            None => true,
        }
    }
}

fn compute_bbox(shapes: &[AnyShape], ctx: &SpatialContext) -> Rect {
    let ranges = shapes
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| {
            let bbox = s.bbox();
            (Range::x_range(&bbox, ctx), Range::y_range(&bbox))
        })
        .reduce(|(x, y), (mx, my)| (x.expand_to(&mx), y.expand_to(&my)));
    match ranges {
        None => Rect::EMPTY,
        Some((x_range, y_range)) => {
            if ctx.is_geo() && x_range.width() == 360.0 && shapes.len() > 1 {
                debug!(
                    "[COLL] {} members wrap around the world, bbox spans all longitudes",
                    shapes.len()
                );
            }
            Rect::new(x_range.min(), x_range.max(), y_range.min(), y_range.max())
        }
    }
}

impl Relate<AnyShape> for ShapeCollection {
    fn relate(&self, other: &AnyShape, ctx: &SpatialContext) -> SpatialRelation {
        let bbox_sect = AnyShape::Rect(self.bbox).relate(other, ctx);
        if matches!(
            bbox_sect,
            SpatialRelation::Disjoint | SpatialRelation::Within
        ) {
            return bbox_sect;
        }
        let short_circuit = matches!(other, AnyShape::Point(_)) || self.contains_short_circuit;
        let mut sect = None;
        for shape in &self.shapes {
            let next = shape.relate(other, ctx);
            let combined = match sect {
                None => next,
                Some(s) => SpatialRelation::combine(s, next),
            };
            match combined {
                SpatialRelation::Intersects => return SpatialRelation::Intersects,
                SpatialRelation::Contains if short_circuit => return SpatialRelation::Contains,
                _ => sect = Some(combined),
            }
        }
        sect.unwrap_or(SpatialRelation::Disjoint)
    }
}

impl Shape for ShapeCollection {
    fn bbox(&self) -> Rect {
        self.bbox
    }

    fn center(&self) -> Point {
        self.bbox.center()
    }

    /// Sum of the members' areas, ignoring overlap but never exceeding the area of the bounding box.
    fn area(&self, ctx: &SpatialContext) -> f64 {
        let max_area = self.bbox.area(ctx);
        let mut sum = 0.0;
        for shape in &self.shapes {
            sum += shape.area(ctx);
            if sum >= max_area {
                return max_area;
            }
        }
        sum
    }

    fn has_area(&self) -> bool {
        self.shapes.iter().any(|s| s.has_area())
    }

    fn is_empty(&self) -> bool {
        self.shapes.iter().all(|s| s.is_empty())
    }

    fn buffered(&self, distance: f64, ctx: &SpatialContext) -> Result<AnyShape> {
        let buffered = self
            .shapes
            .iter()
            .map(|s| s.buffered(distance, ctx))
            .collect::<Result<Vec<_>>>()?;
        Ok(AnyShape::Collection(ShapeCollection {
            contains_short_circuit: self.contains_short_circuit,
            ..ShapeCollection::new(buffered, ctx)
        }))
    }
}
