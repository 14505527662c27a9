use crate::context::SpatialContext;
use crate::geometry::any_shape::AnyShape;
use crate::geometry::primitives::Point;
use crate::io::ext_repr::{ExtInstance, ExtShape};
use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use log::{debug, warn};

/// Converts external representations of shapes into internal ones.
/// Shapes are only ever created through the factory functions of its [`SpatialContext`].
#[derive(Clone, Debug, Copy)]
pub struct Importer {
    pub ctx: SpatialContext,
    /// See [`ShapeCollection::with_contains_short_circuit`](crate::geometry::primitives::ShapeCollection::with_contains_short_circuit)
    pub contains_short_circuit: bool,
}

/// An [`ExtInstance`] converted into shapes, with the pairs to relate.
#[derive(Clone, Debug)]
pub struct Instance {
    pub name: String,
    pub shapes: Vec<AnyShape>,
    pub pairs: Vec<(usize, usize)>,
}

impl Importer {
    pub fn new(ctx: SpatialContext, contains_short_circuit: bool) -> Importer {
        Importer {
            ctx,
            contains_short_circuit,
        }
    }

    pub fn import_shape(&self, ext_shape: &ExtShape) -> Result<AnyShape> {
        let ctx = &self.ctx;
        let shape = match ext_shape {
            ExtShape::Point { x, y } => AnyShape::Point(ctx.make_point(*x, *y)?),
            ExtShape::Rectangle {
                min_x,
                max_x,
                min_y,
                max_y,
            } => AnyShape::Rect(ctx.make_rect(*min_x, *max_x, *min_y, *max_y)?),
            ExtShape::Circle { x, y, radius } => {
                let center = ctx.make_point(*x, *y)?;
                ctx.make_circle(center, *radius)?
            }
            ExtShape::LineString {
                points,
                buffer,
                expand_buf_for_longitude_skew,
            } => {
                if *expand_buf_for_longitude_skew && !ctx.is_geo() {
                    warn!("[IMP] longitude skew has no meaning on a plane, ignoring it");
                }
                let points = points
                    .iter()
                    .map(|&(x, y)| ctx.make_point(x, y))
                    .collect::<Result<Vec<Point>>>()?;
                AnyShape::BufferedLineString(ctx.make_buffered_line_string(
                    points,
                    *buffer,
                    *expand_buf_for_longitude_skew && ctx.is_geo(),
                )?)
            }
            ExtShape::Collection(members) => {
                let members = members
                    .iter()
                    .map(|m| self.import_shape(m))
                    .collect::<Result<Vec<AnyShape>>>()?;
                AnyShape::Collection(
                    ctx.make_collection(members)
                        .with_contains_short_circuit(self.contains_short_circuit),
                )
            }
        };
        Ok(shape)
    }

    /// Imports all shapes of the instance and resolves the pairs to relate.
    pub fn import_instance(&self, ext_instance: &ExtInstance) -> Result<Instance> {
        let shapes = ext_instance
            .shapes
            .iter()
            .enumerate()
            .map(|(i, s)| {
                self.import_shape(s)
                    .with_context(|| format!("failed to import shape {i}"))
            })
            .collect::<Result<Vec<AnyShape>>>()?;

        let pairs = match &ext_instance.pairs {
            Some(pairs) => {
                ensure!(
                    pairs
                        .iter()
                        .all(|&(a, b)| a < shapes.len() && b < shapes.len()),
                    "pairs refer to shapes beyond the {} in the instance",
                    shapes.len()
                );
                pairs.clone()
            }
            None => (0..shapes.len())
                .cartesian_product(0..shapes.len())
                .filter(|(a, b)| a != b)
                .collect_vec(),
        };
        debug!(
            "[IMP] imported {} shapes and {} pairs from instance {}",
            shapes.len(),
            pairs.len(),
            ext_instance.name
        );

        Ok(Instance {
            name: ext_instance.name.clone(),
            shapes,
            pairs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geo_traits::Shape;
    use crate::geometry::primitives::Rect;

    fn instance_json() -> &'static str {
        r#"{
            "name": "mixed",
            "shapes": [
                {"type": "point", "data": {"x": -180.0, "y": 5.0}},
                {"type": "rectangle", "data": {"min_x": 160.0, "max_x": -170.0, "min_y": 0.0, "max_y": 10.0}},
                {"type": "circle", "data": {"x": 0.0, "y": 0.0, "radius": 90.0}},
                {"type": "line_string", "data": {"points": [[0.0, 0.0], [10.0, 10.0]], "buffer": 1.0}},
                {"type": "collection", "data": [{"type": "point", "data": {"x": 1.0, "y": 2.0}}]}
            ]
        }"#
    }

    #[test]
    fn import_geo_instance() {
        let ext: ExtInstance = serde_json::from_str(instance_json()).unwrap();
        let importer = Importer::new(SpatialContext::geo(), true);
        let instance = importer.import_instance(&ext).unwrap();
        assert_eq!(instance.shapes.len(), 5);
        assert_eq!(instance.pairs.len(), 20);
        assert!(matches!(instance.shapes[2], AnyShape::GeoCircle(_)));
        assert_eq!(
            instance.shapes[1].bbox(),
            Rect::new(160.0, -170.0, 0.0, 10.0)
        );
    }

    #[test]
    fn invalid_shapes_are_reported() {
        let ext = ExtInstance {
            name: "invalid".into(),
            shapes: vec![ExtShape::Circle {
                x: 0.0,
                y: 0.0,
                radius: -1.0,
            }],
            pairs: None,
        };
        let importer = Importer::new(SpatialContext::geo(), true);
        let err = importer.import_instance(&ext).unwrap_err();
        assert!(format!("{err:#}").contains("invalid shape"), "{err:#}");
    }

    #[test]
    fn pairs_must_refer_to_shapes() {
        let ext = ExtInstance {
            name: "dangling".into(),
            shapes: vec![ExtShape::Point { x: 0.0, y: 0.0 }],
            pairs: Some(vec![(0, 3)]),
        };
        let importer = Importer::new(SpatialContext::cartesian(), true);
        assert!(importer.import_instance(&ext).is_err());
    }
}
