use crate::geometry::geo_enums::SpatialRelation;
use serde::{Deserialize, Serialize};

/// Various ways to represent a shape.
/// Coordinates are interpreted by the [`SpatialContext`](crate::context::SpatialContext) importing them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum ExtShape {
    Point {
        x: f64,
        y: f64,
    },
    /// Axis-aligned rectangle. In a geodetic context, `min_x > max_x` crosses the antimeridian
    Rectangle {
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
    },
    /// All points within `radius` of (x, y)
    Circle {
        x: f64,
        y: f64,
        radius: f64,
    },
    /// Polyline through `points`, grown by `buffer`
    LineString {
        points: Vec<(f64, f64)>,
        #[serde(default)]
        buffer: f64,
        /// Widens the buffer of segments at high latitudes, see
        /// [`make_buffered_line_string`](crate::context::SpatialContext::make_buffered_line_string)
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        expand_buf_for_longitude_skew: bool,
    },
    /// Union of shapes
    Collection(Vec<ExtShape>),
}

/// A set of shapes and the pairs among them to relate.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtInstance {
    /// The name of the instance
    pub name: String,
    pub shapes: Vec<ExtShape>,
    /// Pairs of indices into `shapes`.
    /// All ordered pairs of distinct shapes if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairs: Option<Vec<(usize, usize)>>,
}

/// Relation of shape `a` to shape `b`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ExtRelation {
    pub a: usize,
    pub b: usize,
    pub relation: SpatialRelation,
}
