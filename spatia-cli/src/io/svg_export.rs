use serde::{Deserialize, Serialize};
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Path};

use spatia_rs::context::SpatialContext;
use spatia_rs::geometry::primitives::{BufferedLine, Point, Rect};
use spatia_rs::geometry::{AnyShape, Shape};

/// How shapes are drawn. Everything is drawn on the plane: longitudes and latitudes are used as
/// plain x and y, so geodetic circles appear as (undistorted) circles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SvgDrawOptions {
    /// Stroke width as a fraction of the largest side of the drawing
    pub stroke_width: f64,
    pub fill_opacity: f64,
    /// Also draws the bounding box of every shape
    #[serde(default)]
    pub bboxes: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            stroke_width: 0.002,
            fill_opacity: 0.3,
            bboxes: false,
        }
    }
}

const PALETTE: [&str; 8] = [
    "#1F77B4", "#FF7F0E", "#2CA02C", "#D62728", "#9467BD", "#8C564B", "#E377C2", "#17BECF",
];

/// Draws all `shapes` in a single document, each in its own group tagged with its index and kind.
pub fn shapes_to_svg(shapes: &[AnyShape], ctx: &SpatialContext, options: SvgDrawOptions) -> Document {
    let view = view_box(shapes, ctx);
    let stroke_width = options.stroke_width * f64::max(view.width(), view.height());

    //svg's y axis points down
    let mut root = Group::new().set("transform", "scale(1, -1)");
    for (i, shape) in shapes.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let params = [
            ("fill", color.to_string()),
            ("fill-opacity", options.fill_opacity.to_string()),
            ("stroke", color.to_string()),
            ("stroke-width", stroke_width.to_string()),
        ];
        let mut group = Group::new()
            .set("id", format!("shape_{i}"))
            .set("data-kind", shape.kind());
        group = draw_shape(group, shape, ctx, &params, stroke_width);
        if options.bboxes && !shape.is_empty() {
            let bbox_params = [
                ("fill", "none".to_string()),
                ("stroke", color.to_string()),
                ("stroke-width", (stroke_width / 2.0).to_string()),
                ("stroke-dasharray", format!("{} {}", stroke_width * 4.0, stroke_width * 2.0)),
            ];
            group = group.add(data_to_path(rect_data(&shape.bbox(), ctx), &bbox_params));
        }
        root = root.add(group);
    }

    Document::new()
        .set(
            "viewBox",
            (view.min_x(), -view.max_y(), view.width(), view.height()),
        )
        .add(root)
}

fn draw_shape(
    mut group: Group,
    shape: &AnyShape,
    ctx: &SpatialContext,
    params: &[(&str, String)],
    stroke_width: f64,
) -> Group {
    match shape {
        _ if shape.is_empty() => group,
        AnyShape::Point(p) => group.add(point(*p, params, stroke_width * 2.0)),
        AnyShape::Rect(r) => group.add(data_to_path(rect_data(r, ctx), params)),
        AnyShape::Circle(c) => group.add(circle(c.center(), c.radius(), params)),
        AnyShape::GeoCircle(c) => group.add(circle(c.center(), c.radius(), params)),
        AnyShape::BufferedLine(l) => group.add(data_to_path(buffered_line_data(l), params)),
        AnyShape::BufferedLineString(ls) => {
            for segment in ls.segments().shapes() {
                group = draw_shape(group, segment, ctx, params, stroke_width);
            }
            group
        }
        AnyShape::Collection(c) => {
            for member in c.shapes() {
                group = draw_shape(group, member, ctx, params, stroke_width);
            }
            group
        }
    }
}

/// Area shown in the document: the globe when geodetic, the union of all bounding boxes otherwise.
fn view_box(shapes: &[AnyShape], ctx: &SpatialContext) -> Rect {
    if ctx.is_geo() {
        return Rect::GEO_WORLD;
    }
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
    );
    for bbox in shapes.iter().filter(|s| !s.is_empty()).map(|s| s.bbox()) {
        min_x = min_x.min(bbox.min_x());
        max_x = max_x.max(bbox.max_x());
        min_y = min_y.min(bbox.min_y());
        max_y = max_y.max(bbox.max_y());
    }
    if min_x > max_x {
        //nothing to draw
        return Rect::new(0.0, 1.0, 0.0, 1.0);
    }
    //a margin of 5%, at least 1 unit for degenerate drawings
    let margin = f64::max(0.05 * f64::max(max_x - min_x, max_y - min_y), 1.0);
    Rect::new(
        min_x - margin,
        max_x + margin,
        min_y - margin,
        max_y + margin,
    )
}

pub fn data_to_path(data: Data, params: &[(&str, String)]) -> Path {
    let mut path = Path::new();
    for (key, value) in params {
        path = path.set(*key, value.as_str())
    }
    path.set("d", data)
}

pub fn point(Point(x, y): Point, params: &[(&str, String)], rad: f64) -> Circle {
    let mut circle = Circle::new().set("cx", x).set("cy", y).set("r", rad);
    for (key, value) in params {
        circle = circle.set(*key, value.as_str())
    }
    circle
}

pub fn circle(Point(x, y): Point, radius: f64, params: &[(&str, String)]) -> Circle {
    point(Point(x, y), params, radius)
}

/// A rectangle crossing the dateline is drawn as two parts, one on each side.
pub fn rect_data(rect: &Rect, ctx: &SpatialContext) -> Data {
    let parts = match ctx.is_geo() && rect.crosses_dateline() {
        true => vec![
            (rect.min_x(), 180.0),
            (-180.0, rect.max_x()),
        ],
        false => vec![(rect.min_x(), rect.max_x())],
    };
    let (min_y, max_y) = (rect.min_y(), rect.max_y());
    parts.into_iter().fold(Data::new(), |data, (min_x, max_x)| {
        data.move_to((min_x, min_y))
            .line_to((max_x, min_y))
            .line_to((max_x, max_y))
            .line_to((min_x, max_y))
            .close()
    })
}

pub fn buffered_line_data(line: &BufferedLine) -> Data {
    let [c0, c1, c2, c3] = line.corners();
    Data::new()
        .move_to::<(f64, f64)>(c0.into())
        .line_to::<(f64, f64)>(c1.into())
        .line_to::<(f64, f64)>(c2.into())
        .line_to::<(f64, f64)>(c3.into())
        .close()
}
