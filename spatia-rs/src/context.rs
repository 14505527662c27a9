use anyhow::{Result, bail, ensure};
use log::debug;

use crate::distance::DistanceCalculator;
use crate::distance::units::{norm_lat_deg, norm_lon_deg};
use crate::geometry::any_shape::AnyShape;
use crate::geometry::primitives::{
    BufferedLine, BufferedLineString, Circle, GeoCircle, Point, Rect, ShapeCollection,
};
use crate::util::SpatialContextConfig;

/// Coordinate model shared by all shapes it creates.
///
/// Decides whether coordinates are longitude/latitude degrees on a sphere or unitless values on a
/// plane, bounds every coordinate and supplies the [`DistanceCalculator`].
/// All shapes should be created through the `make_*` functions, which normalize and validate.
/// Relating shapes from different contexts is undefined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpatialContext {
    config: SpatialContextConfig,
    world_bounds: Rect,
    calculator: DistanceCalculator,
}

impl SpatialContext {
    /// Geodetic context with the haversine formula.
    pub fn geo() -> Self {
        SpatialContext {
            config: SpatialContextConfig::geo(),
            world_bounds: Rect::GEO_WORLD,
            calculator: DistanceCalculator::HAVERSINE,
        }
    }

    /// Unbounded planar context.
    pub fn cartesian() -> Self {
        SpatialContext {
            config: SpatialContextConfig::cartesian(),
            world_bounds: Rect::new(-f64::MAX, f64::MAX, -f64::MAX, f64::MAX),
            calculator: DistanceCalculator::CARTESIAN,
        }
    }

    pub fn new(config: SpatialContextConfig) -> Result<Self> {
        let calculator = DistanceCalculator::from(config.distance_calculator);
        ensure!(
            config.geo == calculator.is_geodesic(),
            "distance calculator {:?} does not suit a {} context",
            config.distance_calculator,
            if config.geo { "geodetic" } else { "planar" }
        );
        let world_bounds = match (config.geo, config.world_bounds) {
            (true, None) => Rect::GEO_WORLD,
            (true, Some(bounds)) => {
                ensure!(
                    bounds == [-180.0, 180.0, -90.0, 90.0],
                    "geodetic world bounds must cover the globe, got {bounds:?}"
                );
                Rect::GEO_WORLD
            }
            (false, None) => Rect::new(-f64::MAX, f64::MAX, -f64::MAX, f64::MAX),
            (false, Some([min_x, max_x, min_y, max_y])) => {
                ensure!(
                    min_x <= max_x && min_y <= max_y,
                    "invalid world bounds: {:?}",
                    [min_x, max_x, min_y, max_y]
                );
                Rect::new(min_x, max_x, min_y, max_y)
            }
        };
        debug!(
            "[CTX] created {} context, calculator: {:?}, world bounds: {:?}",
            if config.geo { "geodetic" } else { "planar" },
            config.distance_calculator,
            world_bounds
        );
        Ok(SpatialContext {
            config,
            world_bounds,
            calculator,
        })
    }

    pub fn config(&self) -> &SpatialContextConfig {
        &self.config
    }

    pub fn is_geo(&self) -> bool {
        self.config.geo
    }

    pub fn world_bounds(&self) -> &Rect {
        &self.world_bounds
    }

    pub fn calculator(&self) -> &DistanceCalculator {
        &self.calculator
    }

    /// Wraps longitudes into [-180, 180] if the context is configured to.
    pub fn norm_x(&self, x: f64) -> f64 {
        match self.is_geo() && self.config.norm_wrap_longitude {
            true => norm_lon_deg(x),
            false => x,
        }
    }

    /// Reflects latitudes over the poles if the context is configured to wrap longitudes.
    pub fn norm_y(&self, y: f64) -> f64 {
        match self.is_geo() && self.config.norm_wrap_longitude {
            true => norm_lat_deg(y),
            false => y,
        }
    }

    /// Errors if `x` lies outside the world bounds. NaN passes: it marks an empty shape.
    pub fn verify_x(&self, x: f64) -> Result<()> {
        let b = &self.world_bounds;
        if x < b.min_x() || x > b.max_x() {
            bail!(
                "invalid shape: x {x} is out of bounds [{}, {}]",
                b.min_x(),
                b.max_x()
            );
        }
        Ok(())
    }

    /// Errors if `y` lies outside the world bounds. NaN passes: it marks an empty shape.
    pub fn verify_y(&self, y: f64) -> Result<()> {
        let b = &self.world_bounds;
        if y < b.min_y() || y > b.max_y() {
            bail!(
                "invalid shape: y {y} is out of bounds [{}, {}]",
                b.min_y(),
                b.max_y()
            );
        }
        Ok(())
    }

    pub fn make_point(&self, x: f64, y: f64) -> Result<Point> {
        let (x, y) = (self.norm_x(x), self.norm_y(y));
        self.verify_x(x)?;
        self.verify_y(y)?;
        Ok(Point(x, y))
    }

    /// Creates a rectangle.
    ///
    /// In a geodetic context `min_x > max_x` creates a rectangle crossing the antimeridian.
    /// An X range starting at 180 or ending at -180 is flipped to the other side of the antimeridian,
    /// unless the range is a single longitude.
    pub fn make_rect(&self, min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Result<Rect> {
        let (mut min_x, mut max_x) = (self.norm_x(min_x), self.norm_x(max_x));
        let (min_y, max_y) = (self.norm_y(min_y), self.norm_y(max_y));
        self.verify_x(min_x)?;
        self.verify_x(max_x)?;
        self.verify_y(min_y)?;
        self.verify_y(max_y)?;
        ensure!(
            !(min_y > max_y),
            "invalid shape: min_y {min_y} > max_y {max_y}"
        );
        if self.is_geo() {
            //only one edge flips: (180, -180) is the antimeridian itself, not the world
            if min_x != max_x {
                if min_x == 180.0 {
                    min_x = -180.0;
                } else if max_x == -180.0 {
                    max_x = 180.0;
                }
            }
        } else {
            ensure!(
                !(min_x > max_x),
                "invalid shape: min_x {min_x} > max_x {max_x}"
            );
        }
        Ok(Rect::new(min_x, max_x, min_y, max_y))
    }

    /// Rectangle spanned by its lower left and upper right corner.
    pub fn make_rect_from_corners(&self, lower_left: Point, upper_right: Point) -> Result<Rect> {
        self.make_rect(
            lower_left.x(),
            upper_right.x(),
            lower_left.y(),
            upper_right.y(),
        )
    }

    /// Creates a [`GeoCircle`] in a geodetic context, a [`Circle`] otherwise.
    ///
    /// A geodetic radius beyond 180 degrees is clamped: the circle already covers the globe.
    pub fn make_circle(&self, center: Point, radius: f64) -> Result<AnyShape> {
        self.verify_x(center.x())?;
        self.verify_y(center.y())?;
        ensure!(!(radius < 0.0), "invalid shape: negative radius {radius}");
        match self.is_geo() {
            true => Ok(AnyShape::GeoCircle(GeoCircle::new(
                center,
                f64::min(radius, 180.0),
                self,
            ))),
            false => Ok(AnyShape::Circle(Circle::new(center, radius, self))),
        }
    }

    /// Segment from `a` to `b` grown by `buf`, both around and beyond its endpoints.
    pub fn make_buffered_line(&self, a: Point, b: Point, buf: f64) -> Result<BufferedLine> {
        for p in [a, b] {
            self.verify_x(p.x())?;
            self.verify_y(p.y())?;
        }
        ensure!(!(buf < 0.0), "invalid shape: negative buffer {buf}");
        Ok(BufferedLine::new(a, b, buf, self))
    }

    pub fn make_line_string(&self, points: Vec<Point>) -> Result<BufferedLineString> {
        self.make_buffered_line_string(points, 0.0, false)
    }

    /// Polyline through `points` grown by `buf`.
    ///
    /// With `expand_buf_for_longitude_skew` set, the buffer of every segment is widened to
    /// account for meridians converging at its highest latitude.
    pub fn make_buffered_line_string(
        &self,
        points: Vec<Point>,
        buf: f64,
        expand_buf_for_longitude_skew: bool,
    ) -> Result<BufferedLineString> {
        for p in &points {
            self.verify_x(p.x())?;
            self.verify_y(p.y())?;
        }
        ensure!(!(buf < 0.0), "invalid shape: negative buffer {buf}");
        Ok(BufferedLineString::new(
            points,
            buf,
            expand_buf_for_longitude_skew,
            self,
        ))
    }

    pub fn make_collection(&self, shapes: Vec<AnyShape>) -> ShapeCollection {
        ShapeCollection::new(shapes, self)
    }

    /// Distance between two points, as computed by the context's [`DistanceCalculator`].
    pub fn calc_distance(&self, from: Point, to: Point) -> f64 {
        self.calculator.distance(from, to)
    }
}

impl Default for SpatialContext {
    fn default() -> Self {
        Self::geo()
    }
}
