use crate::geometry::geo_enums::SpatialRelation;
use crate::geometry::primitives::{Point, Rect};

/// Infinite line grown by `buf` on both sides.
///
/// Stored as `y = slope * x + intercept`. A vertical line has an infinite slope and stores
/// its x coordinate as the intercept.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InfBufLine {
    slope: f64,
    intercept: f64,
    buf: f64,
    /// `1 / sqrt(slope² + 1)`, NaN for a vertical line
    dist_denom_inv: f64,
}

/// Region of the plane relative to an [`InfBufLine`], numbered like the quadrants of a cartesian plane.
///
/// A line with a positive slope splits the plane into [`Quadrant::Q2`] (above) and
/// [`Quadrant::Q4`] (below), any other line into [`Quadrant::Q1`] and [`Quadrant::Q3`].
/// For a vertical line, [`Quadrant::Q1`] lies to the right, [`Quadrant::Q2`] to the left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quadrant {
    pub fn opposite(self) -> Self {
        match self {
            Quadrant::Q1 => Quadrant::Q3,
            Quadrant::Q2 => Quadrant::Q4,
            Quadrant::Q3 => Quadrant::Q1,
            Quadrant::Q4 => Quadrant::Q2,
        }
    }

    /// Corner of `rect` lying in this quadrant relative to the rectangle's center.
    pub fn corner_of(self, rect: &Rect) -> Point {
        //corners are ordered by quadrant
        rect.corners()[self as usize]
    }
}

impl InfBufLine {
    /// Line with `slope` through `point`.
    pub fn new(slope: f64, point: Point, buf: f64) -> Self {
        debug_assert!(!slope.is_nan(), "NaN slope");
        let (intercept, dist_denom_inv) = match slope.is_infinite() {
            true => (point.x(), f64::NAN),
            false => (
                point.y() - slope * point.x(),
                1.0 / (slope * slope + 1.0).sqrt(),
            ),
        };
        InfBufLine {
            slope,
            intercept,
            buf,
            dist_denom_inv,
        }
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn buf(&self) -> f64 {
        self.buf
    }

    pub fn dist_denom_inv(&self) -> f64 {
        self.dist_denom_inv
    }

    /// Perpendicular distance from `p` to the line, ignoring the buffer.
    pub fn distance_unbuffered(&self, p: &Point) -> f64 {
        match self.slope.is_infinite() {
            true => (p.x() - self.intercept).abs(),
            false => (p.y() - self.slope * p.x() - self.intercept).abs() * self.dist_denom_inv,
        }
    }

    pub fn contains(&self, p: &Point) -> bool {
        self.distance_unbuffered(p) <= self.buf
    }

    pub fn quadrant(&self, p: &Point) -> Quadrant {
        if self.slope.is_infinite() {
            return match p.x() > self.intercept {
                true => Quadrant::Q1,
                false => Quadrant::Q2,
            };
        }
        let above = p.y() >= self.slope * p.x() + self.intercept;
        match (self.slope > 0.0, above) {
            (true, true) => Quadrant::Q2,
            (true, false) => Quadrant::Q4,
            (false, true) => Quadrant::Q1,
            (false, false) => Quadrant::Q3,
        }
    }

    /// Relation of the buffered line to `rect`, whose center is `rect_center`.
    ///
    /// Only two corners are tested: the one nearest to the line, opposite to the quadrant of the
    /// center, and the farthest one, in the same quadrant as the center.
    pub fn relate(&self, rect: &Rect, rect_center: &Point) -> SpatialRelation {
        let center_quad = self.quadrant(rect_center);
        let nearest = center_quad.opposite().corner_of(rect);
        if self.contains(&nearest) {
            let farthest = center_quad.corner_of(rect);
            match self.contains(&farthest) {
                true => SpatialRelation::Contains,
                false => SpatialRelation::Intersects,
            }
        } else if self.quadrant(&nearest) == center_quad {
            //out of the buffer, on the same side as the center
            SpatialRelation::Disjoint
        } else {
            //nearest and farthest corner lie on opposite sides of the line
            SpatialRelation::Intersects
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geo_enums::SpatialRelation::*;
    use crate::geometry::geo_traits::Shape;
    use float_cmp::approx_eq;
    use test_case::test_case;

    #[test]
    fn vertical_line_stores_x_intercept() {
        let l = InfBufLine::new(f64::INFINITY, Point(3.0, 7.0), 1.0);
        assert_eq!(l.intercept(), 3.0);
        assert!(l.dist_denom_inv().is_nan());
        assert_eq!(l.distance_unbuffered(&Point(5.5, -100.0)), 2.5);
        assert_eq!(l.quadrant(&Point(4.0, 0.0)), Quadrant::Q1);
        assert_eq!(l.quadrant(&Point(2.0, 0.0)), Quadrant::Q2);
    }

    #[test]
    fn diagonal_distance() {
        let l = InfBufLine::new(1.0, Point(0.0, 0.0), 1.0);
        let d = l.distance_unbuffered(&Point(1.0, 0.0));
        assert!(approx_eq!(f64, d, std::f64::consts::FRAC_1_SQRT_2, ulps = 2));
        assert!(l.contains(&Point(1.0, 0.0)));
        assert!(!l.contains(&Point(2.0, 0.0)));
    }

    #[test_case(1.0, Point(-1.0, 1.0), Quadrant::Q2; "forward slash above")]
    #[test_case(1.0, Point(1.0, -1.0), Quadrant::Q4; "forward slash below")]
    #[test_case(-1.0, Point(1.0, 1.0), Quadrant::Q1; "backslash above")]
    #[test_case(-1.0, Point(-1.0, -1.0), Quadrant::Q3; "backslash below")]
    #[test_case(0.0, Point(5.0, 0.0), Quadrant::Q1; "on a horizontal line")]
    fn quadrants(slope: f64, p: Point, expected: Quadrant) {
        let l = InfBufLine::new(slope, Point(0.0, 0.0), 0.5);
        assert_eq!(l.quadrant(&p), expected);
    }

    #[test]
    fn corners_by_quadrant() {
        let r = Rect::new(0.0, 2.0, 0.0, 1.0);
        assert_eq!(Quadrant::Q1.corner_of(&r), Point(2.0, 1.0));
        assert_eq!(Quadrant::Q2.corner_of(&r), Point(0.0, 1.0));
        assert_eq!(Quadrant::Q3.corner_of(&r), Point(0.0, 0.0));
        assert_eq!(Quadrant::Q4.corner_of(&r), Point(2.0, 0.0));
        assert_eq!(Quadrant::Q4.opposite(), Quadrant::Q2);
    }

    #[test_case(Rect::new(-1.0, 1.0, 0.5, 1.5), Contains; "inside the buffer")]
    #[test_case(Rect::new(-1.0, 1.0, -1.0, 1.0), Contains; "on the line")]
    #[test_case(Rect::new(-1.0, 1.0, 1.5, 3.0), Intersects; "partially above")]
    #[test_case(Rect::new(-1.0, 1.0, 2.5, 3.0), Disjoint; "above")]
    #[test_case(Rect::new(-1.0, 1.0, -3.0, -2.5), Disjoint; "below")]
    #[test_case(Rect::new(-1.0, 1.0, -5.0, 5.0), Intersects; "straddling")]
    fn relate_rect_to_horizontal_line(rect: Rect, expected: SpatialRelation) {
        let l = InfBufLine::new(0.0, Point(0.0, 0.0), 2.0);
        assert_eq!(l.relate(&rect, &rect.center()), expected);
    }
}
