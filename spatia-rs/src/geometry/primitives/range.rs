use std::cmp::Ordering;

use crate::context::SpatialContext;
use crate::geometry::primitives::Rect;
use ordered_float::OrderedFloat;

/// One-dimensional closed interval.
///
/// A [`Range::Longitude`] lives on a circle of 360 degrees: `min > max` means it wraps across the
/// antimeridian.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Range {
    Linear { min: f64, max: f64 },
    Longitude { min: f64, max: f64 },
}

impl Range {
    pub const WORLD_LONGITUDE: Range = Range::Longitude {
        min: -180.0,
        max: 180.0,
    };

    /// The X extent of `rect`, circular in a geodetic context.
    pub fn x_range(rect: &Rect, ctx: &SpatialContext) -> Range {
        let (min, max) = (rect.min_x(), rect.max_x());
        match ctx.is_geo() {
            true => Range::Longitude { min, max },
            false => Range::Linear { min, max },
        }
    }

    /// The Y extent of `rect`, never circular.
    pub fn y_range(rect: &Rect) -> Range {
        Range::Linear {
            min: rect.min_y(),
            max: rect.max_y(),
        }
    }

    pub fn min(&self) -> f64 {
        match *self {
            Range::Linear { min, .. } | Range::Longitude { min, .. } => min,
        }
    }

    pub fn max(&self) -> f64 {
        match *self {
            Range::Linear { max, .. } | Range::Longitude { max, .. } => max,
        }
    }

    pub fn crosses_dateline(&self) -> bool {
        match *self {
            Range::Linear { .. } => false,
            Range::Longitude { min, max } => min > max,
        }
    }

    pub fn width(&self) -> f64 {
        match *self {
            Range::Linear { min, max } => max - min,
            Range::Longitude { min, max } => {
                let w = max - min;
                if w < 0.0 { w + 360.0 } else { w }
            }
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        match *self {
            Range::Longitude { min, max } if min > max => v >= min || v <= max,
            Range::Linear { min, max } | Range::Longitude { min, max } => min <= v && v <= max,
        }
    }

    /// Midpoint, wrapped into (-180, 180] for longitudes.
    pub fn center(&self) -> f64 {
        let center = self.min() + self.width() / 2.0;
        match self {
            Range::Longitude { .. } if center > 180.0 => center - 360.0,
            _ => center,
        }
    }

    /// Orders ranges by center. Longitudes compare by their shortest circular difference,
    /// so 170 sorts before -170.
    pub fn cmp_center(&self, other: &Range) -> Ordering {
        let diff = match self {
            Range::Linear { .. } => self.center() - other.center(),
            Range::Longitude { .. } => circular_diff(self.center(), other.center()),
        };
        OrderedFloat(diff).cmp(&OrderedFloat(0.0))
    }

    /// Smallest range covering both `self` and `other`.
    ///
    /// For longitudes, ranges that wrap around each other (both far ends inside the other range)
    /// produce the whole world.
    pub fn expand_to(&self, other: &Range) -> Range {
        match (*self, *other) {
            (Range::Longitude { .. }, Range::Longitude { .. }) => self.expand_longitude(other),
            (a, b) => {
                debug_assert!(
                    matches!((a, b), (Range::Linear { .. }, Range::Linear { .. })),
                    "expanding a linear range with a longitude range: {a:?}, {b:?}"
                );
                Range::Linear {
                    min: f64::min(a.min(), b.min()),
                    max: f64::max(a.max(), b.max()),
                }
            }
        }
    }

    fn expand_longitude(&self, other: &Range) -> Range {
        //a's center <= b's center
        let (a, b) = match self.cmp_center(other) {
            Ordering::Greater => (other, self),
            _ => (self, other),
        };
        let min_from_b = b.contains(a.min());
        let max_from_a = a.contains(b.max());
        match (min_from_b, max_from_a) {
            (true, false) => *b,
            (false, true) => *a,
            (true, true) => Range::WORLD_LONGITUDE,
            (false, false) => Range::Longitude {
                min: a.min(),
                max: b.max(),
            },
        }
    }
}

/// `a - b`, folded into [-180, 180].
fn circular_diff(a: f64, b: f64) -> f64 {
    let diff = a - b;
    if diff > 180.0 {
        diff - 360.0
    } else if diff < -180.0 {
        diff + 360.0
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn lon(min: f64, max: f64) -> Range {
        Range::Longitude { min, max }
    }

    #[test]
    fn only_longitudes_wrap() {
        let ctx = SpatialContext::geo();
        let r = Rect::new(170.0, -170.0, -10.0, 10.0);
        assert!(Range::x_range(&r, &ctx).crosses_dateline());
        let y = Range::y_range(&r);
        assert_eq!(y, Range::Linear { min: -10.0, max: 10.0 });
        assert_eq!(y.width(), 20.0);
    }

    #[test]
    fn dateline_crossing_range() {
        let r = lon(170.0, -170.0);
        assert!(r.crosses_dateline());
        assert_eq!(r.width(), 20.0);
        assert!(r.contains(180.0));
        assert!(r.contains(-180.0));
        assert!(!r.contains(0.0));
        assert_eq!(r.center(), 180.0);
    }

    #[test]
    fn center_wraps() {
        assert_eq!(lon(175.0, -165.0).center(), -175.0);
        assert_eq!(lon(-10.0, 10.0).center(), 0.0);
    }

    #[test]
    fn linear_range() {
        let r = Range::Linear { min: 2.0, max: 5.0 };
        assert_eq!(r.width(), 3.0);
        assert!(r.contains(2.0) && r.contains(5.0) && !r.contains(5.5));
        let e = r.expand_to(&Range::Linear { min: -1.0, max: 3.0 });
        assert_eq!(e, Range::Linear { min: -1.0, max: 5.0 });
    }

    #[test_case(lon(-180.0, 0.0), lon(0.0, 180.0), Range::WORLD_LONGITUDE; "halves make the world")]
    #[test_case(lon(170.0, 175.0), lon(-175.0, -170.0), lon(170.0, -170.0); "minimal wrap over dateline")]
    #[test_case(lon(-10.0, 10.0), lon(20.0, 30.0), lon(-10.0, 30.0); "disjoint")]
    #[test_case(lon(-10.0, 10.0), lon(-5.0, 5.0), lon(-10.0, 10.0); "nested")]
    #[test_case(lon(100.0, -100.0), lon(-120.0, 120.0), Range::WORLD_LONGITUDE; "wrap around each other")]
    fn expand_longitude(a: Range, b: Range, expected: Range) {
        assert_eq!(a.expand_to(&b), expected);
        assert_eq!(b.expand_to(&a), expected);
    }

    #[test]
    fn ordering_by_circular_center() {
        assert_eq!(lon(165.0, 175.0).cmp_center(&lon(-175.0, -165.0)), Ordering::Less);
        assert_eq!(lon(0.0, 10.0).cmp_center(&lon(-10.0, 0.0)), Ordering::Greater);
    }
}
