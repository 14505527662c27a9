//! Great-circle formulas on a sphere. All angles at the public surface are in degrees of arc.

use crate::distance::units::{
    SPHERE_RADIUS_DEG, calc_box_by_dist_from_pt_delta_lon_deg, norm_lon_deg, to_degrees,
    to_radians,
};
use crate::geometry::primitives::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Formula used to compute the great-circle distance between two points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SphereFormula {
    /// Numerically stable for small distances
    Haversine,
    /// Cheapest, but suffers from rounding for small distances
    LawOfCosines,
    /// Vincenty's formula for the special case of a sphere, stable for all distances
    Vincenty,
}

/// Distance along the surface of a sphere, in degrees of arc.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeodesicSphereDistance {
    pub formula: SphereFormula,
}

impl GeodesicSphereDistance {
    pub fn distance(&self, from: Point, x: f64, y: f64) -> f64 {
        let (lat1, lon1) = (to_radians(from.y()), to_radians(from.x()));
        let (lat2, lon2) = (to_radians(y), to_radians(x));
        let rad = match self.formula {
            SphereFormula::Haversine => dist_haversine_rad(lat1, lon1, lat2, lon2),
            SphereFormula::LawOfCosines => dist_law_of_cosines_rad(lat1, lon1, lat2, lon2),
            SphereFormula::Vincenty => dist_vincenty_rad(lat1, lon1, lat2, lon2),
        };
        to_degrees(rad)
    }

    pub fn within(&self, from: Point, x: f64, y: f64, distance: f64) -> bool {
        self.distance(from, x, y) <= distance
    }

    /// Destination reached from `from` travelling `dist_deg` along the initial bearing `bearing_deg`.
    pub fn point_on_bearing(&self, from: Point, dist_deg: f64, bearing_deg: f64) -> Point {
        if dist_deg == 0.0 {
            return from;
        }
        let (lat, lon) = point_on_bearing_rad(
            to_radians(from.y()),
            to_radians(from.x()),
            to_radians(dist_deg),
            to_radians(bearing_deg),
        );
        let mut lon = to_degrees(lon);
        if lon >= 180.0 {
            lon -= 360.0;
        }
        Point(lon, to_degrees(lat).clamp(-90.0, 90.0))
    }

    pub fn calc_box_by_dist_from_pt(&self, from: Point, dist_deg: f64) -> Rect {
        calc_box_by_dist_from_pt_deg(from.y(), from.x(), dist_deg)
    }

    /// Spherical band area: proportional to `|sin(lat1) - sin(lat2)| * width`.
    pub fn area_rect(&self, rect: &Rect) -> f64 {
        let lat1 = to_radians(rect.min_y());
        let lat2 = to_radians(rect.max_y());
        PI / 180.0
            * SPHERE_RADIUS_DEG
            * SPHERE_RADIUS_DEG
            * (lat1.sin() - lat2.sin()).abs()
            * rect.width()
    }

    /// Spherical cap area: `2πR²(1 - cos(radius))`.
    pub fn area_circle(&self, radius_deg: f64) -> f64 {
        let lat = to_radians(90.0 - radius_deg);
        2.0 * PI * SPHERE_RADIUS_DEG * SPHERE_RADIUS_DEG * (1.0 - lat.sin())
    }
}

pub fn dist_haversine_rad(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }
    let hsin_x = ((lon1 - lon2) * 0.5).sin();
    let hsin_y = ((lat1 - lat2) * 0.5).sin();
    //rounding can push h slightly over 1, which would produce NaN
    let h = f64::min(
        hsin_y * hsin_y + lat1.cos() * lat2.cos() * hsin_x * hsin_x,
        1.0,
    );
    2.0 * f64::atan2(h.sqrt(), (1.0 - h).sqrt())
}

pub fn dist_law_of_cosines_rad(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }
    //no need to handle the dateline, cos(x) = cos(-x)
    let d_lon = lon2 - lon1;
    let cos_b = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * d_lon.cos();
    if cos_b < -1.0 {
        PI
    } else if cos_b >= 1.0 {
        0.0
    } else {
        cos_b.acos()
    }
}

pub fn dist_vincenty_rad(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }
    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_lat2, cos_lat2) = lat2.sin_cos();
    let (sin_d_lon, cos_d_lon) = (lon2 - lon1).sin_cos();

    let a = cos_lat2 * sin_d_lon;
    let b = cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_d_lon;
    let c = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_d_lon;

    f64::atan2((a * a + b * b).sqrt(), c)
}

/// Returns `(lat, lon)` in radians, longitude in [-π, π] and latitude in [-π/2, π/2].
pub fn point_on_bearing_rad(
    start_lat: f64,
    start_lon: f64,
    dist_rad: f64,
    bearing_rad: f64,
) -> (f64, f64) {
    let (sin_ang_dist, cos_ang_dist) = dist_rad.sin_cos();
    let (sin_start_lat, cos_start_lat) = start_lat.sin_cos();
    let sin_lat2 = sin_start_lat * cos_ang_dist + cos_start_lat * sin_ang_dist * bearing_rad.cos();
    let mut lat2 = sin_lat2.clamp(-1.0, 1.0).asin();
    let mut lon2 = start_lon
        + f64::atan2(
            bearing_rad.sin() * sin_ang_dist * cos_start_lat,
            cos_ang_dist - sin_start_lat * sin_lat2,
        );

    if lon2 > PI {
        lon2 -= 2.0 * PI;
    } else if lon2 < -PI {
        lon2 += 2.0 * PI;
    }

    //crossing a pole flips to the other side of the globe
    if lat2 > FRAC_PI_2 || lat2 < -FRAC_PI_2 {
        lat2 = lat2.signum() * PI - lat2;
        lon2 += if lon2 < 0.0 { PI } else { -PI };
    }
    (lat2, lon2)
}

/// Bounding box of the circle of `dist_deg` around (`lat`, `lon`).
///
/// See <http://janmatuschek.de/LatitudeLongitudeBoundingCoordinates>, sections 3.1 to 3.3.
pub fn calc_box_by_dist_from_pt_deg(lat: f64, lon: f64, dist_deg: f64) -> Rect {
    if dist_deg == 0.0 {
        return Rect::new(lon, lon, lat, lat);
    }
    if dist_deg >= 180.0 {
        return Rect::new(-180.0, 180.0, -90.0, 90.0);
    }
    let mut max_y = lat + dist_deg;
    let mut min_y = lat - dist_deg;

    if max_y >= 90.0 || min_y <= -90.0 {
        //touching a pole: half the globe, passing one: all of it
        let (mut min_x, mut max_x) = (-180.0, 180.0);
        if max_y <= 90.0 && min_y >= -90.0 {
            min_x = norm_lon_deg(lon - 90.0);
            max_x = norm_lon_deg(lon + 90.0);
        }
        max_y = max_y.min(90.0);
        min_y = min_y.max(-90.0);
        Rect::new(min_x, max_x, min_y, max_y)
    } else {
        let lon_delta = calc_box_by_dist_from_pt_delta_lon_deg(lat, dist_deg);
        Rect::new(
            norm_lon_deg(lon - lon_delta),
            norm_lon_deg(lon + lon_delta),
            min_y,
            max_y,
        )
    }
}

/// Latitude at which the circle of `dist_deg` around `lat` is widest.
///
/// Equals `lat` for a zero radius, is pulled towards the nearest pole otherwise, and is
/// clamped to ±90 when the circle reaches a pole or rounding pushes `asin` out of its domain.
pub fn calc_box_by_dist_from_pt_lat_horiz_axis_deg(lat: f64, dist_deg: f64) -> f64 {
    if dist_deg == 0.0 {
        return lat;
    }
    //at the poles the formula would produce NaN
    if lat + dist_deg >= 90.0 {
        return 90.0;
    }
    if lat - dist_deg <= -90.0 {
        return -90.0;
    }
    let lat_rad = to_radians(lat);
    let dist_rad = to_radians(dist_deg);
    let result_rad = (lat_rad.sin() / dist_rad.cos()).asin();
    if !result_rad.is_nan() {
        to_degrees(result_rad)
    } else if lat > 0.0 {
        90.0
    } else if lat < 0.0 {
        -90.0
    } else {
        lat
    }
}
