//! Unit conversions and coordinate normalisation shared by the distance calculators.

/// Mean radius of the earth in kilometers, as defined by the IUGG.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0087714;

/// Kilometers spanned by one degree of arc on a sphere with [`EARTH_MEAN_RADIUS_KM`].
pub const DEG_TO_KM: f64 = std::f64::consts::PI / 180.0 * EARTH_MEAN_RADIUS_KM;

/// Degrees of arc spanned by one kilometer on a sphere with [`EARTH_MEAN_RADIUS_KM`].
pub const KM_TO_DEG: f64 = 1.0 / DEG_TO_KM;

/// Radius of the unit sphere expressed in degrees of arc (`180 / π`).
/// Areas on the sphere are expressed in square degrees relative to this radius.
pub const SPHERE_RADIUS_DEG: f64 = 180.0 / std::f64::consts::PI;

pub fn to_radians(deg: f64) -> f64 {
    deg.to_radians()
}

pub fn to_degrees(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Converts a distance on a sphere of `radius` (same unit as `dist`) to degrees of arc.
pub fn dist_to_degrees(dist: f64, radius: f64) -> f64 {
    to_degrees(dist / radius)
}

/// Converts degrees of arc to a distance on a sphere of `radius`.
pub fn degrees_to_dist(deg: f64, radius: f64) -> f64 {
    to_radians(deg) * radius
}

/// Puts a longitude in the range [-180, 180]. A value of exactly 180 is kept.
pub fn norm_lon_deg(lon_deg: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon_deg) {
        //common case, avoids shifting the value by rounding
        return lon_deg;
    }
    let off = (lon_deg + 180.0) % 360.0;
    if off < 0.0 {
        180.0 + off
    } else if off == 0.0 && lon_deg > 0.0 {
        180.0
    } else {
        -180.0 + off
    }
}

/// Puts a latitude in the range [-90, 90], reflecting across a pole on overshoot.
pub fn norm_lat_deg(lat_deg: f64) -> f64 {
    if (-90.0..=90.0).contains(&lat_deg) {
        return lat_deg;
    }
    let off = ((lat_deg + 90.0) % 360.0).abs();
    (if off <= 180.0 { off } else { 360.0 - off }) - 90.0
}

/// Longitudinal half-width (degrees) of the bounding box of a circle of `dist_deg` centered at `lat`.
///
/// Returns 90 when the circle touches a pole, where the formula has no solution.
pub fn calc_box_by_dist_from_pt_delta_lon_deg(lat: f64, dist_deg: f64) -> f64 {
    if dist_deg == 0.0 {
        return 0.0;
    }
    let lat_rad = to_radians(lat);
    let dist_rad = to_radians(dist_deg);
    let result_rad = (dist_rad.sin() / lat_rad.cos()).asin();
    match result_rad.is_nan() {
        true => 90.0,
        false => to_degrees(result_rad),
    }
}

/// Degrees of longitude spanned by `dist` degrees of arc along the parallel at `lat`.
/// Grows towards the poles and is capped at 180.
pub fn calc_lon_degrees_at_lat(lat: f64, dist: f64) -> f64 {
    if dist == 0.0 {
        //avoids returning -0
        return 0.0;
    }
    let cos_lat = to_radians(lat.abs().min(90.0)).cos();
    if cos_lat <= 0.0 {
        return 180.0;
    }
    f64::min(dist / cos_lat, 180.0)
}

/// Distance between `x` and the next larger representable `f64` (for finite, non-negative `x`).
pub fn ulp(x: f64) -> f64 {
    let x = x.abs();
    f64::from_bits(x.to_bits() + 1) - x
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use test_case::test_case;

    #[test_case(0.0, 0.0)]
    #[test_case(180.0, 180.0)]
    #[test_case(-180.0, -180.0)]
    #[test_case(190.0, -170.0)]
    #[test_case(-190.0, 170.0)]
    #[test_case(540.0, 180.0)]
    #[test_case(360.0, 0.0)]
    #[test_case(-360.0, 0.0)]
    fn norm_lon(input: f64, expected: f64) {
        assert!(approx_eq!(f64, norm_lon_deg(input), expected, epsilon = 1e-9));
    }

    #[test_case(45.0, 45.0)]
    #[test_case(100.0, 80.0)]
    #[test_case(-100.0, -80.0)]
    #[test_case(180.0, 0.0)]
    #[test_case(270.0, -90.0)]
    fn norm_lat(input: f64, expected: f64) {
        assert!(approx_eq!(f64, norm_lat_deg(input), expected, epsilon = 1e-9));
    }

    #[test]
    fn km_degree_round_trip() {
        let deg = dist_to_degrees(DEG_TO_KM, EARTH_MEAN_RADIUS_KM);
        assert!(approx_eq!(f64, deg, 1.0, epsilon = 1e-12));
        assert!(approx_eq!(
            f64,
            degrees_to_dist(1.0, EARTH_MEAN_RADIUS_KM),
            DEG_TO_KM,
            epsilon = 1e-12
        ));
    }

    #[test]
    fn lon_degrees_widen_towards_the_poles() {
        assert_eq!(calc_lon_degrees_at_lat(0.0, 0.0), 0.0);
        assert!(approx_eq!(f64, calc_lon_degrees_at_lat(0.0, 2.0), 2.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, calc_lon_degrees_at_lat(60.0, 2.0), 4.0, epsilon = 1e-9));
        assert_eq!(calc_lon_degrees_at_lat(90.0, 2.0), 180.0);
    }

    #[test]
    fn delta_lon_at_pole_has_no_solution() {
        assert_eq!(calc_box_by_dist_from_pt_delta_lon_deg(89.0, 5.0), 90.0);
        assert!(approx_eq!(
            f64,
            calc_box_by_dist_from_pt_delta_lon_deg(0.0, 10.0),
            10.0,
            epsilon = 1e-9
        ));
    }
}
