use serde::{Deserialize, Serialize};

use crate::distance::DistanceCalculator;

/// Selectable distance formulas, see [`DistanceCalculator`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceCalculatorKind {
    Haversine,
    LawOfCosines,
    Vincenty,
    Cartesian,
    /// Cartesian without the square root, only suited to sort by distance
    CartesianSquared,
}

impl From<DistanceCalculatorKind> for DistanceCalculator {
    fn from(kind: DistanceCalculatorKind) -> Self {
        match kind {
            DistanceCalculatorKind::Haversine => DistanceCalculator::HAVERSINE,
            DistanceCalculatorKind::LawOfCosines => DistanceCalculator::LAW_OF_COSINES,
            DistanceCalculatorKind::Vincenty => DistanceCalculator::VINCENTY,
            DistanceCalculatorKind::Cartesian => DistanceCalculator::CARTESIAN,
            DistanceCalculatorKind::CartesianSquared => DistanceCalculator::CARTESIAN_SQUARED,
        }
    }
}

///Configuration of a [`SpatialContext`](crate::context::SpatialContext)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct SpatialContextConfig {
    ///Longitude/latitude degrees on a sphere if true, unitless coordinates on a plane otherwise
    pub geo: bool,
    ///Formula used for distances, must be geodesic on the sphere
    pub distance_calculator: DistanceCalculatorKind,
    ///Bounds of all coordinates as `[min_x, max_x, min_y, max_y]`.
    ///Defaults to the globe when geodetic, to the full range of `f64` otherwise
    #[serde(default)]
    pub world_bounds: Option<[f64; 4]>,
    ///Wrap longitudes outside [-180, 180] back into range instead of rejecting them
    #[serde(default)]
    pub norm_wrap_longitude: bool,
}

impl SpatialContextConfig {
    pub fn geo() -> Self {
        Self {
            geo: true,
            distance_calculator: DistanceCalculatorKind::Haversine,
            world_bounds: None,
            norm_wrap_longitude: false,
        }
    }

    pub fn cartesian() -> Self {
        Self {
            geo: false,
            distance_calculator: DistanceCalculatorKind::Cartesian,
            world_bounds: None,
            norm_wrap_longitude: false,
        }
    }
}

impl Default for SpatialContextConfig {
    fn default() -> Self {
        Self::geo()
    }
}
