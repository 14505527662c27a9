use crate::context::SpatialContext;
use crate::distance::units::norm_lon_deg;
use crate::geometry::any_shape::AnyShape;
use crate::geometry::geo_enums::SpatialRelation;
use crate::geometry::geo_traits::{Relate, Shape};
use crate::geometry::primitives::{GeoCircle, Point, Rect};
use crate::util::FPA;
use log::error;

//Various checks to verify correctness of the state of the library
//Used in debug_assertion!() blocks

pub fn rect_within_world(rect: &Rect, ctx: &SpatialContext) -> bool {
    if rect.is_empty() {
        return true;
    }
    let w = ctx.world_bounds();
    FPA(w.min_x()) <= FPA(rect.min_x())
        && FPA(rect.max_x()) <= FPA(w.max_x())
        && FPA(w.min_y()) <= FPA(rect.min_y())
        && FPA(rect.max_y()) <= FPA(w.max_y())
}

/// Checks whether the inverse of a circle is centered at its antipode and covers the rest of the globe
pub fn inverse_circle_is_antipodal(center: Point, radius: f64, inverse: &GeoCircle) -> bool {
    let inv_center = inverse.center();
    let antipode_x = norm_lon_deg(center.x() + 180.0);
    let x_matches = FPA(inv_center.x()) == FPA(antipode_x)
        || (inv_center.x().abs() == 180.0 && FPA(-inv_center.x()) == FPA(antipode_x));
    let valid = x_matches
        && FPA(inv_center.y()) == FPA(-center.y())
        && FPA(inverse.radius() + radius) == FPA(180.0);
    if !valid {
        error!(
            "inverse circle {:?} (r: {}) is not the antipode of {:?} (r: {})",
            inv_center,
            inverse.radius(),
            center,
            radius
        );
    }
    valid
}

/// Checks whether all `corners` of a footprint, clipped to the world, lie within `bbox`
pub fn bbox_encloses_corners(corners: &[Point], bbox: &Rect, ctx: &SpatialContext) -> bool {
    let w = ctx.world_bounds();
    corners.iter().all(|c| {
        let x = c.x().clamp(w.min_x(), w.max_x());
        let y = c.y().clamp(w.min_y(), w.max_y());
        let inside = FPA(bbox.min_x()) <= FPA(x)
            && FPA(x) <= FPA(bbox.max_x())
            && FPA(bbox.min_y()) <= FPA(y)
            && FPA(y) <= FPA(bbox.max_y());
        if !inside {
            error!("corner {c:?} is not enclosed by {bbox:?}");
        }
        inside
    })
}

/// Checks whether the bounding box of a collection contains those of all its members
pub fn bbox_covers_members(members: &[AnyShape], bbox: &Rect, ctx: &SpatialContext) -> bool {
    members
        .iter()
        .filter(|m| !m.is_empty())
        .all(|m| match bbox.relate(&m.bbox(), ctx) {
            SpatialRelation::Contains => true,
            other => {
                error!(
                    "collection bbox {bbox:?} relates {other:?} to member bbox {:?}",
                    m.bbox()
                );
                false
            }
        })
}
