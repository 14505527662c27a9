use crate::context::SpatialContext;
use crate::geometry::any_shape::AnyShape;
use crate::geometry::geo_enums::SpatialRelation;
use crate::geometry::geo_traits::Relate;
use anyhow::{Result, ensure};
use rayon::prelude::*;

/// Relates `query` to every shape in `shapes`, in parallel.
/// The result at index `i` is `query.relate(&shapes[i])`.
pub fn relate_all(
    query: &AnyShape,
    shapes: &[AnyShape],
    ctx: &SpatialContext,
) -> Vec<SpatialRelation> {
    shapes.par_iter().map(|s| query.relate(s, ctx)).collect()
}

/// Relates every pair `(a, b)` of indices into `shapes`, in parallel.
/// The result at index `i` is `shapes[a].relate(&shapes[b])` for the `i`-th pair.
pub fn relate_pairs(
    shapes: &[AnyShape],
    pairs: &[(usize, usize)],
    ctx: &SpatialContext,
) -> Result<Vec<SpatialRelation>> {
    ensure!(
        pairs.iter().all(|&(a, b)| a < shapes.len() && b < shapes.len()),
        "pair index out of bounds, only {} shapes",
        shapes.len()
    );
    Ok(pairs
        .par_iter()
        .map(|&(a, b)| shapes[a].relate(&shapes[b], ctx))
        .collect())
}
