use serde::{Deserialize, Serialize};

/// Possible relations between two shapes A and B.
/// A is `SpatialRelation` to B.
///
/// There is no `Equals`: two identical shapes relate as [`SpatialRelation::Contains`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpatialRelation {
    /// A ∩ B = ∅
    Disjoint,
    /// A ∩ B ≠ ∅ and neither A ⊆ B nor B ⊆ A
    Intersects,
    /// B ⊆ A
    Contains,
    /// A ⊆ B
    Within,
}

impl SpatialRelation {
    /// Relation of B to A, given that A is `self` to B.
    ///
    /// Does not hold when A and B are equal: both sides then report [`SpatialRelation::Contains`].
    pub fn transpose(self) -> Self {
        match self {
            SpatialRelation::Contains => SpatialRelation::Within,
            SpatialRelation::Within => SpatialRelation::Contains,
            other => other,
        }
    }

    /// Relation of the union of A and B to C, given `self` (A to C) and `other` (B to C).
    ///
    /// The result does not depend on the order of the arguments.
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (a, b) if a == b => a,
            (SpatialRelation::Disjoint, SpatialRelation::Contains)
            | (SpatialRelation::Contains, SpatialRelation::Disjoint) => SpatialRelation::Contains,
            _ => SpatialRelation::Intersects,
        }
    }

    /// Relation of the complement of A to B, given that A is `self` to B.
    ///
    /// Not an involution: `Within` and `Intersects` both map to `Intersects`.
    pub fn inverse(self) -> Self {
        match self {
            SpatialRelation::Disjoint => SpatialRelation::Contains,
            SpatialRelation::Contains => SpatialRelation::Disjoint,
            SpatialRelation::Within | SpatialRelation::Intersects => SpatialRelation::Intersects,
        }
    }

    /// True for every relation except [`SpatialRelation::Disjoint`].
    pub fn intersects(self) -> bool {
        self != SpatialRelation::Disjoint
    }
}
