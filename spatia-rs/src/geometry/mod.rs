pub mod any_shape;
#[cfg(feature = "parallel")]
pub mod bulk;
pub mod geo_enums;
pub mod geo_traits;
pub mod primitives;

#[doc(inline)]
pub use any_shape::AnyShape;
#[doc(inline)]
pub use geo_enums::SpatialRelation;
#[doc(inline)]
pub use geo_traits::{Relate, Shape};
