mod buffered_line;
mod buffered_line_string;
mod circle;
mod geo_circle;
mod inf_buf_line;
mod point;
mod range;
mod rect;
mod shape_collection;

#[doc(inline)]
pub use buffered_line::BufferedLine;
#[doc(inline)]
pub use buffered_line_string::BufferedLineString;
#[doc(inline)]
pub use circle::Circle;
#[doc(inline)]
pub use geo_circle::GeoCircle;
#[doc(inline)]
pub use inf_buf_line::{InfBufLine, Quadrant};
#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use range::Range;
#[doc(inline)]
pub use rect::Rect;
#[doc(inline)]
pub use shape_collection::ShapeCollection;
