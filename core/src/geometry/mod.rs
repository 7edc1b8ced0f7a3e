pub mod point;
pub mod vertices;

pub use point::GeoPoint;
pub use vertices::VertexList;
