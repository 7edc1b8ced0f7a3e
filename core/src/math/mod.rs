pub mod fixed;
pub mod spherical;

pub use fixed::to_fixed;
pub use spherical::{signed_area, EARTH_RADIUS_M};
