pub mod overlay;
pub mod view;

pub use overlay::{OverlayStyle, Rgb};
pub use view::{MapView, ScreenPoint, Viewport, TILE_SIZE};
