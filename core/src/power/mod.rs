pub mod area;
pub mod nominal;

pub use area::{AreaCalculator, AreaMethod};
pub use nominal::{compute_nominal_power, PowerModel};
