pub mod controller;
pub mod snapshot;

pub use controller::InteractionController;
pub use snapshot::SessionSnapshot;
