pub mod controller;
pub mod events;
pub mod renderer;
pub mod sync;

pub use controller::*;
pub use events::*;
pub use renderer::*;
pub use sync::*;
