pub mod point;
pub mod projection;
pub mod viewport;
pub mod zone;

// Geodesy crate: small, well-tested primitives only.
pub use point::*;
pub use projection::*;
pub use viewport::*;
pub use zone::*;
