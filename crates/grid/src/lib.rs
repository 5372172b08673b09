pub mod feature;
pub mod generator;
pub mod geojson;
pub mod spec;

pub use feature::*;
pub use generator::*;
pub use geojson::*;
pub use spec::*;
