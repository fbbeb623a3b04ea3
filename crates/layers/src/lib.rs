pub mod clip;
pub mod graticule;
pub mod path;
pub mod vector;

pub use graticule::GraticuleSpec;
pub use vector::partition;
