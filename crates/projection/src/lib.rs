pub mod orthographic;
pub mod rotation;

pub use orthographic::Orthographic;
pub use rotation::Rotation;
