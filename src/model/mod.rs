// MODEL: camera pose, lighting state, and geometry
pub mod camera;
pub mod lighting;
pub mod teapot;

pub use camera::Camera;
pub use lighting::{Light, Material};
