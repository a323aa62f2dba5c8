// VIEW: GPU setup and render resources
pub mod gpu_init;
pub mod render;

pub use gpu_init::GpuContext;
pub use render::{Pipelines, PhongParamWriter, SceneResources, UnlitResources};
