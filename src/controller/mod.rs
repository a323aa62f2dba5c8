// CONTROLLER: input-to-camera math and parameter synchronization
pub mod orbit;
pub mod params;

pub use orbit::{OrbitController, PointerState, PITCH_PER_PIXEL, YAW_PER_PIXEL};
pub use params::{uniform, LightingController, ParamEdit, ShaderSink};
