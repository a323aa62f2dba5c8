use glam::Vec3;

use crate::model::{Light, Material};

/// Uniform names as addressed by the shader-parameter sink.
pub mod uniform {
    pub const MATERIAL_AMBIENT: &str = "material.ambient";
    pub const MATERIAL_DIFFUSE: &str = "material.diffuse";
    pub const MATERIAL_SPECULAR: &str = "material.specular";
    pub const MATERIAL_SHININESS: &str = "material.shininess";
    pub const LIGHT_POSITION: &str = "light.position";
    pub const LIGHT_INTENSITY: &str = "light.intensity";
    pub const LIGHT_CONSTANT: &str = "light.constant";
    pub const LIGHT_LINEAR: &str = "light.linear";
    pub const LIGHT_QUADRATIC: &str = "light.quadratic";
}

/// Write-only destination for named shader parameters. Fire-and-forget:
/// unknown names are the backend's concern, not the caller's.
pub trait ShaderSink {
    fn set_vec3(&mut self, name: &str, value: Vec3);
    fn set_scalar(&mut self, name: &str, value: f32);
}

/// One edit reported by a parameter-panel control this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamEdit {
    Ambient(Vec3),
    Diffuse(Vec3),
    Specular(Vec3),
    Shininess(f32),
    LightPosition(Vec3),
    LightIntensity(f32),
}

/// Owns the material and light state and keeps the shader sink in sync.
pub struct LightingController {
    pub material: Material,
    pub light: Light,
}

impl LightingController {
    pub fn new() -> Self {
        Self {
            material: Material::default(),
            light: Light::default(),
        }
    }

    /// Store an edited value (clamped where the field has a range) and push
    /// exactly that one named parameter to the sink.
    pub fn apply_edit(&mut self, edit: ParamEdit, sink: &mut impl ShaderSink) {
        match edit {
            ParamEdit::Ambient(v) => {
                self.material.ambient = v;
                sink.set_vec3(uniform::MATERIAL_AMBIENT, v);
            }
            ParamEdit::Diffuse(v) => {
                self.material.diffuse = v;
                sink.set_vec3(uniform::MATERIAL_DIFFUSE, v);
            }
            ParamEdit::Specular(v) => {
                self.material.specular = v;
                sink.set_vec3(uniform::MATERIAL_SPECULAR, v);
            }
            ParamEdit::Shininess(s) => {
                let s = s.clamp(Material::MIN_SHININESS, Material::MAX_SHININESS);
                self.material.shininess = s;
                sink.set_scalar(uniform::MATERIAL_SHININESS, s);
            }
            ParamEdit::LightPosition(p) => {
                self.light.position = p;
                sink.set_vec3(uniform::LIGHT_POSITION, p);
            }
            ParamEdit::LightIntensity(i) => {
                let i = i.clamp(0.0, 1.0);
                self.light.intensity = i;
                sink.set_scalar(uniform::LIGHT_INTENSITY, i);
            }
        }
    }

    /// Push every parameter once so the first frame renders correctly without
    /// requiring a UI interaction. The attenuation coefficients are only ever
    /// written here.
    pub fn push_all(&self, sink: &mut impl ShaderSink) {
        sink.set_vec3(uniform::MATERIAL_AMBIENT, self.material.ambient);
        sink.set_vec3(uniform::MATERIAL_DIFFUSE, self.material.diffuse);
        sink.set_vec3(uniform::MATERIAL_SPECULAR, self.material.specular);
        sink.set_scalar(uniform::MATERIAL_SHININESS, self.material.shininess);
        sink.set_vec3(uniform::LIGHT_POSITION, self.light.position);
        sink.set_scalar(uniform::LIGHT_INTENSITY, self.light.intensity);
        sink.set_scalar(uniform::LIGHT_CONSTANT, self.light.constant);
        sink.set_scalar(uniform::LIGHT_LINEAR, self.light.linear);
        sink.set_scalar(uniform::LIGHT_QUADRATIC, self.light.quadratic);
    }
}

impl Default for LightingController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        vec3s: Vec<(String, Vec3)>,
        scalars: Vec<(String, f32)>,
    }

    impl ShaderSink for RecordingSink {
        fn set_vec3(&mut self, name: &str, value: Vec3) {
            self.vec3s.push((name.to_string(), value));
        }
        fn set_scalar(&mut self, name: &str, value: f32) {
            self.scalars.push((name.to_string(), value));
        }
    }

    #[test]
    fn shininess_edit_clamps_and_pushes_once() {
        let mut lighting = LightingController::new();
        let mut sink = RecordingSink::default();

        lighting.apply_edit(ParamEdit::Shininess(70.0), &mut sink);

        assert_eq!(lighting.material.shininess, 64.0);
        assert!(sink.vec3s.is_empty());
        assert_eq!(
            sink.scalars,
            vec![(uniform::MATERIAL_SHININESS.to_string(), 64.0)]
        );
    }

    #[test]
    fn intensity_edit_clamps_to_unit_range() {
        let mut lighting = LightingController::new();
        let mut sink = RecordingSink::default();

        lighting.apply_edit(ParamEdit::LightIntensity(1.5), &mut sink);
        assert_eq!(lighting.light.intensity, 1.0);

        lighting.apply_edit(ParamEdit::LightIntensity(-0.25), &mut sink);
        assert_eq!(lighting.light.intensity, 0.0);

        assert_eq!(sink.scalars.len(), 2);
        assert_eq!(sink.scalars[1], (uniform::LIGHT_INTENSITY.to_string(), 0.0));
    }

    #[test]
    fn color_edit_pushes_only_the_changed_field() {
        let mut lighting = LightingController::new();
        let mut sink = RecordingSink::default();

        let teal = Vec3::new(0.0, 0.5, 0.5);
        lighting.apply_edit(ParamEdit::Diffuse(teal), &mut sink);

        assert_eq!(lighting.material.diffuse, teal);
        assert_eq!(sink.vec3s, vec![(uniform::MATERIAL_DIFFUSE.to_string(), teal)]);
        assert!(sink.scalars.is_empty());
    }

    #[test]
    fn startup_push_covers_every_parameter_including_attenuation() {
        let lighting = LightingController::new();
        let mut sink = RecordingSink::default();

        lighting.push_all(&mut sink);

        let names: Vec<&str> = sink
            .vec3s
            .iter()
            .map(|(n, _)| n.as_str())
            .chain(sink.scalars.iter().map(|(n, _)| n.as_str()))
            .collect();
        for expected in [
            uniform::MATERIAL_AMBIENT,
            uniform::MATERIAL_DIFFUSE,
            uniform::MATERIAL_SPECULAR,
            uniform::MATERIAL_SHININESS,
            uniform::LIGHT_POSITION,
            uniform::LIGHT_INTENSITY,
            uniform::LIGHT_CONSTANT,
            uniform::LIGHT_LINEAR,
            uniform::LIGHT_QUADRATIC,
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
        assert_eq!(names.len(), 9);
    }
}
