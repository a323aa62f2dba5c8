use glam::Vec3;

/// Phong material parameters, edited through the parameter panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    /// Specular exponent, kept within [`Self::MIN_SHININESS`, `Self::MAX_SHININESS`].
    pub shininess: f32,
}

impl Material {
    pub const MIN_SHININESS: f32 = 8.0;
    pub const MAX_SHININESS: f32 = 64.0;
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec3::splat(0.1),
            diffuse: Vec3::ONE,
            specular: Vec3::splat(0.5),
            shininess: 32.0,
        }
    }
}

/// White point light with distance attenuation.
///
/// Position and intensity are editable; the attenuation coefficients are
/// fixed at startup and never re-synced to the shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    /// Overall brightness in [0, 1].
    pub intensity: f32,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::ONE,
            intensity: 1.0,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_material_matches_startup_values() {
        let material = Material::default();
        assert_eq!(material.ambient, Vec3::splat(0.1));
        assert_eq!(material.diffuse, Vec3::ONE);
        assert_eq!(material.specular, Vec3::splat(0.5));
        assert_eq!(material.shininess, 32.0);
    }

    #[test]
    fn default_light_matches_startup_values() {
        let light = Light::default();
        assert_eq!(light.position, Vec3::ONE);
        assert_eq!(light.intensity, 1.0);
        assert_eq!(light.constant, 1.0);
        assert_eq!(light.linear, 0.09);
        assert_eq!(light.quadratic, 0.032);
    }
}
