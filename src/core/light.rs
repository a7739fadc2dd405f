use crate::core::geometry::{dot, normalize, Vector3};

/// Single directional light used for flat Lambert shading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    /// Unit vector pointing from the surface toward the light.
    direction: Vector3,
}

impl Light {
    pub fn directional(direction: Vector3) -> Self {
        Self {
            direction: normalize(direction),
        }
    }

    /// Light shining straight at the viewer along +z.
    pub fn toward_viewer() -> Self {
        Self::directional(Vector3::Z)
    }

    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// `max(0, n . l)`, no ambient or specular term.
    pub fn intensity(&self, normal: Vector3) -> f64 {
        dot(normal, self.direction).max(0.0)
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::toward_viewer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_normalized() {
        let light = Light::directional(Vector3::new(0.0, 0.0, 5.0));
        assert_eq!(light.direction(), Vector3::Z);
    }

    #[test]
    fn lambert_term() {
        let light = Light::default();
        assert_eq!(light.intensity(Vector3::Z), 1.0);
        assert_eq!(light.intensity(-Vector3::Z), 0.0);
        assert_eq!(light.intensity(Vector3::X), 0.0);
        assert_eq!(light.intensity(Vector3::ZERO), 0.0);
        let tilted = normalize(Vector3::new(0.0, 1.0, 1.0));
        assert!((light.intensity(tilted) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }
}
