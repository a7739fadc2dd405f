use std::fmt::{self, Display, Formatter};

use crate::core::{Camera, Color, Light, Mesh};

/// Everything a render needs besides the view angles and viewport size.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub mesh: Mesh,
    pub light: Light,
    pub camera: Camera,
    pub background: Color,
}

impl Scene {
    pub fn new(mesh: Mesh, camera: Camera) -> Self {
        Self {
            mesh,
            light: Light::default(),
            camera,
            background: Color::BLACK,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.light = light;
        self
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Mesh::tetrahedron(), Camera::default())
    }
}

impl Display for Scene {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scene: {} tris, camera distance {}, background #{:02X}{:02X}{:02X}",
            self.mesh.len(),
            self.camera.distance,
            self.background.r,
            self.background.g,
            self.background.b
        )
    }
}
