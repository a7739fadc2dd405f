use super::{cross, normalize, sub, RotationMatrix, Vector3};
use crate::core::Color;

/// A flat-colored triangle.
///
/// Vertex order fixes the direction of the face normal: `(v2 - v1) x (v3 - v1)`
/// points toward the viewer for a lit face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tri {
    pub v1: Vector3,
    pub v2: Vector3,
    pub v3: Vector3,
    pub color: Color,
}

impl Tri {
    pub const fn new(v1: Vector3, v2: Vector3, v3: Vector3, color: Color) -> Self {
        Self { v1, v2, v3, color }
    }

    pub fn vertices(&self) -> [Vector3; 3] {
        [self.v1, self.v2, self.v3]
    }

    /// The vertices rotated into camera space. No translation is applied;
    /// meshes are modelled around the origin.
    pub fn to_camera_space(&self, rotation: &RotationMatrix) -> [Vector3; 3] {
        self.vertices().map(|v| rotation.transform(v))
    }

    /// Unit normal of the triangle spanned by `verts`, or zero when degenerate.
    pub fn face_normal(verts: &[Vector3; 3]) -> Vector3 {
        let edge1 = sub(verts[1], verts[0]);
        let edge2 = sub(verts[2], verts[0]);
        normalize(cross(edge1, edge2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_follows_winding() {
        let ccw = Tri::new(
            Vector3::new(-1.0, -1.0, 0.0),
            Vector3::new(1.0, -1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Color::WHITE,
        );
        assert_eq!(Tri::face_normal(&ccw.vertices()), Vector3::Z);

        let cw = Tri::new(ccw.v1, ccw.v3, ccw.v2, Color::WHITE);
        assert_eq!(Tri::face_normal(&cw.vertices()), -Vector3::Z);
    }

    #[test]
    fn colinear_normal_is_zero() {
        let flat = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(2.0, 2.0, 2.0),
        ];
        assert_eq!(Tri::face_normal(&flat), Vector3::ZERO);
    }

    #[test]
    fn identity_rotation_keeps_vertices() {
        let tri = Tri::new(Vector3::X, Vector3::Y, Vector3::Z, Color::RED);
        assert_eq!(
            tri.to_camera_space(&RotationMatrix::IDENTITY),
            tri.vertices()
        );
    }
}
