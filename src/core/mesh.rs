use crate::core::geometry::{Tri, Vector3};
use crate::core::Color;

/// Ordered, immutable list of triangles. Order only matters for exact depth ties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    tris: Vec<Tri>,
}

impl Mesh {
    pub fn new(tris: Vec<Tri>) -> Self {
        Self { tris }
    }

    /// Four-faced tetrahedron spanning (+-100, +-100, +-100).
    pub fn tetrahedron() -> Self {
        let a = Vector3::new(100.0, 100.0, 100.0);
        let b = Vector3::new(-100.0, -100.0, 100.0);
        let c = Vector3::new(-100.0, 100.0, -100.0);
        let d = Vector3::new(100.0, -100.0, -100.0);

        Self::new(vec![
            Tri::new(a, b, c, Color::WHITE),
            Tri::new(a, b, d, Color::RED),
            Tri::new(c, d, a, Color::GREEN),
            Tri::new(c, d, b, Color::BLUE),
        ])
    }

    pub fn tris(&self) -> &[Tri] {
        &self.tris
    }

    pub fn len(&self) -> usize {
        self.tris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tris.is_empty()
    }
}

impl From<Vec<Tri>> for Mesh {
    fn from(tris: Vec<Tri>) -> Self {
        Self::new(tris)
    }
}
