use crate::core::geometry::{RotationMatrix, Tri, Vector3};
use crate::core::{Camera, Color, Light};
use crate::pipeline::buffer::FrameBuffer;
use rayon::prelude::*;

/// Twice the signed area of `(a, b, c)` in screen space. Sign flips with winding.
#[inline]
pub fn edge_function(a: Vector3, b: Vector3, c: Vector3) -> f64 {
    (c.x - a.x) * (b.y - a.y) - (c.y - a.y) * (b.x - a.x)
}

/// Inclusive pixel bounds of a projected triangle, already clamped to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl BoundingBox {
    /// `None` when the triangle misses the viewport entirely.
    ///
    /// Bounds are floored so a pixel is visited whenever its center
    /// `(x + 0.5, y + 0.5)` can lie inside the triangle.
    pub fn of(verts: &[Vector3; 3], width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let min_x = verts[0].x.min(verts[1].x).min(verts[2].x).floor();
        let max_x = verts[0].x.max(verts[1].x).max(verts[2].x).floor();
        let min_y = verts[0].y.min(verts[1].y).min(verts[2].y).floor();
        let max_y = verts[0].y.max(verts[1].y).max(verts[2].y).floor();

        let (w, h) = ((width - 1) as f64, (height - 1) as f64);
        if !(max_x >= 0.0 && max_y >= 0.0 && min_x <= w && min_y <= h) {
            return None;
        }

        Some(Self {
            min_x: min_x.max(0.0) as usize,
            min_y: min_y.max(0.0) as usize,
            max_x: max_x.min(w) as usize,
            max_y: max_y.min(h) as usize,
        })
    }
}

/// What happened to a triangle handed to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriOutcome {
    /// Rasterized; the count is how many pixels passed the depth test.
    Drawn(usize),
    /// Zero or NaN signed area after projection. NaN shows up when a vertex
    /// sits on the camera plane.
    Degenerate,
    /// Bounding box lies completely outside the viewport.
    Offscreen,
}

/// A triangle after rotation, shading and projection.
#[derive(Debug, Clone, Copy)]
pub struct ScreenTri {
    /// Screen-space x/y with camera-space depth in z.
    pub verts: [Vector3; 3],
    pub color: Color,
}

pub struct Rasterizer {
    width: usize,
    height: usize,
}

impl Rasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Rotate, flat-shade and project `tri` for this viewport.
    pub fn prepare(
        &self,
        tri: &Tri,
        rotation: &RotationMatrix,
        camera: &Camera,
        light: &Light,
    ) -> ScreenTri {
        let camera_space = tri.to_camera_space(rotation);
        let normal = Tri::face_normal(&camera_space);
        let intensity = light.intensity(normal);

        ScreenTri {
            verts: camera_space.map(|v| camera.project_to_screen(v, self.width, self.height)),
            color: tri.color.shade(intensity),
        }
    }

    /// Scan-convert one projected triangle into `buffer` with a depth test.
    ///
    /// Rows of the bounding box are filled in parallel. A triangle touches each
    /// pixel at most once, so the result matches a sequential scan exactly.
    pub fn draw(&self, tri: &ScreenTri, buffer: &mut FrameBuffer) -> TriOutcome {
        let [p1, p2, p3] = tri.verts;

        let area = edge_function(p1, p2, p3);
        if area == 0.0 || area.is_nan() {
            return TriOutcome::Degenerate;
        }

        let Some(bbox) = BoundingBox::of(&tri.verts, self.width, self.height) else {
            return TriOutcome::Offscreen;
        };

        let color = tri.color;
        let written = buffer
            .rows_mut(bbox.min_y..=bbox.max_y)
            .map(|(y, (color_row, depth_row))| {
                let py = y as f64 + 0.5;
                let mut written = 0usize;
                for x in bbox.min_x..=bbox.max_x {
                    let p = Vector3::new(x as f64 + 0.5, py, 0.0);

                    let w1 = edge_function(p2, p3, p) / area;
                    let w2 = edge_function(p3, p1, p) / area;
                    let w3 = edge_function(p1, p2, p) / area;
                    // Written so a NaN weight counts as outside
                    if !(w1 >= 0.0 && w2 >= 0.0 && w3 >= 0.0) {
                        continue;
                    }

                    let depth = w1 * p1.z + w2 * p2.z + w3 * p3.z;
                    if depth > depth_row[x] {
                        color_row[x] = color;
                        depth_row[x] = depth;
                        written += 1;
                    }
                }
                written
            })
            .sum::<usize>();

        TriOutcome::Drawn(written)
    }
}
