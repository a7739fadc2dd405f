use crate::core::geometry::Vector3;

pub const DEFAULT_DISTANCE: f64 = 400.0;

/// Fixed perspective camera sitting `distance` units behind the origin.
///
/// Larger distances flatten the perspective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub distance: f64,
}

impl Camera {
    pub fn new(distance: f64) -> Self {
        Self { distance }
    }

    /// Map a camera-space point to pixel coordinates.
    ///
    /// The returned `z` is the point's original camera-space z, which is what
    /// depth interpolation runs on. Points at or behind the camera plane are not
    /// clipped and project to extreme or mirrored coordinates.
    pub fn project_to_screen(&self, point: Vector3, width: usize, height: usize) -> Vector3 {
        let z = point.z + self.distance;
        let f = self.distance / z;
        Vector3::new(
            point.x * f + width as f64 / 2.0,
            height as f64 / 2.0 - point.y * f,
            point.z,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE)
    }
}
