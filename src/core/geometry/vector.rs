use glam::DVec3;

/// Points, directions and projected screen coordinates all share this type.
/// After projection `z` carries camera-space depth.
pub type Vector3 = DVec3;

#[inline]
pub fn dot(a: Vector3, b: Vector3) -> f64 {
    a.dot(b)
}

#[inline]
pub fn cross(a: Vector3, b: Vector3) -> Vector3 {
    a.cross(b)
}

#[inline]
pub fn sub(a: Vector3, b: Vector3) -> Vector3 {
    a - b
}

/// Unit vector in the direction of `v`, or the zero vector when `|v| == 0`.
pub fn normalize(v: Vector3) -> Vector3 {
    let len = v.length();
    if len == 0.0 {
        return Vector3::ZERO;
    }
    v / len
}
