mod mat;
mod tri;
mod vector;

pub use mat::{MatrixError, RotationMatrix};
pub use tri::Tri;
pub use vector::{cross, dot, normalize, sub, Vector3};
