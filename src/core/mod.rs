pub mod camera;
pub mod color;
pub mod geometry;
pub mod light;
pub mod mesh;
pub mod scene;

pub use camera::Camera;
pub use color::Color;
pub use light::Light;
pub use mesh::Mesh;
pub use scene::Scene;
