use crate::core::geometry::RotationMatrix;
use crate::core::Scene;
use log::debug;
use rasterizer::{Rasterizer, TriOutcome};
use std::fmt::{self, Display, Formatter};

pub mod buffer;
pub mod rasterizer;

pub use buffer::FrameBuffer;

/// Inputs that change between frames. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest {
    /// Rotation about the vertical axis, 0..=360.
    pub heading: i32,
    /// Rotation about the horizontal axis, -90..=90.
    pub pitch: i32,
    pub width: usize,
    pub height: usize,
}

impl RenderRequest {
    pub fn new(heading: i32, pitch: i32, width: usize, height: usize) -> Self {
        Self {
            heading,
            pitch,
            width,
            height,
        }
    }

    pub fn rotation(&self) -> RotationMatrix {
        RotationMatrix::from_heading_pitch(self.heading as f64, self.pitch as f64)
    }
}

/// Per-frame counters, mostly for the debug log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub drawn: usize,
    pub degenerate: usize,
    pub offscreen: usize,
    pub pixels_written: usize,
}

impl Display for RenderStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "drawn: {} | degenerate: {} | offscreen: {} | pixels: {}",
            self.drawn, self.degenerate, self.offscreen, self.pixels_written
        )
    }
}

/// Render `scene` into a freshly allocated frame buffer.
pub fn render(scene: &Scene, request: &RenderRequest) -> FrameBuffer {
    let mut buffer = FrameBuffer::new(request.width, request.height, scene.background);
    render_into(scene, request, &mut buffer);
    buffer
}

/// Render into a caller-owned buffer, resizing and clearing it first.
///
/// Triangles are processed in mesh order, so on an exact depth tie the
/// triangle that came first keeps the pixel.
pub fn render_into(scene: &Scene, request: &RenderRequest, buffer: &mut FrameBuffer) -> RenderStats {
    buffer.set_background(scene.background);
    buffer.resize(request.width, request.height);

    let rotation = request.rotation();
    debug!("Rotation for heading {} pitch {}:\n{}", request.heading, request.pitch, rotation);
    let rasterizer = Rasterizer::new(request.width, request.height);
    let mut stats = RenderStats::default();

    for tri in scene.mesh.tris() {
        let screen = rasterizer.prepare(tri, &rotation, &scene.camera, &scene.light);
        match rasterizer.draw(&screen, buffer) {
            TriOutcome::Drawn(pixels) => {
                stats.drawn += 1;
                stats.pixels_written += pixels;
            }
            TriOutcome::Degenerate => stats.degenerate += 1,
            TriOutcome::Offscreen => stats.offscreen += 1,
        }
    }

    debug!(
        "Rendered {}x{} at heading {} pitch {}: {}",
        request.width, request.height, request.heading, request.pitch, stats
    );
    stats
}

/// Owns the scene and a reusable buffer for front-ends that redraw repeatedly.
pub struct Pipeline {
    pub scene: Scene,
    buffer: FrameBuffer,
    last_request: Option<RenderRequest>,
}

impl Pipeline {
    pub fn new(scene: Scene) -> Self {
        let buffer = FrameBuffer::new(0, 0, scene.background);
        Self {
            scene,
            buffer,
            last_request: None,
        }
    }

    /// Render only if `request` differs from the last one. Returns whether a new
    /// frame was produced.
    pub fn render_if_changed(&mut self, request: RenderRequest) -> bool {
        if self.last_request == Some(request) {
            return false;
        }
        self.render_frame(request);
        true
    }

    pub fn render_frame(&mut self, request: RenderRequest) -> RenderStats {
        let stats = render_into(&self.scene, &request, &mut self.buffer);
        self.last_request = Some(request);
        stats
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Forget the last request so the next `render_if_changed` always draws.
    pub fn invalidate(&mut self) {
        self.last_request = None;
    }
}
