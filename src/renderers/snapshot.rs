use crate::core::Scene;
use crate::pipeline::{render, RenderRequest};
use crate::renderers::Renderer;
use log::info;
use std::io;
use std::path::PathBuf;

/// One-shot render written to a PNG file.
pub struct ImageRenderer {
    scene: Scene,
    request: RenderRequest,
    output: PathBuf,
}

impl ImageRenderer {
    pub fn new(scene: Scene, request: RenderRequest, output: PathBuf) -> Self {
        Self {
            scene,
            request,
            output,
        }
    }
}

impl Renderer for ImageRenderer {
    fn run(&mut self) -> io::Result<()> {
        if self.request.width == 0 || self.request.height == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "image dimensions must be non-zero",
            ));
        }
        let buffer = render(&self.scene, &self.request);
        buffer.save_png(&self.output)?;
        info!(
            "Saved {}x{} render to {}",
            self.request.width,
            self.request.height,
            self.output.display()
        );
        Ok(())
    }
}
