use crate::core::Scene;
use crate::pipeline::Pipeline;
use crate::renderers::{Renderer, ViewInput, ViewState};
use log::{debug, info};
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};
use std::io;

pub struct WindowRenderer {
    window: Window,
    pipeline: Pipeline,
    view: ViewState,
    /// 0x00RRGGBB copy of the pipeline's color buffer.
    frame: Vec<u32>,
}

impl WindowRenderer {
    pub fn new(scene: Scene, view: ViewState, width: usize, height: usize) -> io::Result<Self> {
        let opts = WindowOptions {
            resize: true,
            scale: Scale::X1,
            title: true,
            borderless: false,
            ..WindowOptions::default()
        };
        let mut window = Window::new(&view.title(), width, height, opts)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        window.set_target_fps(60);

        Ok(Self {
            window,
            pipeline: Pipeline::new(scene),
            view,
            frame: Vec::new(),
        })
    }

    fn map_key(key: Key) -> Option<ViewInput> {
        match key {
            Key::Left | Key::A => Some(ViewInput::HeadingLeft),
            Key::Right | Key::D => Some(ViewInput::HeadingRight),
            Key::Up | Key::W => Some(ViewInput::PitchUp),
            Key::Down | Key::S => Some(ViewInput::PitchDown),
            Key::R => Some(ViewInput::Reset),
            Key::Escape | Key::Q => Some(ViewInput::Quit),
            _ => None,
        }
    }

    /// Returns `false` once a quit key was pressed.
    fn handle_input(&mut self) -> bool {
        for key in self.window.get_keys_pressed(KeyRepeat::Yes) {
            if let Some(input) = Self::map_key(key) {
                if !self.view.apply(input) {
                    return false;
                }
            }
        }
        true
    }
}

impl Renderer for WindowRenderer {
    fn run(&mut self) -> io::Result<()> {
        info!("Window mode started");
        while self.window.is_open() {
            if !self.handle_input() {
                info!("Quit requested");
                break;
            }

            let (width, height) = self.window.get_size();
            if width == 0 || height == 0 {
                // Minimized; keep pumping events
                self.window.update();
                continue;
            }

            let request = self.view.request(width, height);
            if self.pipeline.render_if_changed(request) {
                debug!("Redraw for {:?}", request);
                self.frame = self.pipeline.buffer().to_u32_buffer();
                self.window.set_title(&self.view.title());
            }

            self.window
                .update_with_buffer(&self.frame, width, height)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        }
        info!("Window closed");
        Ok(())
    }
}
