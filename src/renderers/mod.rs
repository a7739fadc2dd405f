pub mod snapshot;
pub mod terminal;
pub mod window;

pub use snapshot::ImageRenderer;
pub use terminal::TerminalRenderer;
pub use window::WindowRenderer;

use crate::pipeline::RenderRequest;

pub const HEADING_RANGE: (i32, i32) = (0, 360);
pub const PITCH_RANGE: (i32, i32) = (-90, 90);
/// Degrees per key press.
pub const ANGLE_STEP: i32 = 5;

pub trait Renderer {
    /// Drive the front-end until the user quits (or, for one-shot targets, once).
    fn run(&mut self) -> std::io::Result<()>;
}

/// Angles a front-end feeds to the pipeline, clamped like a pair of sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    heading: i32,
    pitch: i32,
    initial: (i32, i32),
}

/// Front-end independent view controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewInput {
    HeadingLeft,
    HeadingRight,
    PitchUp,
    PitchDown,
    Reset,
    Quit,
}

impl ViewState {
    pub fn new(heading: i32, pitch: i32) -> Self {
        let heading = heading.clamp(HEADING_RANGE.0, HEADING_RANGE.1);
        let pitch = pitch.clamp(PITCH_RANGE.0, PITCH_RANGE.1);
        Self {
            heading,
            pitch,
            initial: (heading, pitch),
        }
    }

    pub fn heading(&self) -> i32 {
        self.heading
    }

    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    pub fn set_heading(&mut self, heading: i32) {
        self.heading = heading.clamp(HEADING_RANGE.0, HEADING_RANGE.1);
    }

    pub fn set_pitch(&mut self, pitch: i32) {
        self.pitch = pitch.clamp(PITCH_RANGE.0, PITCH_RANGE.1);
    }

    /// Apply one input. Returns `false` when the user asked to quit.
    pub fn apply(&mut self, input: ViewInput) -> bool {
        match input {
            ViewInput::HeadingLeft => self.set_heading(self.heading - ANGLE_STEP),
            ViewInput::HeadingRight => self.set_heading(self.heading + ANGLE_STEP),
            ViewInput::PitchUp => self.set_pitch(self.pitch + ANGLE_STEP),
            ViewInput::PitchDown => self.set_pitch(self.pitch - ANGLE_STEP),
            ViewInput::Reset => {
                self.heading = self.initial.0;
                self.pitch = self.initial.1;
            }
            ViewInput::Quit => return false,
        }
        true
    }

    pub fn request(&self, width: usize, height: usize) -> RenderRequest {
        RenderRequest::new(self.heading, self.pitch, width, height)
    }

    pub fn title(&self) -> String {
        format!("tetra_viewer | heading: {}° | pitch: {}°", self.heading, self.pitch)
    }
}
