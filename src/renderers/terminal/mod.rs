// src/renderers/terminal/mod.rs
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
mod termbuffer;
pub use termbuffer::{encode_frame, viewport_for, FULL_BLOCK};
use crate::core::Scene;
use crate::pipeline::Pipeline;
use crate::renderers::{Renderer, ViewInput, ViewState};
use log::{error, info};
use std::io::{self, stdout, Write};
use std::panic;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Chains `on_panic` in front of the current panic hook, and puts the
/// previous hook back when dropped.
struct PanicHookGuard {
    restore: Option<Box<dyn FnOnce() + Send>>,
}

impl PanicHookGuard {
    fn install<F>(on_panic: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let previous: Arc<dyn Fn(&panic::PanicHookInfo<'_>) + Sync + Send + 'static> =
            Arc::from(panic::take_hook());
        let chained = Arc::clone(&previous);
        panic::set_hook(Box::new(move |panic_info| {
            on_panic();
            error!("Panic occurred: {:?}", panic_info);
            (*chained)(panic_info);
        }));
        Self {
            restore: Some(Box::new(move || {
                panic::set_hook(Box::new(move |panic_info| (*previous)(panic_info)));
            })),
        }
    }
}

impl Drop for PanicHookGuard {
    fn drop(&mut self) {
        // The hook can't be swapped while unwinding
        if thread::panicking() {
            return;
        }
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

pub struct TerminalRenderer {
    pipeline: Pipeline,
    view: ViewState,
    /// Terminal size in cells.
    cells: (usize, usize),
    _panic_hook: PanicHookGuard,
}

impl TerminalRenderer {
    pub fn new(scene: Scene, view: ViewState) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let renderer = Self {
            pipeline: Pipeline::new(scene),
            view,
            cells: (cols as usize, rows as usize),
            _panic_hook: PanicHookGuard::install(|| {
                let _ = Self::cleanup_terminal();
            }),
        };

        // From here on an early return drops `renderer`, which restores the terminal
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide)?;
        Ok(renderer)
    }

    fn cleanup_terminal() -> io::Result<()> {
        let mut stdout = stdout();
        disable_raw_mode()?;
        execute!(stdout, Show, LeaveAlternateScreen)?;
        Ok(())
    }

    fn map_key(code: KeyCode) -> Option<ViewInput> {
        match code {
            KeyCode::Left | KeyCode::Char('a') => Some(ViewInput::HeadingLeft),
            KeyCode::Right | KeyCode::Char('d') => Some(ViewInput::HeadingRight),
            KeyCode::Up | KeyCode::Char('w') => Some(ViewInput::PitchUp),
            KeyCode::Down | KeyCode::Char('s') => Some(ViewInput::PitchDown),
            KeyCode::Char('r') => Some(ViewInput::Reset),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(ViewInput::Quit),
            _ => None,
        }
    }

    fn present(&self) -> io::Result<()> {
        let (cols, rows) = self.cells;
        let mut stdout = stdout();
        stdout.write_all(encode_frame(self.pipeline.buffer(), cols, rows).as_bytes())?;
        stdout.flush()
    }
}

impl Renderer for TerminalRenderer {
    fn run(&mut self) -> io::Result<()> {
        info!("Terminal mode started at {}x{} cells", self.cells.0, self.cells.1);
        loop {
            let (width, height) = viewport_for(self.cells.0, self.cells.1);
            let request = self.view.request(width, height);
            if self.pipeline.render_if_changed(request) {
                self.present()?;
            }

            // Block briefly so an idle viewer doesn't spin
            if !event::poll(Duration::from_millis(50))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let Some(input) = Self::map_key(key.code) {
                        if !self.view.apply(input) {
                            info!("Quit requested");
                            break;
                        }
                    }
                }
                Event::Resize(width, height) => {
                    info!("Terminal resized to {}x{}", width, height);
                    self.cells = (width as usize, height as usize);
                    // Old glyphs outside the new frame must go
                    execute!(stdout(), terminal::Clear(terminal::ClearType::All))?;
                    self.pipeline.invalidate();
                }
                _ => {}
            }
        }

        Self::cleanup_terminal()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = Self::cleanup_terminal();
    }
}
