use std::{
    fs::OpenOptions,
    io,
    path::PathBuf,
};

use clap::{value_parser, Arg, ArgAction, Command};
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

pub mod core;
pub mod pipeline;
pub mod renderers;

pub use crate::core::geometry;
pub use crate::core::{Camera, Color, Light, Mesh, Scene};
pub use pipeline::{render, render_into, FrameBuffer, Pipeline, RenderRequest};

pub const DEFAULT_HEADING: i32 = 180;
pub const DEFAULT_PITCH: i32 = 0;
pub const DEFAULT_SIZE: (usize, usize) = (700, 700);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTarget {
    Terminal,
    Window,
    Image,
}

/// Everything the binary needs, resolved from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub target: DisplayTarget,
    pub heading: i32,
    pub pitch: i32,
    pub width: usize,
    pub height: usize,
    pub distance: f64,
    pub background: Color,
    pub output: PathBuf,
    pub log_file: PathBuf,
    pub verbose: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            target: DisplayTarget::Window,
            heading: DEFAULT_HEADING,
            pitch: DEFAULT_PITCH,
            width: DEFAULT_SIZE.0,
            height: DEFAULT_SIZE.1,
            distance: crate::core::camera::DEFAULT_DISTANCE,
            background: Color::BLACK,
            output: PathBuf::from("render.png"),
            log_file: PathBuf::from("tetra_viewer.log"),
            verbose: false,
        }
    }
}

impl ViewerConfig {
    pub fn scene(&self) -> Scene {
        Scene::new(Mesh::tetrahedron(), Camera::new(self.distance)).with_background(self.background)
    }

    pub fn view(&self) -> renderers::ViewState {
        renderers::ViewState::new(self.heading, self.pitch)
    }

    pub fn request(&self) -> RenderRequest {
        RenderRequest::new(self.heading, self.pitch, self.width, self.height)
    }
}

fn render_command() -> Command {
    Command::new("render")
        .about("Render the mesh in a window, the terminal, or to a PNG file")
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_name("MODE")
                .help("Display target ('window', 'terminal', 'image', or 'w', 't', 'i')")
                .value_parser(["window", "terminal", "image", "w", "t", "i"]),
        )
        .arg(
            Arg::new("heading")
                .long("heading")
                .value_name("DEGREES")
                .help("Initial heading (yaw) in degrees")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i32).range(0..=360)),
        )
        .arg(
            Arg::new("pitch")
                .long("pitch")
                .value_name("DEGREES")
                .help("Initial pitch in degrees")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i32).range(-90..=90)),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .value_name("PIXELS")
                .help("Viewport width for window and image modes")
                .value_parser(value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_name("PIXELS")
                .help("Viewport height for window and image modes")
                .value_parser(value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new("distance")
                .short('d')
                .long("distance")
                .value_name("UNITS")
                .help("Camera distance from the origin; larger means less perspective")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("background")
                .short('b')
                .long("background")
                .value_name("HEX")
                .help("Background color as #RRGGBB")
                .value_parser(Color::from_hex),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("PNG path written in image mode")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .help("Where to append log output")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log per-frame debug output")
                .action(ArgAction::SetTrue),
        )
}

pub fn create_clap_command() -> Command {
    Command::new("tetra_viewer")
        .about("Software-rasterized 3D viewer")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(render_command())
}

pub fn handle_clap_matches(matches: &clap::ArgMatches) -> ViewerConfig {
    let mut config = ViewerConfig::default();

    // Default behavior when no subcommand is provided
    let Some(("render", sub_matches)) = matches.subcommand() else {
        return config;
    };

    if let Some(mode) = sub_matches.get_one::<String>("mode") {
        config.target = match mode.as_str() {
            "terminal" | "t" => DisplayTarget::Terminal,
            "image" | "i" => DisplayTarget::Image,
            _ => DisplayTarget::Window,
        };
    }
    if let Some(&heading) = sub_matches.get_one::<i32>("heading") {
        config.heading = heading;
    }
    if let Some(&pitch) = sub_matches.get_one::<i32>("pitch") {
        config.pitch = pitch;
    }
    if let Some(&width) = sub_matches.get_one::<u32>("width") {
        config.width = width as usize;
    }
    if let Some(&height) = sub_matches.get_one::<u32>("height") {
        config.height = height as usize;
    }
    if let Some(&distance) = sub_matches.get_one::<f64>("distance") {
        config.distance = distance;
    }
    if let Some(&background) = sub_matches.get_one::<Color>("background") {
        config.background = background;
    }
    if let Some(output) = sub_matches.get_one::<PathBuf>("output") {
        config.output = output.clone();
    }
    if let Some(log_file) = sub_matches.get_one::<PathBuf>("log-file") {
        config.log_file = log_file.clone();
    }
    config.verbose = sub_matches.get_flag("verbose");

    config
}

/// Install the global logger.
///
/// Always appends to the log file. Window and image modes also log to
/// stderr; terminal mode owns the screen so it only writes the file.
pub fn init_logging(config: &ViewerConfig) -> io::Result<()> {
    let level = if config.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let mut loggers: Vec<Box<dyn SharedLogger>> =
        vec![WriteLogger::new(level, Config::default(), log_file)];
    if config.target != DisplayTarget::Terminal {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    CombinedLogger::init(loggers).map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ViewerConfig {
        let matches = create_clap_command()
            .try_get_matches_from(args)
            .expect("arguments should parse");
        handle_clap_matches(&matches)
    }

    #[test]
    fn no_subcommand_uses_defaults() {
        assert_eq!(parse(&["tetra_viewer"]), ViewerConfig::default());
    }

    #[test]
    fn render_flags_override_defaults() {
        let config = parse(&[
            "tetra_viewer",
            "render",
            "-m",
            "i",
            "--heading",
            "90",
            "--pitch",
            "-45",
            "--width",
            "320",
            "--height",
            "200",
            "-d",
            "1000",
            "-b",
            "#102030",
            "-o",
            "out.png",
            "-v",
        ]);
        assert_eq!(config.target, DisplayTarget::Image);
        assert_eq!((config.heading, config.pitch), (90, -45));
        assert_eq!((config.width, config.height), (320, 200));
        assert_eq!(config.distance, 1000.0);
        assert_eq!(config.background, Color::new(0x10, 0x20, 0x30));
        assert_eq!(config.output, PathBuf::from("out.png"));
        assert!(config.verbose);
    }

    #[test]
    fn out_of_range_angles_are_rejected() {
        let cmd = create_clap_command;
        assert!(cmd()
            .try_get_matches_from(["tetra_viewer", "render", "--heading", "361"])
            .is_err());
        assert!(cmd()
            .try_get_matches_from(["tetra_viewer", "render", "--pitch", "-91"])
            .is_err());
        assert!(cmd()
            .try_get_matches_from(["tetra_viewer", "render", "--width", "0"])
            .is_err());
    }

    #[test]
    fn bad_background_is_rejected() {
        assert!(create_clap_command()
            .try_get_matches_from(["tetra_viewer", "render", "-b", "nope"])
            .is_err());
    }

    #[test]
    fn config_builds_scene_and_request() {
        let config = ViewerConfig {
            distance: 250.0,
            background: Color::GRAY,
            ..ViewerConfig::default()
        };
        let scene = config.scene();
        assert_eq!(scene.camera.distance, 250.0);
        assert_eq!(scene.background, Color::GRAY);
        assert_eq!(scene.mesh.len(), 4);
        assert_eq!(config.request(), RenderRequest::new(180, 0, 700, 700));
    }
}
