use log::{error, info};
use std::io;
use tetra_viewer::{
    create_clap_command, handle_clap_matches, init_logging,
    renderers::{ImageRenderer, Renderer, TerminalRenderer, WindowRenderer},
    DisplayTarget,
};

fn main() -> io::Result<()> {
    let matches = create_clap_command().get_matches();
    let config = handle_clap_matches(&matches);
    init_logging(&config)?;
    info!("Starting {:?} with {}", config.target, config.scene());

    let scene = config.scene();
    let mut renderer: Box<dyn Renderer> = match config.target {
        DisplayTarget::Window => Box::new(WindowRenderer::new(
            scene,
            config.view(),
            config.width,
            config.height,
        )?),
        DisplayTarget::Terminal => Box::new(TerminalRenderer::new(scene, config.view())?),
        DisplayTarget::Image => Box::new(ImageRenderer::new(
            scene,
            config.request(),
            config.output.clone(),
        )),
    };

    if let Err(e) = renderer.run() {
        error!("Renderer failed: {}", e);
        return Err(e);
    }
    Ok(())
}
