//! On-screen figure viewer

use minifb::{Key, Window, WindowOptions};

use crate::plot::{Figure, PlotError, TITLE};

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("failed to render the figure")]
    Plot(#[from] PlotError),
    #[error("failed to open or refresh the viewer window")]
    Window(#[from] minifb::Error),
}

/// Shows the figure in a window, blocking until the window is closed or `Esc` is pressed
pub fn show(figure: &Figure) -> Result<(), ViewerError> {
    let (width, height) = figure.size();
    let (width, height) = (width as usize, height as usize);
    let buffer = figure.to_rgb()?;

    let mut window = Window::new(
        TITLE,
        width,
        height,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(30);
    log::info!("Close the window or press Esc to exit");
    while window.is_open() && !window.is_key_down(Key::Escape) {
        window.update_with_buffer(&buffer, width, height)?;
    }
    Ok(())
}
