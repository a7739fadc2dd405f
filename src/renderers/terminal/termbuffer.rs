use crate::core::Color;
use crate::pipeline::FrameBuffer;
use crate::DEFAULT_SIZE;

/// Glyph drawn in every cell.
pub const FULL_BLOCK: char = '█';

/// A cell is roughly twice as tall as it is wide.
const CELL_ASPECT: usize = 2;

/// Pixel size of the frame rendered for a `cols` x `rows` terminal.
///
/// Each cell covers a `scale` x `2 * scale` block of pixels, with `scale`
/// chosen so the shorter side is at least as long as the default window.
/// The mesh then keeps the proportions it has in the window.
pub fn viewport_for(cols: usize, rows: usize) -> (usize, usize) {
    if cols == 0 || rows == 0 {
        return (0, 0);
    }
    let shorter = cols.min(rows * CELL_ASPECT);
    let target = DEFAULT_SIZE.0.min(DEFAULT_SIZE.1);
    let scale = target.div_ceil(shorter).max(1);
    (cols * scale, rows * CELL_ASPECT * scale)
}

/// Encode a frame buffer as a single ANSI string of `cols` x `rows` cells.
///
/// Each cell shows the pixel under its center, so a buffer from
/// [`viewport_for`] is downsampled and a buffer of exactly `cols` x `rows`
/// maps one pixel per cell. Runs of equal color share one escape sequence.
pub fn encode_frame(buffer: &FrameBuffer, cols: usize, rows: usize) -> String {
    let (width, height) = (buffer.width(), buffer.height());
    // Roughly one escape per run plus the glyphs
    let mut output = String::with_capacity(cols * rows * 4 + rows * 8);

    output.push_str("\x1B[?25l"); // Hide cursor
    output.push_str("\x1B[H"); // Move cursor to home position

    if width == 0 || height == 0 {
        output.push_str("\x1B[0m");
        return output;
    }

    let mut last_color: Option<Color> = None;
    let mut row: Vec<Color> = Vec::with_capacity(cols);

    for cy in 0..rows {
        let y = (2 * cy + 1) * height / (2 * rows);
        row.clear();
        row.extend((0..cols).filter_map(|cx| buffer.get_pixel((2 * cx + 1) * width / (2 * cols), y)));

        // Move cursor to the beginning of the line once
        output.push_str(&format!("\x1B[{};{}H", cy + 1, 1));

        let mut x = 0;
        while x < row.len() {
            let color = row[x];
            let run = row[x..].iter().take_while(|&&c| c == color).count();

            if last_color != Some(color) {
                output.push_str(&color.to_ansii_escape());
                last_color = Some(color);
            }
            output.extend(std::iter::repeat(FULL_BLOCK).take(run));
            x += run;
        }
    }

    output.push_str("\x1B[0m"); // Reset attributes
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render, RenderRequest, Scene};

    #[test]
    fn coalesces_color_runs() {
        let mut fb = FrameBuffer::new(3, 2, Color::BLACK);
        fb.set_pixel(2, 0, 1.0, Color::RED);
        let out = encode_frame(&fb, 3, 2);

        assert_eq!(out.matches("\x1b[38;2;0;0;0m").count(), 2);
        assert_eq!(out.matches("\x1b[38;2;255;0;0m").count(), 1);
        assert_eq!(out.matches(FULL_BLOCK).count(), 6);
        assert!(out.contains("\x1B[2;1H"));
    }

    #[test]
    fn empty_buffer_encodes_without_rows() {
        let fb = FrameBuffer::new(0, 0, Color::BLACK);
        assert_eq!(encode_frame(&fb, 0, 0), "\x1B[?25l\x1B[H\x1B[0m");
        assert_eq!(encode_frame(&fb, 80, 24), "\x1B[?25l\x1B[H\x1B[0m");
    }

    #[test]
    fn downsamples_cell_centers() {
        // 2x4 pixels per cell; only the pixel under a cell's center counts
        let mut fb = FrameBuffer::new(4, 8, Color::BLACK);
        fb.set_pixel(1, 2, 1.0, Color::RED);
        fb.set_pixel(0, 0, 1.0, Color::BLUE);
        let out = encode_frame(&fb, 2, 2);

        assert_eq!(out.matches(FULL_BLOCK).count(), 4);
        assert_eq!(out.matches("\x1b[38;2;255;0;0m").count(), 1);
        assert!(!out.contains("\x1b[38;2;0;0;255m"));
    }

    #[test]
    fn viewport_keeps_cells_proportional() {
        assert_eq!(viewport_for(80, 24), (1200, 720));
        assert_eq!(viewport_for(0, 24), (0, 0));
        // Already large enough: one pixel column per cell
        assert_eq!(viewport_for(1000, 500), (1000, 1000));
        let (w, h) = viewport_for(200, 60);
        assert_eq!((w % 200, h % 60), (0, 0));
        assert!(w.min(h) >= 700);
    }

    #[test]
    fn default_scene_fits_a_standard_terminal() {
        let (cols, rows) = (80, 24);
        let (width, height) = viewport_for(cols, rows);
        let scene = Scene::default().with_background(Color::MAGENTA);
        let fb = render(&scene, &RenderRequest::new(180, 0, width, height));
        let out = encode_frame(&fb, cols, rows);

        assert_eq!(out.matches(FULL_BLOCK).count(), cols * rows);
        // Corners show background, the middle shows the mesh
        assert!(out.contains("\x1b[38;2;255;0;255m"));
        assert_eq!(fb.get_pixel(0, 0), Some(Color::MAGENTA));
        assert_ne!(fb.get_pixel(width / 2, height / 2), Some(Color::MAGENTA));
        assert!(out.matches("\x1b[38;2;").count() > 1);
    }
}
