use crate::core::Color;
use rayon::prelude::*;
use std::io;
use std::path::Path;

/// Color and depth for one viewport, indexed `y * width + x`.
///
/// Larger depth is closer to the viewer; cleared depth is `-inf` so the first
/// write to a pixel always lands.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    background: Color,
    color: Vec<Color>,
    depth: Vec<f64>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        let buf_size = width * height;
        FrameBuffer {
            width,
            height,
            background,
            color: vec![background; buf_size],
            depth: vec![f64::NEG_INFINITY; buf_size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn clear(&mut self) {
        let background = self.background;
        self.color.par_chunks_mut(1024).for_each(|chunk| {
            for point in chunk {
                *point = background;
            }
        });
        self.depth.par_chunks_mut(1024).for_each(|chunk| {
            for d in chunk {
                *d = f64::NEG_INFINITY;
            }
        });
    }

    /// Resize to a new viewport and clear. Keeps the allocation when it is big enough.
    pub fn resize(&mut self, width: usize, height: usize) {
        let buf_size = width * height;
        self.width = width;
        self.height = height;
        self.color.resize(buf_size, self.background);
        self.depth.resize(buf_size, f64::NEG_INFINITY);
        self.clear();
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Depth-tested write. Returns whether the pixel was updated.
    pub fn set_pixel(&mut self, x: usize, y: usize, depth: f64, color: Color) -> bool {
        match self.index(x, y) {
            Some(index) if depth > self.depth[index] => {
                self.color[index] = color;
                self.depth[index] = depth;
                true
            }
            _ => false,
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        self.index(x, y).map(|i| self.color[i])
    }

    pub fn depth_at(&self, x: usize, y: usize) -> Option<f64> {
        self.index(x, y).map(|i| self.depth[i])
    }

    pub fn pixels(&self) -> &[Color] {
        &self.color
    }

    pub fn depths(&self) -> &[f64] {
        &self.depth
    }

    /// Mutable color and depth rows for `rows`, paired up and in order.
    pub(crate) fn rows_mut(
        &mut self,
        rows: std::ops::RangeInclusive<usize>,
    ) -> impl IndexedParallelIterator<Item = (usize, (&mut [Color], &mut [f64]))> {
        let width = self.width;
        let start = *rows.start();
        let span = (*rows.end() + 1 - start) * width;
        let offset = start * width;
        self.color[offset..offset + span]
            .par_chunks_mut(width)
            .zip(self.depth[offset..offset + span].par_chunks_mut(width))
            .enumerate()
            .map(move |(i, row)| (start + i, row))
    }

    /// Packed 0x00RRGGBB pixels for minifb.
    pub fn to_u32_buffer(&self) -> Vec<u32> {
        self.color.par_iter().map(Color::to_u32).collect()
    }

    /// Tightly packed RGB8, row-major from the top-left.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.color.par_iter().flat_map_iter(|c| c.to_rgb()).collect()
    }

    pub fn save_png(&self, path: &Path) -> io::Result<()> {
        image::save_buffer_with_format(
            path,
            &self.to_rgb_bytes(),
            self.width as u32,
            self.height as u32,
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_background_and_empty_depth() {
        let fb = FrameBuffer::new(3, 2, Color::GRAY);
        assert_eq!(fb.pixels().len(), 6);
        assert!(fb.pixels().iter().all(|&c| c == Color::GRAY));
        assert!(fb.depths().iter().all(|&d| d == f64::NEG_INFINITY));
    }

    #[test]
    fn depth_test_keeps_closer_value() {
        let mut fb = FrameBuffer::new(2, 2, Color::BLACK);
        assert!(fb.set_pixel(1, 0, -50.0, Color::RED));
        assert!(!fb.set_pixel(1, 0, -60.0, Color::BLUE));
        assert!(!fb.set_pixel(1, 0, -50.0, Color::BLUE));
        assert_eq!(fb.get_pixel(1, 0), Some(Color::RED));
        assert!(fb.set_pixel(1, 0, 10.0, Color::GREEN));
        assert_eq!(fb.get_pixel(1, 0), Some(Color::GREEN));
        assert_eq!(fb.depth_at(1, 0), Some(10.0));
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut fb = FrameBuffer::new(2, 2, Color::BLACK);
        assert!(!fb.set_pixel(2, 0, 1.0, Color::RED));
        assert!(!fb.set_pixel(0, 2, 1.0, Color::RED));
        assert_eq!(fb.get_pixel(5, 5), None);
    }

    #[test]
    fn clear_and_resize_reset_everything() {
        let mut fb = FrameBuffer::new(2, 2, Color::BLACK);
        fb.set_pixel(0, 0, 1.0, Color::WHITE);
        fb.clear();
        assert_eq!(fb.get_pixel(0, 0), Some(Color::BLACK));
        assert_eq!(fb.depth_at(0, 0), Some(f64::NEG_INFINITY));

        fb.set_pixel(1, 1, 1.0, Color::WHITE);
        fb.resize(3, 1);
        assert_eq!((fb.width(), fb.height()), (3, 1));
        assert_eq!(fb.pixels(), &[Color::BLACK; 3]);
    }

    #[test]
    fn exports_row_major_pixels() {
        let mut fb = FrameBuffer::new(2, 1, Color::BLACK);
        fb.set_pixel(1, 0, 0.0, Color::new(1, 2, 3));
        assert_eq!(fb.to_u32_buffer(), vec![0, 0x00010203]);
        assert_eq!(fb.to_rgb_bytes(), vec![0, 0, 0, 1, 2, 3]);
    }

    #[test]
    fn rows_mut_yields_requested_rows() {
        let mut fb = FrameBuffer::new(2, 4, Color::BLACK);
        let rows: Vec<usize> = fb.rows_mut(1..=2).map(|(y, _)| y).collect();
        assert_eq!(rows, vec![1, 2]);
    }
}
