//! Drawing surface the field renders into.

/// Minimal 2D drawing surface: clear, then fill axis-aligned rectangles
pub trait Canvas {
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: [u8; 4]);
}

/// Software RGBA8 canvas, row-major, origin top-left
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Raw bytes, ready to upload into an `Rgba8UnormSrgb` texture
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Color at a pixel, `None` outside the buffer
    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Pixel span covered along one axis: every pixel whose center lies in [start, start + len)
    fn span(start: f32, len: f32, limit: u32) -> (u32, u32) {
        let first = (start - 0.5).ceil().clamp(0.0, limit as f32) as u32;
        let last = (start + len - 0.5).ceil().clamp(0.0, limit as f32) as u32;
        (first, last)
    }
}

impl Canvas for PixelBuffer {
    fn clear(&mut self) {
        self.data.fill(0);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: [u8; 4]) {
        if !(width > 0.0 && height > 0.0) {
            return;
        }

        let (x0, x1) = Self::span(x, width, self.width);
        let (y0, y1) = Self::span(y, height, self.height);

        for py in y0..y1 {
            for px in x0..x1 {
                let i = self.index(px, py);
                self.data[i..i + 4].copy_from_slice(&color);
            }
        }
    }
}
