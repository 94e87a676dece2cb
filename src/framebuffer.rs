/// Row-major `u32` pixel buffer (`0x00RRGGBB`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Returns false when (x, y) is outside the buffer.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pixels[y * self.width + x] = color;
        true
    }

    /// Fill a 1-pixel-wide run of `height` pixels starting at row `top`,
    /// clipped to the buffer.
    pub fn vline(&mut self, x: usize, top: i64, height: i64, color: u32) {
        if x >= self.width || height <= 0 {
            return;
        }
        let y0 = top.max(0);
        let y1 = top.saturating_add(height).min(self.height as i64);
        if y0 >= y1 {
            return;
        }

        let mut idx = y0 as usize * self.width + x;
        for _y in y0..y1 {
            self.pixels[idx] = color;
            idx += self.width;
        }
    }
}
