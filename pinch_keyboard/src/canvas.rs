//! Software framebuffer with clipped drawing primitives.
//!
//! Coordinates are signed: keys on a small viewport can start left of or above
//! the visible area and are clipped rather than rejected.

/// ARGB framebuffer, row-major.
pub struct Canvas {
    width:  usize,
    height: usize,
    buf:    Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas { width, height, buf: vec![0xFF000000; width * height] }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn pixels(&self) -> &[u32] { &self.buf }

    /// Match the size of the incoming frame.  Contents are undefined after a
    /// size change; callers clear or blit next.
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) != (self.width, self.height) {
            self.width  = width;
            self.height = height;
            self.buf    = vec![0xFF000000; width * height];
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.buf[i])
    }

    pub fn clear(&mut self, color: u32) {
        self.buf.fill(color);
    }

    /// Copy a same-sized image in.  A size mismatch leaves the canvas as is.
    pub fn blit(&mut self, pixels: &[u32]) -> bool {
        if pixels.len() != self.buf.len() {
            return false;
        }
        self.buf.copy_from_slice(pixels);
        true
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 { return None; }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.buf[i] = color;
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width as i32);
        let y1 = y.saturating_add(h).min(self.height as i32);
        for row in y0..y1 {
            let base = row as usize * self.width;
            for col in x0..x1 {
                self.buf[base + col as usize] = color;
            }
        }
    }

    /// Outline drawn inside the rectangle, `thickness` pixels wide.
    pub fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, thickness: i32, color: u32) {
        let t = thickness.min(w).min(h).max(0);
        self.fill_rect(x, y, w, t, color);
        self.fill_rect(x, y + h - t, w, t, color);
        self.fill_rect(x, y, t, h, color);
        self.fill_rect(x + w - t, y, t, h, color);
    }

    /// Bresenham line, one pixel wide.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let (mut x, mut y) = (x0, y0);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Draw `text` with the 3×5 bitmap font, each font pixel a `scale`×`scale`
    /// block.  `(x, y)` is the top-left of the first glyph.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, scale: i32, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3 {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row as i32 * scale, scale, scale, color);
                    }
                }
            }
            cx += GLYPH_ADVANCE * scale;
            if cx >= self.width as i32 { break; }
        }
    }
}

/// Horizontal advance per character, in font pixels (3 wide + 1 gap).
const GLYPH_ADVANCE: i32 = 4;

// ────────────────────────────────────────────────────────────────────────────
// 3×5 bitmap font: the keyboard's letters plus cursor and brackets
// ────────────────────────────────────────────────────────────────────────────

/// Rows top to bottom; bit 2 is the leftmost column.
const LETTERS: [[u8; 5]; 26] = [
    [7, 5, 7, 5, 5], [6, 5, 6, 5, 6], [7, 4, 4, 4, 7], [6, 5, 5, 5, 6], // A B C D
    [7, 4, 7, 4, 7], [7, 4, 7, 4, 4], [7, 4, 5, 5, 7], [5, 5, 7, 5, 5], // E F G H
    [7, 2, 2, 2, 7], [1, 1, 1, 5, 7], [5, 5, 6, 5, 5], [4, 4, 4, 4, 7], // I J K L
    [5, 7, 5, 5, 5], [7, 5, 5, 5, 5], [7, 5, 5, 5, 7], [7, 5, 7, 4, 4], // M N O P
    [7, 5, 5, 7, 1], [6, 5, 6, 5, 5], [7, 4, 7, 1, 7], [7, 2, 2, 2, 2], // Q R S T
    [5, 5, 5, 5, 7], [5, 5, 5, 2, 2], [5, 5, 5, 7, 5], [5, 5, 2, 5, 5], // U V W X
    [5, 5, 7, 2, 2], [7, 1, 2, 4, 7],                                   // Y Z
];

fn char_glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        l @ 'A'..='Z' => LETTERS[(l as u8 - b'A') as usize],
        '|' => [2, 2, 2, 2, 2],
        '[' => [6, 4, 4, 4, 6],
        ']' => [3, 1, 1, 1, 3],
        ' ' => [0; 5],
        _   => [0, 0, 2, 0, 0],
    }
}
