use crate::map::ScreenPoint;
use crate::scene::Rgb;

/// One resolved terminal cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

#[derive(Clone, Copy, Debug)]
struct Glyph {
    ch: char,
    fg: Rgb,
    bg: Option<Rgb>,
}

#[derive(Clone, Copy, Debug)]
struct Clip {
    center: ScreenPoint,
    radius_sq: f64,
}

/// Braille Unicode canvas for high-resolution terminal graphics.
/// Each character cell represents a 2x4 dot grid (8 dots).
///
/// Two layers per dot: `fill` (area colour, resolved into the cell
/// background) and `ink` (lit braille dots, resolved into the foreground).
/// Text glyphs replace a cell entirely.
pub struct BrailleCanvas {
    width: usize,  // Characters
    height: usize, // Characters
    fill: Vec<Rgb>,
    ink: Vec<Option<Rgb>>,
    text: Vec<Option<Glyph>>,
    clip: Option<Clip>,
}

impl BrailleCanvas {
    /// Create a new canvas with the given character dimensions.
    /// Effective dot resolution: width*2 x height*4
    pub fn new(width: usize, height: usize) -> Self {
        let dots = width * 2 * height * 4;
        Self {
            width,
            height,
            fill: vec![Rgb(0, 0, 0); dots],
            ink: vec![None; dots],
            text: vec![None; width * height],
            clip: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dot_width(&self) -> usize {
        self.width * 2
    }

    pub fn dot_height(&self) -> usize {
        self.height * 4
    }

    /// Wipe every layer and paint the whole surface one colour.
    pub fn clear(&mut self, color: Rgb) {
        self.fill.fill(color);
        self.ink.fill(None);
        self.text.fill(None);
        self.clip = None;
    }

    /// Restrict dot writes to a circle until [`release_clip`](Self::release_clip).
    pub fn set_clip(&mut self, center: ScreenPoint, radius: f64) {
        self.clip = Some(Clip { center, radius_sq: radius * radius });
    }

    pub fn release_clip(&mut self) {
        self.clip = None;
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.dot_width() || y >= self.dot_height() {
            return None;
        }
        if let Some(clip) = self.clip {
            let (dx, dy) = (x as f64 + 0.5 - clip.center.0, y as f64 + 0.5 - clip.center.1);
            if dx * dx + dy * dy > clip.radius_sq {
                return None;
            }
        }
        Some(y * self.dot_width() + x)
    }

    /// Paint the area colour under one dot.
    #[inline]
    pub fn fill_dot(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.fill[i] = color;
        }
    }

    /// Light one braille dot.
    #[inline]
    pub fn ink_dot(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.ink[i] = Some(color);
        }
    }

    /// Write text starting at a cell, clipped to the canvas edge. `bg: None`
    /// keeps the resolved area colour behind the glyph.
    pub fn put_text(&mut self, col: usize, row: usize, text: &str, fg: Rgb, bg: Option<Rgb>) {
        if row >= self.height {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let c = col + i;
            if c >= self.width {
                break;
            }
            self.text[row * self.width + c] = Some(Glyph { ch, fg, bg });
        }
    }

    /// Resolve a cell: braille bits from the ink layer, mean colours for
    /// foreground and background.
    /// Braille dot layout per character:
    /// ```text
    /// (0,0) (1,0)   bits: 0x01 0x08
    /// (0,1) (1,1)   bits: 0x02 0x10
    /// (0,2) (1,2)   bits: 0x04 0x20
    /// (0,3) (1,3)   bits: 0x40 0x80
    /// ```
    pub fn cell(&self, col: usize, row: usize) -> Cell {
        const BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

        let mut bits = 0u8;
        let mut fill = Mean::default();
        let mut ink = Mean::default();
        for dy in 0..4 {
            for dx in 0..2 {
                let i = (row * 4 + dy) * self.dot_width() + col * 2 + dx;
                fill.add(self.fill[i]);
                if let Some(color) = self.ink[i] {
                    bits |= BITS[dx][dy];
                    ink.add(color);
                }
            }
        }
        let bg = fill.get().unwrap_or(Rgb(0, 0, 0));

        if let Some(glyph) = self.text[row * self.width + col] {
            return Cell { ch: glyph.ch, fg: glyph.fg, bg: glyph.bg.unwrap_or(bg) };
        }
        Cell {
            ch: char::from_u32(0x2800 + bits as u32).unwrap_or(' '),
            fg: ink.get().unwrap_or(bg),
            bg,
        }
    }

    /// Get a specific row as a string (for line-by-line rendering)
    pub fn row_to_string(&self, row: usize) -> String {
        if row >= self.height {
            return String::new();
        }
        (0..self.width).map(|col| self.cell(col, row).ch).collect()
    }

    /// Convert the canvas to a string of Braille characters
    #[cfg(test)]
    pub fn to_string(&self) -> String {
        (0..self.height).map(|row| self.row_to_string(row)).collect::<Vec<_>>().join("\n")
    }
}

#[derive(Default)]
struct Mean {
    sum: [u32; 3],
    n: u32,
}

impl Mean {
    fn add(&mut self, Rgb(r, g, b): Rgb) {
        self.sum[0] += r as u32;
        self.sum[1] += g as u32;
        self.sum[2] += b as u32;
        self.n += 1;
    }

    fn get(&self) -> Option<Rgb> {
        (self.n > 0).then(|| {
            let avg = |s: u32| ((s + self.n / 2) / self.n) as u8;
            Rgb(avg(self.sum[0]), avg(self.sum[1]), avg(self.sum[2]))
        })
    }
}
