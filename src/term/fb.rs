//! Frame and glyph types for terminal rendering.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Default text color.
    pub const TEXT: Rgb = Rgb::new(220, 220, 220);
}

/// One styled terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgb,
    pub bold: bool,
}

impl Glyph {
    pub const fn new(ch: char, fg: Rgb) -> Self {
        Self {
            ch,
            fg,
            bold: false,
        }
    }

    pub const fn bold(ch: char, fg: Rgb) -> Self {
        Self { ch, fg, bold: true }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::new(' ', Rgb::TEXT)
    }
}

/// 2D frame of styled glyphs, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.idx(x, y).map(|i| self.glyphs[i])
    }

    /// Write one glyph; out-of-frame writes are ignored.
    pub fn put(&mut self, x: u16, y: u16, glyph: Glyph) {
        if let Some(i) = self.idx(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    /// Write a string left to right, clipped at the frame edge.
    pub fn print(&mut self, x: u16, y: u16, text: &str, fg: Rgb) {
        for (i, ch) in text.chars().enumerate() {
            let cx = x.saturating_add(i as u16);
            if cx >= self.width {
                break;
            }
            self.put(cx, y, Glyph::new(ch, fg));
        }
    }

    /// Bold variant of `print`.
    pub fn print_bold(&mut self, x: u16, y: u16, text: &str, fg: Rgb) {
        for (i, ch) in text.chars().enumerate() {
            let cx = x.saturating_add(i as u16);
            if cx >= self.width {
                break;
            }
            self.put(cx, y, Glyph::bold(ch, fg));
        }
    }

    /// One row of glyphs.
    pub fn row(&self, y: u16) -> &[Glyph] {
        let start = (y as usize) * (self.width as usize);
        &self.glyphs[start..start + self.width as usize]
    }
}
