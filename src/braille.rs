use crate::surface::Raster;

/// Hex values of braille dots
///
/// ```notrust
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Pixels darker than this light up their dot
const LIT_THRESHOLD: u8 = 128;

/// Pixel size of a display made of `cols x rows` terminal cells. The last row is kept for the
/// ruler label.
pub fn pixel_size(cols: u16, rows: u16) -> (u32, u32) {
    let w = cols.max(1) as u32 * 2;
    let h = rows.saturating_sub(1).max(1) as u32 * 4;

    (w, h)
}

/// The display pixel at the centre of terminal cell `(col, row)`
pub fn cell_center(col: u16, row: u16) -> (f64, f64) {
    (col as f64 * 2.0 + 1.0, row as f64 * 4.0 + 2.0)
}

/// Draws a raster on a terminal, one braille dot per pixel.
pub struct BrailleCanvas {
    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Width of the raster, in pixels
    w: usize,

    /// Height of the raster, in pixels
    h: usize,
}

impl BrailleCanvas {
    pub fn new(w: usize, h: usize) -> Self {
        // Let `w` and `h` refer to width and height of the raster. Then `bw = ceil(w / 2)` and
        // `bh = ceil(h / 4)` are the width and height of braille characters of our framebuffer.
        //
        // Each braille character is 3 bytes, and newlines one byte. Since we need `bh` newlines,
        // this gives us a framebuffer of length `3 * (bw * bh) + bh`.
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));

        Self {
            fb: String::with_capacity(3 * (bw * bh) + bh),
            cp: vec![BRAILLE_EMPTY; bw * bh],
            w,
            h,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Turn `raster` into lines of braille characters, one line per 4 pixel rows.
    ///
    /// The raster is expected to be the size of the canvas. Pixels past the canvas are ignored.
    pub fn render(&mut self, raster: &Raster) -> &str {
        let bw = self.w.div_ceil(2);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        let (w, h) = (self.w.min(raster.width()), self.h.min(raster.height()));
        for y in 0..h {
            for x in 0..w {
                if raster.pixel(x, y).luminance() < LIT_THRESHOLD {
                    self.cp[(y / 4) * bw + (x / 2)] += Self::get_hex_value(x, y);
                }
            }
        }

        // update framebuffer
        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            // Every codepoint lies in U+2800..=U+28FF
            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }
        self.fb.push('\n');

        &self.fb
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::BrailleCanvas;
    use super::cell_center;
    use super::pixel_size;
    use crate::surface::Color;
    use crate::surface::Raster;

    const INK: Color = Color::rgb(0, 0, 0);

    #[test]
    fn corners() {
        let mut r = Raster::new(4, 4, Color::WHITE);
        r.set_pixel(0, 0, INK);
        r.set_pixel(3, 3, INK);

        let mut canvas = BrailleCanvas::new(4, 4);
        assert_eq!(canvas.render(&r), "\u{2801}\u{2880}\n");
    }

    #[test]
    fn full_and_empty_lines() {
        let mut r = Raster::new(2, 8, Color::WHITE);
        for y in 0..4 {
            r.set_pixel(0, y, INK);
            r.set_pixel(1, y, INK);
        }

        let mut canvas = BrailleCanvas::new(2, 8);
        assert_eq!(canvas.render(&r), "\u{28FF}\n\u{2800}\n");
    }

    #[test]
    fn rerender_forgets_previous_frame() {
        let mut canvas = BrailleCanvas::new(2, 4);

        let mut r = Raster::new(2, 4, INK);
        canvas.render(&r);

        r.fill(Color::WHITE);
        assert_eq!(canvas.render(&r), "\u{2800}\n");
    }

    #[test]
    fn partial_blocks() {
        let r = Raster::new(3, 5, INK);
        let mut canvas = BrailleCanvas::new(3, 5);

        // Right column and bottom row only have their first dots
        assert_eq!(canvas.render(&r), "\u{28FF}\u{2847}\n\u{2809}\u{2801}\n");
    }

    #[test]
    fn sizes() {
        assert_eq!(pixel_size(80, 24), (160, 92));
        assert_eq!(pixel_size(0, 0), (2, 4));
        assert_eq!(cell_center(0, 0), (1.0, 2.0));
        assert_eq!(cell_center(10, 3), (21.0, 14.0));
    }
}
