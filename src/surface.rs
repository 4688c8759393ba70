#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Perceived brightness in `[0, 255]`
    pub fn luminance(&self) -> u8 {
        let l = 0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64;
        l.round() as u8
    }

    /// Linear interpolation: `p = 1` yields `self`, `p = 0` yields `other`.
    pub fn lerp(&self, other: &Color, p: f64) -> Color {
        assert!((0f64..=1f64).contains(&p), "lerp p lives in [0, 1]");

        // interpolate a channel
        let f = |a: u8, b: u8| ((a as f64) * p + (b as f64) * (1f64 - p)).round() as u8;

        Color {
            r: f(self.r, other.r),
            g: f(self.g, other.g),
            b: f(self.b, other.b),
            a: f(self.a, other.a),
        }
    }

    /// Paint `self` over an opaque `dst`, honouring `self`'s alpha.
    pub fn over(&self, dst: &Color) -> Color {
        let p = self.a as f64 / 255f64;
        let c = self.lerp(dst, p);

        Color { a: 255, ..c }
    }
}

/// A rectangular grid of pixels, row after row.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Raster {
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[self.xy_from(x, y)]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, c: Color) {
        let i = self.xy_from(x, y);
        self.pixels[i] = c;
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn fill(&mut self, c: Color) {
        self.pixels.fill(c);
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        assert!(x < self.width, "x is out of bounds");
        assert!(y < self.height, "y is out of bounds");

        y * self.width + x
    }

    /// Bilinear sample at continuous raster coordinates, where pixel `(i, j)` covers
    /// `[i, i + 1) x [j, j + 1)`. Coordinates are clamped to the raster.
    fn sample_bilinear(&self, x: f64, y: f64) -> Color {
        let (u, v) = (x - 0.5, y - 0.5);
        let (x0, y0) = (u.floor(), v.floor());
        let (fx, fy) = (u - x0, v - y0);

        let clamp_x = |x: f64| x.clamp(0.0, (self.width - 1) as f64) as usize;
        let clamp_y = |y: f64| y.clamp(0.0, (self.height - 1) as f64) as usize;

        let (xa, xb) = (clamp_x(x0), clamp_x(x0 + 1.0));
        let (ya, yb) = (clamp_y(y0), clamp_y(y0 + 1.0));

        let top = self.pixel(xb, ya).lerp(&self.pixel(xa, ya), fx);
        let bot = self.pixel(xb, yb).lerp(&self.pixel(xa, yb), fx);

        bot.lerp(&top, fy)
    }
}

/// How a raster is resampled when composited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    Nearest,
    Bilinear,
}

/// A uniform scale followed by a translation: `p<surface> = p<local> * scale + (tx, ty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.scale + self.tx, y * self.scale + self.ty)
    }

    pub fn invert(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.tx) / self.scale, (y - self.ty) / self.scale)
    }
}

/// The on-screen drawing target.
///
/// Drawing goes through the current transform, which can be saved and restored like a 2d canvas
/// context.
#[derive(Debug, Clone)]
pub struct Surface {
    raster: Raster,
    transform: Transform,
    stack: Vec<Transform>,
}

impl Surface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            raster: Raster::new(width, height, Color::WHITE),
            transform: Transform::IDENTITY,
            stack: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.raster.width()
    }

    pub fn height(&self) -> usize {
        self.raster.height()
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Resize, dropping the current content
    pub fn resize(&mut self, width: usize, height: usize) {
        self.raster = Raster::new(width, height, Color::WHITE);
    }

    pub fn save(&mut self) {
        self.stack.push(self.transform);
    }

    /// Restore the last saved transform. Does nothing if none was saved.
    pub fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        let (tx, ty) = self.transform.apply(dx, dy);
        self.transform.tx = tx;
        self.transform.ty = ty;
    }

    pub fn scale(&mut self, s: f64) {
        self.transform.scale *= s;
    }

    /// Fill the whole surface, ignoring the transform
    pub fn clear(&mut self, c: Color) {
        self.raster.fill(c);
    }

    /// Paint every pixel whose centre lies in the rectangle `[x, x + w) x [y, y + h)`, given in
    /// local coordinates.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, c: Color) {
        let (x0, y0) = self.transform.apply(x, y);
        let (x1, y1) = self.transform.apply(x + w, y + h);

        let Some((px0, px1)) = Self::covered(x0, x1, self.width()) else {
            return;
        };
        let Some((py0, py1)) = Self::covered(y0, y1, self.height()) else {
            return;
        };

        for py in py0..py1 {
            for px in px0..px1 {
                let dst = self.raster.pixel(px, py);
                self.raster.set_pixel(px, py, c.over(&dst));
            }
        }
    }

    /// Draw `src` with its top left corner at the local origin.
    pub fn draw_raster(&mut self, src: &Raster, sampling: Sampling) {
        let t = self.transform;

        let (x0, y0) = t.apply(0.0, 0.0);
        let (x1, y1) = t.apply(src.width() as f64, src.height() as f64);

        let Some((px0, px1)) = Self::covered(x0, x1, self.width()) else {
            return;
        };
        let Some((py0, py1)) = Self::covered(y0, y1, self.height()) else {
            return;
        };

        for py in py0..py1 {
            for px in px0..px1 {
                let (sx, sy) = t.invert(px as f64 + 0.5, py as f64 + 0.5);

                let c = match sampling {
                    Sampling::Nearest => {
                        let (sx, sy) = (sx.floor(), sy.floor());
                        if sx < 0.0
                            || sy < 0.0
                            || sx >= src.width() as f64
                            || sy >= src.height() as f64
                        {
                            continue;
                        }

                        src.pixel(sx as usize, sy as usize)
                    }
                    Sampling::Bilinear => src.sample_bilinear(sx, sy),
                };

                let dst = self.raster.pixel(px, py);
                self.raster.set_pixel(px, py, c.over(&dst));
            }
        }
    }

    /// The range of pixel indices in `0..len` whose centres lie in `[a, b)`.
    fn covered(a: f64, b: f64, len: usize) -> Option<(usize, usize)> {
        if !(a < b) {
            return None;
        }

        let lo = (a - 0.5).ceil().max(0.0);
        let hi = (b - 0.5).ceil().min(len as f64);

        if lo >= hi {
            return None;
        }

        Some((lo as usize, hi as usize))
    }
}

#[cfg(test)]
mod test {
    use super::Color;
    use super::Raster;
    use super::Sampling;
    use super::Surface;

    const INK: Color = Color::rgb(0, 0, 0);

    #[test]
    fn over() {
        let half = Color::rgba(0, 0, 0, 0);
        assert_eq!(half.over(&Color::WHITE), Color::WHITE);
        assert_eq!(INK.over(&Color::WHITE), INK);

        let c = Color::rgba(255, 255, 255, 204).over(&INK);
        assert_eq!(c, Color::rgb(204, 204, 204));
    }

    #[test]
    fn fill_rect_uses_pixel_centres() {
        let mut s = Surface::new(10, 10);
        s.fill_rect(1.0, 2.0, 3.0, 1.0, INK);

        assert_eq!(s.raster().pixel(0, 2), Color::WHITE);
        assert_eq!(s.raster().pixel(1, 2), INK);
        assert_eq!(s.raster().pixel(3, 2), INK);
        assert_eq!(s.raster().pixel(4, 2), Color::WHITE);
        assert_eq!(s.raster().pixel(1, 3), Color::WHITE);
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut s = Surface::new(4, 4);
        s.fill_rect(-10.0, -10.0, 100.0, 100.0, INK);

        assert!(s.raster().pixels().iter().all(|&c| c == INK));
    }

    #[test]
    fn save_restore() {
        let mut s = Surface::new(4, 4);
        s.save();
        s.translate(2.0, 1.0);
        s.scale(3.0);
        s.translate(1.0, 1.0);

        assert_eq!(s.transform().apply(0.0, 0.0), (5.0, 4.0));
        assert_eq!(s.transform().scale, 3.0);

        s.restore();
        assert_eq!(s.transform().apply(1.0, 1.0), (1.0, 1.0));

        // Unbalanced restore keeps the identity
        s.restore();
        assert_eq!(s.transform().scale, 1.0);
    }

    #[test]
    fn draw_raster_scaled() {
        let mut src = Raster::new(2, 1, Color::WHITE);
        src.set_pixel(1, 0, INK);

        let mut s = Surface::new(8, 4);
        s.translate(1.0, 0.0);
        s.scale(2.0);
        s.draw_raster(&src, Sampling::Nearest);

        // Source pixel (1, 0) covers surface [3, 5) x [0, 2)
        assert_eq!(s.raster().pixel(2, 0), Color::WHITE);
        assert_eq!(s.raster().pixel(3, 0), INK);
        assert_eq!(s.raster().pixel(4, 1), INK);
        assert_eq!(s.raster().pixel(5, 0), Color::WHITE);
        assert_eq!(s.raster().pixel(3, 2), Color::WHITE);
    }

    #[test]
    fn draw_raster_out_of_view() {
        let src = Raster::new(2, 2, INK);

        let mut s = Surface::new(4, 4);
        s.translate(-100.0, 0.0);
        s.draw_raster(&src, Sampling::Bilinear);

        assert!(s.raster().pixels().iter().all(|&c| c == Color::WHITE));
    }

    #[test]
    fn bilinear_uniform_raster() {
        let src = Raster::new(3, 3, INK);

        let mut s = Surface::new(2, 2);
        s.scale(0.5);
        s.draw_raster(&src, Sampling::Bilinear);

        assert_eq!(s.raster().pixel(0, 0), INK);
        assert_eq!(s.raster().pixel(1, 1), Color::WHITE);
    }
}
