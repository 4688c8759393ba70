use core::fmt::Debug;

use tracing::debug;
use tracing::warn;

use crate::config::DEFAULT_ZOOM;
use crate::config::MAX_ZOOM;
use crate::config::MIN_ZOOM;
use crate::surface::Transform;

#[derive(Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The visible part of the automaton, in automaton coordinates (`x` is position, `y` is time).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl Window {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// A pannable, zoomable view into automaton spacetime.
///
/// ```notrust
/// p<display> = p<automaton> * zoom + pan
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan: Point,

    /// Width of the display in pixels
    width: u32,

    /// Height of the display in pixels
    height: u32,
}

impl Viewport {
    /// The default view of a `width x height` display: automaton origin at the top middle.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_state(DEFAULT_ZOOM, width as f64 / 2.0, 0.0, width, height)
    }

    pub fn with_state(zoom: f64, pan_x: f64, pan_y: f64, width: u32, height: u32) -> Self {
        Self {
            zoom: Self::clamp_zoom(zoom),
            pan: Point::new(pan_x, pan_y),
            width,
            height,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Back to the default view for the current display size
    pub fn reset(&mut self) {
        *self = Self::new(self.width, self.height);
    }

    /// Shift the view by a delta in display pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan.x += dx;
        self.pan.y += dy;
    }

    /// Multiply the zoom by `factor`, keeping the automaton point under `anchor` in place.
    ///
    /// Non-finite factors are ignored.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        if !factor.is_finite() {
            warn!(factor, "Ignoring non-finite zoom factor");
            return;
        }

        // anchor = center * zoom + pan = center * new_zoom + new_pan
        let center = self.to_automaton(anchor);
        self.zoom = Self::clamp_zoom(self.zoom * factor);

        self.pan.x = anchor.x - center.x * self.zoom;
        self.pan.y = anchor.y - center.y * self.zoom;

        debug!(zoom = self.zoom, ?anchor, "Zoomed");
    }

    pub fn to_automaton(&self, p: Point) -> Point {
        Point {
            x: (p.x - self.pan.x) / self.zoom,
            y: (p.y - self.pan.y) / self.zoom,
        }
    }

    pub fn to_display(&self, p: Point) -> Point {
        Point {
            x: p.x * self.zoom + self.pan.x,
            y: p.y * self.zoom + self.pan.y,
        }
    }

    /// The part of the automaton covered by the display. Time never goes below 0.
    pub fn visible_window(&self) -> Window {
        let tl = self.to_automaton(Point::new(0.0, 0.0));
        let br = self.to_automaton(Point::new(self.width as f64, self.height as f64));

        Window {
            x0: tl.x,
            x1: br.x,
            y0: tl.y.max(0.0),
            y1: br.y,
        }
    }

    /// The transform to draw automaton-space content with
    pub fn transform(&self) -> Transform {
        Transform {
            scale: self.zoom,
            tx: self.pan.x,
            ty: self.pan.y,
        }
    }

    fn clamp_zoom(zoom: f64) -> f64 {
        // `clamp` lets NaN through
        if zoom.is_nan() {
            return MIN_ZOOM;
        }

        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }
}

#[cfg(test)]
mod test {
    use super::Point;
    use super::Viewport;
    use crate::config::MAX_ZOOM;
    use crate::config::MIN_ZOOM;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn default_view() {
        let vp = Viewport::new(300, 200);

        assert_eq!(vp.zoom(), 3.0);
        assert_eq!(vp.pan(), Point::new(150.0, 0.0));

        let win = vp.visible_window();
        assert_eq!(win.x0, -50.0);
        assert_eq!(win.x1, 50.0);
        assert_eq!(win.y0, 0.0);
        assert!(close(win.y1, 200.0 / 3.0));
    }

    #[test]
    fn pan() {
        let mut vp = Viewport::new(300, 200);
        vp.pan_by(-30.0, 12.0);

        assert_eq!(vp.pan(), Point::new(120.0, 12.0));
        assert_eq!(vp.zoom(), 3.0);
    }

    #[test]
    fn y0_is_clamped() {
        let vp = Viewport::with_state(1.0, 0.0, 50.0, 100, 100);
        let win = vp.visible_window();

        assert_eq!(win.y0, 0.0);
        assert_eq!(win.y1, 50.0);
    }

    #[test]
    fn zoom_keeps_anchor() {
        let mut vp = Viewport::new(300, 200);
        let anchor = Point::new(100.0, 50.0);
        let before = vp.to_automaton(anchor);

        vp.zoom_at(anchor, 1.5);
        let after = vp.to_automaton(anchor);

        assert_eq!(vp.zoom(), 4.5);
        assert!(close(before.x, after.x));
        assert!(close(before.y, after.y));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut vp = Viewport::new(300, 200);
        let anchor = Point::new(10.0, 10.0);

        vp.zoom_at(anchor, 1e6);
        assert_eq!(vp.zoom(), MAX_ZOOM);

        vp.zoom_at(anchor, 0.0);
        assert_eq!(vp.zoom(), MIN_ZOOM);

        vp.zoom_at(anchor, -3.0);
        assert_eq!(vp.zoom(), MIN_ZOOM);

        // The anchor still maps onto itself after clamping
        let p = vp.to_display(vp.to_automaton(anchor));
        assert!(close(p.x, anchor.x));
        assert!(close(p.y, anchor.y));
    }

    #[test]
    fn non_finite_factor_is_ignored() {
        let mut vp = Viewport::new(300, 200);
        vp.zoom_at(Point::new(1.0, 1.0), f64::NAN);
        vp.zoom_at(Point::new(1.0, 1.0), f64::INFINITY);

        assert_eq!(vp, Viewport::new(300, 200));
    }

    #[test]
    fn with_state_clamps() {
        assert_eq!(Viewport::with_state(100.0, 0.0, 0.0, 1, 1).zoom(), MAX_ZOOM);
        assert_eq!(Viewport::with_state(f64::NAN, 0.0, 0.0, 1, 1).zoom(), MIN_ZOOM);
    }

    #[test]
    fn reset() {
        let mut vp = Viewport::new(300, 200);
        vp.zoom_at(Point::new(3.0, 4.0), 2.0);
        vp.pan_by(5.0, 5.0);
        vp.resize(400, 100);
        vp.reset();

        assert_eq!(vp, Viewport::new(400, 100));
    }
}
