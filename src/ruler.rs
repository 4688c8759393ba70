use crate::format::to_si;
use crate::surface::Color;
use crate::surface::Surface;
use crate::viewport::Window;

/// Ink of the calibration bar
pub const RULER_INK: Color = Color::rgb(0x02, 0x0F, 0x80);

/// Translucent backdrop behind the bar
pub const RULER_BACKDROP: Color = Color::rgba(255, 255, 255, 204);

/// Width and height of the backdrop, in display pixels
pub const RULER_WIDTH: f64 = 100.0;
pub const RULER_HEIGHT: f64 = 4.0;

/// Bar thickness. The bar sits at the bottom of the backdrop.
const BAR_THICKNESS: f64 = 2.0;

/// Scale bar and visible range readout.
///
/// The bar length cycles through one decade: it is `10 * zoom / 10^exponent` pixels long, with
/// `exponent = floor(log10(zoom))`, and spans `10 * 10^-exponent` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Ruler {
    pub exponent: i32,
    pub fraction: f64,
    pub scale: String,
    pub x_range: String,
    pub y_range: String,
}

impl Ruler {
    pub fn new(zoom: f64, win: &Window) -> Self {
        let exponent = zoom.log10().floor() as i32;
        let fraction = zoom / 10f64.powi(exponent);

        Self {
            exponent,
            fraction,
            scale: to_si(10.0 * 10f64.powi(-exponent), 1),
            x_range: format!("x:[{},{}]", to_si(win.x0, 4), to_si(win.x1, 4)),
            y_range: format!("y:[{},{}]", to_si(win.y0, 4), to_si(win.y1, 4)),
        }
    }

    /// Length of the bar in display pixels, in `[10, 100)`
    pub fn bar_length(&self) -> f64 {
        self.fraction * 10.0
    }

    pub fn label(&self) -> String {
        format!("{}   {} {}", self.scale, self.x_range, self.y_range)
    }

    /// Draw the backdrop and bar in the bottom left corner of `surface`.
    pub fn draw(&self, surface: &mut Surface) {
        surface.save();
        surface.translate(0.0, surface.height() as f64 - RULER_HEIGHT);

        surface.fill_rect(0.0, 0.0, RULER_WIDTH, RULER_HEIGHT, RULER_BACKDROP);
        surface.fill_rect(
            0.0,
            RULER_HEIGHT - BAR_THICKNESS,
            self.bar_length(),
            BAR_THICKNESS,
            RULER_INK,
        );

        surface.restore();
    }
}
