use crate::input::PointerEvent;

pub enum AppEvent {
    /// Mouse input, in display pixels
    Pointer(PointerEvent),

    /// Shift the view by a delta in display pixels
    Pan { dx: f64, dy: f64 },

    /// Zoom around the centre of the display
    Zoom { factor: f64 },

    /// Back to the default view
    ResetView,

    /// The terminal was resized to `cols x rows` cells
    Resize { cols: u16, rows: u16 },

    /// Exit the application
    Exit,
}
