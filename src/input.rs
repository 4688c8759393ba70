use tracing::trace;

use crate::config::WHEEL_SENSITIVITY;
use crate::viewport::Point;
use crate::viewport::Viewport;

/// Pointer input, in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release,

    /// The pointer left the display
    Leave,

    /// Wheel scroll at `at`. A negative `delta_y` scrolls away from the user and zooms in.
    Wheel { at: Point, delta_y: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,

    /// `prev` is the position of the last move event seen while dragging, if any
    Dragging { prev: Option<Point> },
}

/// Turns pointer events into pans and zooms of a [`Viewport`].
#[derive(Debug, Clone)]
pub struct PointerController {
    state: DragState,
    sensitivity: f64,
}

impl Default for PointerController {
    fn default() -> Self {
        Self::new(WHEEL_SENSITIVITY)
    }
}

impl PointerController {
    pub fn new(sensitivity: f64) -> Self {
        Self {
            state: DragState::Idle,
            sensitivity,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// The zoom multiplier for a wheel delta
    pub fn wheel_factor(&self, delta_y: f64) -> f64 {
        1.0 - delta_y * self.sensitivity
    }

    pub fn handle(&mut self, vp: &mut Viewport, event: PointerEvent) {
        trace!(?event, state = ?self.state, "Pointer event");

        match (event, self.state) {
            (PointerEvent::Press(_), _) => {
                self.state = DragState::Dragging { prev: None };
            }

            // Deltas are taken against the previous move, not against the press
            (PointerEvent::Move(p), DragState::Dragging { prev }) => {
                if let Some(prev) = prev {
                    vp.pan_by(p.x - prev.x, p.y - prev.y);
                }

                self.state = DragState::Dragging { prev: Some(p) };
            }
            (PointerEvent::Move(_), DragState::Idle) => {}

            (PointerEvent::Release | PointerEvent::Leave, _) => {
                self.state = DragState::Idle;
            }

            // Zooming does not care about dragging
            (PointerEvent::Wheel { at, delta_y }, _) => {
                vp.zoom_at(at, self.wheel_factor(delta_y));
            }
        }
    }
}
