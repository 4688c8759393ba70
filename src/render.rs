use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::trace;

use crate::buffer::OffscreenBuffer;
use crate::config::SMOOTHING_ZOOM;
use crate::ruler::Ruler;
use crate::source::StateSource;
use crate::surface::Color;
use crate::surface::Sampling;
use crate::surface::Surface;
use crate::viewport::Viewport;

/// Everything a render cycle reads: the viewport, the offscreen picture of the automaton, and the
/// source that picture was taken from.
pub struct Scene {
    pub viewport: Viewport,
    buffer: OffscreenBuffer,
    source: Option<Box<dyn StateSource>>,
}

impl Scene {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            buffer: OffscreenBuffer::new(),
            source: None,
        }
    }

    /// Attach a new source and redraw the offscreen buffer from it.
    pub fn attach(&mut self, source: Box<dyn StateSource>) {
        self.buffer.fill(source.as_ref());
        self.source = Some(source);

        info!("Attached state source");
    }

    pub fn detach(&mut self) -> Option<Box<dyn StateSource>> {
        self.source.take()
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Redraw the offscreen buffer from the attached source, if any.
    pub fn refresh(&mut self) {
        if let Some(source) = &self.source {
            self.buffer.fill(source.as_ref());
        }
    }

    pub fn buffer(&self) -> &OffscreenBuffer {
        &self.buffer
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    WaitingForState,
    Rendering,
}

/// What a single cycle did
#[derive(Debug, Clone, PartialEq)]
pub enum Cycle {
    /// No source yet, nothing was drawn
    Waiting,

    /// The surface was redrawn, with this ruler on top
    Drew(Ruler),
}

/// Stops a [`RenderLoop`]. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// A fixed-delay redraw task.
///
/// The loop does not own a thread or a timer. Whoever drives it waits for
/// [`RenderLoop::time_until_due`], handling input meanwhile, and then calls
/// [`RenderLoop::run_cycle`], which re-arms the loop one cadence after the cycle completes.
#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    cadence: Duration,
    due: Instant,
    cancel: CancelHandle,
}

impl RenderLoop {
    /// A loop whose first cycle is due at `now`
    pub fn new(cadence: Duration, now: Instant) -> Self {
        Self {
            state: LoopState::WaitingForState,
            cadence,
            due: now,
            cancel: CancelHandle::default(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// How long until the next cycle. `None` once cancelled.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        if self.is_cancelled() {
            return None;
        }

        Some(self.due.saturating_duration_since(now))
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.time_until_due(now) == Some(Duration::ZERO)
    }

    /// When the next cycle is due
    pub fn due(&self) -> Instant {
        self.due
    }

    /// Run one cycle, whether or not it is due, and schedule the next one a full cadence after
    /// the cycle is done, so a slow draw never shortens the gap. Does nothing once cancelled.
    pub fn run_cycle(
        &mut self,
        now: Instant,
        scene: &Scene,
        surface: &mut Surface,
    ) -> Option<Cycle> {
        if self.is_cancelled() {
            return None;
        }

        if !scene.has_source() {
            if self.state != LoopState::WaitingForState {
                debug!("Source detached, waiting");
            }

            self.state = LoopState::WaitingForState;
            trace!("No state source yet");

            self.rearm(now);
            return Some(Cycle::Waiting);
        }

        if self.state == LoopState::WaitingForState {
            debug!("State source available, rendering");
        }

        self.state = LoopState::Rendering;

        let ruler = draw(scene, surface);
        trace!(label = %ruler.label(), "Drew frame");

        self.rearm(now);
        Some(Cycle::Drew(ruler))
    }

    /// `now` is when the cycle started. Callers may pass a stale one.
    fn rearm(&mut self, now: Instant) {
        self.due = now.max(Instant::now()) + self.cadence;
    }
}

/// Composite the automaton through the viewport, then the ruler on top.
pub fn draw(scene: &Scene, surface: &mut Surface) -> Ruler {
    let vp = &scene.viewport;

    surface.clear(Color::WHITE);

    let t = vp.transform();
    surface.save();
    surface.translate(t.tx, t.ty);
    surface.scale(t.scale);

    let sampling = if vp.zoom() < SMOOTHING_ZOOM {
        Sampling::Bilinear
    } else {
        Sampling::Nearest
    };
    surface.draw_raster(scene.buffer().as_raster(), sampling);
    surface.restore();

    let ruler = Ruler::new(vp.zoom(), &vp.visible_window());
    ruler.draw(surface);

    ruler
}
