use std::io;
use std::time::Duration;
use std::time::Instant;

use tracing::debug;
use tracing::info;

use crate::braille::BrailleCanvas;
use crate::braille::pixel_size;
use crate::events::AppEvent;
use crate::input::PointerController;
use crate::render::CancelHandle;
use crate::render::Cycle;
use crate::render::RenderLoop;
use crate::render::Scene;
use crate::surface::Surface;
use crate::viewport::Point;
use crate::viewport::Viewport;

/// A frame ready to be put on the terminal
pub struct Frame<'a> {
    pub image: &'a str,
    pub label: String,
}

/// The spacetime viewer on a `cols x rows` terminal, minus the terminal itself.
pub struct App {
    scene: Scene,
    pointer: PointerController,
    render_loop: RenderLoop,
    surface: Surface,
    canvas: BrailleCanvas,
}

impl App {
    pub fn new(cols: u16, rows: u16, sensitivity: f64, cadence: Duration, now: Instant) -> Self {
        let (w, h) = pixel_size(cols, rows);

        Self {
            scene: Scene::new(Viewport::new(w, h)),
            pointer: PointerController::new(sensitivity),
            render_loop: RenderLoop::new(cadence, now),
            surface: Surface::new(w as usize, h as usize),
            canvas: BrailleCanvas::new(w as usize, h as usize),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn viewport(&self) -> &Viewport {
        &self.scene.viewport
    }

    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.render_loop.cancel_handle()
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.render_loop.time_until_due(now)
    }

    pub fn handle(&mut self, event: AppEvent) {
        let vp = &mut self.scene.viewport;

        match event {
            AppEvent::Pointer(event) => self.pointer.handle(vp, event),
            AppEvent::Pan { dx, dy } => vp.pan_by(dx, dy),
            AppEvent::Zoom { factor } => {
                let center = Point::new(vp.width() as f64 / 2.0, vp.height() as f64 / 2.0);
                vp.zoom_at(center, factor);
            }
            AppEvent::ResetView => vp.reset(),
            AppEvent::Resize { cols, rows } => {
                let (w, h) = pixel_size(cols, rows);
                debug!(cols, rows, w, h, "Resized");

                vp.resize(w, h);
                self.surface.resize(w as usize, h as usize);
                self.canvas = BrailleCanvas::new(w as usize, h as usize);
            }
            AppEvent::Exit => {
                info!("Exit requested");
                self.render_loop.cancel_handle().cancel();
            }
        }
    }

    /// Run a render cycle. Returns the frame to show, if anything was drawn.
    pub fn tick(&mut self, now: Instant) -> Option<Frame<'_>> {
        let Cycle::Drew(ruler) = self
            .render_loop
            .run_cycle(now, &self.scene, &mut self.surface)?
        else {
            return None;
        };

        Some(Frame {
            image: self.canvas.render(self.surface.raster()),
            label: ruler.label(),
        })
    }

    /// One turn of the event loop. `poll` waits for input, at most until the next cycle is due.
    /// Whatever it returns is handled, then the cycle runs if it is due by now, even if input
    /// arrived, and `show` gets the frame.
    ///
    /// Returns `false` once the viewer has stopped.
    pub fn turn<P, S>(&mut self, mut poll: P, mut show: S) -> io::Result<bool>
    where
        P: FnMut(Duration) -> io::Result<Option<AppEvent>>,
        S: FnMut(Frame<'_>) -> io::Result<()>,
    {
        let Some(timeout) = self.time_until_due(Instant::now()) else {
            return Ok(false);
        };

        if let Some(event) = poll(timeout)? {
            self.handle(event);
        }

        if self.render_loop.is_due(Instant::now()) {
            if let Some(frame) = self.tick(Instant::now()) {
                show(frame)?;
            }
        }

        Ok(!self.render_loop.is_cancelled())
    }
}
