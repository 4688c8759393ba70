use tracing::debug;

use crate::WORLD_SIZE;
use crate::source::StateSource;
use crate::surface::Color;
use crate::surface::Raster;

/// Color of a live cell
pub const LIVE: Color = Color::rgb(80, 80, 80);

/// Color of a dead cell
pub const DEAD: Color = Color::rgb(255, 255, 255);

/// A `WORLD_SIZE x WORLD_SIZE` picture of the automaton, one pixel per cell.
///
/// The buffer knows nothing about panning or zooming. It is drawn through the viewport's transform
/// when composited.
pub struct OffscreenBuffer {
    raster: Raster,
}

impl Default for OffscreenBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OffscreenBuffer {
    /// An empty buffer, all dead
    pub fn new() -> Self {
        Self {
            raster: Raster::new(WORLD_SIZE, WORLD_SIZE, DEAD),
        }
    }

    /// Redraw every cell from `source`. Nothing from a previous fill survives.
    pub fn fill(&mut self, source: &dyn StateSource) {
        let mut live = 0;

        for t in 0..WORLD_SIZE {
            for x in 0..WORLD_SIZE {
                let alive = source.cell(x, t);
                live += alive as usize;

                self.raster.set_pixel(x, t, if alive { LIVE } else { DEAD });
            }
        }

        debug!(live, "Filled offscreen buffer");
    }

    pub fn as_raster(&self) -> &Raster {
        &self.raster
    }
}

#[cfg(test)]
mod test {
    use super::DEAD;
    use super::LIVE;
    use super::OffscreenBuffer;
    use crate::WORLD_SIZE;
    use crate::source::Snapshot;
    use crate::source::StateSource;

    #[test]
    fn new_is_dead() {
        let buf = OffscreenBuffer::new();

        assert_eq!(buf.as_raster().width(), WORLD_SIZE);
        assert_eq!(buf.as_raster().height(), WORLD_SIZE);
        assert!(buf.as_raster().pixels().iter().all(|&c| c == DEAD));
    }

    #[test]
    fn fill_matches_source() {
        let snap = Snapshot::from_fn(|x, t| (x * 7 + t * 3) % 5 == 0);

        let mut buf = OffscreenBuffer::new();
        buf.fill(&snap);

        for t in 0..WORLD_SIZE {
            for x in 0..WORLD_SIZE {
                let want = if snap.cell(x, t) { LIVE } else { DEAD };
                assert_eq!(buf.as_raster().pixel(x, t), want);
            }
        }
    }

    #[test]
    fn fill_leaves_nothing_stale() {
        let mut buf = OffscreenBuffer::new();
        buf.fill(&Snapshot::from_fn(|_, _| true));
        buf.fill(&Snapshot::from_fn(|x, _| x == 0));

        let raster = buf.as_raster();
        for t in 0..WORLD_SIZE {
            assert_eq!(raster.pixel(0, t), LIVE);
            for x in 1..WORLD_SIZE {
                assert_eq!(raster.pixel(x, t), DEAD);
            }
        }
    }

    #[test]
    fn pixels_are_opaque() {
        let mut buf = OffscreenBuffer::new();
        buf.fill(&Snapshot::from_fn(|x, t| x == t));

        assert!(buf.as_raster().pixels().iter().all(|c| c.a == 255));
    }
}
