use crate::WORLD_SIZE;

/// Anything that can tell whether cell `x` of generation `t` is alive, for `x` and `t` in
/// `0..WORLD_SIZE`.
///
/// The viewer only ever reads from a source.
pub trait StateSource {
    fn cell(&self, x: usize, t: usize) -> bool;
}

/// An owned `WORLD_SIZE x WORLD_SIZE` grid of cells, row `t` after row `t`.
#[derive(Clone)]
pub struct Snapshot {
    cells: Vec<bool>,
}

impl Snapshot {
    /// A snapshot with every cell dead
    pub fn dead() -> Self {
        Self {
            cells: vec![false; WORLD_SIZE * WORLD_SIZE],
        }
    }

    /// Build a snapshot by querying `f(x, t)` for every cell.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut cells = Vec::with_capacity(WORLD_SIZE * WORLD_SIZE);

        for t in 0..WORLD_SIZE {
            for x in 0..WORLD_SIZE {
                cells.push(f(x, t));
            }
        }

        Self { cells }
    }

    pub fn set(&mut self, x: usize, t: usize, alive: bool) {
        self.cells[t * WORLD_SIZE + x] = alive;
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

impl StateSource for Snapshot {
    fn cell(&self, x: usize, t: usize) -> bool {
        self.cells[t * WORLD_SIZE + x]
    }
}
