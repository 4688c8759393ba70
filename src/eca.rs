use std::str::FromStr;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::debug;

use crate::WORLD_SIZE;
use crate::pattern::BitPattern;
use crate::source::Snapshot;

/// A probability, guaranteed to lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Probability(f64);

#[derive(Debug, Error, PartialEq)]
pub enum ProbabilityError {
    #[error("Expected a number, found \"{got}\"")]
    NotANumber { got: String },

    #[error("Probability must lie in [0, 1], found {got}")]
    OutOfRange { got: f64 },
}

impl Probability {
    pub fn new(p: f64) -> Result<Self, ProbabilityError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(ProbabilityError::OutOfRange { got: p });
        }

        Ok(Self(p))
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

impl FromStr for Probability {
    type Err = ProbabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Ok(p) = s.trim().parse::<f64>() else {
            return Err(ProbabilityError::NotANumber { got: s.to_string() });
        };

        Self::new(p)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EcaError {
    #[error("The {side} background pattern is empty")]
    EmptyBackground { side: &'static str },
}

/// An elementary cellular automaton started from a centre pattern on a periodic background.
///
/// Generation 0 looks like
/// ```notrust
/// ... left left left | center | right right right ...
/// ```
/// with `center` placed at the middle of the window. Every later generation is flipped cell by
/// cell with probability `noise`.
///
/// See: https://mathworld.wolfram.com/ElementaryCellularAutomaton.html
#[derive(Debug, Clone)]
pub struct Eca {
    rule: u8,
    center: BitPattern,
    left: BitPattern,
    right: BitPattern,
    noise: Probability,
    seed: u64,
}

impl Eca {
    pub fn new(
        rule: u8,
        center: BitPattern,
        left: BitPattern,
        right: BitPattern,
    ) -> Result<Self, EcaError> {
        if left.is_empty() {
            return Err(EcaError::EmptyBackground { side: "left" });
        }

        if right.is_empty() {
            return Err(EcaError::EmptyBackground { side: "right" });
        }

        Ok(Self {
            rule,
            center,
            left,
            right,
            noise: Probability::default(),
            seed: 0,
        })
    }

    pub fn with_noise(mut self, noise: Probability, seed: u64) -> Self {
        self.noise = noise;
        self.seed = seed;
        self
    }

    pub fn rule(&self) -> u8 {
        self.rule
    }

    /// Apply the rule to a single neighbourhood
    pub fn next_cell(rule: u8, l: bool, c: bool, r: bool) -> bool {
        let nbhd = (l as u8) << 2 | (c as u8) << 1 | r as u8;
        (rule >> nbhd) & 1 == 1
    }

    /// Cell `x` of generation 0, in window coordinates. `x` may lie outside of the window.
    fn initial_cell(&self, x: i64) -> bool {
        let len = self.center.len() as i64;
        let start = WORLD_SIZE as i64 / 2 - len / 2;
        let end = start + len;

        if x < start {
            self.left.periodic(x - start)
        } else if x >= end {
            self.right.periodic(x - end)
        } else {
            self.center.bits()[(x - start) as usize]
        }
    }

    /// Evolve `WORLD_SIZE` generations of the automaton.
    ///
    /// Changes travel at most one cell per generation, so the strip is widened by `WORLD_SIZE` on
    /// each side of the window: whatever happens at the strip's edges never reaches the window.
    pub fn evolve(&self) -> Snapshot {
        let margin = WORLD_SIZE;
        let width = WORLD_SIZE + 2 * margin;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let p = self.noise.get();

        let mut row: Vec<bool> = (0..width)
            .map(|i| self.initial_cell(i as i64 - margin as i64))
            .collect();
        let mut next = vec![false; width];

        let mut snap = Snapshot::dead();

        for t in 0..WORLD_SIZE {
            for x in 0..WORLD_SIZE {
                snap.set(x, t, row[margin + x]);
            }

            for i in 0..width {
                let l = i > 0 && row[i - 1];
                let r = i + 1 < width && row[i + 1];

                let mut cell = Self::next_cell(self.rule, l, row[i], r);

                if p > 0.0 && rng.random_bool(p) {
                    cell = !cell;
                }

                next[i] = cell;
            }

            std::mem::swap(&mut row, &mut next);
        }

        debug!(
            rule = self.rule,
            noise = p,
            population = snap.population(),
            "Evolved automaton"
        );

        snap
    }
}
