use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::eca::Probability;
use crate::pattern::BitPattern;

/// Side length of the square automaton window, in cells.
pub const WORLD_SIZE: usize = 1024;

/// Zoom factor bounds. Any zoom outside of these is clamped.
pub const MIN_ZOOM: f64 = 1e-12;
pub const MAX_ZOOM: f64 = 10.0;

/// Display pixels per cell when the view is created.
pub const DEFAULT_ZOOM: f64 = 3.0;

/// Delay between two render cycles
pub const RENDER_CADENCE: Duration = Duration::from_millis(100);

/// Zoom change per unit of wheel delta
pub const WHEEL_SENSITIVITY: f64 = 0.1;

/// Below this zoom the offscreen buffer is sampled bilinearly, above it cells are drawn as crisp
/// blocks.
pub const SMOOTHING_ZOOM: f64 = 4.0;

/// Display pixels moved per `hjkl` key press
pub const KEY_PAN_STEP: f64 = 10.0;

/// Zoom multiplier per `+`/`-` key press
pub const KEY_ZOOM_FACTOR: f64 = 1.25;

/// Pan and zoom a spacetime diagram of an elementary cellular automaton.
#[derive(Parser, Debug, Clone)]
#[command(name = "ecaview")]
pub struct Config {
    /// Wolfram rule number
    #[arg(long, default_value_t = 110)]
    pub rule: u8,

    /// Probability of flipping each evolved cell, in [0, 1]
    #[arg(long, default_value = "1e-3")]
    pub prob: Probability,

    /// Seed for the noise generator
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Pattern placed at the middle of the first generation
    #[arg(long, default_value = "1")]
    pub center: BitPattern,

    /// Background pattern repeated left of the centre pattern
    #[arg(long, default_value = "0")]
    pub left: BitPattern,

    /// Background pattern repeated right of the centre pattern
    #[arg(long, default_value = "0")]
    pub right: BitPattern,

    /// Milliseconds between redraws
    #[arg(long, default_value_t = RENDER_CADENCE.as_millis() as u64)]
    pub cadence_ms: u64,

    /// Zoom change per unit of wheel delta
    #[arg(long, default_value_t = WHEEL_SENSITIVITY)]
    pub sensitivity: f64,

    /// Write logs to this file. Logs are discarded otherwise, as the terminal is in use.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.cadence_ms)
    }
}
