pub mod app;
pub mod braille;
pub mod buffer;
pub mod config;
pub mod eca;
pub mod events;
pub mod format;
pub mod input;
pub mod io;
pub mod pattern;
pub mod render;
pub mod ruler;
pub mod source;
pub mod surface;
pub mod viewport;

pub use config::WORLD_SIZE;
