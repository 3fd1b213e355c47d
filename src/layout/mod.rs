/// Three-row grid and image fitting.
pub mod grid;
