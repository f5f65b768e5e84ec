// lib.rs - Conway's Game of Life seeded from noise or APG codes
//
// The engine owns a dense grid of cells and advances it one generation per
// `step()`. Renderers read the grid between steps through `iter_coords()`.

pub mod apg;      // APG code decoding and placement
pub mod config;   // LifeConfig and TOML loading
pub mod error;    // Crate-level error type
pub mod grid;     // DenseGrid and Pos
pub mod life;     // CellState and LifeEngine
pub mod noise;    // Rng and Perlin noise
pub mod patterns; // Catalog of well-known apgcodes

pub use apg::{ApgCode, ApgDecoder, ApgError, ApgPattern, ApgToken};
pub use config::{ConfigError, LifeConfig};
pub use error::{ConwayError, Result};
pub use grid::{DenseGrid, GridError, Pos};
pub use life::{CellState, LifeEngine};
pub use noise::{NoiseError, Perlin, Rng};
