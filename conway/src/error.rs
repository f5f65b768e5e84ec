// error.rs - Crate-level error type

use thiserror::Error;

use crate::apg::ApgError;
use crate::config::ConfigError;
use crate::grid::GridError;
use crate::noise::NoiseError;

#[derive(Error, Debug)]
pub enum ConwayError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Apg(#[from] ApgError),

    #[error(transparent)]
    Noise(#[from] NoiseError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ConwayError>;
