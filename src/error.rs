use std::path::PathBuf;

use thiserror::Error;

use crate::{
    app::SettingsError,
    simulation::{SimulationError, TerrainError},
};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Terrain(#[from] TerrainError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("Json error: {0}")]
    Json(#[from] json::Error),
    #[error("Couldn't find {0}")]
    MissingKey(&'static str),
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
    #[error("Error while accessing file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write trajectory: {0}")]
    Trajectory(#[from] serde_json::Error),
    #[error("Population is empty")]
    EmptyPopulation,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
