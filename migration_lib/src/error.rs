use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("a route needs at least two waypoints, got {0}")]
    EmptyRoute(usize),
    #[error("route has zero length, all waypoints coincide")]
    DegenerateRoute,
    #[error("number of frames must be positive")]
    ZeroFrames,
    #[error("flock must contain at least one bird")]
    NoBirds,
    #[error("invalid option: {0}")]
    InvalidOption(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MigrationError>;
