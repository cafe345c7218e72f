use thiserror::Error;

use crate::CellId;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("Cell {0} is not hot")]
    InvalidState(CellId),
    #[error("Best score storage is unavailable")]
    PersistenceUnavailable,
}

pub type Result<T> = core::result::Result<T, GameError>;
