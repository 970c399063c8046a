use swatch_tokens::BoundaryError;
use thiserror::Error;

/// Errors raised while processing a `(group, mode)` cell.
///
/// None of these abort a run: the orchestrator records them per cell and
/// moves on to the next one.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required input (group id, brand color, theme slot) is absent.
    #[error("missing data: {0}")]
    MissingData(String),

    /// A group name that matches no known group.
    #[error("unknown group: {0}")]
    UnknownGroup(String),

    #[error(transparent)]
    Boundary(#[from] BoundaryError),
}
