use thiserror::Error;

/// Errors returned when allocating an id.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    #[error("all possible ids are allocated")]
    Exhausted,
}
