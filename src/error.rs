use thiserror::Error;

use crate::registry::ObjectHandle;

/// Errors surfaced by the editor core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("{0} is not registered")]
    UnknownObject(ObjectHandle),
    #[error("scene state is inconsistent: {0}")]
    Inconsistent(String),
}

pub type EditorResult<T> = std::result::Result<T, EditorError>;
