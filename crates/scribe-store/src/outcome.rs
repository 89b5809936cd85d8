use std::fmt;

use serde::{Deserialize, Serialize};
use scribe_types::ObjectId;

use crate::error::StoreError;

/// Status tag of an [`Outcome`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    NotFound,
    Error,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::NotFound => write!(f, "not_found"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Result of a single `store` or `load` call.
///
/// Every call returns exactly one outcome. Callers must inspect the variant
/// before touching the payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation succeeded. `store` carries no data; `load` carries the
    /// stored object.
    Success { id: ObjectId, data: Option<T> },
    /// No object is stored under `id`.
    NotFound { id: ObjectId },
    /// The backend failed. A failed `store` carries the empty id.
    Error { id: ObjectId, message: String },
}

impl<T> Outcome<T> {
    pub fn stored(id: ObjectId) -> Self {
        Self::Success { id, data: None }
    }

    pub fn found(id: ObjectId, data: T) -> Self {
        Self::Success {
            id,
            data: Some(data),
        }
    }

    pub fn not_found(id: ObjectId) -> Self {
        Self::NotFound { id }
    }

    pub fn error(id: ObjectId, err: &StoreError) -> Self {
        Self::Error {
            id,
            message: err.to_string(),
        }
    }

    pub fn status(&self) -> OutcomeStatus {
        match self {
            Self::Success { .. } => OutcomeStatus::Success,
            Self::NotFound { .. } => OutcomeStatus::NotFound,
            Self::Error { .. } => OutcomeStatus::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn id(&self) -> &ObjectId {
        match self {
            Self::Success { id, .. } | Self::NotFound { id } | Self::Error { id, .. } => id,
        }
    }

    /// Human-readable detail for non-success outcomes.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::NotFound { .. } => Some("Object not found"),
            Self::Error { message, .. } => Some(message),
        }
    }

    /// Take the payload of a successful load.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success { data, .. } => data,
            _ => None,
        }
    }
}
