//! Image entity contract errors.

use thiserror::Error;

use crate::domain::entities::ImageId;

/// Errors raised when an image entity is used against its contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// The entity has no resolved URLs yet.
    #[error("image {id} has no resolved urls")]
    EmptyResult { id: ImageId },
}

impl ImageError {
    /// Creates empty result error.
    #[must_use]
    pub const fn empty_result(id: ImageId) -> Self {
        Self::EmptyResult { id }
    }
}
