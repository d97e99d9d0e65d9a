//! Outcome of a single API call.

use crate::error::{ApiError, Error};

/// Either the decoded success body or the decoded error body of a response.
///
/// Which variant is produced depends only on whether the response status
/// matched the status the caller declared as success. A `Failure` is an
/// expected outcome; local and transport problems are reported through
/// [`Error`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum CallResult<T> {
    Success(T),
    Failure(ApiError),
}

impl<T> CallResult<T> {
    /// Returns `true` for [`CallResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, CallResult::Success(_))
    }

    /// Returns the success value, discarding a failure.
    pub fn success(self) -> Option<T> {
        match self {
            CallResult::Success(value) => Some(value),
            CallResult::Failure(_) => None,
        }
    }

    /// Returns the failure payload, discarding a success.
    pub fn failure(self) -> Option<ApiError> {
        match self {
            CallResult::Success(_) => None,
            CallResult::Failure(err) => Some(err),
        }
    }

    /// Convert into a `Result`, wrapping a failure with `wrap`.
    pub fn or_else_wrap(self, wrap: impl FnOnce(ApiError) -> Error) -> Result<T, Error> {
        match self {
            CallResult::Success(value) => Ok(value),
            CallResult::Failure(err) => Err(wrap(err)),
        }
    }

    /// Convert into a `Result`, reporting a failure as [`Error::Api`].
    pub fn into_result(self) -> Result<T, Error> {
        self.or_else_wrap(Error::Api)
    }
}
