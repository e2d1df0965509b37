//! AWS collaborator error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudAwsError {
    /// A describe/identity call failed. `message` carries the SDK error text unchanged.
    #[error("AWS {service}.{operation} failed: {message}")]
    Api {
        service: &'static str,
        operation: &'static str,
        message: String,
    },

    #[error("AWS caller identity did not include an account id")]
    MissingAccountId,
}

impl CloudAwsError {
    pub(crate) fn api(
        service: &'static str,
        operation: &'static str,
        err: impl std::fmt::Display,
    ) -> Self {
        Self::Api {
            service,
            operation,
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudAwsError>;
