//! Variable resolution errors

use stackhook_cloud_aws::CloudAwsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VarsError {
    /// Collaborator failures pass through with their original message.
    #[error(transparent)]
    Cloud(#[from] CloudAwsError),
}

pub type Result<T> = std::result::Result<T, VarsError>;
