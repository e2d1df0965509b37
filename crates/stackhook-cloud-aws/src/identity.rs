//! Caller identity (STS)

use crate::error::{CloudAwsError, Result};
use async_trait::async_trait;
use aws_sdk_sts::error::DisplayErrorContext;

/// Identity API used to derive the registry host
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// The 12-digit account id of the current credentials
    async fn account_id(&self) -> Result<String>;
}

/// [`IdentityApi`] backed by `sts:GetCallerIdentity`
pub struct StsIdentity {
    client: aws_sdk_sts::Client,
}

impl StsIdentity {
    pub fn new(client: aws_sdk_sts::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityApi for StsIdentity {
    async fn account_id(&self) -> Result<String> {
        let output = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| CloudAwsError::api("STS", "GetCallerIdentity", DisplayErrorContext(e)))?;

        output
            .account()
            .map(str::to_string)
            .ok_or(CloudAwsError::MissingAccountId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_message() {
        let io = std::io::Error::other("ExpiredToken: the security token has expired");
        let err = CloudAwsError::api("STS", "GetCallerIdentity", io);
        assert_eq!(
            err.to_string(),
            "AWS STS.GetCallerIdentity failed: ExpiredToken: the security token has expired"
        );
    }
}
