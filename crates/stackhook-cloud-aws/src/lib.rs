//! AWS collaborators for stackhook
//!
//! This crate hides the AWS SDK behind two small traits so the variable
//! resolver and the image publisher can be exercised without network access.
//!
//! - [`NetworkApi`]: read-only VPC / subnet / security group lookups (EC2)
//! - [`IdentityApi`]: the caller's account id (STS)
//!
//! # Example
//!
//! ```ignore
//! use stackhook_cloud_aws::{AwsContext, NetworkApi};
//!
//! let aws = AwsContext::load(Some("eu-west-1")).await;
//! let network = aws.network();
//! let vpcs = network.default_vpc_ids().await?;
//! ```

pub mod error;
pub mod identity;
pub mod network;

pub use error::{CloudAwsError, Result};
pub use identity::{IdentityApi, StsIdentity};
pub use network::{Ec2Network, NetworkApi, SubnetPage};

use std::sync::Arc;

/// Shared SDK configuration for every AWS client stackhook creates
#[derive(Clone, Debug)]
pub struct AwsContext {
    config: aws_config::SdkConfig,
}

impl AwsContext {
    /// Load credentials and settings from the standard AWS provider chain.
    ///
    /// `region` overrides whatever the chain resolves.
    pub async fn load(region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region.to_string()));
        }
        let config = loader.load().await;
        tracing::debug!("AWS region: {:?}", config.region());
        Self { config }
    }

    /// Region the clients will talk to, if one could be resolved
    pub fn region(&self) -> Option<String> {
        self.config.region().map(|r| r.to_string())
    }

    pub fn network(&self) -> Arc<dyn NetworkApi> {
        Arc::new(Ec2Network::new(aws_sdk_ec2::Client::new(&self.config)))
    }

    pub fn identity(&self) -> Arc<dyn IdentityApi> {
        Arc::new(StsIdentity::new(aws_sdk_sts::Client::new(&self.config)))
    }
}
