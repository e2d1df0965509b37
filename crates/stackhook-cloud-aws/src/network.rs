//! Network metadata lookups (EC2 describe calls)

use crate::error::{CloudAwsError, Result};
use async_trait::async_trait;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::Filter;
use serde::{Deserialize, Serialize};

/// One page of a subnet listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetPage {
    pub subnet_ids: Vec<String>,
    /// Continuation token; `None` when the listing is exhausted
    pub next_token: Option<String>,
}

/// Read-only network description API
///
/// Each method maps to exactly one provider request so callers can count
/// and cache them.
#[async_trait]
pub trait NetworkApi: Send + Sync {
    /// Ids of VPCs flagged `isDefault=true`, in response order
    async fn default_vpc_ids(&self) -> Result<Vec<String>>;

    /// One page of subnets inside `vpc_id`
    async fn subnets_page(&self, vpc_id: &str, next_token: Option<String>) -> Result<SubnetPage>;

    /// Ids of security groups named `group_name` inside `vpc_id`
    async fn security_group_ids(&self, vpc_id: &str, group_name: &str) -> Result<Vec<String>>;
}

/// [`NetworkApi`] backed by `aws-sdk-ec2`
pub struct Ec2Network {
    client: aws_sdk_ec2::Client,
}

impl Ec2Network {
    pub fn new(client: aws_sdk_ec2::Client) -> Self {
        Self { client }
    }
}

fn filter(name: &str, value: &str) -> Filter {
    Filter::builder().name(name).values(value).build()
}

#[async_trait]
impl NetworkApi for Ec2Network {
    async fn default_vpc_ids(&self) -> Result<Vec<String>> {
        tracing::debug!("EC2 DescribeVpcs isDefault=true");
        let output = self
            .client
            .describe_vpcs()
            .filters(filter("isDefault", "true"))
            .send()
            .await
            .map_err(|e| CloudAwsError::api("EC2", "DescribeVpcs", DisplayErrorContext(e)))?;

        Ok(output
            .vpcs()
            .iter()
            .filter_map(|vpc| vpc.vpc_id().map(str::to_string))
            .collect())
    }

    async fn subnets_page(&self, vpc_id: &str, next_token: Option<String>) -> Result<SubnetPage> {
        tracing::debug!("EC2 DescribeSubnets vpc-id={} token={:?}", vpc_id, next_token);
        let output = self
            .client
            .describe_subnets()
            .filters(filter("vpc-id", vpc_id))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| CloudAwsError::api("EC2", "DescribeSubnets", DisplayErrorContext(e)))?;

        Ok(SubnetPage {
            subnet_ids: output
                .subnets()
                .iter()
                .filter_map(|subnet| subnet.subnet_id().map(str::to_string))
                .collect(),
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn security_group_ids(&self, vpc_id: &str, group_name: &str) -> Result<Vec<String>> {
        tracing::debug!(
            "EC2 DescribeSecurityGroups vpc-id={} group-name={}",
            vpc_id,
            group_name
        );
        let output = self
            .client
            .describe_security_groups()
            .filters(filter("vpc-id", vpc_id))
            .filters(filter("group-name", group_name))
            .send()
            .await
            .map_err(|e| {
                CloudAwsError::api("EC2", "DescribeSecurityGroups", DisplayErrorContext(e))
            })?;

        Ok(output
            .security_groups()
            .iter()
            .filter_map(|group| group.group_id().map(str::to_string))
            .collect())
    }
}
