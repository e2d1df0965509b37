//! Cached `awsext:*` variable resolution
//!
//! Resolves default-network metadata for configuration variables:
//!
//! | reference | value |
//! |---|---|
//! | `awsext:defaultVpcId` | id of the region's default VPC |
//! | `awsext:defaultSubnetIds` | every subnet of that VPC |
//! | `awsext:defaultSecurityGroupId` | its `default` security group |
//!
//! Each kind is looked up at most once per [`ExtendedVars`] instance.
//!
//! # Example
//!
//! ```ignore
//! use stackhook_cloud_aws::AwsContext;
//! use stackhook_vars::ExtendedVars;
//!
//! let aws = AwsContext::load(None).await;
//! let vars = ExtendedVars::new(aws.network());
//! let subnets = vars.resolve("awsext:defaultSubnetIds").await?;
//! ```

pub mod cache;
pub mod error;
pub mod interpolate;
pub mod kind;
pub mod resolver;

pub use cache::ResolverCache;
pub use error::{Result, VarsError};
pub use interpolate::{interpolate_str, interpolate_value};
pub use kind::{VarKind, VarValue, VariableReference};
pub use resolver::{DEFAULT_SECURITY_GROUP_NAME, ExtendedVars, VARIABLE_PREFIX};
