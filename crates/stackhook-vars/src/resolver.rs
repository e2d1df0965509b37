//! `awsext:*` variable resolver

use crate::cache::ResolverCache;
use crate::error::Result;
use crate::kind::{VarKind, VarValue, VariableReference};
use stackhook_cloud_aws::NetworkApi;
use std::sync::Arc;

/// Prefix the host uses to route references to this resolver
pub const VARIABLE_PREFIX: &str = "awsext";

/// Name of the security group every default VPC is created with
pub const DEFAULT_SECURITY_GROUP_NAME: &str = "default";

/// Resolves default-network metadata for variable substitution
///
/// Every kind is looked up at most once per instance; see [`ResolverCache`].
pub struct ExtendedVars {
    prefix: String,
    network: Arc<dyn NetworkApi>,
    cache: ResolverCache,
}

impl ExtendedVars {
    pub fn new(network: Arc<dyn NetworkApi>) -> Self {
        Self::with_prefix(network, VARIABLE_PREFIX)
    }

    pub fn with_prefix(network: Arc<dyn NetworkApi>, prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            network,
            cache: ResolverCache::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn cache(&self) -> &ResolverCache {
        &self.cache
    }

    /// Resolve a `<prefix>:<kind>` reference.
    ///
    /// Unknown kinds resolve to `None` without touching the network.
    pub async fn resolve(&self, reference: &str) -> Result<Option<VarValue>> {
        let reference = VariableReference::parse(&self.prefix, reference);
        match reference.kind() {
            Some(kind) => self.resolve_kind(kind).await,
            None => {
                tracing::debug!("Unknown variable kind: {}", reference.name());
                Ok(None)
            }
        }
    }

    pub async fn resolve_kind(&self, kind: VarKind) -> Result<Option<VarValue>> {
        let this = self;
        match kind {
            VarKind::DefaultVpcId => self.cached_default_vpc().await,
            VarKind::DefaultSubnetIds => {
                self.cache
                    .perform_cached(kind, move || async move {
                        Ok(Some(VarValue::List(this.lookup_default_subnets().await?)))
                    })
                    .await
            }
            VarKind::DefaultSecurityGroupId => {
                self.cache
                    .perform_cached(kind, move || async move {
                        Ok(this
                            .lookup_default_security_group()
                            .await?
                            .map(VarValue::Text))
                    })
                    .await
            }
        }
    }

    /// First VPC flagged as default, straight from the network API
    pub async fn lookup_default_vpc(&self) -> Result<Option<String>> {
        let vpc_id = self.network.default_vpc_ids().await?.into_iter().next();
        match &vpc_id {
            Some(id) => tracing::debug!("Default vpc: {}", id),
            None => tracing::debug!("No default vpc in this region"),
        }
        Ok(vpc_id)
    }

    async fn cached_default_vpc(&self) -> Result<Option<VarValue>> {
        let this = self;
        self.cache
            .perform_cached(VarKind::DefaultVpcId, move || async move {
                Ok(this.lookup_default_vpc().await?.map(VarValue::Text))
            })
            .await
    }

    /// Default VPC id through the cache, shared by the dependent lookups
    async fn default_vpc_id(&self) -> Result<Option<String>> {
        match self.cached_default_vpc().await? {
            Some(VarValue::Text(id)) => Ok(Some(id)),
            _ => Ok(None),
        }
    }

    /// Every subnet of the default VPC, following continuation tokens.
    ///
    /// Empty when there is no default VPC.
    pub async fn lookup_default_subnets(&self) -> Result<Vec<String>> {
        let Some(vpc_id) = self.default_vpc_id().await? else {
            return Ok(Vec::new());
        };

        let mut subnets = Vec::new();
        let mut next_token = None;
        loop {
            let page = self.network.subnets_page(&vpc_id, next_token).await?;
            subnets.extend(page.subnet_ids);
            next_token = page.next_token.filter(|token| !token.is_empty());
            if next_token.is_none() {
                break;
            }
        }

        tracing::debug!("Default subnets: {}", subnets.join(", "));
        Ok(subnets)
    }

    /// The `default` security group of the default VPC.
    ///
    /// `None` when there is no default VPC; no group lookup is made then.
    pub async fn lookup_default_security_group(&self) -> Result<Option<String>> {
        let Some(vpc_id) = self.default_vpc_id().await? else {
            return Ok(None);
        };

        let group_id = self
            .network
            .security_group_ids(&vpc_id, DEFAULT_SECURITY_GROUP_NAME)
            .await?
            .into_iter()
            .next();

        if let Some(id) = &group_id {
            tracing::debug!("Default security group: {}", id);
        }
        Ok(group_id)
    }
}
