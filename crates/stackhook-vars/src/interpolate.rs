//! `${awsext:<kind>}` substitution inside configuration values
//!
//! References are collected first, resolved through the cache, then replaced.
//! A string that is exactly one reference takes the typed value (string,
//! array or null); embedded references are rendered as text. References with
//! a different prefix are left untouched for other resolvers.

use crate::error::Result;
use crate::kind::VarValue;
use crate::resolver::ExtendedVars;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{\s*([A-Za-z0-9_-]+):([^}\s]+)\s*\}").expect("valid reference pattern")
});

type Resolved = HashMap<String, Option<VarValue>>;

/// Replace every reference owned by `vars` inside `value`
pub async fn interpolate_value(vars: &ExtendedVars, value: Value) -> Result<Value> {
    let mut names = Vec::new();
    collect_names(vars.prefix(), &value, &mut names);

    let mut resolved = Resolved::new();
    for name in names {
        if resolved.contains_key(&name) {
            continue;
        }
        let reference = format!("{}:{}", vars.prefix(), name);
        let result = vars.resolve(&reference).await?;
        resolved.insert(name, result);
    }

    Ok(replace_value(vars.prefix(), value, &resolved))
}

/// String form of [`interpolate_value`]; typed values are rendered as text
pub async fn interpolate_str(vars: &ExtendedVars, text: &str) -> Result<String> {
    match interpolate_value(vars, Value::String(text.to_string())).await? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Array(items) => Ok(items
            .iter()
            .map(|item| item.as_str().map(str::to_string).unwrap_or_else(|| item.to_string()))
            .collect::<Vec<_>>()
            .join(",")),
        other => Ok(other.to_string()),
    }
}

fn collect_names(prefix: &str, value: &Value, names: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            for caps in REFERENCE_PATTERN.captures_iter(s) {
                if &caps[1] == prefix {
                    names.push(caps[2].to_string());
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|v| collect_names(prefix, v, names)),
        Value::Object(map) => map.values().for_each(|v| collect_names(prefix, v, names)),
        _ => {}
    }
}

fn replace_value(prefix: &str, value: Value, resolved: &Resolved) -> Value {
    match value {
        Value::String(s) => replace_string(prefix, s, resolved),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| replace_value(prefix, v, resolved))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, replace_value(prefix, v, resolved)))
                .collect(),
        ),
        other => other,
    }
}

fn replace_string(prefix: &str, s: String, resolved: &Resolved) -> Value {
    // a lone reference keeps its type
    if let Some(caps) = REFERENCE_PATTERN.captures(&s)
        && caps.get(0).map(|m| m.as_str().len()) == Some(s.len())
        && &caps[1] == prefix
    {
        return match resolved.get(&caps[2]).cloned().flatten() {
            Some(value) => value.to_json(),
            None => Value::Null,
        };
    }

    let replaced = REFERENCE_PATTERN.replace_all(&s, |caps: &Captures| {
        if &caps[1] != prefix {
            return caps[0].to_string();
        }
        resolved
            .get(&caps[2])
            .cloned()
            .flatten()
            .map(|value| value.render())
            .unwrap_or_default()
    });
    Value::String(replaced.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use stackhook_cloud_aws::{NetworkApi, SubnetPage};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct StaticNetwork {
        vpc_calls: AtomicUsize,
    }

    #[async_trait]
    impl NetworkApi for StaticNetwork {
        async fn default_vpc_ids(&self) -> stackhook_cloud_aws::Result<Vec<String>> {
            self.vpc_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["vpc-1".to_string()])
        }

        async fn subnets_page(
            &self,
            _vpc_id: &str,
            _next_token: Option<String>,
        ) -> stackhook_cloud_aws::Result<SubnetPage> {
            Ok(SubnetPage {
                subnet_ids: vec!["subnet-a".to_string(), "subnet-b".to_string()],
                next_token: None,
            })
        }

        async fn security_group_ids(
            &self,
            _vpc_id: &str,
            _group_name: &str,
        ) -> stackhook_cloud_aws::Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    fn vars() -> (Arc<StaticNetwork>, ExtendedVars) {
        let network = Arc::new(StaticNetwork::default());
        let vars = ExtendedVars::new(Arc::clone(&network) as Arc<dyn NetworkApi>);
        (network, vars)
    }

    #[tokio::test]
    async fn test_whole_reference_takes_typed_value() {
        let (network, vars) = vars();
        let config = json!({
            "vpc": {
                "securityGroupIds": ["${awsext:defaultSecurityGroupId}"],
                "subnetIds": "${awsext:defaultSubnetIds}",
            },
            "environment": { "VPC_ID": "${awsext:defaultVpcId}" },
        });

        let result = interpolate_value(&vars, config).await.unwrap();

        assert_eq!(
            result,
            json!({
                "vpc": {
                    "securityGroupIds": [null],
                    "subnetIds": ["subnet-a", "subnet-b"],
                },
                "environment": { "VPC_ID": "vpc-1" },
            })
        );
        // subnets and security group share one cached VPC lookup
        assert_eq!(network.vpc_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_embedded_references_render_as_text() {
        let (_, vars) = vars();

        let text = interpolate_str(&vars, "vpc=${awsext:defaultVpcId} subnets=${ awsext:defaultSubnetIds }")
            .await
            .unwrap();

        assert_eq!(text, "vpc=vpc-1 subnets=subnet-a,subnet-b");
    }

    #[tokio::test]
    async fn test_foreign_and_unknown_references() {
        let (network, vars) = vars();

        let value = interpolate_value(
            &vars,
            json!(["${opt:stage}", "x-${awsext:bogus}-y", "${self:service}-${awsext:defaultVpcId}"]),
        )
        .await
        .unwrap();

        assert_eq!(value, json!(["${opt:stage}", "x--y", "${self:service}-vpc-1"]));
        assert_eq!(network.vpc_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_kind_with_punctuation_is_absent() {
        let (network, vars) = vars();

        let text = interpolate_str(&vars, "x-${awsext:bogus-kind}-y").await.unwrap();
        assert_eq!(text, "x--y");

        let value = interpolate_value(&vars, json!({ "vpc": "${awsext:defaultVpcId.x}" }))
            .await
            .unwrap();
        assert_eq!(value, json!({ "vpc": null }));
        assert_eq!(network.vpc_calls.load(Ordering::SeqCst), 0);
    }
}
