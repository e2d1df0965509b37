//! custom.docker のスキーマ検証
//!
//! 必須項目 → 各プロパティの順に検査し、最初に違反したフィールドを返す。
//! 未知のプロパティは許容する。

use crate::config::DockerConfig;
use crate::error::{PublishError, PublishResult};
use serde_json::Value;

#[derive(Debug, Clone, Copy)]
enum Rule {
    /// 空白以外の文字を含む文字列
    NonBlank,
    /// 1 文字以上の文字列
    NonEmpty,
    /// 任意の文字列
    Text,
}

const REQUIRED: [&str; 1] = ["name"];

const PROPERTIES: [(&str, Rule); 4] = [
    ("name", Rule::NonBlank),
    ("tag", Rule::NonBlank),
    ("cli", Rule::NonEmpty),
    ("buildArgs", Rule::Text),
];

fn check(field: &str, rule: Rule, value: &Value) -> PublishResult<()> {
    let Some(text) = value.as_str() else {
        return Err(PublishError::invalid(field, "must be a string"));
    };

    match rule {
        Rule::NonBlank if text.trim().is_empty() => {
            Err(PublishError::invalid(field, "must not be blank"))
        }
        Rule::NonEmpty if text.is_empty() => {
            Err(PublishError::invalid(field, "must not be empty"))
        }
        _ => Ok(()),
    }
}

/// docker ブロックを検証して [`DockerConfig`] に変換
pub fn validate_docker_config(value: &Value) -> PublishResult<DockerConfig> {
    let Some(map) = value.as_object() else {
        return Err(PublishError::invalid("docker", "must be an object"));
    };

    for field in REQUIRED {
        if !map.contains_key(field) {
            return Err(PublishError::invalid(field, "is required"));
        }
    }

    for (field, rule) in PROPERTIES {
        if let Some(v) = map.get(field) {
            check(field, rule, v)?;
        }
    }

    serde_json::from_value(value.clone())
        .map_err(|e| PublishError::invalid("docker", e.to_string()))
}
