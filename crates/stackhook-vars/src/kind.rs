//! Variable kinds, values and references

use serde::Serialize;
use std::fmt;

/// The request kinds the resolver knows how to answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    DefaultVpcId,
    DefaultSubnetIds,
    DefaultSecurityGroupId,
}

impl VarKind {
    pub const ALL: [VarKind; 3] = [
        VarKind::DefaultVpcId,
        VarKind::DefaultSubnetIds,
        VarKind::DefaultSecurityGroupId,
    ];

    /// Name as written after the prefix, e.g. `defaultVpcId`
    pub fn as_str(&self) -> &'static str {
        match self {
            VarKind::DefaultVpcId => "defaultVpcId",
            VarKind::DefaultSubnetIds => "defaultSubnetIds",
            VarKind::DefaultSecurityGroupId => "defaultSecurityGroupId",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved variable value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VarValue {
    Text(String),
    List(Vec<String>),
}

impl VarValue {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            VarValue::Text(s) => serde_json::Value::String(s.clone()),
            VarValue::List(items) => serde_json::Value::Array(
                items.iter().cloned().map(serde_json::Value::String).collect(),
            ),
        }
    }

    /// Text form used when a reference is embedded in a longer string
    pub fn render(&self) -> String {
        match self {
            VarValue::Text(s) => s.clone(),
            VarValue::List(items) => items.join(","),
        }
    }
}

/// A `<prefix>:<kind>` reference as handed over by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableReference<'a> {
    name: &'a str,
}

impl<'a> VariableReference<'a> {
    /// Trim the input and strip `prefix:` when present.
    ///
    /// Never fails; an unknown name simply has no [`VarKind`].
    pub fn parse(prefix: &str, input: &'a str) -> Self {
        let trimmed = input.trim();
        let name = trimmed
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix(':'))
            .unwrap_or(trimmed);
        Self { name }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn kind(&self) -> Option<VarKind> {
        VarKind::from_name(self.name)
    }
}
