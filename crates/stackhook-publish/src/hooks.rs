//! イメージのビルドを起動するライフサイクルフック

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleHook {
    PackageCreateDeploymentArtifacts,
    DeployFunctionPackageFunction,
    OfflineStart,
    OfflineStartInit,
    InvokeLocalInvoke,
}

impl LifecycleHook {
    pub const ALL: [LifecycleHook; 5] = [
        LifecycleHook::PackageCreateDeploymentArtifacts,
        LifecycleHook::DeployFunctionPackageFunction,
        LifecycleHook::OfflineStart,
        LifecycleHook::OfflineStartInit,
        LifecycleHook::InvokeLocalInvoke,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleHook::PackageCreateDeploymentArtifacts => {
                "before:package:createDeploymentArtifacts"
            }
            LifecycleHook::DeployFunctionPackageFunction => "before:deploy:function:packageFunction",
            LifecycleHook::OfflineStart => "before:offline:start",
            LifecycleHook::OfflineStartInit => "before:offline:start:init",
            LifecycleHook::InvokeLocalInvoke => "before:invoke:local:invoke",
        }
    }

    /// フック名から変換。ビルド対象外のフックは None
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|hook| hook.as_str() == name.trim())
    }
}

impl fmt::Display for LifecycleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(
            LifecycleHook::from_name("before:offline:start:init"),
            Some(LifecycleHook::OfflineStartInit)
        );
        assert_eq!(LifecycleHook::from_name("after:deploy:deploy"), None);
    }

    #[test]
    fn test_all_names_round_trip() {
        for hook in LifecycleHook::ALL {
            assert_eq!(LifecycleHook::from_name(hook.as_str()), Some(hook));
        }
    }
}
