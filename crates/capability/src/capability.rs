use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// An optional cluster feature, named by an opaque token.
///
/// Capabilities have no internal structure: two capabilities are the same
/// if and only if their names are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Capability {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Capability {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for Capability {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A collection of capabilities with value equality.
///
/// Ordered so that reports and serialized output are stable.
pub type CapabilitySet = BTreeSet<Capability>;

/// Build a [`CapabilitySet`] from anything that converts into capabilities.
///
/// ```
/// use capability::capability_set;
///
/// let set = capability_set(["Console", "Insights"]);
/// assert!(set.contains("Console"));
/// ```
pub fn capability_set<I, C>(caps: I) -> CapabilitySet
where
    I: IntoIterator<Item = C>,
    C: Into<Capability>,
{
    caps.into_iter().map(Into::into).collect()
}

/// Which enablement mechanism, if any, covers a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityState {
    /// Not part of any catalog set and not enabled.
    Unknown,
    /// Turned on by the baseline set or an additional override.
    Enabled,
    /// Observed active without being declared in configuration.
    ImplicitlyEnabled,
    /// Known to the catalog but not active by any means.
    Disabled,
}

impl CapabilityState {
    /// True for both explicit and implicit enablement.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Enabled | Self::ImplicitlyEnabled)
    }
}

impl fmt::Display for CapabilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Enabled => "enabled",
            Self::ImplicitlyEnabled => "implicitly enabled",
            Self::Disabled => "disabled",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_lookup_by_str() {
        let set = capability_set(["baremetal", "Console"]);
        assert!(set.contains("baremetal"));
        assert!(!set.contains("Storage"));
    }

    #[test]
    fn test_set_is_deduplicated_and_ordered() {
        let set = capability_set(["b", "a", "b"]);
        let names: Vec<_> = set.iter().map(Capability::as_str).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_serde_transparent() {
        let cap: Capability = serde_json::from_str("\"ImageRegistry\"").unwrap();
        assert_eq!(cap, Capability::from("ImageRegistry"));
        assert_eq!(serde_json::to_string(&cap).unwrap(), "\"ImageRegistry\"");
    }

    #[test]
    fn test_state_is_active() {
        assert!(CapabilityState::Enabled.is_active());
        assert!(CapabilityState::ImplicitlyEnabled.is_active());
        assert!(!CapabilityState::Disabled.is_active());
        assert!(!CapabilityState::Unknown.is_active());
    }
}
