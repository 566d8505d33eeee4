//! Named capability sets.

use crate::{Capability, CapabilitySet, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Key of the built-in set that enables nothing.
pub const SET_NONE: &str = "None";

/// Key of the built-in set tracking the newest release.
pub const SET_CURRENT: &str = "vCurrent";

/// Catalog of named capability sets, loaded from TOML or built in.
///
/// Sets may overlap. The `current` key names the set used as baseline when
/// a cluster does not pick one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Set name used when no baseline is selected.
    #[serde(default = "default_current")]
    pub current: String,

    /// Set name to members.
    #[serde(default)]
    pub sets: BTreeMap<String, CapabilitySet>,
}

fn default_current() -> String {
    SET_CURRENT.to_string()
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            current: default_current(),
            sets: BTreeMap::new(),
        }
    }
}

impl Catalog {
    /// Create a catalog from explicit sets.
    pub fn new(current: impl Into<String>, sets: BTreeMap<String, CapabilitySet>) -> Self {
        Self {
            current: current.into(),
            sets,
        }
    }

    /// Load a catalog from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse a catalog from a TOML string.
    pub fn parse(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| Error::Parse(e.to_string()))
    }

    /// The cluster-version capability sets shipped with each release.
    pub fn builtin() -> Self {
        let releases: [(&str, &[&str]); 8] = [
            ("v4.11", &["baremetal", "MachineAPI", "marketplace", "openshift-samples"]),
            ("v4.12", &["Console", "Insights", "Storage", "CSISnapshot"]),
            ("v4.13", &["NodeTuning"]),
            ("v4.14", &["Build", "DeploymentConfig", "ImageRegistry"]),
            ("v4.15", &["OperatorLifecycleManager", "CloudCredential"]),
            ("v4.16", &["CloudControllerManager"]),
            ("v4.17", &[]),
            ("v4.18", &["Ingress", "OperatorLifecycleManagerV1"]),
        ];

        let mut sets = BTreeMap::new();
        sets.insert(SET_NONE.to_string(), CapabilitySet::new());

        // Each release carries everything the previous one did.
        let mut cumulative = CapabilitySet::new();
        for (name, added) in releases {
            cumulative.extend(added.iter().copied().map(Capability::from));
            sets.insert(name.to_string(), cumulative.clone());
        }
        sets.insert(SET_CURRENT.to_string(), cumulative);

        Self::new(SET_CURRENT, sets)
    }

    /// Members of the named set, or `None` if the catalog has no such set.
    pub fn get(&self, name: &str) -> Option<&CapabilitySet> {
        self.sets.get(name)
    }

    /// True if the catalog defines a set with this name.
    pub fn contains_set(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    /// Iterate over set names in order.
    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// Union of every member of every set.
    pub fn known(&self) -> CapabilitySet {
        self.sets.values().flatten().cloned().collect()
    }
}
