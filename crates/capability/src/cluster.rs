//! Capability resolution for a cluster.

use crate::{Capability, CapabilitySet, CapabilityState, Catalog, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Capability selection declared in cluster configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitiesSpec {
    /// Catalog set to start from. Unset or empty means the catalog's
    /// current set.
    #[serde(default)]
    pub baseline_capability_set: Option<String>,

    /// Capabilities enabled on top of the baseline. Need not be known to
    /// the catalog.
    #[serde(default)]
    pub additional_enabled_capabilities: CapabilitySet,
}

impl CapabilitiesSpec {
    /// Parse a capabilities record from a TOML string.
    pub fn parse(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Select a baseline set by name.
    pub fn with_baseline(mut self, name: impl Into<String>) -> Self {
        self.baseline_capability_set = Some(name.into());
        self
    }

    /// Add capabilities on top of the baseline.
    pub fn with_additional<I, C>(mut self, caps: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Capability>,
    {
        self.additional_enabled_capabilities
            .extend(caps.into_iter().map(Into::into));
        self
    }
}

/// Enablement state of every capability on a cluster.
///
/// A derived value: recompute it whenever configuration or observation
/// changes. `enabled` and `implicitly_enabled` never overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterCapabilities {
    /// Every capability named by any catalog set.
    #[serde(default)]
    pub known: CapabilitySet,

    /// Capabilities turned on by the baseline or additional overrides.
    #[serde(default)]
    pub enabled: CapabilitySet,

    /// Capabilities observed active but not explicitly enabled.
    ///
    /// For example a capability introduced in a newer release is implicitly
    /// enabled on a cluster upgraded from an older release where the
    /// component was already running.
    #[serde(default)]
    pub implicitly_enabled: CapabilitySet,
}

impl ClusterCapabilities {
    /// Resolve capabilities from an optional cluster capabilities record.
    ///
    /// An absent record behaves like one with no baseline and no
    /// additional capabilities.
    pub fn from_spec(
        spec: Option<&CapabilitiesSpec>,
        catalog: &Catalog,
        observed: &CapabilitySet,
    ) -> Self {
        let empty = CapabilitySet::new();
        let (baseline, additional) = match spec {
            Some(spec) => (
                spec.baseline_capability_set.as_deref(),
                &spec.additional_enabled_capabilities,
            ),
            None => (None, &empty),
        };
        resolve(baseline, additional, catalog, observed)
    }

    /// Classify a single capability.
    pub fn state_of(&self, cap: &str) -> CapabilityState {
        if self.enabled.contains(cap) {
            CapabilityState::Enabled
        } else if self.implicitly_enabled.contains(cap) {
            CapabilityState::ImplicitlyEnabled
        } else if self.known.contains(cap) {
            CapabilityState::Disabled
        } else {
            CapabilityState::Unknown
        }
    }

    /// Known capabilities not active by any means.
    pub fn disabled(&self) -> CapabilitySet {
        self.known
            .iter()
            .filter(|cap| !self.is_active(cap.as_str()))
            .cloned()
            .collect()
    }

    /// True if the capability is explicitly or implicitly enabled.
    pub fn is_active(&self, cap: &str) -> bool {
        self.state_of(cap).is_active()
    }

    /// Requested capabilities not yet covered. See [`find_gaps`].
    pub fn gaps(
        &self,
        requested: Option<&CapabilitySet>,
        enabled_elsewhere: &CapabilitySet,
    ) -> Option<CapabilitySet> {
        find_gaps(requested, enabled_elsewhere, self)
    }
}

/// Compute the enablement state of a cluster.
///
/// - `known` is the union of all catalog sets.
/// - `enabled` is the set named by `baseline` plus `additional`. A `None` or
///   empty `baseline` selects `catalog.current`; a name the catalog does not
///   define selects nothing.
/// - `implicitly_enabled` is `observed` minus `enabled`.
///
/// Inputs are never modified.
pub fn resolve(
    baseline: Option<&str>,
    additional: &CapabilitySet,
    catalog: &Catalog,
    observed: &CapabilitySet,
) -> ClusterCapabilities {
    let key = match baseline {
        Some(key) if !key.is_empty() => key,
        _ => catalog.current.as_str(),
    };

    let mut enabled = match catalog.get(key) {
        Some(set) => set.clone(),
        None => {
            debug!(baseline = key, "baseline set not in catalog, starting empty");
            CapabilitySet::new()
        }
    };
    enabled.extend(additional.iter().cloned());

    let implicitly_enabled: CapabilitySet = observed.difference(&enabled).cloned().collect();

    let caps = ClusterCapabilities {
        known: catalog.known(),
        enabled,
        implicitly_enabled,
    };
    debug!(
        baseline = key,
        known = caps.known.len(),
        enabled = caps.enabled.len(),
        implicitly_enabled = caps.implicitly_enabled.len(),
        "resolved cluster capabilities"
    );
    caps
}

/// Requested capabilities not enabled by any mechanism.
///
/// Returns `requested` minus `enabled_elsewhere`, `cluster.enabled` and
/// `cluster.implicitly_enabled`. `None` means nothing was requested; an empty
/// set means everything requested is already covered.
pub fn find_gaps(
    requested: Option<&CapabilitySet>,
    enabled_elsewhere: &CapabilitySet,
    cluster: &ClusterCapabilities,
) -> Option<CapabilitySet> {
    let requested = requested?;
    Some(
        requested
            .iter()
            .filter(|cap| {
                !enabled_elsewhere.contains(*cap)
                    && !cluster.enabled.contains(*cap)
                    && !cluster.implicitly_enabled.contains(*cap)
            })
            .cloned()
            .collect(),
    )
}
