//! Property-based tests for capability resolution and gap finding.

use capability::{Capability, CapabilitySet, Catalog, ClusterCapabilities, find_gaps, resolve};
use proptest::prelude::*;

/// Small alphabet so generated sets overlap often.
fn cap_set() -> impl Strategy<Value = CapabilitySet> {
    prop::collection::btree_set("[a-h]", 0..6)
        .prop_map(|names| names.into_iter().map(Capability::from).collect::<CapabilitySet>())
}

fn catalog() -> impl Strategy<Value = Catalog> {
    ("[p-s]", prop::collection::btree_map("[p-s]", cap_set(), 0..4))
        .prop_map(|(current, sets)| Catalog::new(current, sets))
}

/// Baseline selection: unset, empty, or a key that may or may not exist.
fn baseline() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), Just(Some(String::new())), "[p-t]".prop_map(Some)]
}

fn difference(a: &CapabilitySet, b: &CapabilitySet) -> CapabilitySet {
    a.difference(b).cloned().collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Gaps are the request minus every enablement source.
    #[test]
    fn gaps_are_successive_differences(
        requested in cap_set(),
        elsewhere in cap_set(),
        enabled in cap_set(),
        implicitly_enabled in cap_set(),
    ) {
        let cluster = ClusterCapabilities {
            known: CapabilitySet::new(),
            enabled: enabled.clone(),
            implicitly_enabled: implicitly_enabled.clone(),
        };
        let expected = difference(
            &difference(&difference(&requested, &elsewhere), &enabled),
            &implicitly_enabled,
        );

        let gaps = find_gaps(Some(&requested), &elsewhere, &cluster);
        prop_assert_eq!(gaps, Some(expected));
    }

    /// A present request always yields a result, an absent one never does.
    #[test]
    fn gaps_present_iff_requested(
        requested in cap_set(),
        elsewhere in cap_set(),
        enabled in cap_set(),
        implicitly_enabled in cap_set(),
    ) {
        let cluster = ClusterCapabilities {
            known: CapabilitySet::new(),
            enabled,
            implicitly_enabled,
        };
        prop_assert!(find_gaps(Some(&requested), &elsewhere, &cluster).is_some());
        prop_assert!(find_gaps(None, &elsewhere, &cluster).is_none());
    }

    /// Enabled and implicitly enabled never overlap, and together cover observed.
    #[test]
    fn enabled_and_implicit_disjoint(
        catalog in catalog(),
        baseline in baseline(),
        additional in cap_set(),
        observed in cap_set(),
    ) {
        let caps = resolve(baseline.as_deref(), &additional, &catalog, &observed);
        prop_assert!(caps.enabled.is_disjoint(&caps.implicitly_enabled));
        prop_assert!(additional.is_subset(&caps.enabled));
        prop_assert_eq!(caps.implicitly_enabled, difference(&observed, &caps.enabled));
    }

    /// Known depends on the catalog alone.
    #[test]
    fn known_is_catalog_union(
        catalog in catalog(),
        baseline in baseline(),
        additional in cap_set(),
        observed in cap_set(),
    ) {
        let caps = resolve(baseline.as_deref(), &additional, &catalog, &observed);
        let union: CapabilitySet = catalog.sets.values().flatten().cloned().collect();
        prop_assert_eq!(&caps.known, &catalog.known());
        prop_assert_eq!(caps.known, union);
    }

    /// Same inputs, same state; inputs are left untouched.
    #[test]
    fn resolve_idempotent(
        catalog in catalog(),
        baseline in baseline(),
        additional in cap_set(),
        observed in cap_set(),
    ) {
        let before = (catalog.clone(), additional.clone(), observed.clone());
        let first = resolve(baseline.as_deref(), &additional, &catalog, &observed);
        let second = resolve(baseline.as_deref(), &additional, &catalog, &observed);
        prop_assert_eq!(first, second);
        prop_assert_eq!(before, (catalog, additional, observed));
    }

    /// Unknown baseline keys enable only the additional capabilities.
    #[test]
    fn unknown_baseline_is_empty(
        catalog in catalog(),
        additional in cap_set(),
        observed in cap_set(),
    ) {
        // Generated catalog keys never contain digits.
        let caps = resolve(Some("v0"), &additional, &catalog, &observed);
        prop_assert_eq!(caps.enabled, additional);
    }
}
