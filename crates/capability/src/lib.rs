//! Cluster capability resolution.
//!
//! A cluster has a set of optional capabilities. This crate works out which
//! of them are active by combining three inputs:
//!
//! 1. **Catalog** — named capability sets ([`Catalog`]). The union of all
//!    sets is the universe of *known* capabilities.
//! 2. **Declared configuration** — a baseline set name plus additional
//!    capabilities ([`CapabilitiesSpec`]). Together they are *enabled*.
//! 3. **Observation** — capabilities seen active by other means, such as
//!    pre-existing cluster resources. Those not already enabled are
//!    *implicitly enabled*.
//!
//! Everything is a pure computation over immutable inputs. Nothing here
//! acts on a cluster.
//!
//! # Example
//!
//! ```
//! use capability::{
//!     CapabilitiesSpec, CapabilityState, Catalog, ClusterCapabilities, capability_set,
//! };
//!
//! let catalog = Catalog::builtin();
//! let spec = CapabilitiesSpec::default()
//!     .with_baseline("v4.11")
//!     .with_additional(["Console"]);
//! let observed = capability_set(["ImageRegistry"]);
//!
//! let caps = ClusterCapabilities::from_spec(Some(&spec), &catalog, &observed);
//! assert_eq!(caps.state_of("Console"), CapabilityState::Enabled);
//! assert_eq!(caps.state_of("ImageRegistry"), CapabilityState::ImplicitlyEnabled);
//! assert_eq!(caps.state_of("Build"), CapabilityState::Disabled);
//!
//! // Which of these does a component still need turned on?
//! let wanted = capability_set(["Console", "Build"]);
//! let gaps = caps.gaps(Some(&wanted), &capability_set(Vec::<&str>::new()));
//! assert_eq!(gaps, Some(capability_set(["Build"])));
//! ```

mod capability;
mod catalog;
mod cluster;
mod error;

pub use capability::{Capability, CapabilitySet, CapabilityState, capability_set};
pub use catalog::{Catalog, SET_CURRENT, SET_NONE};
pub use cluster::{CapabilitiesSpec, ClusterCapabilities, find_gaps, resolve};
pub use error::{Error, Result};
