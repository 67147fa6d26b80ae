//! Connection policy resolution
//!
//! Merges a caller override set with profile directives, validates the
//! combination and composes the outbound peer-info map.

pub mod directives;
pub mod loader;
pub mod options;
pub mod peer_info;
pub mod pipeline;
pub mod policy;
pub mod resolver;
pub mod schema;
pub mod validation;

pub use directives::{DirectiveLookup, ProfileDirectives};
pub use loader::{LoadResult, LoadWarning, RequestFile, RequestLoader};
pub use options::{ResolverLimits, ResolverOptions};
pub use peer_info::{PeerInfo, builtin_identity, compose};
pub use pipeline::{Resolution, resolve_configuration};
pub use policy::{AxisPolicy, DEFAULT_POLICY, Fallback};
pub use schema::*;
pub use validation::{ValidationResult, Validator};
