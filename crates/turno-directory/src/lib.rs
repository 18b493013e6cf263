//! Turno Directory crate - read-only directory access and fuzzy name
//! resolution.
//!
//! The directory itself lives in external storage; this crate defines the
//! access trait plus the resolution policy that turns free-text name
//! references into concrete records or disambiguation prompts.

pub mod provider;
pub mod resolver;

pub use provider::Directory;
pub use resolver::{resolve_name, NamedRecord, Resolution, MAX_CANDIDATES};
