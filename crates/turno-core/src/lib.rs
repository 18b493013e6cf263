//! Turno Core crate - shared domain types, configuration and errors.

pub mod config;
pub mod error;
pub mod text;
pub mod types;

pub use config::{ChatConfig, GeneralConfig, TimeConfig, TurnoConfig};
pub use error::{Result, TurnoError};
pub use text::normalize;
pub use types::*;
