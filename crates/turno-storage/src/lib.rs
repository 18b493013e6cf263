//! Turno Storage crate - SQLite persistence for conversation state.
//!
//! Provides a WAL-mode SQLite database with migrations and repository
//! implementations for chat sessions, capped message history, and
//! business facts.

pub mod db;
pub mod migrations;
pub mod repository;

pub use db::Database;
pub use repository::{FactRepository, MessageRepository, SessionRepository};
