//! Turno Slots crate - appointment slot search and load balancing.

pub mod provider;
pub mod search;

pub use provider::Availability;
pub use search::{
    find_slot, SlotOutcome, SlotPick, SlotQuery, UnavailableReason, SEARCH_WINDOW_DAYS,
};
