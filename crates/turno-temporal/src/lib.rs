//! Turno Temporal crate - Spanish natural-language date and time parsing.
//!
//! All parsing is regex-driven and deterministic. Relative expressions
//! ("mañana", "el viernes que viene") resolve against a reference instant
//! projected into the business timezone, never the server clock, so a
//! late-night message lands on the caller's calendar day. Anything the
//! parsers do not recognize comes back as `None`; they never guess.

pub mod date;
pub mod range;
pub mod time;

pub use date::parse_date;
pub use range::parse_range;
pub use time::parse_time;
