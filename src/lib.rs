//! Time tools for an email-drafting assistant.
//!
//! The core is [`clock::WallClockConverter`], which turns a wall-clock
//! reading in one IANA zone into the reading in another through an
//! injected [`clock::ZoneFormatter`]. Around it sit the two-field
//! synchronization state machine, zone abbreviation labels, live clocks,
//! the zone catalog and the meeting-line template.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod template;
