//! # Trackbreak Gamedata
//!
//! Static tables from the game: the 32 regular tracks with their course
//! hashes, and the vehicle, driver and controller id tables. Everything
//! is `&'static` data; lookups are exact, with case-insensitive name
//! matching. Fuzzy resolution is a caller concern.

use serde::Serialize;

mod tables;

pub use tables::{CONTROLLERS, DRIVERS, PREFIXES, REGULAR_TRACKS, VEHICLES};

/// One of the 32 tracks shipped with the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegularTrack {
    /// Display name.
    pub name: &'static str,
    /// Community abbreviation.
    pub alias: &'static str,
    /// Course slot id, two hex digits.
    pub slot: &'static str,
    /// SHA-1 of the course file, uppercase hex.
    pub sha1: &'static str,
}

/// Find a regular track by display name or alias.
pub fn find_regular_track(query: &str) -> Option<&'static RegularTrack> {
    REGULAR_TRACKS
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(query) || t.alias.eq_ignore_ascii_case(query))
}

/// Vehicle display name for an in-game vehicle id.
pub fn vehicle_name(id: usize) -> Option<&'static str> {
    VEHICLES.get(id).copied()
}

/// Driver display name for an in-game driver id.
pub fn driver_name(id: usize) -> Option<&'static str> {
    DRIVERS.get(id).copied()
}

/// Controller display name for an in-game controller id.
pub fn controller_name(id: usize) -> Option<&'static str> {
    CONTROLLERS.get(id).copied()
}
