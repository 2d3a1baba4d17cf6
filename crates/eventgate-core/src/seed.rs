//! # Seed Data
//!
//! The records every collection starts with. The app can replace the
//! built-in set with a JSON or TOML file of the same shape:
//!
//! ```toml
//! [[users]]
//! id = "u1"
//! username = "ada"
//! email = "ada@example.com"
//! ```

use crate::types::{Event, Location, Participant, User};
use serde::{Deserialize, Serialize};

/// Initial contents of the four collections, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl SeedData {
    /// The seed set shipped with the binary: 3 users, 3 locations,
    /// 3 events and 6 participants, all references intact.
    pub fn builtin() -> Self {
        Self {
            users: vec![
                user("u1", "ada", "ada@example.com"),
                user("u2", "grace", "grace@example.com"),
                user("u3", "linus", "linus@example.com"),
            ],
            locations: vec![
                location(
                    "l1",
                    "Harbour Hall",
                    "Conference hall by the old harbour",
                    Some((41.0122, 28.9760)),
                ),
                location(
                    "l2",
                    "Riverside Park",
                    "Open-air stage next to the river",
                    Some((41.0451, 29.0342)),
                ),
                location("l3", "Online", "Video call, link sent by email", None),
            ],
            events: vec![
                event(
                    "e1",
                    "Rust Meetup",
                    "Monthly talks and pizza",
                    Some(("2024-05-14", "18:30", "21:00")),
                    "l1",
                    "u1",
                ),
                event(
                    "e2",
                    "Summer Picnic",
                    "Bring something to share",
                    Some(("2024-07-06", "12:00", "17:00")),
                    "l2",
                    "u2",
                ),
                event(
                    "e3",
                    "Reading Group",
                    "This month: compilers",
                    None,
                    "l3",
                    "u1",
                ),
            ],
            participants: vec![
                participant("p1", "u1", "e1"),
                participant("p2", "u2", "e1"),
                participant("p3", "u3", "e2"),
                participant("p4", "u3", "e1"),
                participant("p5", "u1", "e2"),
                participant("p6", "u2", "e3"),
            ],
        }
    }
}

fn user(id: &str, username: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        email: email.to_string(),
    }
}

fn location(id: &str, name: &str, desc: &str, coords: Option<(f64, f64)>) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        desc: desc.to_string(),
        lat: coords.map(|(lat, _)| lat),
        lng: coords.map(|(_, lng)| lng),
    }
}

fn event(
    id: &str,
    title: &str,
    desc: &str,
    schedule: Option<(&str, &str, &str)>,
    location_id: &str,
    user_id: &str,
) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        desc: desc.to_string(),
        date: schedule.map(|(date, _, _)| date.to_string()),
        from: schedule.map(|(_, from, _)| from.to_string()),
        to: schedule.map(|(_, _, to)| to.to_string()),
        location_id: location_id.to_string(),
        user_id: user_id.to_string(),
    }
}

fn participant(id: &str, user_id: &str, event_id: &str) -> Participant {
    Participant {
        id: id.to_string(),
        user_id: user_id.to_string(),
        event_id: event_id.to_string(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
