use std::collections::BTreeMap;

use serde::Serialize;

use crate::booking::Booking;
use crate::slot::SlotTime;

/// Occupancy of one booked slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotAvailability {
    pub available: bool,
    pub players_count: usize,
    pub players: Vec<String>,
}

impl From<&Booking> for SlotAvailability {
    fn from(booking: &Booking) -> Self {
        let players: Vec<String> = booking.players().into_iter().map(String::from).collect();
        Self {
            available: !booking.is_full(),
            players_count: players.len(),
            players,
        }
    }
}

pub type AvailabilityMap = BTreeMap<SlotTime, SlotAvailability>;

/// Builds the per-time occupancy map for one court and day.
///
/// Only times that have a booking appear. A missing key means nobody has
/// booked that time yet, which callers read as available.
pub fn availability_map(bookings: &[Booking]) -> AvailabilityMap {
    bookings
        .iter()
        .map(|b| (b.time, SlotAvailability::from(b)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn booking(id: i64, time: &str, p1: &str, p2: Option<&str>) -> Booking {
        Booking {
            id,
            court_id: 1,
            date: "01/07/2025".parse().unwrap(),
            time: time.parse().unwrap(),
            player1: p1.to_string(),
            player2: p2.map(String::from),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_open_and_full_slots() {
        let map = availability_map(&[
            booking(1, "10:00", "Ana", None),
            booking(2, "08:00", "Bruno", Some("Carla")),
        ]);

        assert_eq!(map.len(), 2);
        let open = &map[&"10:00".parse::<SlotTime>().unwrap()];
        assert!(open.available);
        assert_eq!(open.players_count, 1);
        assert_eq!(open.players, vec!["Ana"]);

        let full = &map[&"08:00".parse::<SlotTime>().unwrap()];
        assert!(!full.available);
        assert_eq!(full.players_count, 2);
        assert_eq!(full.players, vec!["Bruno", "Carla"]);
    }

    #[test]
    fn test_unbooked_times_are_absent() {
        let map = availability_map(&[booking(1, "10:00", "Ana", None)]);
        assert!(!map.contains_key(&"09:00".parse::<SlotTime>().unwrap()));
        assert!(availability_map(&[]).is_empty());
    }

    #[test]
    fn test_serializes_keyed_by_wire_time() {
        let map = availability_map(&[
            booking(1, "14:00", "Ana", None),
            booking(2, "09:00", "Bruno", None),
        ]);
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "09:00": { "available": true, "players_count": 1, "players": ["Bruno"] },
                "14:00": { "available": true, "players_count": 1, "players": ["Ana"] },
            })
        );
    }
}
