use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Playing surface of a court
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Clay,
    Synthetic,
    Grass,
}

impl Surface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::Clay => "clay",
            Surface::Synthetic => "synthetic",
            Surface::Grass => "grass",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Surface {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clay" => Ok(Surface::Clay),
            "synthetic" => Ok(Surface::Synthetic),
            "grass" => Ok(Surface::Grass),
            other => Err(format!("Unknown surface: {}", other)),
        }
    }
}

/// Court reference data. Seeded administratively, never mutated by bookings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Court {
    pub id: i64,
    pub name: String,
    pub surface: Surface,
    pub location: String,
}

impl Court {
    pub fn new(id: i64, name: impl Into<String>, surface: Surface, location: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            surface,
            location: location.into(),
        }
    }
}

/// Courts installed when the in-memory backend starts. Kept in sync with the
/// seed migration.
pub fn default_courts() -> Vec<Court> {
    vec![
        Court::new(1, "Court 1", Surface::Clay, "Sector A"),
        Court::new(2, "Court 2", Surface::Synthetic, "Sector B"),
        Court::new(3, "Court 3", Surface::Grass, "Sector C"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_round_trips_through_text() {
        for surface in [Surface::Clay, Surface::Synthetic, Surface::Grass] {
            assert_eq!(surface.as_str().parse::<Surface>().unwrap(), surface);
        }
        assert!("carpet".parse::<Surface>().is_err());
    }
}
