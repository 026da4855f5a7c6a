#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod health;
pub mod interact;

use serde::{Deserialize, Serialize};

pub use health::{HealthModel, MeterSink, NullMeter, DECAY_PER_TICK, MAX_HEALTH};
pub use interact::Interactable;

/// Identifier for one of the explorable rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomId {
    /// The bedroom.
    Bedroom,
    /// The kitchen.
    Kitchen,
    /// The living room.
    LivingRoom,
}

impl RoomId {
    /// All rooms, in display order.
    pub const ALL: [RoomId; 3] = [RoomId::Bedroom, RoomId::Kitchen, RoomId::LivingRoom];

    /// Stable string form used by config files and UI buttons.
    pub fn as_str(self) -> &'static str {
        match self {
            RoomId::Bedroom => "bedroom",
            RoomId::Kitchen => "kitchen",
            RoomId::LivingRoom => "living_room",
        }
    }

    /// Parse the stable string form.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bedroom" => Some(RoomId::Bedroom),
            "kitchen" => Some(RoomId::Kitchen),
            "living_room" => Some(RoomId::LivingRoom),
            _ => None,
        }
    }

    /// Human-readable label for HUD buttons.
    pub fn label(self) -> &'static str {
        match self {
            RoomId::Bedroom => "Bedroom",
            RoomId::Kitchen => "Kitchen",
            RoomId::LivingRoom => "Living Room",
        }
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_id_round_trips_through_string_form() {
        for id in RoomId::ALL {
            assert_eq!(RoomId::parse(id.as_str()), Some(id));
        }
        assert_eq!(RoomId::parse("bathroom"), None);
    }
}
