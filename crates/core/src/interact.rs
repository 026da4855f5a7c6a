//! Interactable metadata attached to decorative scene objects.

use serde::{Deserialize, Serialize};

/// Per-object interaction metadata.
///
/// One `Interactable` rides the root node of each clickable decoration. It is
/// created when the object is attached to a room and lives for the whole
/// session; only the cooldown tracker flips `on_cooldown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interactable {
    /// Signed amount applied to health when triggered.
    pub health_effect: i32,
    /// Milliseconds the object is locked out after a successful trigger.
    pub cooldown_ms: u64,
    /// Whether the cooldown gate is currently armed.
    #[serde(default)]
    pub on_cooldown: bool,
}

impl Interactable {
    /// Create a fresh interactable with the gate open.
    pub fn new(health_effect: i32, cooldown_ms: u64) -> Self {
        Self {
            health_effect,
            cooldown_ms,
            on_cooldown: false,
        }
    }
}
