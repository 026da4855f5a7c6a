#![warn(missing_docs)]
//! Apartment pack schema + validation helpers.
//!
//! A pack is a JSON array of room definitions: shell parameters, window
//! placements and the decorations that can be clicked for health.

mod loader;

pub use loader::{catalog_from_defs, rooms_from_file, rooms_from_str};

use flatwalk_core::RoomId;
use serde::Deserialize;
use thiserror::Error;

/// One room in an apartment pack.
#[derive(Debug, Deserialize)]
pub struct RoomDefinition {
    /// Room identity; also the key used for switch requests.
    pub id: RoomId,
    /// Side length of the square floor.
    pub size: f32,
    /// Floor color (linear RGB).
    #[serde(default = "default_floor_color")]
    pub floor_color: [f32; 3],
    /// Wall color (linear RGB).
    #[serde(default = "default_wall_color")]
    pub wall_color: [f32; 3],
    /// Clear color behind the room.
    #[serde(default = "default_background")]
    pub background: [f32; 3],
    /// Ambient light, defaulted when omitted.
    #[serde(default)]
    pub light: LightDefinition,
    /// Window cutouts.
    #[serde(default)]
    pub windows: Vec<WindowDefinition>,
    /// Clickable decorations.
    #[serde(default)]
    pub decor: Vec<DecorDefinition>,
}

/// Ambient light settings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LightDefinition {
    /// Light color (linear RGB).
    pub color: [f32; 3],
    /// Scalar intensity.
    pub intensity: f32,
}

impl Default for LightDefinition {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 0.9,
        }
    }
}

/// Which wall a window sits in.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowSide {
    /// Wall at negative z.
    North,
    /// Wall at positive z.
    South,
    /// Wall at positive x.
    East,
    /// Wall at negative x.
    West,
}

/// A window pane inset into a wall.
#[derive(Debug, Deserialize)]
pub struct WindowDefinition {
    /// Wall the window belongs to.
    pub side: WindowSide,
    /// Offset along the wall from its center.
    #[serde(default)]
    pub offset: f32,
    /// Pane width.
    pub width: f32,
    /// Pane height.
    pub height: f32,
    /// Height of the sill above the floor.
    pub sill: f32,
}

/// A clickable decoration.
#[derive(Debug, Deserialize)]
pub struct DecorDefinition {
    /// Display name ("bed", "fridge", ...).
    pub name: String,
    /// Signed health delta granted per click.
    pub health_effect: i32,
    /// Milliseconds before the decoration can be clicked again.
    pub cooldown_ms: u64,
    /// Group origin on the floor.
    pub position: [f32; 3],
    /// Group rotation about the Y axis, radians.
    #[serde(default)]
    pub yaw: f32,
    /// Boxes making up the decoration's visible body.
    pub parts: Vec<PartDefinition>,
}

/// One box of a decoration.
#[derive(Debug, Deserialize)]
pub struct PartDefinition {
    /// Part name, for debugging.
    pub name: String,
    /// Offset from the group origin.
    pub offset: [f32; 3],
    /// Half extents along x/y/z.
    pub half_extents: [f32; 3],
    /// Flat color (linear RGB).
    pub color: [f32; 3],
}

/// Errors emitted during pack loading.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Wrap IO errors when reading packs.
    #[error("failed to read apartment pack: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse apartment pack: {0}")]
    Parse(#[from] serde_json::Error),
    /// The pack parsed but defines no rooms.
    #[error("apartment pack defines no rooms")]
    Empty,
    /// Two rooms claim the same id.
    #[error("apartment pack defines room `{0}` twice")]
    DuplicateRoom(RoomId),
}

fn default_floor_color() -> [f32; 3] {
    [0.55, 0.45, 0.35]
}

fn default_wall_color() -> [f32; 3] {
    [0.90, 0.88, 0.82]
}

fn default_background() -> [f32; 3] {
    [0.08, 0.09, 0.12]
}
