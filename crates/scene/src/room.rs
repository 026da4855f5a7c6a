//! Procedural room construction.
//!
//! A room is a square shell (floor, ceiling, four walls) with optional window
//! cutouts rendered as inset panes, plus whatever decorations the catalog
//! attaches afterwards. Everything lands in the room's arena graph.

use flatwalk_core::RoomId;
use glam::Vec3;

use crate::node::{Node, NodeId, SceneGraph};

/// Wall height shared by every room.
pub const WALL_HEIGHT: f32 = 4.0;
/// Thickness of floor, ceiling and wall slabs.
pub const SHELL_THICKNESS: f32 = 0.2;

/// Which wall a window sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
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
#[derive(Debug, Clone, Copy)]
pub struct WindowParams {
    /// Wall the window belongs to.
    pub side: WallSide,
    /// Offset along the wall from its center.
    pub offset: f32,
    /// Pane width.
    pub width: f32,
    /// Pane height.
    pub height: f32,
    /// Height of the sill above the floor.
    pub sill: f32,
}

/// Ambient light settings for a room.
#[derive(Debug, Clone, Copy)]
pub struct LightParams {
    /// Ambient color (linear RGB).
    pub color: [f32; 3],
    /// Scalar intensity multiplied into the color.
    pub intensity: f32,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 0.9,
        }
    }
}

/// Everything needed to build a room shell.
#[derive(Debug, Clone)]
pub struct RoomParams {
    /// Room identity.
    pub id: RoomId,
    /// Side length of the square floor.
    pub size: f32,
    /// Floor color.
    pub floor_color: [f32; 3],
    /// Wall color.
    pub wall_color: [f32; 3],
    /// Clear color behind the room.
    pub background: [f32; 3],
    /// Ambient lighting.
    pub light: LightParams,
    /// Window cutouts.
    pub windows: Vec<WindowParams>,
}

/// A built room: its arena graph plus per-room render state.
#[derive(Debug, Clone)]
pub struct Room {
    /// Room identity.
    pub id: RoomId,
    /// Side length of the square floor.
    pub size: f32,
    /// Node arena for this room.
    pub graph: SceneGraph,
    /// Clear color behind the room.
    pub background: [f32; 3],
    /// Ambient lighting.
    pub light: LightParams,
    /// Bumped whenever the graph changes, so mesh caches can invalidate.
    pub revision: u64,
}

impl Room {
    /// Record a structural change to the graph.
    pub fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

const WINDOW_COLOR: [f32; 3] = [0.62, 0.80, 0.92];

/// Build a room shell from its parameters.
pub fn build_room(params: &RoomParams) -> Room {
    let mut graph = SceneGraph::new();
    let half = params.size / 2.0;
    let half_t = SHELL_THICKNESS / 2.0;
    let wall_mid = WALL_HEIGHT / 2.0;

    graph.add_root(Node::boxed(
        "floor",
        Vec3::new(0.0, -half_t, 0.0),
        Vec3::new(half, half_t, half),
        params.floor_color,
    ));
    graph.add_root(Node::boxed(
        "ceiling",
        Vec3::new(0.0, WALL_HEIGHT + half_t, 0.0),
        Vec3::new(half, half_t, half),
        params.wall_color,
    ));

    let walls = [
        ("wall/north", Vec3::new(0.0, wall_mid, -half), Vec3::new(half, wall_mid, half_t)),
        ("wall/south", Vec3::new(0.0, wall_mid, half), Vec3::new(half, wall_mid, half_t)),
        ("wall/east", Vec3::new(half, wall_mid, 0.0), Vec3::new(half_t, wall_mid, half)),
        ("wall/west", Vec3::new(-half, wall_mid, 0.0), Vec3::new(half_t, wall_mid, half)),
    ];
    for (name, center, extents) in walls {
        graph.add_root(Node::boxed(name, center, extents, params.wall_color));
    }

    for (i, window) in params.windows.iter().enumerate() {
        add_window(&mut graph, half, i, window);
    }

    Room {
        id: params.id,
        size: params.size,
        graph,
        background: params.background,
        light: params.light,
        revision: 0,
    }
}

fn add_window(graph: &mut SceneGraph, half: f32, index: usize, window: &WindowParams) {
    // Panes sit just proud of the wall's inner face so they render on top.
    let inset = half - SHELL_THICKNESS;
    let center_y = window.sill + window.height / 2.0;
    let half_w = window.width / 2.0;
    let half_h = window.height / 2.0;
    let pane_t = 0.02;

    let (center, extents) = match window.side {
        WallSide::North => (
            Vec3::new(window.offset, center_y, -inset),
            Vec3::new(half_w, half_h, pane_t),
        ),
        WallSide::South => (
            Vec3::new(window.offset, center_y, inset),
            Vec3::new(half_w, half_h, pane_t),
        ),
        WallSide::East => (
            Vec3::new(inset, center_y, window.offset),
            Vec3::new(pane_t, half_h, half_w),
        ),
        WallSide::West => (
            Vec3::new(-inset, center_y, window.offset),
            Vec3::new(pane_t, half_h, half_w),
        ),
    };

    graph.add_root(Node::boxed(
        format!("window/{index}"),
        center,
        extents,
        WINDOW_COLOR,
    ));
}

/// Attach a decoration group to a room and return the group's id.
///
/// The group root carries the interaction metadata; the part boxes hang under
/// it so that clicking any part walks up to the same carrier.
pub fn attach_decor(
    room: &mut Room,
    mut group: Node,
    parts: Vec<Node>,
) -> NodeId {
    debug_assert!(group.parent.is_none());
    group.name = format!("decor/{}", group.name);
    let root = room.graph.add_root(group);
    for part in parts {
        room.graph.add_child(root, part);
    }
    room.bump_revision();
    root
}
