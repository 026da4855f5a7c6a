#![warn(missing_docs)]
//! Scene graph, rooms, and the click-to-health interaction core.
//!
//! Rooms are arenas of nodes ([`node::SceneGraph`]) built deterministically
//! from per-room parameters. A [`session::Session`] owns the room catalog,
//! the health model, cooldown tracking, and transient feedback effects, and
//! advances all of them from a single cooperative clock.

pub mod catalog;
pub mod cooldown;
pub mod node;
pub mod pulse;
pub mod raycast;
pub mod resolver;
pub mod room;
pub mod session;

pub use catalog::SceneCatalog;
pub use cooldown::CooldownTracker;
pub use node::{Node, NodeId, NodeKey, SceneGraph, Shape, MAX_WALK_DEPTH};
pub use pulse::{PulseState, PulseSystem, PULSE_PHASE, PULSE_SCALE};
pub use raycast::{screen_to_ray, Aabb, Ray};
pub use resolver::{pick, resolve, Hit, PointerHit};
pub use room::{build_room, LightParams, Room, RoomParams, WallSide, WindowParams};
pub use session::{ClickOutcome, Popup, Session, POPUP_LIFETIME};
