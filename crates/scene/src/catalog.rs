//! Room catalog: owns every room and tracks which one is active.
//!
//! Rooms are built eagerly so switching is an index change, not a rebuild.
//! Decorations can be queued before their room exists in the catalog and are
//! attached on the next `process_pending` call; queue entries naming a room
//! the catalog never received are dropped with a warning.

use std::collections::HashMap;

use flatwalk_core::RoomId;
use tracing::{debug, warn};

use crate::node::{Node, NodeId};
use crate::room::{attach_decor, build_room, Room, RoomParams};

struct PendingDecor {
    room: RoomId,
    group: Node,
    parts: Vec<Node>,
}

/// Owns all rooms and the active-room cursor.
pub struct SceneCatalog {
    rooms: HashMap<RoomId, Room>,
    active: RoomId,
    pending: Vec<PendingDecor>,
}

impl SceneCatalog {
    /// Build every room up front. The first entry becomes the active room.
    ///
    /// Returns `None` when `params` is empty.
    pub fn build(params: &[RoomParams]) -> Option<Self> {
        let first = params.first()?.id;
        let mut rooms = HashMap::with_capacity(params.len());
        for p in params {
            debug!(room = %p.id, size = p.size, "building room");
            rooms.insert(p.id, build_room(p));
        }
        Some(Self {
            rooms,
            active: first,
            pending: Vec::new(),
        })
    }

    /// Identity of the active room.
    pub fn active_id(&self) -> RoomId {
        self.active
    }

    /// Borrow the active room.
    pub fn active(&self) -> &Room {
        &self.rooms[&self.active]
    }

    /// Mutably borrow the active room.
    pub fn active_mut(&mut self) -> &mut Room {
        self.rooms
            .get_mut(&self.active)
            .unwrap_or_else(|| unreachable!("active room always present"))
    }

    /// Borrow a room by id.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    /// Mutably borrow a room by id.
    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&id)
    }

    /// Switch the active room. Unknown ids are ignored with a warning so a
    /// bad switch request cannot strand the presenter without a room.
    pub fn set_active(&mut self, id: RoomId) -> bool {
        if !self.rooms.contains_key(&id) {
            warn!(room = %id, "ignoring switch to unknown room");
            return false;
        }
        self.active = id;
        true
    }

    /// Queue a decoration group for deferred attachment.
    pub fn queue_decor(&mut self, room: RoomId, group: Node, parts: Vec<Node>) {
        self.pending.push(PendingDecor { room, group, parts });
    }

    /// Attach all queued decorations whose rooms exist, dropping the rest.
    /// Returns the ids of the attached group roots.
    pub fn process_pending(&mut self) -> Vec<(RoomId, NodeId)> {
        let mut attached = Vec::new();
        for entry in self.pending.drain(..) {
            match self.rooms.get_mut(&entry.room) {
                Some(room) => {
                    let id = attach_decor(room, entry.group, entry.parts);
                    attached.push((entry.room, id));
                }
                None => {
                    warn!(room = %entry.room, "dropping decoration for unknown room");
                }
            }
        }
        attached
    }

    /// Number of decorations still waiting for attachment.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
