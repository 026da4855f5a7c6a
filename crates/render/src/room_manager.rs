//! GPU buffer management for room meshes.

use std::collections::HashMap;
use wgpu::util::DeviceExt;

use crate::mesh::{mesh_room, MeshBuffers};
use flatwalk_core::RoomId;
use flatwalk_scene::Room;

/// GPU buffers for one room mesh.
pub struct RoomRenderData {
    /// Vertex buffer
    pub vertex_buffer: wgpu::Buffer,
    /// Index buffer
    pub index_buffer: wgpu::Buffer,
    /// Number of indices to draw
    pub index_count: u32,
    /// Graph revision the buffers were built from
    pub revision: u64,
}

impl RoomRenderData {
    /// Upload mesh buffers for a room.
    pub fn new(device: &wgpu::Device, mesh: &MeshBuffers, revision: u64) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Room Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Room Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            revision,
        }
    }
}

/// Caches uploaded room meshes, invalidated by graph revision.
#[derive(Default)]
pub struct RoomMeshCache {
    rooms: HashMap<RoomId, RoomRenderData>,
}

impl RoomMeshCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the render data for a room, re-meshing if its revision moved.
    pub fn get_or_mesh(&mut self, device: &wgpu::Device, room: &Room) -> &RoomRenderData {
        let stale = self
            .rooms
            .get(&room.id)
            .map(|data| data.revision != room.revision)
            .unwrap_or(true);
        if stale {
            let mesh = mesh_room(room);
            self.rooms
                .insert(room.id, RoomRenderData::new(device, &mesh, room.revision));
        }
        &self.rooms[&room.id]
    }

    /// Drop a room's buffers.
    pub fn invalidate(&mut self, room: RoomId) -> bool {
        self.rooms.remove(&room).is_some()
    }

    /// Number of cached rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
