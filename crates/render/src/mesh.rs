//! Room meshing: turns a room's box nodes into flat-colored triangles.

use glam::{Mat4, Vec3};

use flatwalk_scene::{Room, Shape};

/// Vertex format for room geometry.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// World-space normal.
    pub normal: [f32; 3],
    /// Flat color (linear RGB).
    pub color: [f32; 3],
}

/// CPU-side mesh buffers ready for GPU upload.
#[derive(Debug, Default, Clone)]
pub struct MeshBuffers {
    /// Vertex data.
    pub vertices: Vec<ColorVertex>,
    /// Triangle indices.
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Triangle count.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

// Unit cube faces as (normal, four corners), CCW when viewed from outside.
const FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
    // +X
    (
        [1.0, 0.0, 0.0],
        [
            [1.0, -1.0, -1.0],
            [1.0, 1.0, -1.0],
            [1.0, 1.0, 1.0],
            [1.0, -1.0, 1.0],
        ],
    ),
    // -X
    (
        [-1.0, 0.0, 0.0],
        [
            [-1.0, -1.0, 1.0],
            [-1.0, 1.0, 1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, -1.0],
        ],
    ),
    // +Y
    (
        [0.0, 1.0, 0.0],
        [
            [-1.0, 1.0, -1.0],
            [-1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, -1.0],
        ],
    ),
    // -Y
    (
        [0.0, -1.0, 0.0],
        [
            [-1.0, -1.0, 1.0],
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [1.0, -1.0, 1.0],
        ],
    ),
    // +Z
    (
        [0.0, 0.0, 1.0],
        [
            [-1.0, -1.0, 1.0],
            [1.0, -1.0, 1.0],
            [1.0, 1.0, 1.0],
            [-1.0, 1.0, 1.0],
        ],
    ),
    // -Z
    (
        [0.0, 0.0, -1.0],
        [
            [1.0, -1.0, -1.0],
            [-1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [1.0, 1.0, -1.0],
        ],
    ),
];

/// Append one transformed box to the buffers.
fn mesh_box(buffers: &mut MeshBuffers, half_extents: Vec3, transform: &Mat4, color: [f32; 3]) {
    let normal_matrix = transform.inverse().transpose();
    for (normal, corners) in FACES {
        let base = buffers.vertices.len() as u32;
        let world_normal = normal_matrix
            .transform_vector3(Vec3::from(normal))
            .normalize_or_zero();
        for corner in corners {
            let local = Vec3::from(corner) * half_extents;
            let world = transform.transform_point3(local);
            buffers.vertices.push(ColorVertex {
                position: world.to_array(),
                normal: world_normal.to_array(),
                color,
            });
        }
        buffers
            .indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Mesh every shaped node in the room at its current world transform.
///
/// Pulsing decorations change node scale, so callers re-mesh whenever the
/// room revision moves.
pub fn mesh_room(room: &Room) -> MeshBuffers {
    let mut buffers = MeshBuffers::default();
    for (id, node) in room.graph.iter() {
        let Some(Shape::Box { half_extents }) = node.shape else {
            continue;
        };
        let transform = room.graph.world_transform(id);
        mesh_box(&mut buffers, half_extents, &transform, node.color);
    }
    buffers
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatwalk_scene::{build_room, LightParams, RoomParams};
    use flatwalk_core::RoomId;

    fn small_room() -> Room {
        build_room(&RoomParams {
            id: RoomId::Bedroom,
            size: 10.0,
            floor_color: [0.5; 3],
            wall_color: [0.9; 3],
            background: [0.1; 3],
            light: LightParams::default(),
            windows: Vec::new(),
        })
    }

    #[test]
    fn room_shell_meshes_twelve_triangles_per_box() {
        let room = small_room();
        let buffers = mesh_room(&room);
        // floor + ceiling + 4 walls, 12 triangles each
        assert_eq!(buffers.triangle_count(), 6 * 12);
        assert_eq!(buffers.vertices.len(), 6 * 24);
    }

    #[test]
    fn floor_vertices_carry_floor_color() {
        let room = small_room();
        let buffers = mesh_room(&room);
        assert!(buffers
            .vertices
            .iter()
            .any(|v| v.color == [0.5, 0.5, 0.5]));
    }
}
