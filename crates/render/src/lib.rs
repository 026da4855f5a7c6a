#![warn(missing_docs)]
//! Rendering facade built on top of wgpu: flat-color room meshes plus an
//! egui overlay.

mod camera;
mod mesh;
mod pipeline;
mod room_manager;
mod ui;
mod window;

pub use camera::{Camera, CameraUniform, EYE_HEIGHT};
pub use mesh::{mesh_room, ColorVertex, MeshBuffers};
pub use pipeline::{RenderContext, RoomUniform, ScenePipeline};
pub use room_manager::{RoomMeshCache, RoomRenderData};
pub use ui::UiManager;
pub use window::{InputState, WindowConfig, WindowManager};
