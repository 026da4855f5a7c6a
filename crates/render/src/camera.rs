//! First-person camera with view and projection matrices.

use glam::{Mat4, Vec3};

/// Standing eye height above the floor.
pub const EYE_HEIGHT: f32 = 1.7;

/// First-person camera for walking through rooms.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Yaw rotation in radians
    pub yaw: f32,
    /// Pitch rotation in radians
    pub pitch: f32,
    /// Field of view in radians
    pub fov: f32,
    /// Aspect ratio (width/height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Camera {
    /// Create a new camera at eye height near the room edge.
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, EYE_HEIGHT, 4.0),
            yaw: -std::f32::consts::FRAC_PI_2,
            pitch: 0.0,
            fov: std::f32::consts::FRAC_PI_3, // 60 degrees
            aspect,
            near: 0.1,
            far: 200.0,
        }
    }

    /// Get the forward direction vector.
    pub fn forward(&self) -> Vec3 {
        let (yaw_sin, yaw_cos) = self.yaw.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.sin_cos();
        Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize()
    }

    /// Forward direction flattened onto the floor plane, for walking.
    pub fn walk_forward(&self) -> Vec3 {
        let (yaw_sin, yaw_cos) = self.yaw.sin_cos();
        Vec3::new(yaw_cos, 0.0, yaw_sin).normalize()
    }

    /// Get the right direction vector.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Build the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    /// Build the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Build combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update aspect ratio (call when window resizes).
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Move the camera by a direction vector, clamped inside the room.
    ///
    /// `half_size` is half the room's floor side; the camera keeps a small
    /// margin off the walls and its eye height off the floor.
    pub fn walk(&mut self, delta: Vec3, half_size: f32) {
        const WALL_MARGIN: f32 = 0.5;
        let limit = (half_size - WALL_MARGIN).max(0.0);
        self.position += delta;
        self.position.x = self.position.x.clamp(-limit, limit);
        self.position.z = self.position.z.clamp(-limit, limit);
        self.position.y = EYE_HEIGHT;
    }

    /// Rotate the camera by yaw/pitch deltas, pitch clamped short of vertical.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(
            -std::f32::consts::FRAC_PI_2 + 0.001,
            std::f32::consts::FRAC_PI_2 - 0.001,
        );
    }
}

/// Uniform data sent to GPU for camera transforms.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// View-projection matrix
    pub view_proj: [[f32; 4]; 4],
    /// Camera position in world space
    pub camera_pos: [f32; 4],
}

impl CameraUniform {
    /// Create camera uniform from camera.
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            camera_pos: [camera.position.x, camera.position.y, camera.position.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_looks_into_the_room() {
        let camera = Camera::new(16.0 / 9.0);
        let forward = camera.forward();
        assert!(forward.z < -0.9);
        assert!(forward.y.abs() < 0.01);
    }

    #[test]
    fn pitch_clamps_short_of_vertical() {
        let mut camera = Camera::new(16.0 / 9.0);
        camera.rotate(0.0, std::f32::consts::PI);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        camera.rotate(0.0, -std::f32::consts::PI * 2.0);
        assert!(camera.pitch > -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn walking_stays_inside_the_room() {
        let mut camera = Camera::new(16.0 / 9.0);
        camera.walk(Vec3::new(100.0, 0.0, -100.0), 5.0);
        assert!(camera.position.x <= 4.5);
        assert!(camera.position.z >= -4.5);
        assert!((camera.position.y - EYE_HEIGHT).abs() < 1e-6);
    }

    #[test]
    fn view_projection_matrix_is_invertible() {
        let camera = Camera::new(16.0 / 9.0);
        assert!(camera.view_projection_matrix().determinant().abs() > 0.0);
    }
}
