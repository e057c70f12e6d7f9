use glam::{Mat4, Vec3};
use orbital_cloud::config::{
    CAMERA_DAMPING, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_ROTATE_SPEED,
    CAMERA_ZOOM_SPEED,
};

/// Pitch stays just short of the poles so the view basis never degenerates
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
const MIN_RADIUS: f32 = 0.5;

/// Orbit camera circling a target point, with damped rotation.
///
/// Dragging feeds angular velocity; `update` applies it once per frame and
/// bleeds off a fixed fraction, so motion glides to a stop.
pub struct OrbitCamera {
    pub target: Vec3,
    radius: f32,
    yaw: f32,
    pitch: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl OrbitCamera {
    /// Camera at `position` looking at the origin
    pub fn new(position: [f32; 3], aspect: f32) -> Self {
        let mut camera = Self {
            target: Vec3::ZERO,
            radius: 1.0,
            yaw: 0.0,
            pitch: 0.0,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            fov_y: CAMERA_FOV_DEGREES.to_radians(),
            aspect,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        };
        camera.set_position(position);
        camera
    }

    /// Move to `position`, keep looking at the target, stop any glide
    pub fn set_position(&mut self, position: [f32; 3]) {
        let offset = Vec3::from(position) - self.target;
        self.radius = offset.length().max(MIN_RADIUS);
        self.pitch = (offset.y / self.radius)
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = offset.x.atan2(offset.z);
        self.yaw_velocity = 0.0;
        self.pitch_velocity = 0.0;
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.target + self.radius * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// Mouse drag in pixels
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.yaw_velocity -= dx * CAMERA_ROTATE_SPEED;
        self.pitch_velocity += dy * CAMERA_ROTATE_SPEED;
    }

    /// Wheel lines; positive zooms in
    pub fn zoom(&mut self, lines: f32) {
        self.radius = (self.radius * CAMERA_ZOOM_SPEED.powf(-lines)).max(MIN_RADIUS);
    }

    /// Apply and damp angular velocity (once per frame)
    pub fn update(&mut self) {
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw_velocity *= 1.0 - CAMERA_DAMPING;
        self.pitch_velocity *= 1.0 - CAMERA_DAMPING;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect.max(1e-6), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
