//! Fixed camera looking at the galactic center

use glam::{Mat4, Quat, Vec3};

pub struct Camera {
    pub distance: f32,
    pub rotation: Quat,
    pub target: Vec3,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Looking at the origin from (0, 4, 10)
    pub fn new(width: u32, height: u32) -> Self {
        let start = Vec3::new(0.0, 4.0, 10.0);

        Self {
            distance: start.length(),
            rotation: Quat::from_rotation_arc(Vec3::Z, start.normalize()),
            target: Vec3::ZERO,
            aspect: width as f32 / height.max(1) as f32,
            fovy: 75.0_f32.to_radians(),
            znear: 0.1,
            zfar: 3000.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        let offset = self.rotation * Vec3::new(0.0, 0.0, self.distance);
        self.target + offset
    }

    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position());
        rotation_matrix * translation_matrix
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar)
    }

    /// View-space z of a world position; negative in front of the camera
    pub fn view_depth(&self, world: Vec3) -> f32 {
        self.view_matrix().transform_point3(world).z
    }

    /// Whether a world position lands inside the view frustum
    pub fn is_visible(&self, world: Vec3) -> bool {
        let clip = self.projection_matrix() * self.view_matrix() * world.extend(1.0);
        if clip.w <= 0.0 {
            return false;
        }
        let ndc = clip.truncate() / clip.w;
        ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0 && (0.0..=1.0).contains(&ndc.z)
    }
}
