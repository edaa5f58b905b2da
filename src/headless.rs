//! Render bridge without a window
//!
//! Keeps the buffers a GPU backend would upload and periodically reports what
//! the frame would show: how many stars land inside the view frustum, how
//! large their sprites are and how far the spiral has drifted inwards.

use galaxy_physics::mean_radius;
use galaxy_renderer::{interleave, Camera, PointSprite, RenderBridge, StarVertex};
use glam::Vec3;

pub struct FrameReport {
    pub visible: usize,
    pub background_visible: usize,
    pub mean_point_size: f32,
    pub mean_radius: f32,
}

pub struct HeadlessBridge {
    camera: Camera,
    sprite: PointSprite,
    positions: Vec<f32>,
    colors: Vec<f32>,
    background: Vec<f32>,
    frames_rendered: u64,
    report_interval: u64,
}

impl HeadlessBridge {
    pub fn new(width: u32, height: u32, pixel_ratio: f32, report_interval: u64) -> Self {
        Self {
            camera: Camera::new(width, height),
            sprite: PointSprite::new(pixel_ratio),
            positions: Vec::new(),
            colors: Vec::new(),
            background: Vec::new(),
            frames_rendered: 0,
            report_interval: report_interval.max(1),
        }
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// What a GPU backend would upload for the star layer
    pub fn vertices(&self) -> Vec<StarVertex> {
        interleave(&self.positions, &self.colors)
    }

    pub fn report(&self) -> FrameReport {
        let mut visible = 0;
        let mut total_size = 0.0;
        for p in self.positions.chunks_exact(3) {
            let world = Vec3::from_slice(p);
            if self.camera.is_visible(world) {
                visible += 1;
                total_size += self.sprite.size_at(self.camera.view_depth(world));
            }
        }

        let background_visible = self
            .background
            .chunks_exact(3)
            .filter(|p| self.camera.is_visible(Vec3::from_slice(p)))
            .count();

        FrameReport {
            visible,
            background_visible,
            mean_point_size: if visible > 0 {
                total_size / visible as f32
            } else {
                0.0
            },
            mean_radius: mean_radius(&self.positions),
        }
    }
}

impl RenderBridge for HeadlessBridge {
    fn set_colors(&mut self, colors: &[f32]) {
        self.colors = colors.to_vec();
    }

    fn set_background(&mut self, positions: &[f32]) {
        self.background = positions.to_vec();
    }

    fn update_positions(&mut self, positions: &[f32]) {
        self.positions.clear();
        self.positions.extend_from_slice(positions);
    }

    fn render(&mut self) {
        self.frames_rendered += 1;

        if self.frames_rendered % self.report_interval == 0 {
            let report = self.report();
            log::info!(
                "Frame {}: {} stars visible ({} background), mean sprite {:.2}px, mean radius {:.3}",
                self.frames_rendered,
                report.visible,
                report.background_visible,
                report.mean_point_size,
                report.mean_radius
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_keep_colors() {
        let mut bridge = HeadlessBridge::new(800, 600, 1.0, 60);
        bridge.set_colors(&[0.9, 0.3, 0.7]);
        bridge.update_positions(&[1.0, 0.0, 0.0]);
        bridge.update_positions(&[2.0, 0.0, 0.0]);

        let vertices = bridge.vertices();
        assert_eq!(vertices.len(), 1);
        assert_eq!(vertices[0].position, [2.0, 0.0, 0.0]);
        assert_eq!(vertices[0].color, [0.9, 0.3, 0.7]);
    }

    #[test]
    fn test_report_counts_stars_in_view() {
        let mut bridge = HeadlessBridge::new(800, 600, 1.0, 60);
        bridge.set_colors(&[1.0; 9]);
        // Origin is in view, (0, 8, 20) is behind the camera and
        // (500, 0, 0) is far outside the field of view
        bridge.update_positions(&[0.0, 0.0, 0.0, 0.0, 8.0, 20.0, 500.0, 0.0, 0.0]);

        let report = bridge.report();
        assert_eq!(report.visible, 1);
        assert!((report.mean_point_size - 70.0 / 116.0_f32.sqrt()).abs() < 1e-3);
        assert!(report.mean_radius > 0.0);
    }

    #[test]
    fn test_report_counts_background_in_view() {
        let mut bridge = HeadlessBridge::new(800, 600, 1.0, 60);
        // Straight ahead of the camera at shell distance, and directly behind it
        bridge.set_background(&[0.0, -160.0, -400.0, 0.0, 160.0, 400.0]);

        let report = bridge.report();
        assert_eq!(report.background_visible, 1);
        assert_eq!(report.visible, 0);
    }
}
