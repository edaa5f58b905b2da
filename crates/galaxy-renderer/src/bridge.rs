//! Contract between the simulation core and a graphics backend

/// A backend that draws the galaxy. The core hands it colors once and a fresh
/// position buffer whenever the integrator publishes one; both buffers use
/// the same flat stride-3 layout and particle count.
pub trait RenderBridge {
    /// Per-star RGB, set once before the first frame
    fn set_colors(&mut self, colors: &[f32]);

    /// Decorative stars that never move
    fn set_background(&mut self, positions: &[f32]);

    /// Replace the star positions with a newer snapshot
    fn update_positions(&mut self, positions: &[f32]);

    /// Draw one frame with whatever positions were last supplied
    fn render(&mut self);
}
