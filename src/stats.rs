/*
 * Frame Statistics Module
 *
 * Numbers describing the last simulated frame, shown in the control panel:
 * - FPS and frame time
 * - Particle and connection counts
 * - Pairs whose strength is still remembered
 */

use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub fps: f32,
    pub frame_time: Duration,
    pub frames: u64,
    pub particles: usize,
    pub connections: usize,
    pub visible_connections: usize,
    pub tracked_pairs: usize,
}

impl FrameStats {
    pub fn fps_from(frame_time: Duration) -> f32 {
        let secs = frame_time.as_secs_f32();
        if secs > 0.0 {
            1.0 / secs
        } else {
            0.0
        }
    }

    pub fn lines(&self) -> [String; 5] {
        [
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Particles: {}", self.particles),
            format!("Connections: {} ({} drawn)", self.connections, self.visible_connections),
            format!("Remembered pairs: {}", self.tracked_pairs),
        ]
    }
}
