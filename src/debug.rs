/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct with the frame statistics shown in
 * the overlay and the control panel:
 * - FPS (frames per second)
 * - Frame time
 * - Simulation ticks run this frame and in total
 */

use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks_this_frame: u32,
    pub total_ticks: u64,
}

impl DebugInfo {
    pub fn lines(&self, boids: usize) -> [String; 5] {
        [
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Ticks this frame: {}", self.ticks_this_frame),
            format!("Total ticks: {}", self.total_ticks),
            format!("Boids: {}", boids),
        ]
    }
}
