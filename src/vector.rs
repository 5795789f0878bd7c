/*
 * Vector Helpers Module
 *
 * Small 2D helpers shared by the boid update:
 * - Heading <-> velocity conversion in screen space, where "up" on screen is
 *   decreasing y, so the vertical component is negated in both directions
 * - Rescaling a vector to a fixed magnitude, refusing zero-length input
 * - A running arithmetic mean that is updated one sample at a time
 */

use nannou::prelude::{vec2, Vec2};

// Velocity of magnitude `speed` pointing along `heading` (screen space)
#[inline]
pub fn velocity_from_heading(heading: f32, speed: f32) -> Vec2 {
    vec2(speed * heading.cos(), -speed * heading.sin())
}

// Heading angle of a screen-space velocity
#[inline]
pub fn heading_of(velocity: Vec2) -> f32 {
    (-velocity.y).atan2(velocity.x)
}

// Rescale to `magnitude`, or None when the input has no direction
#[inline]
pub fn scaled_to(v: Vec2, magnitude: f32) -> Option<Vec2> {
    let length = v.length();
    if length > 0.0 && length.is_finite() {
        Some(v * (magnitude / length))
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunningMean {
    mean: Vec2,
    count: usize,
}

impl RunningMean {
    pub fn new() -> Self {
        Self::default()
    }

    // mean_k = mean_{k-1} + (x_k - mean_{k-1}) / k
    #[inline]
    pub fn push(&mut self, sample: Vec2) {
        self.count += 1;
        self.mean += (sample - self.mean) / self.count as f32;
    }

    pub fn mean(&self) -> Option<Vec2> {
        (self.count > 0).then_some(self.mean)
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn screen_up_is_negative_y() {
        let v = velocity_from_heading(FRAC_PI_2, 2.0);
        assert!(close(v, vec2(0.0, -2.0)), "got {v:?}");
        assert!((heading_of(v) - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn heading_roundtrip_keeps_speed() {
        for i in 0..16 {
            let heading = -PI + i as f32 * (2.0 * PI / 16.0) + 0.1;
            let v = velocity_from_heading(heading, 3.0);
            assert!((v.length() - 3.0).abs() < 1e-5);
            let back = velocity_from_heading(heading_of(v), 3.0);
            assert!(close(v, back));
        }
    }

    #[test]
    fn scaling_zero_vector_is_refused() {
        assert_eq!(scaled_to(Vec2::ZERO, 3.0), None);
        let scaled = scaled_to(vec2(3.0, 4.0), 10.0).unwrap();
        assert!(close(scaled, vec2(6.0, 8.0)));
    }

    #[test]
    fn running_mean_matches_arithmetic_mean() {
        let samples = [vec2(1.0, 2.0), vec2(-4.0, 8.0), vec2(10.0, -3.0), vec2(0.5, 0.5)];
        let mut mean = RunningMean::new();
        assert_eq!(mean.mean(), None);
        for (k, sample) in samples.iter().enumerate() {
            mean.push(*sample);
            let total = samples[..=k].iter().fold(Vec2::ZERO, |acc, s| acc + *s);
            let expected = total / (k + 1) as f32;
            assert!(close(mean.mean().unwrap(), expected));
        }
        assert_eq!(mean.count(), 4);
    }
}
