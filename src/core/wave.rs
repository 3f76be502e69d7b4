use super::constants::{
    WAVE_DISPERSE_AMP, WAVE_INFLUENCE_RADIUS, WAVE_RIPPLE_AMP, WAVE_RIPPLE_FREQ, WAVE_RIPPLE_SPEED,
};
use glam::Vec2;
use std::f32::consts::TAU;

/// One horizontal wave line of the river.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveLayer {
    /// Baseline as a fraction of surface height.
    pub y: f32,
    pub amp: f32,
    /// Spatial frequency in rad/px.
    pub freq: f32,
    /// Temporal speed in rad/sec.
    pub speed: f32,
    pub alpha: f32,
    pub width: f32,
}

#[rustfmt::skip]
pub const RIVER_LAYERS: [WaveLayer; 8] = [
    WaveLayer { y: 0.20, amp: 8.0, freq: 0.008, speed: 0.8, alpha: 0.15, width: 1.0 },
    WaveLayer { y: 0.25, amp: 12.0, freq: 0.012, speed: 1.2, alpha: 0.25, width: 1.5 },
    WaveLayer { y: 0.35, amp: 18.0, freq: 0.015, speed: 0.9, alpha: 0.40, width: 2.0 },
    WaveLayer { y: 0.45, amp: 25.0, freq: 0.018, speed: 1.5, alpha: 0.60, width: 2.5 },
    WaveLayer { y: 0.55, amp: 22.0, freq: 0.020, speed: 1.1, alpha: 0.50, width: 2.2 },
    WaveLayer { y: 0.65, amp: 16.0, freq: 0.016, speed: 1.3, alpha: 0.35, width: 1.8 },
    WaveLayer { y: 0.75, amp: 10.0, freq: 0.013, speed: 0.7, alpha: 0.20, width: 1.3 },
    WaveLayer { y: 0.80, amp: 6.0, freq: 0.010, speed: 0.5, alpha: 0.10, width: 0.8 },
];

impl WaveLayer {
    /// Idle height of this layer at column `x`, including the secondary noise terms.
    #[inline]
    pub fn ambient_y(&self, x: f32, t: f32, height: f32) -> f32 {
        let base = height * self.y;
        let primary = (x * self.freq + t * self.speed).sin() * self.amp;
        let noise = (x * self.freq * 2.3 + t * self.speed * 1.7).sin() * self.amp * 0.3
            + (x * self.freq * 3.1 - t * self.speed * 0.8).cos() * self.amp * 0.15;
        base + primary + noise
    }

    /// Mirrored, flattened line drawn under the main one as a reflection.
    #[inline]
    pub fn reflection_y(&self, x: f32, t: f32, height: f32) -> f32 {
        height * self.y - (x * self.freq + t * self.speed).sin() * self.amp * 0.4
    }
}

/// Concentric ripple plus dispersion added near a pressed pointer.
///
/// Influence falls linearly from 1 at the pointer to 0 at
/// `WAVE_INFLUENCE_RADIUS * intensity`; outside it the offset is exactly zero.
#[inline]
pub fn ripple_offset(point: Vec2, pointer: Vec2, t: f32, intensity: f32) -> f32 {
    let max_dist = WAVE_INFLUENCE_RADIUS * intensity;
    let dist = point.distance(pointer);
    if max_dist <= 0.0 || dist >= max_dist {
        return 0.0;
    }
    let influence = (max_dist - dist) / max_dist;
    let concentric = (dist * WAVE_RIPPLE_FREQ - t * WAVE_RIPPLE_SPEED).sin()
        * influence
        * WAVE_RIPPLE_AMP
        * intensity;
    let disperse = (dist * WAVE_RIPPLE_FREQ * 0.7 + t * WAVE_RIPPLE_SPEED * 1.3).cos()
        * influence
        * WAVE_DISPERSE_AMP
        * intensity;
    concentric + disperse
}

/// Sample a layer across the surface into `out`, one point every `step` px.
///
/// `out` is reused between frames; it is cleared and refilled in place.
#[allow(clippy::too_many_arguments)]
pub fn trace_layer(
    layer: &WaveLayer,
    width: f32,
    height: f32,
    t: f32,
    step: f32,
    pointer: Option<Vec2>,
    intensity: f32,
    out: &mut Vec<Vec2>,
) {
    out.clear();
    let step = step.max(1.0);
    let mut x = 0.0;
    while x <= width {
        let mut y = layer.ambient_y(x, t, height);
        if let Some(p) = pointer {
            y += ripple_offset(Vec2::new(x, y), p, t, intensity);
        }
        out.push(Vec2::new(x, y));
        x += step;
    }
}

/// Ring of sparkles drawn around a pressed pointer: (position, size, alpha).
pub fn pointer_sparkles(
    pointer: Vec2,
    t: f32,
    rings: usize,
    per_ring: usize,
) -> Vec<(Vec2, f32, f32)> {
    let mut out = Vec::with_capacity(rings * per_ring);
    for ring in 0..rings {
        let ring_radius = 30.0 + ring as f32 * 25.0;
        for i in 0..per_ring {
            let k = (i + ring) as f32;
            let angle = i as f32 / per_ring as f32 * TAU + t * (1.0 + ring as f32 * 0.3);
            let radius = ring_radius + (t * 3.0 + k).sin() * 8.0;
            let pos = pointer + Vec2::new(angle.cos(), angle.sin()) * radius;
            let size = 3.0 + (t * 4.0 + k).sin() * 1.5;
            let alpha = 0.7 + (t * 5.0 + k).sin() * 0.3;
            out.push((pos, size, alpha));
        }
    }
    out
}
