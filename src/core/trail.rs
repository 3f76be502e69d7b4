use super::error::{CoreError, CoreResult};
use glam::Vec2;
use smallvec::SmallVec;

/// Entry in a fading trail: where, when, and how strong.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub born_ms: f64,
    /// Pressure or intensity at creation; scales radius/opacity for glow areas.
    pub weight: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailConfig {
    pub cap: usize,
    pub max_age_ms: f64,
}

/// Bounded sequence of recent points that fade out with age.
///
/// Length never exceeds `cap`; the oldest entry is evicted on overflow. Entries
/// older than `max_age_ms` are dropped by `sweep` and are never yielded by
/// `visible`, even between sweeps.
#[derive(Clone, Debug)]
pub struct TrailBuffer {
    config: TrailConfig,
    points: SmallVec<[TrailPoint; 20]>,
}

impl TrailBuffer {
    pub fn new(config: TrailConfig) -> CoreResult<Self> {
        if config.cap == 0 {
            return Err(CoreError::ZeroCapacity);
        }
        Ok(Self {
            config,
            points: SmallVec::new(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn cap(&self) -> usize {
        self.config.cap
    }

    pub fn push(&mut self, pos: Vec2, weight: f32, now_ms: f64) {
        if self.points.len() >= self.config.cap {
            let overflow = self.points.len() + 1 - self.config.cap;
            self.points.drain(..overflow);
        }
        self.points.push(TrailPoint {
            pos,
            born_ms: now_ms,
            weight,
        });
    }

    /// Drop entries at or past the age window. Returns how many were removed.
    pub fn sweep(&mut self, now_ms: f64) -> usize {
        let before = self.points.len();
        let max_age = self.config.max_age_ms;
        self.points.retain(|p| now_ms - p.born_ms < max_age);
        before - self.points.len()
    }

    /// `1 - age/max_age`, clamped to [0, 1].
    #[inline]
    pub fn fade(&self, point: &TrailPoint, now_ms: f64) -> f32 {
        let age = (now_ms - point.born_ms).max(0.0);
        (1.0 - age / self.config.max_age_ms).clamp(0.0, 1.0) as f32
    }

    /// Live entries with their fade factor, oldest first.
    pub fn visible(&self, now_ms: f64) -> impl Iterator<Item = (&TrailPoint, f32)> + '_ {
        self.points.iter().filter_map(move |p| {
            let f = self.fade(p, now_ms);
            (f > 0.0).then_some((p, f))
        })
    }

    /// Most recent entry, if any.
    pub fn head(&self) -> Option<&TrailPoint> {
        self.points.last()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
