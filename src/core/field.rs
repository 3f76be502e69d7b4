use super::constants::{FIELD_FALLOFF_RADIUS, FIELD_PUSH_STRENGTH};
use super::error::{CoreError, CoreResult};
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Straight RGBA colour; alpha in 0..1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.a.clamp(0.0, 1.0)
        )
    }
}

/// How shapes are spread over the surface at mount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Layout {
    /// Uniform random positions; ambient motion drifts with the flow vector.
    Scatter,
    /// Flattened galactic spiral around the surface centre, rotating slowly.
    Spiral { turns: f32, spin_per_sec: f32 },
}

/// Shape of the pointer's influence on nearby shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FalloffKind {
    /// Push radially away from the pointer.
    Push,
    /// Radial oscillation travelling outward from the pointer.
    Ripple { freq: f32, speed: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Falloff {
    pub kind: FalloffKind,
    pub radius: f32,
    pub strength: f32,
}

impl Falloff {
    /// Linear weight in [0, 1]: 1 at the pointer, 0 at and beyond the radius.
    #[inline]
    pub fn weight(&self, distance: f32, intensity: f32) -> f32 {
        let r = self.radius * intensity.max(0.0);
        if r <= 0.0 || distance >= r {
            return 0.0;
        }
        (r - distance) / r
    }
}

impl Default for Falloff {
    fn default() -> Self {
        Self {
            kind: FalloffKind::Push,
            radius: FIELD_FALLOFF_RADIUS,
            strength: FIELD_PUSH_STRENGTH,
        }
    }
}

/// Strategy struct describing one interactive animated field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub name: &'static str,
    pub palette: Vec<Rgba>,
    pub shape_count: usize,
    /// Ambient drift in px/sec; positions wrap at the surface edges.
    pub flow: Vec2,
    pub layout: Layout,
    /// Wobble amplitude range in px.
    pub wobble: (f32, f32),
    /// Wobble angular frequency range in rad/sec.
    pub frequency: (f32, f32),
    /// Shape radius range in px.
    pub size: (f32, f32),
    pub falloff: Falloff,
}

impl FieldConfig {
    pub fn river() -> Self {
        Self {
            name: "river",
            palette: vec![
                Rgba::new(59, 130, 246, 0.8),
                Rgba::new(96, 165, 250, 0.6),
                Rgba::new(147, 197, 253, 0.4),
            ],
            shape_count: 150,
            flow: Vec2::new(30.0, 6.0),
            layout: Layout::Scatter,
            wobble: (4.0, 14.0),
            frequency: (0.4, 1.4),
            size: (1.0, 4.0),
            falloff: Falloff::default(),
        }
    }

    pub fn ocean() -> Self {
        Self {
            name: "ocean",
            palette: vec![
                Rgba::new(34, 197, 94, 0.8),
                Rgba::new(74, 222, 128, 0.6),
                Rgba::new(134, 239, 172, 0.4),
            ],
            shape_count: 200,
            flow: Vec2::new(12.0, 18.0),
            ..Self::river()
        }
    }

    pub fn waterfall() -> Self {
        Self {
            name: "waterfall",
            palette: vec![
                Rgba::new(168, 85, 247, 0.8),
                Rgba::new(196, 181, 253, 0.6),
                Rgba::new(221, 214, 254, 0.4),
            ],
            shape_count: 180,
            flow: Vec2::new(0.0, 48.0),
            ..Self::river()
        }
    }

    /// Soft pink motes drifting upward; the first chapter's backdrop.
    pub fn love() -> Self {
        Self {
            name: "love",
            palette: vec![
                Rgba::new(236, 72, 153, 0.7),
                Rgba::new(255, 105, 180, 0.6),
                Rgba::new(249, 168, 212, 0.5),
            ],
            shape_count: 90,
            flow: Vec2::new(0.0, -12.0),
            layout: Layout::Scatter,
            wobble: (6.0, 20.0),
            frequency: (0.3, 1.0),
            size: (2.0, 5.0),
            falloff: Falloff {
                kind: FalloffKind::Ripple {
                    freq: 0.05,
                    speed: 3.0,
                },
                radius: FIELD_FALLOFF_RADIUS,
                strength: 20.0,
            },
        }
    }

    pub fn engagement() -> Self {
        Self {
            name: "engagement",
            palette: vec![
                Rgba::new(34, 197, 94, 0.7),
                Rgba::new(74, 222, 128, 0.6),
                Rgba::new(251, 191, 36, 0.5),
            ],
            shape_count: 120,
            flow: Vec2::new(4.0, -8.0),
            ..Self::love()
        }
    }

    pub fn galaxy() -> Self {
        Self {
            name: "galaxy",
            palette: vec![
                Rgba::new(251, 191, 36, 0.8),
                Rgba::new(252, 211, 77, 0.6),
                Rgba::new(249, 168, 212, 0.5),
            ],
            shape_count: 3000,
            flow: Vec2::ZERO,
            layout: Layout::Spiral {
                turns: 2.0,
                spin_per_sec: 0.1,
            },
            wobble: (0.0, 2.0),
            frequency: (0.2, 0.6),
            size: (0.5, 1.5),
            falloff: Falloff {
                kind: FalloffKind::Push,
                radius: FIELD_FALLOFF_RADIUS,
                strength: 25.0,
            },
        }
    }

    /// Sparks that burst outward from the centre on key presses.
    pub fn keyboard() -> Self {
        Self {
            name: "keyboard",
            palette: vec![Rgba::new(255, 255, 255, 0.7), Rgba::new(236, 72, 153, 0.6)],
            shape_count: 60,
            flow: Vec2::ZERO,
            ..Self::love()
        }
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        let cfg = match name {
            "river" => Self::river(),
            "ocean" => Self::ocean(),
            "waterfall" => Self::waterfall(),
            "love" => Self::love(),
            "engagement" => Self::engagement(),
            "galaxy" => Self::galaxy(),
            "keyboard" => Self::keyboard(),
            _ => return None,
        };
        Some(cfg)
    }

    /// Copy with the shape count divided by `divisor` (at least one shape).
    pub fn thinned(&self, divisor: usize) -> Self {
        Self {
            shape_count: (self.shape_count / divisor.max(1)).max(1),
            ..self.clone()
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.palette.is_empty() {
            return Err(CoreError::EmptyPalette);
        }
        if self.shape_count == 0 {
            return Err(CoreError::ZeroCapacity);
        }
        Ok(())
    }
}

/// Fixed-size per-shape buffers indexed by shape id.
///
/// Descriptor columns are generated once at mount; `pos` and
/// `glow` are overwritten in place every frame.
#[derive(Clone, Debug, Default)]
pub struct ShapeArena {
    /// Base position normalised to the surface (0..1), or (angle, radius) for spirals.
    pub base: Vec<Vec2>,
    pub amp: Vec<f32>,
    pub freq: Vec<f32>,
    pub phase: Vec<f32>,
    pub size: Vec<f32>,
    pub color: Vec<u8>,
    pub pos: Vec<Vec2>,
    /// Pointer influence this frame, 0..1.
    pub glow: Vec<f32>,
}

impl ShapeArena {
    #[inline]
    pub fn len(&self) -> usize {
        self.base.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }
}

/// Pointer state seen by the field on a given frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldPointer {
    pub pos: Vec2,
    pub pressed: bool,
}

/// One generic interactive animated field.
pub struct Field {
    config: FieldConfig,
    shapes: ShapeArena,
    burst: f32,
    burst_t: f32,
}

impl Field {
    pub fn new(config: FieldConfig, seed: u64) -> CoreResult<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let n = config.shape_count;
        let mut shapes = ShapeArena {
            base: Vec::with_capacity(n),
            amp: Vec::with_capacity(n),
            freq: Vec::with_capacity(n),
            phase: Vec::with_capacity(n),
            size: Vec::with_capacity(n),
            color: Vec::with_capacity(n),
            pos: vec![Vec2::ZERO; n],
            glow: vec![0.0; n],
        };
        for i in 0..n {
            let base = match config.layout {
                Layout::Scatter => Vec2::new(rng.gen::<f32>(), rng.gen::<f32>()),
                Layout::Spiral { turns, .. } => {
                    let along = i as f32 / n as f32;
                    let angle = along * TAU * turns;
                    let radius = along * 0.8 + rng.gen::<f32>() * 0.2;
                    Vec2::new(angle, radius)
                }
            };
            shapes.base.push(base);
            shapes.amp.push(lerp_range(config.wobble, rng.gen()));
            shapes.freq.push(lerp_range(config.frequency, rng.gen()));
            shapes.phase.push(rng.gen::<f32>() * TAU);
            shapes.size.push(lerp_range(config.size, rng.gen()));
            shapes.color.push(rng.gen_range(0..config.palette.len()) as u8);
        }
        log::debug!("[field] built '{}' with {} shapes", config.name, n);
        Ok(Self {
            config,
            shapes,
            burst: 0.0,
            burst_t: 0.0,
        })
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[inline]
    pub fn shapes(&self) -> &ShapeArena {
        &self.shapes
    }

    #[inline]
    pub fn color_of(&self, i: usize) -> Rgba {
        self.config.palette[self.shapes.color[i] as usize]
    }

    /// Start an outward burst from the centre (keyboard sparks). Decays over ~1s.
    pub fn pulse(&mut self, amount: f32, t: f32) {
        self.burst = (self.current_burst(t) + amount).min(2.0);
        self.burst_t = t;
    }

    #[inline]
    fn current_burst(&self, t: f32) -> f32 {
        if self.burst <= 0.0 {
            return 0.0;
        }
        self.burst * (-(t - self.burst_t).max(0.0) * 3.0).exp()
    }

    /// Recompute every shape for elapsed time `t` on a `surface` sized canvas.
    ///
    /// Positions are a closed-form function of `t`, the mount-time descriptors,
    /// the pointer and `intensity`; nothing integrates across frames.
    pub fn advance(
        &mut self,
        t: f32,
        surface: Vec2,
        pointer: Option<FieldPointer>,
        intensity: f32,
    ) {
        let burst = self.current_burst(t);
        let center = surface * 0.5;
        let s = &mut self.shapes;
        let active = pointer.filter(|p| p.pressed);
        for i in 0..s.base.len() {
            let wobble_t = t * s.freq[i] + s.phase[i];
            let wobble = Vec2::new(wobble_t.sin(), (wobble_t * 0.8).cos() * 0.6) * s.amp[i];
            let mut p = match self.config.layout {
                Layout::Scatter => {
                    let start = s.base[i] * surface;
                    wrap(start + self.config.flow * t, surface) + wobble
                }
                Layout::Spiral { spin_per_sec, .. } => {
                    let angle = s.base[i].x + t * spin_per_sec;
                    let radius = s.base[i].y * surface.min_element() * 0.5;
                    let tilt = 0.6 + (t * 0.1).sin() * 0.1;
                    let orbit = Vec2::new(angle.cos() * radius, angle.sin() * radius * tilt);
                    center + orbit + wobble
                }
            };
            if burst > 0.0 {
                let dir = (p - center).normalize_or_zero();
                p += dir * burst * 60.0 * (0.5 + s.amp[i] / self.config.wobble.1.max(1.0));
            }
            let mut glow = 0.0;
            if let Some(ptr) = active {
                let delta = p - ptr.pos;
                let d = delta.length();
                let k = self.config.falloff.weight(d, intensity);
                if k > 0.0 {
                    let dir = if d > 1e-4 { delta / d } else { Vec2::X };
                    let magnitude = match self.config.falloff.kind {
                        FalloffKind::Push => self.config.falloff.strength * k * intensity,
                        FalloffKind::Ripple { freq, speed } => {
                            (d * freq - t * speed).sin()
                                * self.config.falloff.strength
                                * k
                                * intensity
                        }
                    };
                    p += dir * magnitude;
                    glow = k;
                }
            }
            s.pos[i] = p;
            s.glow[i] = glow;
        }
    }
}

#[inline]
fn lerp_range(range: (f32, f32), u: f32) -> f32 {
    range.0 + (range.1 - range.0) * u
}

#[inline]
fn wrap(p: Vec2, surface: Vec2) -> Vec2 {
    Vec2::new(
        p.x.rem_euclid(surface.x.max(1.0)),
        p.y.rem_euclid(surface.y.max(1.0)),
    )
}
