use crate::core::chapter::Backdrop;
use crate::core::clock::FrameClock;
use crate::core::constants::{
    CURSOR_MOVING_TIMEOUT_MS, CURSOR_TRAIL_CAP, CURSOR_TRAIL_MAX_AGE_MS, HELD_KEYS_INTENSITY,
};
use crate::core::device::PerformanceLevel;
use crate::core::field::{Field, FieldPointer};
use crate::core::keys::HeldKeys;
use crate::core::note::{DoubleTap, LoveNote};
use crate::core::sample::StrokeTracker;
use crate::core::trail::{TrailBuffer, TrailConfig};
use crate::core::wave::RIVER_LAYERS;
use crate::core::{CoreResult, Story};
use crate::render;
use glam::Vec2;
use gloo::render::{request_animation_frame, AnimationFrame};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

/// Mutable state shared between input handlers and the frame callback.
///
/// Input handlers write the latest pointer state; the frame reads whatever is
/// stored when it runs and never assumes a fresh sample per frame.
pub struct Stage {
    pub story: Story,
    pub tracker: StrokeTracker,
    pub cursor: TrailBuffer,
    pub last_move_ms: f64,
    pub ink: Option<render::InkLayer>,
    /// Keyboard bursts waiting to be applied to the field.
    pub pending_pulse: f32,
    /// Held keys swell the field while any is down.
    pub held: HeldKeys,
    pub note: LoveNote,
    pub double_tap: DoubleTap,
}

impl Stage {
    pub fn new(
        story: Story,
        tracker: StrokeTracker,
        ink: Option<render::InkLayer>,
    ) -> CoreResult<Self> {
        let cursor = TrailBuffer::new(TrailConfig {
            cap: CURSOR_TRAIL_CAP,
            max_age_ms: CURSOR_TRAIL_MAX_AGE_MS,
        })?;
        Ok(Self {
            story,
            tracker,
            cursor,
            last_move_ms: f64::NEG_INFINITY,
            ink,
            pending_pulse: 0.0,
            held: HeldKeys::default(),
            note: LoveNote::default(),
            double_tap: DoubleTap::default(),
        })
    }

    /// Drop aged trail and glow entries.
    pub fn sweep(&mut self, now_ms: f64) {
        self.cursor.sweep(now_ms);
        self.story.sweep(now_ms);
    }
}

pub struct FrameContext {
    pub canvas: web::HtmlCanvasElement,
    pub ctx: web::CanvasRenderingContext2d,
    pub stage: Rc<RefCell<Stage>>,
    pub field: Field,
    pub clock: FrameClock,
    pub perf: PerformanceLevel,
    pub wave_scratch: Vec<Vec2>,
}

impl FrameContext {
    pub fn frame(&mut self, now_ms: f64) {
        let Some(_dt) = self.clock.tick(now_ms) else {
            return;
        };
        let t = self.clock.elapsed_sec();
        let dpr = web::window().map_or(1.0, |w| w.device_pixel_ratio());
        let surface = Vec2::new(
            (self.canvas.width() as f64 / dpr) as f32,
            (self.canvas.height() as f64 / dpr) as f32,
        );

        let mut stage = self.stage.borrow_mut();
        if stage.pending_pulse > 0.0 {
            self.field.pulse(stage.pending_pulse, t);
            stage.pending_pulse = 0.0;
        }
        let pointer = stage.tracker.last_pos().map(|pos| FieldPointer {
            pos,
            pressed: stage.tracker.is_pressed(),
        });
        let mut intensity = stage.story.intensity();
        if stage.held.any() {
            intensity *= HELD_KEYS_INTENSITY;
        }
        self.field.advance(t, surface, pointer, intensity);

        render::begin(&self.ctx, surface, dpr);
        let cfg = stage.story.config();
        if cfg.backdrop == Backdrop::River {
            let pressed_at = pointer.filter(|p| p.pressed).map(|p| p.pos);
            render::paint_river(
                &self.ctx,
                &RIVER_LAYERS,
                cfg.effect_color,
                surface,
                t,
                self.perf.wave_step_px(),
                pressed_at,
                intensity,
                &mut self.wave_scratch,
            );
        }
        render::paint_field(&self.ctx, &self.field);
        render::paint_glow(&self.ctx, stage.story.glow(), cfg.effect_color, now_ms);
        if let Some(ink) = &stage.ink {
            ink.resize(self.canvas.width(), self.canvas.height(), dpr);
            ink.composite(&self.ctx);
        }
        let moving = now_ms - stage.last_move_ms < CURSOR_MOVING_TIMEOUT_MS;
        render::paint_cursor(&self.ctx, &stage.cursor, cfg.stroke_color, now_ms, moving);
    }
}

/// Running `requestAnimationFrame` loop. Dropping it cancels the pending frame.
pub struct LoopHandle {
    alive: Rc<Cell<bool>>,
    pending: Rc<RefCell<Option<AnimationFrame>>>,
}

impl LoopHandle {
    pub fn stop(&self) {
        if self.alive.replace(false) {
            log::info!("[frame] loop stopped");
        }
        self.pending.borrow_mut().take();
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let alive = Rc::new(Cell::new(true));
    let pending = Rc::new(RefCell::new(None));
    schedule(frame_ctx, alive.clone(), pending.clone());
    log::info!("[frame] loop started");
    LoopHandle { alive, pending }
}

fn schedule(
    frame_ctx: Rc<RefCell<FrameContext>>,
    alive: Rc<Cell<bool>>,
    pending: Rc<RefCell<Option<AnimationFrame>>>,
) {
    let slot = pending.clone();
    let handle = request_animation_frame(move |timestamp| {
        pending.borrow_mut().take();
        if !alive.get() {
            return;
        }
        frame_ctx.borrow_mut().frame(timestamp);
        schedule(frame_ctx, alive, pending);
    });
    *slot.borrow_mut() = Some(handle);
}
