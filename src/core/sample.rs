use super::constants::{
    END_OF_STROKE_PRESSURE, MIN_QUALIFYING_PRESSURE, PRESSURE_MOUSE_DOWN, PRESSURE_MOUSE_MOVE,
    PRESSURE_RAMP_PER_MS, PRESSURE_TOUCH_MOVE, PRESSURE_TOUCH_START,
};
use glam::Vec2;

/// Device class that produced a raw input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    Mouse,
    Touch,
}

/// One normalized pointer sample in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub pos: Vec2,
    pub pressure: f32,
    pub timestamp_ms: f64,
}

impl PointerSample {
    pub fn new(x: f32, y: f32, pressure: f32, timestamp_ms: f64) -> Self {
        Self {
            pos: Vec2::new(x, y),
            pressure,
            timestamp_ms,
        }
    }

    /// Recognises the legacy `(-1, -1, -1)` encoding of "stroke ended".
    #[inline]
    pub fn is_end_sentinel(&self) -> bool {
        self.pressure == END_OF_STROKE_PRESSURE
    }

    /// Converts a raw triple into a stroke event, mapping the sentinel to `End`.
    pub fn into_event(self) -> StrokeEvent {
        if self.is_end_sentinel() {
            StrokeEvent::End
        } else {
            StrokeEvent::Sample(self)
        }
    }
}

/// What consumers receive from the input normalizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrokeEvent {
    Sample(PointerSample),
    /// The press was released; consumers drawing segments reset their last point.
    End,
}

/// How a synthetic pressure value is produced for a sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PressureMode {
    /// Fixed constant per source and phase (down vs move).
    #[default]
    PerSource,
    /// Same constant for every sample.
    Constant(f32),
    /// Grows linearly with time since the press started, capped at 1.0.
    Ramp { per_ms: f32, floor: f32 },
    /// Caller passes the pressure with each raw event; falls back to `PerSource`.
    Supplied,
}

impl PressureMode {
    pub fn ramp() -> Self {
        PressureMode::Ramp {
            per_ms: PRESSURE_RAMP_PER_MS,
            floor: MIN_QUALIFYING_PRESSURE,
        }
    }
}

/// Raw device event after coordinates have been extracted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawInput {
    Down {
        pos: Vec2,
        source: InputSource,
        pressure: Option<f32>,
    },
    Move {
        pos: Vec2,
        source: InputSource,
        pressure: Option<f32>,
    },
    Up,
}

/// Press-state machine that turns raw events into stroke events.
///
/// Moves are only reported while a press is active. A press always yields a
/// sample immediately so a tap with no movement still counts.
#[derive(Clone, Debug, Default)]
pub struct StrokeTracker {
    mode: PressureMode,
    pressed: bool,
    press_started_ms: f64,
    last_pos: Option<Vec2>,
}

impl StrokeTracker {
    pub fn new(mode: PressureMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Latest position seen, pressed or not.
    #[inline]
    pub fn last_pos(&self) -> Option<Vec2> {
        self.last_pos
    }

    pub fn handle(&mut self, raw: RawInput, now_ms: f64) -> Option<StrokeEvent> {
        match raw {
            RawInput::Down {
                pos,
                source,
                pressure,
            } => {
                self.pressed = true;
                self.press_started_ms = now_ms;
                self.last_pos = Some(pos);
                let p = self.pressure_for(source, true, pressure, now_ms);
                Some(StrokeEvent::Sample(PointerSample {
                    pos,
                    pressure: p,
                    timestamp_ms: now_ms,
                }))
            }
            RawInput::Move {
                pos,
                source,
                pressure,
            } => {
                self.last_pos = Some(pos);
                if !self.pressed {
                    return None;
                }
                let p = self.pressure_for(source, false, pressure, now_ms);
                Some(StrokeEvent::Sample(PointerSample {
                    pos,
                    pressure: p,
                    timestamp_ms: now_ms,
                }))
            }
            RawInput::Up => {
                if !self.pressed {
                    return None;
                }
                self.pressed = false;
                Some(StrokeEvent::End)
            }
        }
    }

    fn pressure_for(
        &self,
        source: InputSource,
        is_down: bool,
        supplied: Option<f32>,
        now_ms: f64,
    ) -> f32 {
        match self.mode {
            PressureMode::PerSource => per_source_pressure(source, is_down),
            PressureMode::Constant(p) => p,
            PressureMode::Ramp { per_ms, floor } => {
                let held = (now_ms - self.press_started_ms).max(0.0) as f32;
                (floor + held * per_ms).clamp(0.0, 1.0)
            }
            PressureMode::Supplied => {
                supplied.map_or_else(
                    || per_source_pressure(source, is_down),
                    |p| p.clamp(0.0, 1.0),
                )
            }
        }
    }
}

#[inline]
fn per_source_pressure(source: InputSource, is_down: bool) -> f32 {
    match (source, is_down) {
        (InputSource::Mouse, true) => PRESSURE_MOUSE_DOWN,
        (InputSource::Mouse, false) => PRESSURE_MOUSE_MOVE,
        (InputSource::Touch, true) => PRESSURE_TOUCH_START,
        (InputSource::Touch, false) => PRESSURE_TOUCH_MOVE,
    }
}
