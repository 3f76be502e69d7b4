use super::constants::{FIXED_STEP_SEC, MAX_STEP_SEC};

/// How the elapsed-time accumulator advances each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum StepMode {
    /// Same step every frame regardless of wall time.
    Fixed(f32),
    /// Wall-clock delta since the previous accepted frame, clamped.
    #[default]
    Measured,
}

/// Elapsed-time accumulator for one animation loop.
///
/// `tick` is fed the display timestamp; it returns the step to apply, or `None`
/// when a frame-rate cap says this frame should be skipped.
#[derive(Clone, Debug)]
pub struct FrameClock {
    mode: StepMode,
    min_interval_ms: f64,
    last_ms: Option<f64>,
    elapsed_sec: f32,
    frames: u64,
}

impl FrameClock {
    pub fn new(mode: StepMode) -> Self {
        Self {
            mode,
            min_interval_ms: 0.0,
            last_ms: None,
            elapsed_sec: 0.0,
            frames: 0,
        }
    }

    pub fn fixed() -> Self {
        Self::new(StepMode::Fixed(FIXED_STEP_SEC))
    }

    /// Skip frames arriving faster than `hz`. Zero or negative removes the cap.
    pub fn with_max_rate(mut self, hz: f32) -> Self {
        self.min_interval_ms = if hz > 0.0 { 1000.0 / hz as f64 } else { 0.0 };
        self
    }

    #[inline]
    pub fn elapsed_sec(&self) -> f32 {
        self.elapsed_sec
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        let dt_ms = match self.last_ms {
            Some(last) => {
                let dt = now_ms - last;
                // small tolerance so a 60Hz display is not starved by a 30Hz cap
                if dt + 1.0 < self.min_interval_ms {
                    return None;
                }
                dt.max(0.0)
            }
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        let step = match self.mode {
            StepMode::Fixed(s) => s,
            StepMode::Measured => ((dt_ms / 1000.0) as f32).min(MAX_STEP_SEC),
        };
        self.elapsed_sec += step;
        self.frames += 1;
        Some(step)
    }
}
