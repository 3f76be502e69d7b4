use super::constants::{COUNT_THROTTLE_MS, MIN_QUALIFYING_PRESSURE};
use super::error::{CoreError, CoreResult};
use super::sample::PointerSample;

/// Receiver for progress reports from a [`ProgressAccumulator`].
pub trait ProgressObserver {
    /// Called with the new fraction every time the counter changes.
    fn on_progress(&mut self, fraction: f32);
    /// Called once, when the fraction first reaches 1.0.
    fn on_complete(&mut self);
}

impl ProgressObserver for () {
    fn on_progress(&mut self, _fraction: f32) {}
    fn on_complete(&mut self) {}
}

/// Adapts a pair of closures into an observer.
pub struct FnObserver<P, C>
where
    P: FnMut(f32),
    C: FnMut(),
{
    pub on_progress: P,
    pub on_complete: C,
}

impl<P, C> ProgressObserver for FnObserver<P, C>
where
    P: FnMut(f32),
    C: FnMut(),
{
    fn on_progress(&mut self, fraction: f32) {
        (self.on_progress)(fraction)
    }
    fn on_complete(&mut self) {
        (self.on_complete)()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccumulatorConfig {
    pub target: u32,
    pub throttle_ms: f64,
    pub min_pressure: f32,
}

impl AccumulatorConfig {
    pub fn with_target(target: u32) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            target: 100,
            throttle_ms: COUNT_THROTTLE_MS,
            min_pressure: MIN_QUALIFYING_PRESSURE,
        }
    }
}

/// Result of offering one sample to the accumulator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CountOutcome {
    /// Pressure too low to qualify.
    BelowThreshold,
    /// Qualifying, but inside the throttle window of the previous count.
    Throttled,
    Counted { count: u32, fraction: f32 },
    /// This sample brought the counter to the target.
    Completed { count: u32 },
    /// Already complete; the counter is capped.
    Saturated,
}

impl CountOutcome {
    #[inline]
    pub fn counted(&self) -> bool {
        matches!(
            self,
            CountOutcome::Counted { .. } | CountOutcome::Completed { .. }
        )
    }
}

/// Counts qualifying samples against a fixed target.
///
/// The throttle gate only limits counting: callers must still draw every
/// sample so strokes stay continuous while the counter lags behind.
#[derive(Clone, Debug)]
pub struct ProgressAccumulator {
    config: AccumulatorConfig,
    count: u32,
    last_counted_ms: Option<f64>,
    completed: bool,
}

impl ProgressAccumulator {
    pub fn new(config: AccumulatorConfig) -> CoreResult<Self> {
        if config.target == 0 {
            return Err(CoreError::ZeroTarget);
        }
        Ok(Self {
            config,
            count: 0,
            last_counted_ms: None,
            completed: false,
        })
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn target(&self) -> u32 {
        self.config.target
    }

    /// Whether `pressure` is high enough to count at all.
    #[inline]
    pub fn qualifies(&self, pressure: f32) -> bool {
        pressure >= self.config.min_pressure
    }

    #[inline]
    pub fn fraction(&self) -> f32 {
        (self.count as f32 / self.config.target as f32).min(1.0)
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn record(
        &mut self,
        sample: &PointerSample,
        observer: &mut impl ProgressObserver,
    ) -> CountOutcome {
        if !self.qualifies(sample.pressure) {
            return CountOutcome::BelowThreshold;
        }
        if self.completed {
            return CountOutcome::Saturated;
        }
        if let Some(last) = self.last_counted_ms {
            if sample.timestamp_ms - last < self.config.throttle_ms {
                return CountOutcome::Throttled;
            }
        }
        self.last_counted_ms = Some(sample.timestamp_ms);
        self.count += 1;
        let fraction = self.fraction();
        log::debug!(
            "[progress] {}/{} ({:.2})",
            self.count,
            self.config.target,
            fraction
        );
        observer.on_progress(fraction);
        if self.count >= self.config.target {
            self.completed = true;
            log::info!("[progress] target of {} reached", self.config.target);
            observer.on_complete();
            return CountOutcome::Completed { count: self.count };
        }
        CountOutcome::Counted {
            count: self.count,
            fraction,
        }
    }
}
