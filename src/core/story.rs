use super::chapter::{glow_radius, stroke_width, ChapterConfig, ChapterMessage};
use super::constants::{GLOW_AREA_CAP, GLOW_AREA_MAX_AGE_MS, INSTRUCTION_HIDE_AT};
use super::error::CoreResult;
use super::notify::NotificationCenter;
use super::phase::{ChapterPhase, PhaseMachine};
use super::progress::{CountOutcome, ProgressAccumulator, ProgressObserver};
use super::puzzle::SecretPuzzle;
use super::sample::StrokeEvent;
use super::trail::{TrailBuffer, TrailConfig};
use glam::Vec2;
use smallvec::SmallVec;

/// Line segment to paint on the ink layer. `from == None` starts a new stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InkSegment {
    pub from: Option<Vec2>,
    pub to: Vec2,
    pub width: f32,
}

/// Everything one stroke event changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoryUpdate {
    pub ink: Option<InkSegment>,
    pub outcome: Option<CountOutcome>,
    /// Phases entered by this event, in order.
    pub entered: SmallVec<[ChapterPhase; 4]>,
    /// Set on the single event that completed the chapter.
    pub completed: bool,
    pub stroke_ended: bool,
}

struct Milestones<'a> {
    phases: &'a mut PhaseMachine,
    entered: &'a mut SmallVec<[ChapterPhase; 4]>,
    completed: &'a mut bool,
}

impl ProgressObserver for Milestones<'_> {
    fn on_progress(&mut self, fraction: f32) {
        let newly = self.phases.advance(fraction);
        self.entered.extend(newly);
    }

    fn on_complete(&mut self) {
        *self.completed = true;
    }
}

/// Per-mount state of one chapter page.
///
/// Draw output is produced for every sample; only counting is throttled.
pub struct Story {
    config: ChapterConfig,
    accumulator: ProgressAccumulator,
    phases: PhaseMachine,
    glow: TrailBuffer,
    last_ink: Option<Vec2>,
    revealed_messages: usize,
    puzzle: Option<SecretPuzzle>,
    completed_at_ms: Option<f64>,
}

impl Story {
    pub fn new(config: ChapterConfig) -> CoreResult<Self> {
        let accumulator = ProgressAccumulator::new(config.accumulator_config())?;
        let glow = TrailBuffer::new(TrailConfig {
            cap: GLOW_AREA_CAP,
            max_age_ms: GLOW_AREA_MAX_AGE_MS,
        })?;
        let phases = PhaseMachine::new(config.phase_plan());
        let puzzle = config.has_puzzle.then(SecretPuzzle::default);
        log::info!(
            "[mount] chapter {} ({}), target {}",
            config.number,
            config.mode.as_str(),
            config.required_interactions
        );
        Ok(Self {
            config,
            accumulator,
            phases,
            glow,
            last_ink: None,
            revealed_messages: 0,
            puzzle,
            completed_at_ms: None,
        })
    }

    #[inline]
    pub fn config(&self) -> &ChapterConfig {
        &self.config
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.accumulator.fraction()
    }

    #[inline]
    pub fn interactions(&self) -> u32 {
        self.accumulator.count()
    }

    #[inline]
    pub fn phase(&self) -> ChapterPhase {
        self.phases.current()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.accumulator.is_complete()
    }

    pub fn completed_at_ms(&self) -> Option<f64> {
        self.completed_at_ms
    }

    #[inline]
    pub fn intensity(&self) -> f32 {
        self.config.intensity(self.progress())
    }

    pub fn show_instruction(&self) -> bool {
        self.progress() < INSTRUCTION_HIDE_AT
    }

    pub fn glow(&self) -> &TrailBuffer {
        &self.glow
    }

    pub fn sweep(&mut self, now_ms: f64) -> usize {
        self.glow.sweep(now_ms)
    }

    pub fn puzzle(&self) -> Option<&SecretPuzzle> {
        self.puzzle.as_ref()
    }

    pub fn puzzle_mut(&mut self) -> Option<&mut SecretPuzzle> {
        self.puzzle.as_mut()
    }

    /// Apply one stroke event. Completion posts the chapter's easter egg.
    ///
    /// Samples below the minimum pressure are neither drawn nor counted.
    pub fn handle(&mut self, event: StrokeEvent, notes: &mut NotificationCenter) -> StoryUpdate {
        let mut update = StoryUpdate::default();
        let sample = match event {
            StrokeEvent::End => {
                self.last_ink = None;
                update.stroke_ended = true;
                return update;
            }
            StrokeEvent::Sample(s) => s,
        };
        // too light to draw or count; the stroke keeps its last point
        if !self.accumulator.qualifies(sample.pressure) {
            update.outcome = Some(CountOutcome::BelowThreshold);
            return update;
        }

        update.ink = Some(InkSegment {
            from: self.last_ink,
            to: sample.pos,
            width: stroke_width(sample.pressure),
        });
        self.last_ink = Some(sample.pos);

        let mut completed = false;
        let outcome = {
            let mut observer = Milestones {
                phases: &mut self.phases,
                entered: &mut update.entered,
                completed: &mut completed,
            };
            self.accumulator.record(&sample, &mut observer)
        };
        if outcome.counted() {
            self.glow
                .push(sample.pos, glow_radius(sample.pressure), sample.timestamp_ms);
        }
        if completed {
            self.completed_at_ms = Some(sample.timestamp_ms);
            notes.trigger_easter_egg(Some(self.config.number), None, sample.timestamp_ms);
        }
        update.outcome = Some(outcome);
        update.completed = completed;
        update
    }

    /// Reveal the next chat line once the `messages` phase is reached.
    pub fn reveal_next_message(&mut self) -> Option<&'static ChapterMessage> {
        if self.phases.current() < ChapterPhase::Messages {
            return None;
        }
        let msg = self.config.messages.get(self.revealed_messages)?;
        self.revealed_messages += 1;
        Some(msg)
    }

    pub fn revealed_messages(&self) -> &'static [ChapterMessage] {
        let all: &'static [ChapterMessage] = self.config.messages;
        &all[..self.revealed_messages]
    }
}
