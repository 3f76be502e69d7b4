use super::constants::{PHASE_COMPLETE_AT, PHASE_INTERACTION_AT, PHASE_MESSAGES_AT};
use super::error::{CoreError, CoreResult};
use smallvec::SmallVec;

/// Stages a chapter page moves through as interaction progress grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChapterPhase {
    Introduction,
    Interaction,
    Messages,
    Complete,
}

impl ChapterPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            ChapterPhase::Introduction => "introduction",
            ChapterPhase::Interaction => "interaction",
            ChapterPhase::Messages => "messages",
            ChapterPhase::Complete => "complete",
        }
    }
}

/// Ordered `(threshold, phase)` steps following an initial phase.
///
/// Thresholds are non-decreasing in [0, 1] and the phases strictly increase.
#[derive(Clone, Debug, PartialEq)]
pub struct PhasePlan {
    initial: ChapterPhase,
    steps: SmallVec<[(f32, ChapterPhase); 4]>,
}

impl PhasePlan {
    pub fn new(initial: ChapterPhase, steps: &[(f32, ChapterPhase)]) -> CoreResult<Self> {
        let mut prev_threshold = 0.0_f32;
        let mut prev_phase = initial;
        for &(threshold, phase) in steps {
            if !(0.0..=1.0).contains(&threshold) || threshold < prev_threshold {
                return Err(CoreError::InvalidThreshold(threshold));
            }
            if phase <= prev_phase {
                return Err(CoreError::InvalidThreshold(threshold));
            }
            prev_threshold = threshold;
            prev_phase = phase;
        }
        Ok(Self {
            initial,
            steps: steps.iter().copied().collect(),
        })
    }

    /// `introduction → interaction (0.2) → messages (0.5) → complete (1.0)`.
    pub fn four_stage() -> Self {
        Self {
            initial: ChapterPhase::Introduction,
            steps: SmallVec::from_slice(&[
                (PHASE_INTERACTION_AT, ChapterPhase::Interaction),
                (PHASE_MESSAGES_AT, ChapterPhase::Messages),
                (PHASE_COMPLETE_AT, ChapterPhase::Complete),
            ]),
        }
    }

    /// `interaction → complete (1.0)`.
    pub fn two_stage() -> Self {
        Self {
            initial: ChapterPhase::Interaction,
            steps: SmallVec::from_slice(&[(PHASE_COMPLETE_AT, ChapterPhase::Complete)]),
        }
    }

    #[inline]
    pub fn initial(&self) -> ChapterPhase {
        self.initial
    }

    /// Furthest phase whose threshold `progress` has reached.
    pub fn phase_for(&self, progress: f32) -> ChapterPhase {
        self.steps
            .iter()
            .take_while(|(threshold, _)| progress >= *threshold)
            .last()
            .map_or(self.initial, |&(_, phase)| phase)
    }
}

/// Monotonic phase tracker: once a phase is reached it is never left backwards.
#[derive(Clone, Debug)]
pub struct PhaseMachine {
    plan: PhasePlan,
    current: ChapterPhase,
}

impl PhaseMachine {
    pub fn new(plan: PhasePlan) -> Self {
        let current = plan.initial();
        Self { plan, current }
    }

    #[inline]
    pub fn current(&self) -> ChapterPhase {
        self.current
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.current == ChapterPhase::Complete
    }

    /// Feed the latest progress. Returns every phase newly entered, in order.
    ///
    /// A jump across several thresholds reports each intermediate phase so
    /// entry side effects (revealing messages) are not skipped.
    pub fn advance(&mut self, progress: f32) -> SmallVec<[ChapterPhase; 4]> {
        let target = self.plan.phase_for(progress);
        let mut entered = SmallVec::new();
        if target <= self.current {
            return entered;
        }
        for &(_, phase) in self.plan.steps.iter() {
            if phase > self.current && phase <= target {
                entered.push(phase);
            }
        }
        log::info!(
            "[phase] {} -> {} at progress {:.2}",
            self.current.as_str(),
            target.as_str(),
            progress
        );
        self.current = target;
        entered
    }
}
