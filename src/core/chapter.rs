use super::constants::{
    DEFAULT_REQUIRED_INTERACTIONS, GLOW_BASE_RADIUS, GLOW_PRESSURE_RADIUS, INTENSITY_BASE,
    INTENSITY_PROGRESS_GAIN, RIVER_INTENSITY_PROGRESS_GAIN, STROKE_BASE_WIDTH,
    STROKE_PRESSURE_WIDTH,
};
use super::error::{CoreError, CoreResult};
use super::field::{FieldConfig, Rgba};
use super::phase::PhasePlan;
use super::progress::AccumulatorConfig;

/// Drawing verb shown to the reader for each chapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChapterMode {
    Carve,
    Conduct,
    Wield,
    Sculpt,
}

impl ChapterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ChapterMode::Carve => "carve",
            ChapterMode::Conduct => "conduct",
            ChapterMode::Wield => "wield",
            ChapterMode::Sculpt => "sculpt",
        }
    }
}

/// What is painted behind the ink layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backdrop {
    /// Particle field only.
    Field,
    /// Layered river waves over a particle field.
    River,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseStyle {
    TwoStage,
    FourStage,
}

/// A chat line revealed during the `messages` phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChapterMessage {
    pub text: &'static str,
    pub from_reader: bool,
}

const CHAPTER_TWO_MESSAGES: &[ChapterMessage] = &[
    ChapterMessage {
        text: "Salut, syrielle m'a donné ton numéro. Elle m'a dit beaucoupd de bien sur toi, alors je me sit que ça serait sympa qu'on fasse connaissance. Tu va bien ?",
        from_reader: false,
    },
    ChapterMessage {
        text: "Ptdrrrr je vais la tuer",
        from_reader: true,
    },
    ChapterMessage {
        text: "Elle m'a aussi parlé de toi mdrr ça va super et toi?",
        from_reader: true,
    },
    ChapterMessage {
        text: "Mdrrrrrr ah bon ça va un crever à cause du sport mais sinon ça va en parlant de ça tu fait du sport ou t'en a déjà fait auparavant?",
        from_reader: false,
    },
    ChapterMessage {
        text: "j'en fais plus mais j'en faisais bcp avant",
        from_reader: true,
    },
    ChapterMessage {
        text: "je vois ta des passions ou des trucs que tu aimes faire pendant le week-end",
        from_reader: false,
    },
    ChapterMessage {
        text: "Mdrrrrr pas vraiment, en ce moment c'est surtout cours/stage sinon en temps normal je passe bcp de temps avec ma famille",
        from_reader: true,
    },
    ChapterMessage {
        text: "Et toi?",
        from_reader: true,
    },
];

/// Static per-chapter configuration, built once at mount.
#[derive(Clone, Debug, PartialEq)]
pub struct ChapterConfig {
    pub number: u32,
    pub mode: ChapterMode,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub instruction: &'static str,
    pub required_interactions: u32,
    pub effect_color: Rgba,
    pub stroke_color: Rgba,
    pub backdrop: Backdrop,
    pub phases: PhaseStyle,
    /// How much progress raises the visual intensity (`1 + progress * gain`).
    pub intensity_gain: f32,
    pub messages: &'static [ChapterMessage],
    pub has_puzzle: bool,
    /// `L` flashes a hint, `T` or a double tap opens a note that plays the love track.
    pub has_love_notes: bool,
}

impl ChapterConfig {
    pub fn for_chapter(number: u32) -> CoreResult<Self> {
        let base = Self {
            number,
            mode: ChapterMode::Carve,
            title: "",
            subtitle: "",
            instruction: "Maintiens enfoncé et dessine ton histoire",
            required_interactions: DEFAULT_REQUIRED_INTERACTIONS,
            effect_color: Rgba::new(236, 72, 153, 0.6),
            stroke_color: Rgba::new(255, 105, 180, 0.9),
            backdrop: Backdrop::Field,
            phases: PhaseStyle::TwoStage,
            intensity_gain: INTENSITY_PROGRESS_GAIN,
            messages: &[],
            has_puzzle: false,
            has_love_notes: false,
        };
        let cfg = match number {
            1 => Self {
                title: "Premier Regard",
                subtitle: "L'étincelle qui a tout changé",
                instruction: "Dessine l'étincelle de notre premier regard",
                required_interactions: 150,
                ..base
            },
            2 => Self {
                mode: ChapterMode::Conduct,
                title: "Premiers Mots",
                subtitle: "Quand nos âmes se sont parlé",
                instruction: "Caresse la rivière pour réveiller nos premiers mots",
                required_interactions: 100,
                effect_color: Rgba::new(59, 130, 246, 0.6),
                stroke_color: Rgba::new(96, 165, 250, 0.9),
                backdrop: Backdrop::River,
                phases: PhaseStyle::FourStage,
                intensity_gain: RIVER_INTENSITY_PROGRESS_GAIN,
                messages: CHAPTER_TWO_MESSAGES,
                ..base
            },
            3 => Self {
                mode: ChapterMode::Wield,
                title: "L'Engagement",
                subtitle: "Notre promesse éternelle",
                instruction: "Trace notre promesse",
                required_interactions: 70,
                effect_color: Rgba::new(34, 197, 94, 0.6),
                stroke_color: Rgba::new(74, 222, 128, 0.9),
                has_love_notes: true,
                ..base
            },
            4 => Self {
                mode: ChapterMode::Sculpt,
                title: "Notre Éternité",
                subtitle: "L'amour qui grandit chaque jour",
                instruction: "Sculpte notre galaxie",
                required_interactions: 80,
                effect_color: Rgba::new(251, 191, 36, 0.6),
                stroke_color: Rgba::new(252, 211, 77, 0.9),
                has_puzzle: true,
                ..base
            },
            other => return Err(CoreError::UnknownChapter(other)),
        };
        Ok(cfg)
    }

    /// Same chapter with a different interaction target (host page override).
    pub fn with_target(mut self, target: u32) -> CoreResult<Self> {
        if target == 0 {
            return Err(CoreError::ZeroTarget);
        }
        self.required_interactions = target;
        Ok(self)
    }

    pub fn field_config(&self) -> FieldConfig {
        match self.number {
            2 => FieldConfig::river(),
            3 => FieldConfig::engagement(),
            4 => FieldConfig::galaxy(),
            _ => FieldConfig::love(),
        }
    }

    pub fn accumulator_config(&self) -> AccumulatorConfig {
        AccumulatorConfig::with_target(self.required_interactions)
    }

    pub fn phase_plan(&self) -> PhasePlan {
        match self.phases {
            PhaseStyle::TwoStage => PhasePlan::two_stage(),
            PhaseStyle::FourStage => PhasePlan::four_stage(),
        }
    }

    /// Visual intensity multiplier for the current progress.
    #[inline]
    pub fn intensity(&self, progress: f32) -> f32 {
        INTENSITY_BASE + progress.clamp(0.0, 1.0) * self.intensity_gain
    }

    #[inline]
    pub fn next_chapter(&self) -> Option<u32> {
        (self.number < 4).then_some(self.number + 1)
    }
}

/// Chapter number from a page query string such as `?chapter=2&x=1`.
///
/// `None` when the key is absent or its value is not a number; the caller
/// falls back to the page's own default.
pub fn chapter_from_query(search: &str) -> Option<u32> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "chapter")
        .and_then(|(_, value)| value.trim().parse().ok())
}

/// Ink line width for a sample's pressure.
#[inline]
pub fn stroke_width(pressure: f32) -> f32 {
    STROKE_BASE_WIDTH + pressure * STROKE_PRESSURE_WIDTH
}

/// Radius of the glow area left by a counted sample.
#[inline]
pub fn glow_radius(pressure: f32) -> f32 {
    GLOW_BASE_RADIUS + pressure * GLOW_PRESSURE_RADIUS
}
