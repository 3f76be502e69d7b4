use super::constants::REDUCED_FRAME_RATE_HZ;

/// Coarse device class used to trade visual density for battery and heat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PerformanceLevel {
    High,
    Medium,
}

const TOUCH_PRIMARY_MARKERS: [&str; 4] = ["iPad", "iPhone", "iPod", "Android"];

impl PerformanceLevel {
    /// Touch-primary user agents get `Medium` regardless of pixel ratio.
    pub fn detect(user_agent: &str, max_touch_points: i32) -> Self {
        let ua_lower = user_agent.to_ascii_lowercase();
        let touch_ua = TOUCH_PRIMARY_MARKERS
            .iter()
            .any(|m| ua_lower.contains(&m.to_ascii_lowercase()));
        // iPadOS reports a desktop Safari UA; touch points give it away
        let touch_mac = ua_lower.contains("macintosh") && max_touch_points > 1;
        if touch_ua || touch_mac {
            PerformanceLevel::Medium
        } else {
            PerformanceLevel::High
        }
    }

    #[inline]
    pub fn is_reduced(self) -> bool {
        self == PerformanceLevel::Medium
    }

    /// Redraw cap in Hz; `None` means follow the display.
    pub fn frame_cap_hz(self) -> Option<f32> {
        match self {
            PerformanceLevel::High => None,
            PerformanceLevel::Medium => Some(REDUCED_FRAME_RATE_HZ),
        }
    }

    /// Divisor applied to ambient shape counts.
    pub fn shape_divisor(self) -> usize {
        match self {
            PerformanceLevel::High => 1,
            PerformanceLevel::Medium => 2,
        }
    }

    /// Horizontal sampling step for wave lines, in px.
    pub fn wave_step_px(self) -> f32 {
        match self {
            PerformanceLevel::High => 2.0,
            PerformanceLevel::Medium => 4.0,
        }
    }
}
