use super::constants::DOUBLE_TAP_WINDOW_MS;

/// A short typed message shown over the chapter while the love track plays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoveNote {
    input_open: bool,
    shown: Option<String>,
}

impl LoveNote {
    pub fn is_input_open(&self) -> bool {
        self.input_open
    }

    /// Text currently on screen, if a note was sent and not yet cleared.
    pub fn shown(&self) -> Option<&str> {
        self.shown.as_deref()
    }

    /// Open the input with an empty field.
    pub fn open(&mut self) {
        self.input_open = true;
    }

    /// Close the input without sending.
    pub fn close(&mut self) {
        self.input_open = false;
    }

    /// Send `text`. Blank input is ignored and leaves the input open.
    ///
    /// Returns the trimmed text that is now shown.
    pub fn submit(&mut self, text: &str) -> Option<&str> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.input_open = false;
        self.shown = Some(trimmed.to_string());
        log::info!("[note] sent {} chars", trimmed.chars().count());
        self.shown.as_deref()
    }

    /// Drop the shown text once its time is up.
    pub fn clear(&mut self) {
        self.shown = None;
    }
}

/// Two touch starts closer than [`DOUBLE_TAP_WINDOW_MS`] apart.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DoubleTap {
    last_tap_ms: Option<f64>,
}

impl DoubleTap {
    /// Register a tap at `now_ms`; true when it completes a double tap.
    ///
    /// A completed double tap resets, so a third quick tap starts over.
    pub fn tap(&mut self, now_ms: f64) -> bool {
        match self.last_tap_ms {
            Some(last) if now_ms - last < DOUBLE_TAP_WINDOW_MS => {
                self.last_tap_ms = None;
                true
            }
            _ => {
                self.last_tap_ms = Some(now_ms);
                false
            }
        }
    }
}
