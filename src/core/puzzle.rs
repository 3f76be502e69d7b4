use super::constants::{PUZZLE_MAX_ATTEMPTS, PUZZLE_SECRET_CODE};

/// Outcome of submitting an answer to a [`SecretPuzzle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PuzzleOutcome {
    Solved,
    /// Wrong answer; `remaining` attempts before the puzzle deactivates.
    Wrong { remaining: u32 },
    /// Wrong answer that used the last attempt; the puzzle is now inactive.
    LockedOut,
    /// The puzzle must be activated before it accepts input.
    Inactive,
    AlreadySolved,
}

/// Typed-code unlock with a small attempt budget.
///
/// Solving is permanent for the session. Exhausting the budget deactivates
/// the puzzle and resets the attempt counter; it must then be re-activated.
#[derive(Clone, Debug)]
pub struct SecretPuzzle {
    code: String,
    max_attempts: u32,
    attempts: u32,
    active: bool,
    solved: bool,
    input: String,
}

impl Default for SecretPuzzle {
    fn default() -> Self {
        Self::new(PUZZLE_SECRET_CODE, PUZZLE_MAX_ATTEMPTS)
    }
}

impl SecretPuzzle {
    pub fn new(code: impl Into<String>, max_attempts: u32) -> Self {
        Self {
            code: code.into(),
            max_attempts: max_attempts.max(1),
            attempts: 0,
            active: false,
            solved: false,
            input: String::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn activate(&mut self) {
        if self.solved {
            return;
        }
        self.active = true;
        self.attempts = 0;
        self.input.clear();
    }

    pub fn set_input(&mut self, value: &str) {
        if self.active {
            self.input.clear();
            self.input.push_str(value);
        }
    }

    /// Submit whatever has been typed so far.
    pub fn submit_current(&mut self) -> PuzzleOutcome {
        let typed = std::mem::take(&mut self.input);
        self.submit(&typed)
    }

    pub fn submit(&mut self, answer: &str) -> PuzzleOutcome {
        if self.solved {
            return PuzzleOutcome::AlreadySolved;
        }
        if !self.active {
            return PuzzleOutcome::Inactive;
        }
        self.input.clear();
        if answer == self.code {
            self.solved = true;
            self.active = false;
            log::info!("[puzzle] solved after {} wrong attempts", self.attempts);
            return PuzzleOutcome::Solved;
        }
        self.attempts += 1;
        if self.attempts >= self.max_attempts {
            self.active = false;
            self.attempts = 0;
            log::info!("[puzzle] attempts exhausted, deactivated");
            return PuzzleOutcome::LockedOut;
        }
        PuzzleOutcome::Wrong {
            remaining: self.max_attempts - self.attempts,
        }
    }
}
