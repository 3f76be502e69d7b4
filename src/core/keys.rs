use fnv::FnvHashSet;

/// What a key press does on a chapter page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleMusic,
    ToggleMute,
    ToggleHelp,
    /// Enter inside the puzzle or note input.
    Submit,
    DismissToasts,
    /// `L` on a love-notes chapter: flash the hidden hint.
    ShowSecret,
    /// `T` on a love-notes chapter: open the note input.
    OpenNote,
    /// Any other printable key bursts the field.
    Spark,
}

/// Map a key to an action. Typing into a text field only ever submits.
///
/// `love_notes` enables the `L`/`T` shortcuts; elsewhere they spark like any letter.
pub fn action_for_key(key: &str, in_text_field: bool, love_notes: bool) -> Option<KeyAction> {
    if in_text_field {
        return (key == "Enter").then_some(KeyAction::Submit);
    }
    match key {
        "m" | "M" => Some(KeyAction::ToggleMusic),
        "s" | "S" => Some(KeyAction::ToggleMute),
        "h" | "H" => Some(KeyAction::ToggleHelp),
        "Escape" => Some(KeyAction::DismissToasts),
        "l" | "L" if love_notes => Some(KeyAction::ShowSecret),
        "t" | "T" if love_notes => Some(KeyAction::OpenNote),
        k if k.chars().count() == 1 => Some(KeyAction::Spark),
        _ => None,
    }
}

/// Keys currently held down, fed by keydown and keyup.
///
/// Lowercased so a shift released before the letter does not strand an entry.
#[derive(Clone, Debug, Default)]
pub struct HeldKeys {
    keys: FnvHashSet<String>,
}

impl HeldKeys {
    pub fn press(&mut self, key: &str) {
        self.keys.insert(key.to_lowercase());
    }

    pub fn release(&mut self, key: &str) {
        self.keys.remove(&key.to_lowercase());
    }

    /// Forget everything, e.g. when the window loses focus mid-press.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    #[inline]
    pub fn any(&self) -> bool {
        !self.keys.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }
}
