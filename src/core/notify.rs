use super::constants::{
    NOTIFY_CHAPTER_DURATION_MS, NOTIFY_DEFAULT_DURATION_MS, NOTIFY_MESSAGE_DURATION_MS,
};
use fnv::FnvHashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    EasterEgg,
    Love,
    Milestone,
    Secret,
}

impl NotificationKind {
    /// CSS modifier class used by the toast markup.
    pub fn css_class(self) -> &'static str {
        match self {
            NotificationKind::EasterEgg => "toast-easter-egg",
            NotificationKind::Love => "toast-love",
            NotificationKind::Milestone => "toast-milestone",
            NotificationKind::Secret => "toast-secret",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            NotificationKind::EasterEgg => "✨",
            NotificationKind::Love => "💖",
            NotificationKind::Milestone => "🌟",
            NotificationKind::Secret => "💎",
        }
    }
}

/// A toast on screen. `duration_ms == 0` means it stays until dismissed.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub duration_ms: f64,
    pub created_ms: f64,
}

impl Notification {
    #[inline]
    pub fn is_expired(&self, now_ms: f64) -> bool {
        self.duration_ms > 0.0 && now_ms - self.created_ms >= self.duration_ms
    }
}

/// Easter-egg message unlocked by completing a chapter.
pub struct EasterEgg {
    pub chapter: u32,
    pub title: &'static str,
    pub message: &'static str,
    pub kind: NotificationKind,
}

pub const EASTER_EGGS: &[EasterEgg] = &[
    EasterEgg {
        chapter: 1,
        title: "Premier Secret Découvert !",
        message: "Tu as trouvé l'étincelle de notre premier regard... 💖",
        kind: NotificationKind::EasterEgg,
    },
    EasterEgg {
        chapter: 2,
        title: "Mots d'Amour Révélés !",
        message: "Les secrets de nos premières conversations sont à toi ! 💝",
        kind: NotificationKind::Love,
    },
    EasterEgg {
        chapter: 3,
        title: "Engagement Éternel !",
        message: "Tu as découvert la promesse de notre engagement ! 💍",
        kind: NotificationKind::Milestone,
    },
    EasterEgg {
        chapter: 4,
        title: "Maître des Secrets !",
        message: "Félicitations ! Tu connais maintenant tous nos mystères ! 🌟",
        kind: NotificationKind::Secret,
    },
];

/// Owner of visible toasts and of the discovered easter-egg set.
///
/// One instance is created at start-up and handed to every chapter that posts
/// notifications; nothing reaches it through global state.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    next_id: u64,
    items: Vec<Notification>,
    discovered: FnvHashSet<String>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a toast; `None` duration uses the default. Returns its id.
    pub fn post(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        duration_ms: Option<f64>,
        now_ms: f64,
    ) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        let n = Notification {
            id,
            title: title.into(),
            message: message.into(),
            kind,
            duration_ms: duration_ms.unwrap_or(NOTIFY_DEFAULT_DURATION_MS).max(0.0),
            created_ms: now_ms,
        };
        log::info!("[notify] #{} {}", id, n.title);
        self.items.push(n);
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        before != self.items.len()
    }

    /// Remove expired toasts and return their ids.
    pub fn expire(&mut self, now_ms: f64) -> Vec<u64> {
        let mut gone = Vec::new();
        self.items.retain(|n| {
            let expired = n.is_expired(now_ms);
            if expired {
                gone.push(n.id);
            }
            !expired
        });
        gone
    }

    /// Visible toasts in insertion order.
    #[inline]
    pub fn visible(&self) -> &[Notification] {
        &self.items
    }

    /// Post the easter egg for `chapter`, or a custom `message` when given.
    ///
    /// A custom message wins; an unknown chapter posts a generic surprise.
    pub fn trigger_easter_egg(
        &mut self,
        chapter: Option<u32>,
        message: Option<&str>,
        now_ms: f64,
    ) -> u64 {
        if let Some(text) = message {
            return self.post(
                "Secret Découvert !",
                text,
                NotificationKind::EasterEgg,
                Some(NOTIFY_MESSAGE_DURATION_MS),
                now_ms,
            );
        }
        let egg = chapter.and_then(|c| EASTER_EGGS.iter().find(|e| e.chapter == c));
        match egg {
            Some(egg) => {
                self.discovered.insert(format!("chapter-{}", egg.chapter));
                self.post(
                    egg.title,
                    egg.message,
                    egg.kind,
                    Some(NOTIFY_CHAPTER_DURATION_MS),
                    now_ms,
                )
            }
            None => self.post(
                "Surprise Trouvée !",
                "Tu as découvert un secret de notre amour ! ✨",
                NotificationKind::EasterEgg,
                Some(NOTIFY_DEFAULT_DURATION_MS),
                now_ms,
            ),
        }
    }

    pub fn is_discovered(&self, egg_id: &str) -> bool {
        self.discovered.contains(egg_id)
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }
}
