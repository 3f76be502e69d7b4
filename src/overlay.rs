use crate::core::chapter::{ChapterConfig, ChapterMessage};
use crate::core::notify::Notification;
use crate::core::phase::ChapterPhase;
use crate::core::puzzle::PuzzleOutcome;
use crate::dom;
use wasm_bindgen::JsCast;
use web_sys as web;

const HELP_ID: &str = "help-overlay";
const TOASTS_ID: &str = "toasts";

pub fn show_help(document: &web::Document) {
    dom::set_visible(document, HELP_ID, true);
}

pub fn hide_help(document: &web::Document) {
    dom::set_visible(document, HELP_ID, false);
}

pub fn toggle_help(document: &web::Document) {
    if dom::is_visible(document, HELP_ID) {
        hide_help(document);
    } else {
        show_help(document);
    }
}

/// Title, subtitle and instruction text for a freshly mounted chapter.
pub fn init_chapter(document: &web::Document, cfg: &ChapterConfig) {
    dom::set_text(document, "chapter-title", cfg.title);
    dom::set_text(document, "chapter-subtitle", cfg.subtitle);
    dom::set_text(document, "instruction", cfg.instruction);
    if let Some(body) = document.body() {
        _ = body.set_attribute("data-mode", cfg.mode.as_str());
    }
    dom::set_visible(document, "instruction", true);
    dom::set_visible(document, "unlock", false);
    dom::set_visible(document, "puzzle", cfg.has_puzzle);
    dom::set_visible(document, "key-secret", false);
    dom::set_visible(document, "note-form", false);
    dom::set_visible(document, "note-text", false);
    if let Some(el) = document.get_element_by_id("messages") {
        el.set_inner_html("");
    }
    update_progress(document, 0.0, true);
}

pub fn update_progress(document: &web::Document, fraction: f32, show_instruction: bool) {
    let pct = (fraction.clamp(0.0, 1.0) * 100.0).round();
    if let Some(el) = document.get_element_by_id("progress-fill") {
        _ = el.set_attribute("style", &format!("width:{}%", pct));
    }
    dom::set_text(document, "progress-label", &format!("{}%", pct));
    dom::set_visible(document, "instruction", show_instruction);
}

pub fn set_phase(document: &web::Document, phase: ChapterPhase) {
    if let Some(body) = document.body() {
        _ = body.set_attribute("data-phase", phase.as_str());
    }
}

pub fn append_message(document: &web::Document, msg: &ChapterMessage) {
    let Some(list) = document.get_element_by_id("messages") else {
        return;
    };
    let Ok(el) = document.create_element("div") else {
        return;
    };
    let side = if msg.from_reader { "reader" } else { "author" };
    el.set_class_name(&format!("message message-{}", side));
    el.set_text_content(Some(msg.text));
    _ = list.append_child(&el);
}

/// Reveal the next-chapter link, or the ending when there is none.
pub fn show_unlock(document: &web::Document, next: Option<u32>) {
    match next {
        Some(n) => {
            if let Some(link) = document.get_element_by_id("next-chapter") {
                _ = link.set_attribute("href", &format!("?chapter={}", n));
            }
            dom::set_text(document, "unlock-label", &format!("Chapitre {} débloqué", n));
        }
        None => {
            dom::set_text(document, "unlock-label", "Fin de notre histoire... pour l'instant");
        }
    }
    dom::set_visible(document, "unlock", true);
}

/// Rebuild the toast stack. Text goes through `textContent`, never HTML.
pub fn render_toasts(document: &web::Document, items: &[Notification]) {
    let Some(stack) = document.get_element_by_id(TOASTS_ID) else {
        return;
    };
    stack.set_inner_html("");
    for n in items {
        let Ok(el) = document.create_element("div") else {
            continue;
        };
        el.set_class_name(&format!("toast {}", n.kind.css_class()));
        _ = el.set_attribute("data-id", &n.id.to_string());
        if let Ok(title) = document.create_element("strong") {
            title.set_text_content(Some(&format!("{} {}", n.kind.emoji(), n.title)));
            _ = el.append_child(&title);
        }
        if let Ok(body) = document.create_element("p") {
            body.set_text_content(Some(&n.message));
            _ = el.append_child(&body);
        }
        _ = stack.append_child(&el);
    }
}

/// Toast id under a click inside the stack.
pub fn toast_id_from_event(event: &web::Event) -> Option<u64> {
    event
        .target()?
        .dyn_into::<web::Element>()
        .ok()?
        .closest(".toast")
        .ok()??
        .get_attribute("data-id")?
        .parse()
        .ok()
}

pub fn puzzle_active(document: &web::Document, active: bool) {
    if let Some(input) = document
        .get_element_by_id("puzzle-input")
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        input.set_disabled(!active);
        if active {
            _ = input.focus();
        }
    }
    dom::set_visible(document, "puzzle-open", !active);
}

pub fn puzzle_feedback(document: &web::Document, outcome: PuzzleOutcome) {
    let text = match outcome {
        PuzzleOutcome::Solved => "Bravo ! Tu as trouvé 💖".to_string(),
        PuzzleOutcome::Wrong { remaining } => {
            format!("Ce n'est pas ça... encore {} essai(s)", remaining)
        }
        PuzzleOutcome::LockedOut => "Plus d'essais. Réessaie quand tu veux.".to_string(),
        PuzzleOutcome::Inactive => "Active l'énigme d'abord.".to_string(),
        PuzzleOutcome::AlreadySolved => "Déjà résolue ✨".to_string(),
    };
    dom::set_text(document, "puzzle-feedback", &text);
}

pub fn show_secret(document: &web::Document, visible: bool) {
    dom::set_visible(document, "puzzle-secret", visible);
}

/// Hint flashed by the `L` shortcut.
pub fn show_key_secret(document: &web::Document, visible: bool) {
    dom::set_visible(document, "key-secret", visible);
}

pub fn note_input_open(document: &web::Document, open: bool) {
    dom::set_visible(document, "note-form", open);
    if !open {
        return;
    }
    dom::clear_input(document, "note-input");
    if let Some(input) = document
        .get_element_by_id("note-input")
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        _ = input.focus();
    }
}

/// Show the sent note, or hide it with `None`.
pub fn show_note(document: &web::Document, text: Option<&str>) {
    dom::set_text(document, "note-text", text.unwrap_or_default());
    dom::set_visible(document, "note-text", text.is_some());
}
