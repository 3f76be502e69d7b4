use crate::audio::MusicPlayer;
use crate::constants::{KEY_PULSE, KEY_PULSE_MAX};
use crate::core::keys::{action_for_key, KeyAction};
use crate::frame::Stage;
use crate::overlay;
use gloo::events::{EventListener, EventListenerOptions};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct KeyWiring {
    pub document: web::Document,
    pub stage: Rc<RefCell<Stage>>,
    pub music: Option<Rc<RefCell<MusicPlayer>>>,
    pub love_notes: bool,
    pub on_submit: Rc<dyn Fn()>,
    pub on_dismiss_all: Rc<dyn Fn()>,
    pub on_show_secret: Rc<dyn Fn()>,
    pub on_open_note: Rc<dyn Fn()>,
}

fn in_text_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        .is_some()
}

fn handle_keydown(ev: &web::KeyboardEvent, w: &KeyWiring) {
    if ev.ctrl_key() || ev.meta_key() {
        return;
    }
    let typing = in_text_field(ev);
    if !typing {
        w.stage.borrow_mut().held.press(&ev.key());
    }
    if ev.repeat() {
        return;
    }
    let Some(action) = action_for_key(&ev.key(), typing, w.love_notes) else {
        return;
    };
    match action {
        KeyAction::ToggleMusic => {
            if let Some(m) = &w.music {
                m.borrow().toggle();
            }
        }
        KeyAction::ToggleMute => {
            if let Some(m) = &w.music {
                m.borrow().toggle_mute();
            }
        }
        KeyAction::ToggleHelp => overlay::toggle_help(&w.document),
        KeyAction::Submit => {
            (w.on_submit)();
            ev.prevent_default();
        }
        KeyAction::DismissToasts => (w.on_dismiss_all)(),
        KeyAction::ShowSecret => (w.on_show_secret)(),
        KeyAction::OpenNote => {
            // keep the `t` out of the freshly focused input
            ev.prevent_default();
            (w.on_open_note)();
        }
        KeyAction::Spark => {
            let mut stage = w.stage.borrow_mut();
            stage.pending_pulse = (stage.pending_pulse + KEY_PULSE).min(KEY_PULSE_MAX);
            log::debug!("[input] key spark");
        }
    }
}

/// Keydown dispatch plus keyup and blur tracking of held keys.
pub fn wire_keyboard(w: KeyWiring) -> Vec<EventListener> {
    let Some(window) = web::window() else {
        return Vec::new();
    };
    let stage_up = w.stage.clone();
    let stage_blur = w.stage.clone();
    vec![
        EventListener::new_with_options(
            &window,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |ev| {
                if let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() {
                    handle_keydown(ev, &w);
                }
            },
        ),
        EventListener::new(&window, "keyup", move |ev| {
            if let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() {
                stage_up.borrow_mut().held.release(&ev.key());
            }
        }),
        EventListener::new(&window, "blur", move |_| {
            stage_blur.borrow_mut().held.clear();
        }),
    ]
}
