use crate::core::notify::NotificationCenter;
use crate::core::sample::{InputSource, RawInput};
use crate::core::story::StoryUpdate;
use crate::dom;
use crate::frame::Stage;
use glam::Vec2;
use gloo::events::{EventListener, EventListenerOptions};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Receives every story change caused by an input event.
pub type UpdateSink = Rc<dyn Fn(&StoryUpdate)>;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub stage: Rc<RefCell<Stage>>,
    pub notes: Rc<RefCell<NotificationCenter>>,
    pub on_update: UpdateSink,
    /// Opens the note input on a double tap; `None` on chapters without notes.
    pub on_double_tap: Option<Rc<dyn Fn()>>,
}

/// Client coordinates to canvas CSS pixels.
#[inline]
fn canvas_pos(canvas: &web::HtmlCanvasElement, client_x: f64, client_y: f64) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        (client_x - rect.left()) as f32,
        (client_y - rect.top()) as f32,
    )
}

/// First touch only; further fingers are ignored.
#[inline]
fn first_touch_pos(canvas: &web::HtmlCanvasElement, ev: &web::TouchEvent) -> Option<Vec2> {
    let touch = ev.touches().get(0)?;
    Some(canvas_pos(
        canvas,
        touch.client_x() as f64,
        touch.client_y() as f64,
    ))
}

fn apply(w: &PointerWiring, raw: RawInput) {
    let now = instant::now();
    let update = {
        let mut stage = w.stage.borrow_mut();
        if let RawInput::Move { pos, .. } = raw {
            stage.cursor.push(pos, 1.0, now);
            stage.last_move_ms = now;
        }
        let Some(event) = stage.tracker.handle(raw, now) else {
            return;
        };
        let update = stage.story.handle(event, &mut w.notes.borrow_mut());
        if let (Some(seg), Some(ink)) = (&update.ink, &stage.ink) {
            ink.stroke(seg);
        }
        update
    };
    if update.stroke_ended {
        log::debug!("[input] stroke ended");
    }
    (w.on_update)(&update);
}

/// Global mouse and touch listeners; dropping the returned listeners unsubscribes them.
pub fn wire_pointer_handlers(w: PointerWiring) -> Vec<EventListener> {
    let Some(window) = web::window() else {
        return Vec::new();
    };
    let active = EventListenerOptions::enable_prevent_default();
    let mut listeners = Vec::with_capacity(6);

    let wd = w.clone();
    listeners.push(EventListener::new(&window, "mousedown", move |ev| {
        if dom::is_interactive_target(ev) {
            return;
        }
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let pos = canvas_pos(&wd.canvas, ev.client_x() as f64, ev.client_y() as f64);
        apply(
            &wd,
            RawInput::Down {
                pos,
                source: InputSource::Mouse,
                pressure: None,
            },
        );
    }));

    let wm = w.clone();
    listeners.push(EventListener::new(&window, "mousemove", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let pos = canvas_pos(&wm.canvas, ev.client_x() as f64, ev.client_y() as f64);
        apply(
            &wm,
            RawInput::Move {
                pos,
                source: InputSource::Mouse,
                pressure: None,
            },
        );
    }));

    let wu = w.clone();
    listeners.push(EventListener::new(&window, "mouseup", move |_| {
        apply(&wu, RawInput::Up);
    }));

    let wts = w.clone();
    listeners.push(EventListener::new_with_options(
        &window,
        "touchstart",
        active,
        move |ev| {
            if dom::is_interactive_target(ev) {
                return;
            }
            let Some(tev) = ev.dyn_ref::<web::TouchEvent>() else {
                return;
            };
            let Some(pos) = first_touch_pos(&wts.canvas, tev) else {
                return;
            };
            ev.prevent_default();
            if let Some(open_note) = &wts.on_double_tap {
                let double = wts.stage.borrow_mut().double_tap.tap(instant::now());
                if double {
                    open_note();
                }
            }
            apply(
                &wts,
                RawInput::Down {
                    pos,
                    source: InputSource::Touch,
                    pressure: None,
                },
            );
        },
    ));

    let wtm = w.clone();
    listeners.push(EventListener::new_with_options(
        &window,
        "touchmove",
        active,
        move |ev| {
            let Some(tev) = ev.dyn_ref::<web::TouchEvent>() else {
                return;
            };
            let Some(pos) = first_touch_pos(&wtm.canvas, tev) else {
                return;
            };
            if wtm.stage.borrow().tracker.is_pressed() {
                ev.prevent_default();
            }
            apply(
                &wtm,
                RawInput::Move {
                    pos,
                    source: InputSource::Touch,
                    pressure: None,
                },
            );
        },
    ));

    let wte = w;
    listeners.push(EventListener::new(&window, "touchend", move |_| {
        apply(&wte, RawInput::Up);
    }));

    log::info!("[input] pointer listeners attached");
    listeners
}
