#![cfg(target_arch = "wasm32")]
use crate::audio::MusicPlayer;
use crate::constants::{CANVAS_ID, DEFAULT_CHAPTER, TOAST_EXPIRE_INTERVAL_MS};
use crate::core::clock::{FrameClock, StepMode};
use crate::core::constants::{
    COMPLETION_UNLOCK_DELAY_MS, MESSAGE_REVEAL_INTERVAL_MS, MUSIC_AUTOPLAY_DELAY_MS,
    KEY_SECRET_VISIBLE_MS, LOVE_TRACK_SRC, NOTE_VISIBLE_MS, PUZZLE_REVEAL_MS,
    TRAIL_SWEEP_INTERVAL_MS,
};
use crate::core::device::PerformanceLevel;
use crate::core::field::{Field, FieldConfig};
use crate::core::notify::{NotificationCenter, NotificationKind};
use crate::core::phase::ChapterPhase;
use crate::core::puzzle::PuzzleOutcome;
use crate::core::sample::{PressureMode, StrokeTracker};
use crate::core::story::StoryUpdate;
use crate::core::chapter::chapter_from_query;
use crate::core::{ChapterConfig, Story};
use crate::frame::Stage;
use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod audio;
mod constants;
pub mod core;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

type SharedNotes = Rc<RefCell<NotificationCenter>>;
type SharedMusic = Rc<RefCell<MusicPlayer>>;

/// Timers owned by one mounted chapter; dropping one cancels it.
#[derive(Default)]
struct Timers {
    sweep: Option<Interval>,
    toasts: Option<Interval>,
    messages: Option<Interval>,
    unlock: Option<Timeout>,
    secret: Option<Timeout>,
    key_secret: Option<Timeout>,
    note: Option<Timeout>,
}

/// Every subscription one chapter holds. Dropping the view tears all of them down.
struct ChapterView {
    number: u32,
    stage: Rc<RefCell<Stage>>,
    _listeners: Vec<EventListener>,
    _timers: Rc<RefCell<Timers>>,
    _love_track: Option<SharedMusic>,
    _loop: frame::LoopHandle,
}

impl Drop for ChapterView {
    fn drop(&mut self) {
        log::info!("[mount] chapter {} unmounted", self.number);
    }
}

/// Page-lifetime state: notifications and music survive chapter switches.
struct App {
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    notes: SharedNotes,
    music: Option<SharedMusic>,
    _music_listeners: Vec<EventListener>,
    _autoplay: Option<Timeout>,
    view: Option<ChapterView>,
}

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("storybook starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let Some(canvas_el) = document.get_element_by_id(CANVAS_ID) else {
        log::warn!("[mount] no #{} on this page", CANVAS_ID);
        return Ok(());
    };
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let notes: SharedNotes = Rc::new(RefCell::new(NotificationCenter::new()));
    let (music, music_listeners, autoplay) = init_music(&document, &canvas);
    // the unlock link lands on `?chapter=N`
    let chapter = web::window()
        .and_then(|w| w.location().search().ok())
        .and_then(|search| chapter_from_query(&search))
        .or_else(|| dom::data_attr(&canvas, "data-chapter"))
        .unwrap_or(DEFAULT_CHAPTER);
    let view = mount_chapter(&document, &canvas, chapter, &notes, music.clone())?;

    APP.with(|slot| {
        *slot.borrow_mut() = Some(App {
            document,
            canvas,
            notes,
            music,
            _music_listeners: music_listeners,
            _autoplay: autoplay,
            view: Some(view),
        });
    });
    Ok(())
}

fn init_music(
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
) -> (Option<SharedMusic>, Vec<EventListener>, Option<Timeout>) {
    let Some(src) = canvas.get_attribute("data-audio") else {
        return (None, Vec::new(), None);
    };
    let player = match MusicPlayer::new(&src) {
        Ok(p) => Rc::new(RefCell::new(p)),
        Err(e) => {
            log::warn!("[audio] disabled: {:?}", e);
            return (None, Vec::new(), None);
        }
    };
    let mut listeners = Vec::new();
    let p = player.clone();
    listeners.extend(dom::click_listener(document, "music-toggle", move || {
        p.borrow().toggle();
    }));
    let p = player.clone();
    listeners.extend(dom::click_listener(document, "music-mute", move || {
        p.borrow().toggle_mute();
    }));
    let p = player.clone();
    let autoplay = Timeout::new(MUSIC_AUTOPLAY_DELAY_MS, move || p.borrow().play());
    (Some(player), listeners, Some(autoplay))
}

fn mount_chapter(
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
    number: u32,
    notes: &SharedNotes,
    music: Option<SharedMusic>,
) -> anyhow::Result<ChapterView> {
    let mut cfg = ChapterConfig::for_chapter(number)?;
    if let Some(target) = dom::data_attr::<u32>(canvas, "data-target") {
        cfg = cfg.with_target(target)?;
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let navigator = window.navigator();
    let perf = PerformanceLevel::detect(
        &navigator.user_agent().unwrap_or_default(),
        navigator.max_touch_points(),
    );
    log::info!("[mount] performance level {:?}", perf);

    dom::sync_canvas_backing_size(canvas);
    let ctx = render::context_2d(canvas).ok_or_else(|| anyhow::anyhow!("no 2d context"))?;
    let field_cfg = match canvas.get_attribute("data-field") {
        Some(name) => FieldConfig::preset(&name).unwrap_or_else(|| {
            log::warn!("[mount] unknown field preset {:?}", name);
            cfg.field_config()
        }),
        None => cfg.field_config(),
    };
    let field = Field::new(field_cfg.thinned(perf.shape_divisor()), rand::random())?;
    let ink = match render::InkLayer::new(document, cfg.stroke_color) {
        Ok(layer) => Some(layer),
        Err(e) => {
            log::warn!("[mount] ink layer unavailable: {:?}", e);
            None
        }
    };
    let story = Story::new(cfg.clone())?;
    let tracker = StrokeTracker::new(PressureMode::default());
    let stage = Rc::new(RefCell::new(Stage::new(story, tracker, ink)?));

    overlay::init_chapter(document, &cfg);
    overlay::set_phase(document, stage.borrow().story.phase());
    overlay::render_toasts(document, notes.borrow().visible());

    let timers = Rc::new(RefCell::new(Timers::default()));
    let mut listeners = Vec::new();

    let canvas_resize = canvas.clone();
    listeners.push(EventListener::new(&window, "resize", move |_| {
        dom::sync_canvas_backing_size(&canvas_resize);
    }));

    let on_update: events::UpdateSink = {
        let doc = document.clone();
        let stage = stage.clone();
        let notes = notes.clone();
        let timers = Rc::downgrade(&timers);
        Rc::new(move |u: &StoryUpdate| handle_update(&doc, &stage, &notes, &timers, u))
    };
    let love_track = if cfg.has_love_notes {
        init_love_track(canvas)
    } else {
        None
    };
    let on_open_note: Rc<dyn Fn()> = {
        let doc = document.clone();
        let stage = stage.clone();
        Rc::new(move || {
            stage.borrow_mut().note.open();
            overlay::note_input_open(&doc, true);
        })
    };
    listeners.extend(events::wire_pointer_handlers(events::PointerWiring {
        canvas: canvas.clone(),
        stage: stage.clone(),
        notes: notes.clone(),
        on_update,
        on_double_tap: cfg.has_love_notes.then(|| on_open_note.clone()),
    }));

    if let Some(stack) = document.get_element_by_id("toasts") {
        let doc = document.clone();
        let notes = notes.clone();
        listeners.push(EventListener::new(&stack, "click", move |ev| {
            let Some(id) = overlay::toast_id_from_event(ev) else {
                return;
            };
            let removed = notes.borrow_mut().dismiss(id);
            if removed {
                overlay::render_toasts(&doc, notes.borrow().visible());
            }
        }));
    }

    if cfg.has_puzzle {
        overlay::puzzle_active(document, false);
        let doc = document.clone();
        let stage_open = stage.clone();
        listeners.extend(dom::click_listener(document, "puzzle-open", move || {
            if let Some(puzzle) = stage_open.borrow_mut().story.puzzle_mut() {
                puzzle.activate();
            }
            dom::clear_input(&doc, "puzzle-input");
            dom::set_text(&doc, "puzzle-feedback", "");
            overlay::puzzle_active(&doc, true);
            log::info!("[puzzle] activated");
        }));
    }
    let on_submit: Rc<dyn Fn()> = {
        let doc = document.clone();
        let stage = stage.clone();
        let notes = notes.clone();
        let timers = Rc::downgrade(&timers);
        let tracks = (music.clone(), love_track.clone());
        let (has_puzzle, has_love_notes) = (cfg.has_puzzle, cfg.has_love_notes);
        Rc::new(move || {
            if has_puzzle {
                submit_puzzle(&doc, &stage, &notes, &timers);
            } else if has_love_notes {
                submit_note(&doc, &stage, &tracks, &timers);
            }
        })
    };
    let submit = on_submit.clone();
    listeners.extend(dom::click_listener(document, "puzzle-submit", move || {
        submit()
    }));
    let on_show_secret: Rc<dyn Fn()> = {
        let doc = document.clone();
        let timers = Rc::downgrade(&timers);
        Rc::new(move || {
            overlay::show_key_secret(&doc, true);
            if let Some(t) = timers.upgrade() {
                let doc = doc.clone();
                t.borrow_mut().key_secret = Some(Timeout::new(KEY_SECRET_VISIBLE_MS, move || {
                    overlay::show_key_secret(&doc, false);
                }));
            }
        })
    };
    if cfg.has_love_notes {
        let submit = on_submit.clone();
        listeners.extend(dom::click_listener(document, "note-send", move || submit()));
        let doc = document.clone();
        let stage_close = stage.clone();
        listeners.extend(dom::click_listener(document, "note-close", move || {
            stage_close.borrow_mut().note.close();
            overlay::note_input_open(&doc, false);
        }));
    }

    let on_dismiss_all: Rc<dyn Fn()> = {
        let doc = document.clone();
        let notes = notes.clone();
        Rc::new(move || {
            let ids: Vec<u64> = notes.borrow().visible().iter().map(|n| n.id).collect();
            let mut center = notes.borrow_mut();
            for id in ids {
                center.dismiss(id);
            }
            overlay::render_toasts(&doc, center.visible());
        })
    };
    listeners.extend(events::wire_keyboard(events::KeyWiring {
        document: document.clone(),
        stage: stage.clone(),
        music,
        love_notes: cfg.has_love_notes,
        on_submit,
        on_dismiss_all,
        on_show_secret,
        on_open_note,
    }));

    {
        let mut t = timers.borrow_mut();
        let stage_sweep = stage.clone();
        t.sweep = Some(Interval::new(TRAIL_SWEEP_INTERVAL_MS, move || {
            stage_sweep.borrow_mut().sweep(instant::now());
        }));
        let doc = document.clone();
        let notes_expire = notes.clone();
        t.toasts = Some(Interval::new(TOAST_EXPIRE_INTERVAL_MS, move || {
            let gone = notes_expire.borrow_mut().expire(instant::now());
            if !gone.is_empty() {
                overlay::render_toasts(&doc, notes_expire.borrow().visible());
            }
        }));
    }

    let clock = FrameClock::new(StepMode::Measured)
        .with_max_rate(perf.frame_cap_hz().unwrap_or(0.0));
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        canvas: canvas.clone(),
        ctx,
        stage: stage.clone(),
        field,
        clock,
        perf,
        wave_scratch: Vec::new(),
    }));
    let loop_handle = frame::start_loop(frame_ctx);

    Ok(ChapterView {
        number,
        stage,
        _listeners: listeners,
        _timers: timers,
        _love_track: love_track,
        _loop: loop_handle,
    })
}

fn handle_update(
    document: &web::Document,
    stage: &Rc<RefCell<Stage>>,
    notes: &SharedNotes,
    timers: &Weak<RefCell<Timers>>,
    update: &StoryUpdate,
) {
    let (progress, show_instruction, next) = {
        let st = stage.borrow();
        (
            st.story.progress(),
            st.story.show_instruction(),
            st.story.config().next_chapter(),
        )
    };
    if update.outcome.is_some_and(|o| o.counted()) {
        overlay::update_progress(document, progress, show_instruction);
    }
    for &phase in &update.entered {
        overlay::set_phase(document, phase);
        if phase == ChapterPhase::Messages {
            start_message_reveal(document, stage, timers);
        }
    }
    if update.completed {
        overlay::render_toasts(document, notes.borrow().visible());
        if let Some(t) = timers.upgrade() {
            let doc = document.clone();
            t.borrow_mut().unlock = Some(Timeout::new(COMPLETION_UNLOCK_DELAY_MS, move || {
                overlay::show_unlock(&doc, next);
            }));
        }
    }
}

fn start_message_reveal(
    document: &web::Document,
    stage: &Rc<RefCell<Stage>>,
    timers: &Weak<RefCell<Timers>>,
) {
    let Some(t) = timers.upgrade() else {
        return;
    };
    let doc = document.clone();
    let stage = stage.clone();
    if let Some(first) = stage.borrow_mut().story.reveal_next_message() {
        overlay::append_message(&doc, first);
    }
    // idles once the list is exhausted; cancelled with the view
    let reveal = Interval::new(MESSAGE_REVEAL_INTERVAL_MS, move || {
        let next = stage.borrow_mut().story.reveal_next_message();
        if let Some(msg) = next {
            overlay::append_message(&doc, msg);
        }
    });
    t.borrow_mut().messages = Some(reveal);
    log::info!("[phase] revealing messages");
}

fn init_love_track(canvas: &web::HtmlCanvasElement) -> Option<SharedMusic> {
    let src = canvas
        .get_attribute("data-love-audio")
        .unwrap_or_else(|| LOVE_TRACK_SRC.to_string());
    match MusicPlayer::new(&src) {
        Ok(p) => Some(Rc::new(RefCell::new(p))),
        Err(e) => {
            log::warn!("[audio] love track disabled: {:?}", e);
            None
        }
    }
}

fn submit_note(
    document: &web::Document,
    stage: &Rc<RefCell<Stage>>,
    (background, track): &(Option<SharedMusic>, Option<SharedMusic>),
    timers: &Weak<RefCell<Timers>>,
) {
    let value = dom::input_value(document, "note-input");
    let shown = stage.borrow_mut().note.submit(&value).map(str::to_string);
    let Some(text) = shown else {
        return;
    };
    overlay::note_input_open(document, false);
    overlay::show_note(document, Some(&text));
    if let Some(track) = track {
        // the love track takes over from the background music
        if let Some(bg) = background {
            bg.borrow().pause();
        }
        track.borrow().restart();
    }
    let Some(t) = timers.upgrade() else {
        return;
    };
    let doc = document.clone();
    let stage = Rc::downgrade(stage);
    let track = track.clone();
    t.borrow_mut().note = Some(Timeout::new(NOTE_VISIBLE_MS, move || {
        if let Some(stage) = stage.upgrade() {
            stage.borrow_mut().note.clear();
        }
        overlay::show_note(&doc, None);
        if let Some(track) = &track {
            track.borrow().pause();
        }
    }));
}

fn submit_puzzle(
    document: &web::Document,
    stage: &Rc<RefCell<Stage>>,
    notes: &SharedNotes,
    timers: &Weak<RefCell<Timers>>,
) {
    let value = dom::input_value(document, "puzzle-input");
    let outcome = {
        let mut st = stage.borrow_mut();
        let Some(puzzle) = st.story.puzzle_mut() else {
            return;
        };
        puzzle.set_input(&value);
        puzzle.submit_current()
    };
    dom::clear_input(document, "puzzle-input");
    overlay::puzzle_feedback(document, outcome);
    match outcome {
        PuzzleOutcome::Solved => {
            overlay::puzzle_active(document, false);
            dom::set_visible(document, "puzzle-open", false);
            overlay::show_secret(document, true);
            notes.borrow_mut().post(
                "Énigme Résolue !",
                "Joyeux anniversaire mon amour 🎂",
                NotificationKind::Secret,
                None,
                instant::now(),
            );
            overlay::render_toasts(document, notes.borrow().visible());
            if let Some(t) = timers.upgrade() {
                let doc = document.clone();
                t.borrow_mut().secret = Some(Timeout::new(PUZZLE_REVEAL_MS, move || {
                    overlay::show_secret(&doc, false);
                }));
            }
        }
        PuzzleOutcome::LockedOut | PuzzleOutcome::Inactive => {
            overlay::puzzle_active(document, false);
        }
        PuzzleOutcome::Wrong { .. } | PuzzleOutcome::AlreadySolved => {}
    }
}

fn js_err(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:?}", e))
}

/// Tear down the current chapter and mount `number` on the same canvas.
#[wasm_bindgen]
pub fn show_chapter(number: u32) -> Result<(), JsValue> {
    APP.with(|slot| {
        let mut slot = slot.borrow_mut();
        let app = slot
            .as_mut()
            .ok_or_else(|| JsValue::from_str("storybook is not mounted"))?;
        app.view = None;
        let view = mount_chapter(
            &app.document,
            &app.canvas,
            number,
            &app.notes,
            app.music.clone(),
        )
        .map_err(js_err)?;
        app.view = Some(view);
        Ok(())
    })
}

/// Cancel the loop, timers and listeners of the current chapter.
#[wasm_bindgen]
pub fn unmount_chapter() {
    APP.with(|slot| {
        if let Some(app) = slot.borrow_mut().as_mut() {
            app.view = None;
        }
    });
}

#[wasm_bindgen]
pub fn chapter_progress() -> f32 {
    APP.with(|slot| {
        slot.borrow()
            .as_ref()
            .and_then(|app| app.view.as_ref())
            .map_or(0.0, |v| v.stage.borrow().story.progress())
    })
}
