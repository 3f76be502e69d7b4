use crate::core::constants::MUSIC_DEFAULT_VOLUME;
use gloo::events::EventListener;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Looping background track. Every failure leaves the page silent, never broken.
pub struct MusicPlayer {
    el: web::HtmlAudioElement,
    playing: Rc<Cell<bool>>,
    _on_error: EventListener,
}

impl MusicPlayer {
    pub fn new(src: &str) -> anyhow::Result<Self> {
        let el =
            web::HtmlAudioElement::new_with_src(src).map_err(|e| anyhow::anyhow!("{:?}", e))?;
        el.set_loop(true);
        el.set_volume(MUSIC_DEFAULT_VOLUME);
        let playing = Rc::new(Cell::new(false));
        let playing_err = playing.clone();
        let src_owned = src.to_string();
        let on_error = EventListener::new(&el, "error", move |_| {
            log::warn!("[audio] could not load {}", src_owned);
            playing_err.set(false);
        });
        log::info!("[audio] track {}", src);
        Ok(Self {
            el,
            playing,
            _on_error: on_error,
        })
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }

    /// Start playback; a rejected play promise (autoplay policy, missing file) flips `playing` off.
    pub fn play(&self) {
        let promise = match self.el.play() {
            Ok(p) => p,
            Err(e) => {
                log::warn!("[audio] play failed: {:?}", e);
                self.playing.set(false);
                return;
            }
        };
        self.playing.set(true);
        let playing = self.playing.clone();
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("[audio] playback blocked: {:?}", e);
                playing.set(false);
            }
        });
    }

    /// Rewind and play from the start.
    pub fn restart(&self) {
        self.el.set_current_time(0.0);
        self.play();
    }

    pub fn pause(&self) {
        _ = self.el.pause();
        self.playing.set(false);
    }

    pub fn toggle(&self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
        log::info!("[audio] playing={}", self.is_playing());
    }

    pub fn toggle_mute(&self) {
        let muted = !self.el.muted();
        self.el.set_muted(muted);
        log::info!("[audio] muted={}", muted);
    }
}

impl Drop for MusicPlayer {
    fn drop(&mut self) {
        _ = self.el.pause();
    }
}
