//! Looping ambient track on an `<audio>` element.

use std::cell::Cell;
use std::rc::Rc;

use newyear_engine::MusicCommand;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;
use web_sys::HtmlAudioElement;

pub const DEFAULT_TRACK: &str = "/audio/new-year-ambient.mp3";
const VOLUME: f64 = 0.3;

pub struct AmbientTrack {
    element: Option<HtmlAudioElement>,
    src: String,
    blocked: Rc<Cell<bool>>,
    on_reject: Closure<dyn FnMut(JsValue)>,
}

impl AmbientTrack {
    pub fn new(src: &str) -> Self {
        let blocked = Rc::new(Cell::new(false));
        let flag = Rc::clone(&blocked);
        let on_reject = Closure::wrap(Box::new(move |err: JsValue| {
            log::debug!("ambient play() rejected: {:?}", err);
            flag.set(true);
        }) as Box<dyn FnMut(JsValue)>);

        Self {
            element: None,
            src: src.to_string(),
            blocked,
            on_reject,
        }
    }

    fn element(&mut self) -> Option<&HtmlAudioElement> {
        if self.element.is_none() {
            match HtmlAudioElement::new_with_src(&self.src) {
                Ok(el) => {
                    el.set_loop(true);
                    el.set_volume(VOLUME);
                    self.element = Some(el);
                }
                Err(err) => log::warn!("ambient track unavailable: {:?}", err),
            }
        }
        self.element.as_ref()
    }

    pub fn apply(&mut self, command: MusicCommand) {
        match command {
            MusicCommand::Play => match self.element().map(|el| el.play()) {
                Some(Ok(promise)) => {
                    let _ = promise.catch(&self.on_reject);
                }
                _ => self.blocked.set(true),
            },
            MusicCommand::Pause => {
                if let Some(el) = &self.element {
                    let _ = el.pause();
                }
            }
            MusicCommand::Stop => {
                if let Some(el) = self.element.take() {
                    let _ = el.pause();
                    el.set_current_time(0.0);
                }
            }
        }
    }

    /// True once per rejected `play()`.
    pub fn take_blocked(&self) -> bool {
        self.blocked.replace(false)
    }
}
