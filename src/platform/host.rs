//! Browser host: listeners, animation-frame loop, session teardown
//!
//! The page's UI calls `startGame(canvasId, onGameOver)` and gets back a
//! handle. `onGameOver(score)` is called once when an enemy reaches the
//! player; by then every listener, timer and frame request of the session
//! has been released.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent};

use super::canvas::CanvasSurface;
use super::check_call;
use crate::renderer::Surface;
use crate::sim::Control;
use crate::{Session, Settings, Tuning};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// An attached DOM listener, kept so it can be removed again
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    fn detach(&self) {
        check_call(
            "removeEventListener",
            self.target
                .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref()),
        );
    }
}

struct Host {
    session: Session,
    canvas: HtmlCanvasElement,
    surface: Option<CanvasSurface>,
    listeners: Vec<Listener>,
    frame_loop: FrameCallback,
    frame_request: Option<i32>,
    stopped: bool,
}

impl Host {
    /// Pointer position in canvas coordinates
    fn canvas_point(&self, event: &MouseEvent) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        Vec2::new(
            event.client_x() as f32 - rect.left() as f32,
            event.client_y() as f32 - rect.top() as f32,
        )
    }

    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.session.teardown();
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        if let (Some(id), Some(window)) = (self.frame_request.take(), web_sys::window()) {
            check_call("cancelAnimationFrame", window.cancel_animation_frame(id));
        }
        // Breaks the loop's self-reference so the closure is freed
        let _ = self.frame_loop.borrow_mut().take();
        log::info!("Host stopped");
    }
}

/// Handle returned to the page for a running session
#[wasm_bindgen]
pub struct GameHandle {
    host: Rc<RefCell<Host>>,
}

#[wasm_bindgen]
impl GameHandle {
    /// Tear the session down without reporting a score
    pub fn stop(&self) {
        self.host.borrow_mut().stop();
    }

    /// Current score
    pub fn score(&self) -> f64 {
        self.host.borrow().session.score() as f64
    }
}

/// Module init: panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&JsValue::from_str("logger already initialized"));
    }
    log::info!("Geo Survivor module loaded");
}

/// Start a session on the canvas with id `canvas_id`
#[wasm_bindgen(js_name = startGame)]
pub fn start_game(canvas_id: &str, on_game_over: js_sys::Function) -> Result<GameHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str("canvas not found"))?
        .dyn_into()?;

    // Arena size is read once; no resize handling
    let width = window.inner_width()?.as_f64().unwrap_or(800.0);
    let height = window.inner_height()?.as_f64().unwrap_or(600.0);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);

    let surface = CanvasSurface::new(&canvas);
    if surface.is_none() {
        log::warn!("Canvas 2D context unavailable; frames will be skipped");
    }

    let final_score: Rc<Cell<Option<u64>>> = Rc::new(Cell::new(None));
    let sink = final_score.clone();
    let seed = js_sys::Date::now() as u64;
    let session = match &surface {
        Some(s) => Session::start_on(
            s,
            Tuning::default(),
            Settings::default(),
            seed,
            Box::new(move |score| sink.set(Some(score))),
        ),
        None => Session::start(
            crate::sim::Arena::new(width as f32, height as f32),
            Tuning::default(),
            Settings::default(),
            seed,
            Box::new(move |score| sink.set(Some(score))),
        ),
    };

    let frame_loop: FrameCallback = Rc::new(RefCell::new(None));
    let host = Rc::new(RefCell::new(Host {
        session,
        canvas: canvas.clone(),
        surface,
        listeners: Vec::new(),
        frame_loop: frame_loop.clone(),
        frame_request: None,
        stopped: false,
    }));

    attach_listeners(&host, &window)?;
    start_frame_loop(host.clone(), frame_loop, final_score, on_game_over)?;

    Ok(GameHandle { host })
}

fn listen(
    host: &Rc<RefCell<Host>>,
    target: &EventTarget,
    kind: &'static str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    host.borrow_mut().listeners.push(Listener {
        target: target.clone(),
        kind,
        closure,
    });
    Ok(())
}

fn attach_listeners(host: &Rc<RefCell<Host>>, window: &web_sys::Window) -> Result<(), JsValue> {
    let target: &EventTarget = window.as_ref();

    for (kind, pressed) in [("keydown", true), ("keyup", false)] {
        let h = host.clone();
        listen(host, target, kind, move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if let Some(control) = Control::from_key(&event.key()) {
                h.borrow_mut().session.input_mut().set_pressed(control, pressed);
            }
        })?;
    }

    let h = host.clone();
    listen(host, target, "mousemove", move |event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let mut host = h.borrow_mut();
        let pos = host.canvas_point(event);
        host.session.input_mut().set_pointer(pos);
    })?;

    let h = host.clone();
    listen(host, target, "mousedown", move |event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        if Control::from_mouse_button(event.button()) != Some(Control::Fire) {
            return;
        }
        let mut host = h.borrow_mut();
        let pos = host.canvas_point(event);
        host.session.input_mut().push_fire(pos);
    })?;

    let h = host.clone();
    listen(host, target, "blur", move |_| {
        h.borrow_mut().session.input_mut().release_all();
    })?;

    Ok(())
}

fn request_frame(callback: &FrameCallback) -> Option<i32> {
    let window = web_sys::window()?;
    let callback = callback.borrow();
    let closure = callback.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

fn start_frame_loop(
    host: Rc<RefCell<Host>>,
    callback: FrameCallback,
    final_score: Rc<Cell<Option<u64>>>,
    on_game_over: js_sys::Function,
) -> Result<(), JsValue> {
    let next = callback.clone();

    *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
        {
            let mut guard = host.borrow_mut();
            if guard.stopped {
                return;
            }

            let host = &mut *guard;
            host.session.advance_clock(time);
            let surface = host.surface.as_mut().map(|s| s as &mut dyn Surface);
            host.session.frame(surface);
        }

        if let Some(score) = final_score.take() {
            host.borrow_mut().stop();
            // Called with no borrow held so the page may start a new game
            if let Err(err) = on_game_over.call1(&JsValue::NULL, &JsValue::from_f64(score as f64)) {
                log::error!("onGameOver handler failed: {:?}", err);
            }
            return;
        }

        let id = request_frame(&next);
        host.borrow_mut().frame_request = id;
    }));

    let id = request_frame(&callback).ok_or_else(|| JsValue::from_str("requestAnimationFrame failed"))?;
    host.borrow_mut().frame_request = Some(id);
    Ok(())
}
