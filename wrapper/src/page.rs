//! Browser entry points.
//!
//! The page owns exactly one controller, kept in a thread local. Games talk to it
//! through `window.gameOver(score?)` or the exported functions below.
use crate::{
    config::WrapperConfig,
    discovery::GameSource,
    error::WrapperError,
    game::{Game, GameDescriptor, GameHooks},
    host::{ControllerHost, HostCall},
    overlay::DomOverlay,
    OverlayController,
};
use js_sys::{Function, Object, Reflect};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{prelude::*, JsCast};

thread_local! {
    static HOST: ControllerHost<DomOverlay> = ControllerHost::new();
}

fn dispatch(call: HostCall) -> Option<bool> {
    HOST.with(|host| host.dispatch(call))
}

impl From<WrapperError> for JsValue {
    fn from(e: WrapperError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Hooks backed by the methods of a JS game object.
struct JsHooks {
    object: Object,
}

impl JsHooks {
    fn call(&self, method: &str) {
        let Ok(value) = Reflect::get(&self.object, &JsValue::from_str(method)) else {
            return;
        };
        let Ok(func) = value.dyn_into::<Function>() else {
            return;
        };
        let _ = func.call0(&self.object);
    }
}

impl GameHooks for JsHooks {
    fn reset(&mut self) {
        self.call("reset");
    }

    fn start(&mut self) {
        self.call("start");
    }
}

/// Reads `{ name, image | thumbnail, emoji, reset, start }` from a JS value.
fn game_from_js(value: &JsValue) -> Option<Game> {
    if value.is_null() || value.is_undefined() {
        return None;
    }
    let object = value.dyn_ref::<Object>()?.clone();
    let descriptor = GameDescriptor::from_fields(|key| {
        Reflect::get(&object, &JsValue::from_str(key)).ok()?.as_string()
    });
    Some(Game::new(descriptor, JsHooks { object }))
}

/// The `window` property games publish themselves under.
struct GlobalSlot {
    window: web_sys::Window,
    key: JsValue,
}

impl GameSource for GlobalSlot {
    fn look(&mut self) -> Option<Game> {
        let value = Reflect::get(&self.window, &self.key).ok()?;
        game_from_js(&value)
    }
}

fn request_frame(window: &web_sys::Window, callback: &Closure<dyn FnMut()>) {
    let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
}

/// Checks the global slot once per animation frame until discovery finishes.
fn schedule_discovery(window: web_sys::Window, mut slot: GlobalSlot) {
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&frame);
    let frame_window = window.clone();

    // The closure keeps itself alive through `next`; once discovery settles it
    // just stops rescheduling.
    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let keep_polling = HOST
            .with(|host| host.with(|controller| controller.tick(&mut slot)))
            .unwrap_or(true);
        if keep_polling {
            if let Some(callback) = next.borrow().as_ref() {
                request_frame(&frame_window, callback);
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = frame.borrow().as_ref() {
        request_frame(&window, callback);
    }
}

fn listen(target: &web_sys::EventTarget, event: &str, prevent_default: bool) -> Result<(), WrapperError> {
    let callback = Closure::wrap(Box::new(move |e: web_sys::Event| {
        if prevent_default {
            e.prevent_default();
        }
        dispatch(HostCall::Activate);
    }) as Box<dyn FnMut(web_sys::Event)>);
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(|js| WrapperError::Dom(format!("{:?}", js)))?;
    callback.forget();
    Ok(())
}

/// Publishes `window.gameOver(score?)` for games that never see the controller.
fn install_game_over(window: &web_sys::Window) -> Result<(), WrapperError> {
    let callback = Closure::wrap(Box::new(|score: JsValue| {
        dispatch(HostCall::GameOver(score.as_f64()));
    }) as Box<dyn FnMut(JsValue)>);
    Reflect::set(window, &JsValue::from_str("gameOver"), callback.as_ref())
        .map_err(|js| WrapperError::Dom(format!("{:?}", js)))?;
    callback.forget();
    Ok(())
}

/// Builds the overlay and starts looking for a game.
///
/// `config_json` overrides the stored configuration. Mounting again, including
/// from inside a game hook, is a no-op.
#[wasm_bindgen(js_name = mountGameWrapper)]
pub fn mount_game_wrapper(config_json: Option<String>) -> Result<(), JsValue> {
    if HOST.with(|host| host.is_mounted()) {
        HOST.with(|host| host.with(|controller| controller.initialize()))
            .transpose()?;
        return Ok(());
    }

    let config = match config_json {
        Some(json) => WrapperConfig::from_json(&json)?,
        None => WrapperConfig::load(),
    };
    let window = web_sys::window().ok_or(WrapperError::NoWindow)?;
    let document = window.document().ok_or(WrapperError::NoDocument)?;

    let slot = GlobalSlot {
        window: window.clone(),
        key: JsValue::from_str(&config.discovery.global_slot),
    };
    let mut controller = OverlayController::new(DomOverlay::new(document), config);
    controller.initialize()?;

    if let Some(root) = controller.view().root() {
        listen(root, "click", false)?;
        listen(root, "touchend", true)?;
    }
    install_game_over(&window)?;

    if HOST.with(|host| host.install(controller)) {
        schedule_discovery(window, slot);
    }
    Ok(())
}

#[wasm_bindgen(js_name = gameOver)]
pub fn game_over(score: Option<f64>) {
    dispatch(HostCall::GameOver(score));
}

#[wasm_bindgen(js_name = resetGameWrapper)]
pub fn reset_game_wrapper() {
    dispatch(HostCall::Reset);
}

/// Registers a game object explicitly. Returns whether it was accepted.
///
/// A call made from inside a game hook is queued and answered `true`; it is
/// still dropped afterwards if a game is already registered.
#[wasm_bindgen(js_name = registerGame)]
pub fn register_game(game: JsValue) -> bool {
    if !HOST.with(|host| host.is_mounted()) {
        return false;
    }
    let Some(game) = game_from_js(&game) else {
        return false;
    };
    dispatch(HostCall::Register(game)).unwrap_or(true)
}

/// `"ready"`, `"playing"` or `"dead"`; `undefined` before mounting.
#[wasm_bindgen(js_name = gameWrapperState)]
pub fn game_wrapper_state() -> Option<String> {
    HOST.with(|host| host.state()).map(|state| state.as_str().to_owned())
}
