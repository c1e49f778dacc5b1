use crate::{controller::OverlayController, game::Game, overlay::OverlayView, state::GameState};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

/// A call into the controller from page code.
pub enum HostCall {
    Activate,
    GameOver(Option<f64>),
    Reset,
    Register(Game),
}

impl HostCall {
    fn apply<V: OverlayView>(self, controller: &mut OverlayController<V>) -> bool {
        match self {
            HostCall::Activate => controller.activate(),
            HostCall::GameOver(score) => {
                controller.report_game_over(score);
                true
            }
            HostCall::Reset => {
                controller.reset();
                true
            }
            HostCall::Register(game) => controller.register_game(game),
        }
    }
}

/// Owns the page's one controller.
///
/// Game hooks run while the controller is borrowed. Calls they make back into the
/// page are queued and applied as soon as the running call returns.
pub struct ControllerHost<V: OverlayView> {
    controller: RefCell<Option<OverlayController<V>>>,
    deferred: RefCell<Vec<HostCall>>,
    state: RefCell<Option<Rc<Cell<GameState>>>>,
}

impl<V: OverlayView> ControllerHost<V> {
    pub fn new() -> Self {
        ControllerHost {
            controller: RefCell::new(None),
            deferred: RefCell::new(Vec::new()),
            state: RefCell::new(None),
        }
    }

    /// A call is running on the controller right now.
    pub fn is_busy(&self) -> bool {
        self.controller.try_borrow_mut().is_err()
    }

    pub fn is_mounted(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Current state, answered even from inside a game hook. `None` before installing.
    pub fn state(&self) -> Option<GameState> {
        self.state.borrow().as_ref().map(|state| state.get())
    }

    /// Takes ownership of `controller`. Refused while busy or once a controller is installed.
    pub fn install(&self, controller: OverlayController<V>) -> bool {
        let mut slot = match self.controller.try_borrow_mut() {
            Ok(slot) => slot,
            Err(_) => return false,
        };
        if slot.is_some() {
            return false;
        }
        *self.state.borrow_mut() = Some(controller.state_handle());
        *slot = Some(controller);
        true
    }

    /// Runs `f` on the controller, then everything queued meanwhile.
    ///
    /// `None` when nothing is installed or the controller is busy.
    pub fn with<R>(&self, f: impl FnOnce(&mut OverlayController<V>) -> R) -> Option<R> {
        let mut slot = self.controller.try_borrow_mut().ok()?;
        let controller = slot.as_mut()?;
        let result = f(controller);
        loop {
            let pending = self.deferred.take();
            if pending.is_empty() {
                break;
            }
            for call in pending {
                call.apply(controller);
            }
        }
        Some(result)
    }

    /// Applies `call` now, or queues it behind the running call.
    ///
    /// Returns the call's outcome when applied right away. `None` when it was
    /// queued or nothing is installed.
    pub fn dispatch(&self, call: HostCall) -> Option<bool> {
        if self.is_busy() {
            self.deferred.borrow_mut().push(call);
            return None;
        }
        self.with(|controller| call.apply(controller))
    }
}

impl<V: OverlayView> Default for ControllerHost<V> {
    fn default() -> Self {
        ControllerHost::new()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::{config::WrapperConfig, game::GameDescriptor, game::GameHooks, overlay::NativeOverlay};

    type Host = ControllerHost<NativeOverlay>;

    fn controller() -> OverlayController<NativeOverlay> {
        let mut controller = OverlayController::new(NativeOverlay::new(), WrapperConfig::default());
        controller.initialize().unwrap();
        controller
    }

    /// Calls back into the host from `start()`, like a page script would.
    struct Reentrant {
        host: Rc<Host>,
        on_start: Box<dyn FnMut(&Host)>,
    }

    impl GameHooks for Reentrant {
        fn start(&mut self) {
            (self.on_start)(&self.host);
        }
    }

    fn host_with_hook(on_start: impl FnMut(&Host) + 'static) -> Rc<Host> {
        let host = Rc::new(Host::new());
        let mut controller = controller();
        controller.register_game(Game::new(
            GameDescriptor::new("Snake"),
            Reentrant {
                host: Rc::clone(&host),
                on_start: Box::new(on_start),
            },
        ));
        assert!(host.install(controller));
        host
    }

    #[test]
    fn test_game_over_from_start_hook() {
        let host = host_with_hook(|host| {
            assert!(host.is_busy());
            assert_eq!(host.dispatch(HostCall::GameOver(Some(3.))), None);
        });

        assert_eq!(host.dispatch(HostCall::Activate), Some(true));
        assert_eq!(host.state(), Some(GameState::Dead));
        let score = host.with(|controller| controller.presentation().score.clone());
        assert_eq!(score, Some(Some("3".to_owned())));
    }

    #[test]
    fn test_state_visible_from_hook() {
        let seen = Rc::new(Cell::new(None));
        let seen_in_hook = Rc::clone(&seen);
        let host = host_with_hook(move |host| seen_in_hook.set(host.state()));

        host.dispatch(HostCall::Activate);
        assert_eq!(seen.get(), Some(GameState::Playing));
    }

    #[test]
    fn test_register_from_hook_is_queued() {
        let host = host_with_hook(|host| {
            let late = Game::without_hooks(GameDescriptor::new("Tetris"));
            assert_eq!(host.dispatch(HostCall::Register(late)), None);
        });

        host.dispatch(HostCall::Activate);
        let (name, logged) = host
            .with(|controller| {
                let name = controller.game().and_then(|g| g.descriptor().name().map(str::to_owned));
                let logged = controller
                    .log_history()
                    .iter()
                    .any(|line| line.contains("Ignoring second game registration"));
                (name, logged)
            })
            .unwrap();
        assert_eq!(name.as_deref(), Some("Snake"));
        assert!(logged);
    }

    #[test]
    fn test_install_from_hook_is_refused() {
        let host = host_with_hook(|host| {
            assert!(host.is_mounted());
            assert!(!host.install(controller()));
        });

        host.dispatch(HostCall::Activate);
        assert_eq!(host.state(), Some(GameState::Playing));
    }

    #[test]
    fn test_register_when_idle() {
        let host = Host::new();
        assert_eq!(host.state(), None);
        assert_eq!(
            host.dispatch(HostCall::Register(Game::without_hooks(GameDescriptor::new("Snake")))),
            None
        );

        assert!(host.install(controller()));
        assert!(!host.install(controller()));
        assert_eq!(host.state(), Some(GameState::Ready));
        assert_eq!(
            host.dispatch(HostCall::Register(Game::without_hooks(GameDescriptor::new("Snake")))),
            Some(true)
        );
        assert_eq!(host.dispatch(HostCall::Reset), Some(true));
        assert_eq!(host.dispatch(HostCall::Activate), Some(true));
        assert_eq!(host.dispatch(HostCall::Activate), Some(false));
    }
}
