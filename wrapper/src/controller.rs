use crate::{
    config::WrapperConfig,
    discovery::{Discovery, DiscoveryPoll, DiscoveryStatus, GameSource},
    error::WrapperError,
    game::Game,
    log::{LogEndpoint, LogType, Logger},
    log_to,
    overlay::OverlayView,
    presentation::Presentation,
    score::format_score,
    state::GameState,
};
use std::{cell::Cell, rc::Rc};

/// Start/game-over overlay in front of one embedded game.
///
/// Owns the overlay view and the lifecycle state. The game itself belongs to the
/// page; the controller only reads its descriptor and calls its hooks.
pub struct OverlayController<V: OverlayView> {
    state: GameState,
    game: Option<Game>,
    view: V,
    presentation: Presentation,
    discovery: Discovery,
    config: WrapperConfig,
    initialized: bool,
    /// Mirror of `state` readable while the controller is borrowed.
    shared_state: Rc<Cell<GameState>>,

    logger: Logger,
    general: LogEndpoint,
    discovery_log: LogEndpoint,
    lifecycle: LogEndpoint,
}

impl<V: OverlayView> OverlayController<V> {
    pub fn new(view: V, config: WrapperConfig) -> Self {
        let mut logger = Logger::new();
        let general = logger
            .init_endpoint(LogType::General)
            .print(config.log.general)
            .build();
        let discovery_log = logger
            .init_endpoint(LogType::Discovery)
            .print(config.log.discovery)
            .build();
        let lifecycle = logger
            .init_endpoint(LogType::Lifecycle)
            .print(config.log.lifecycle)
            .build();

        OverlayController {
            state: GameState::Ready,
            game: None,
            view,
            presentation: Presentation::loading(&config.text),
            discovery: Discovery::new(config.discovery.max_frames),
            config,
            initialized: false,
            shared_state: Rc::new(Cell::new(GameState::Ready)),
            logger,
            general,
            discovery_log,
            lifecycle,
        }
    }

    /// Builds the overlay and shows the loading presentation.
    ///
    /// A second call leaves the existing overlay alone.
    pub fn initialize(&mut self) -> Result<(), WrapperError> {
        if self.initialized {
            log_to!(self.general, "Overlay already initialized, ignoring");
            self.logger.flush();
            return Ok(());
        }
        self.view.mount()?;
        self.initialized = true;
        log_to!(self.general, "Overlay mounted");
        self.present();
        Ok(())
    }

    /// One discovery frame. Returns whether the caller should check again next frame.
    pub fn tick(&mut self, source: &mut dyn GameSource) -> bool {
        let keep_polling = match self.discovery.poll(source) {
            DiscoveryPoll::Found(game) => {
                self.attach(game);
                false
            }
            DiscoveryPoll::Waiting => true,
            DiscoveryPoll::TimedOut => {
                log_to!(
                    self.discovery_log,
                    "No game published after {} frames",
                    self.discovery.frames()
                );
                if self.state == GameState::Ready && self.game.is_none() {
                    self.presentation.title = self.config.text.unavailable.clone();
                }
                false
            }
            DiscoveryPoll::Idle => false,
        };
        self.present();
        keep_polling
    }

    /// Registers a game directly instead of waiting for discovery.
    ///
    /// Only the first game is kept. Returns whether `game` was accepted.
    pub fn register_game(&mut self, game: Game) -> bool {
        if self.game.is_some() {
            log_to!(
                self.discovery_log,
                "Ignoring second game registration: {:?}",
                game.descriptor().name()
            );
            self.logger.flush();
            return false;
        }
        self.discovery.resolve();
        self.attach(game);
        self.present();
        true
    }

    fn attach(&mut self, game: Game) {
        let descriptor = game.descriptor();
        log_to!(
            self.discovery_log,
            "🎮 Game registered: {}",
            descriptor.name().unwrap_or("<unnamed>")
        );
        self.presentation.thumbnail = descriptor.thumbnail_view();
        self.game = Some(game);
        if self.state == GameState::Ready {
            self.presentation.title = self.ready_title();
        }
    }

    /// Click or touch on the overlay. Starts a round from Ready or Dead.
    ///
    /// Returns whether a round was started.
    pub fn activate(&mut self) -> bool {
        if !self.state.accepts_activation() {
            return false;
        }
        log_to!(self.lifecycle, "{} -> {}", self.state, GameState::Playing);
        self.state = GameState::Playing;
        self.present();

        if let Some(game) = &mut self.game {
            game.restart();
        }
        true
    }

    /// Ends the round. The score readout shows `score` when one is given.
    pub fn report_game_over(&mut self, score: Option<f64>) {
        log_to!(
            self.lifecycle,
            "{} -> {} (score {:?})",
            self.state,
            GameState::Dead,
            score
        );
        self.state = GameState::Dead;

        let text = &self.config.text;
        self.presentation.title = text.game_over.clone();
        self.presentation.hint = text.retry_hint.clone();
        self.presentation.retry = true;
        self.presentation.score = score.map(|s| format_score(s, self.config.score.group_digits));
        self.present();
    }

    /// Puts the overlay back into its start presentation, whatever the current state.
    pub fn reset(&mut self) {
        log_to!(self.lifecycle, "{} -> {}", self.state, GameState::Ready);
        self.state = GameState::Ready;

        self.presentation.title = self.ready_title();
        self.presentation.hint = self.config.text.start_hint.clone();
        self.presentation.retry = false;
        self.presentation.score = None;
        self.present();
    }

    fn ready_title(&self) -> String {
        let text = &self.config.text;
        match &self.game {
            Some(game) => game.descriptor().name().unwrap_or(text.generic_title.as_str()).to_owned(),
            None if self.discovery.status() == DiscoveryStatus::TimedOut => {
                text.unavailable.clone()
            }
            None => text.generic_title.clone(),
        }
    }

    fn present(&mut self) {
        self.shared_state.set(self.state);
        self.presentation.visible = self.state.overlay_visible();
        if self.initialized {
            self.view.render(&self.presentation);
        }
        self.logger.flush();
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Shared handle that always holds the current state, even while a game hook runs.
    pub fn state_handle(&self) -> Rc<Cell<GameState>> {
        Rc::clone(&self.shared_state)
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn discovery_status(&self) -> DiscoveryStatus {
        self.discovery.status()
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn config(&self) -> &WrapperConfig {
        &self.config
    }

    /// Recent log lines from every endpoint.
    pub fn log_history(&self) -> Vec<String> {
        self.logger.history()
    }
}
