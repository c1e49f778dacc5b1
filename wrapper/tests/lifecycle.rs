#![cfg(not(target_arch = "wasm32"))]

use game_wrapper::{
    config::WrapperConfig, discovery::DiscoveryStatus, overlay::NativeOverlay, Game,
    GameDescriptor, GameHooks, GameState, OverlayController, Thumbnail,
};
use proptest::prelude::*;
use std::{cell::RefCell, rc::Rc};

type Calls = Rc<RefCell<Vec<&'static str>>>;

struct Recorder(Calls);

impl GameHooks for Recorder {
    fn reset(&mut self) {
        self.0.borrow_mut().push("reset");
    }

    fn start(&mut self) {
        self.0.borrow_mut().push("start");
    }
}

fn mounted() -> OverlayController<NativeOverlay> {
    let mut controller = OverlayController::new(NativeOverlay::new(), WrapperConfig::default());
    controller.initialize().unwrap();
    controller
}

fn with_recorder(name: &str) -> (OverlayController<NativeOverlay>, Calls) {
    let calls = Calls::default();
    let mut controller = mounted();
    assert!(controller.register_game(Game::new(
        GameDescriptor::new(name),
        Recorder(calls.clone())
    )));
    (controller, calls)
}

fn assert_consistent(controller: &OverlayController<NativeOverlay>) {
    let shown = controller.view().current().expect("overlay rendered");
    assert_eq!(shown, controller.presentation());
    assert_eq!(shown.visible, controller.state() != GameState::Playing);
}

#[test]
fn test_activate_runs_hooks_in_order() {
    let (mut controller, calls) = with_recorder("Snake");
    assert_eq!(controller.state(), GameState::Ready);

    assert!(controller.activate());
    assert_eq!(controller.state(), GameState::Playing);
    assert!(!controller.view().current().unwrap().visible);
    assert_eq!(*calls.borrow(), vec!["reset", "start"]);
    assert_consistent(&controller);
}

#[test]
fn test_activate_while_playing_is_noop() {
    let (mut controller, calls) = with_recorder("Snake");
    controller.activate();
    let renders = controller.view().renders();

    assert!(!controller.activate());
    assert_eq!(controller.state(), GameState::Playing);
    assert_eq!(controller.view().renders(), renders);
    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn test_activate_without_game() {
    let mut controller = mounted();
    assert!(controller.activate());
    assert_eq!(controller.state(), GameState::Playing);
    assert_consistent(&controller);
}

#[test]
fn test_game_over_with_score() {
    let (mut controller, _) = with_recorder("Snake");
    controller.activate();
    controller.report_game_over(Some(42.));

    assert_eq!(controller.state(), GameState::Dead);
    let shown = controller.view().current().unwrap();
    assert!(shown.visible);
    assert_eq!(shown.title, "Game Over");
    assert_eq!(shown.score.as_deref(), Some("42"));
    assert_eq!(shown.hint, "터치하여 다시 시도");
    assert!(shown.retry);
}

#[test]
fn test_game_over_without_score() {
    let (mut controller, _) = with_recorder("Snake");
    controller.activate();
    controller.report_game_over(Some(7.));
    controller.activate();
    controller.report_game_over(None);

    let shown = controller.view().current().unwrap();
    assert_eq!(controller.state(), GameState::Dead);
    assert_eq!(shown.score, None);
    assert!(shown.retry);
}

#[test]
fn test_retry_from_dead() {
    let (mut controller, calls) = with_recorder("Snake");
    controller.activate();
    controller.report_game_over(Some(1.));
    assert!(controller.activate());
    assert_eq!(controller.state(), GameState::Playing);
    assert_eq!(*calls.borrow(), vec!["reset", "start", "reset", "start"]);
    assert_consistent(&controller);
}

#[test]
fn test_game_over_is_idempotent() {
    let mut controller = mounted();
    controller.report_game_over(Some(5.));
    let first = controller.presentation().clone();
    controller.report_game_over(Some(5.));
    assert_eq!(controller.state(), GameState::Dead);
    assert_eq!(controller.presentation(), &first);
}

#[test]
fn test_reset_from_every_state() {
    let (mut controller, _) = with_recorder("Snake");
    for setup in 0..3 {
        match setup {
            0 => {}
            1 => {
                controller.activate();
            }
            _ => {
                controller.activate();
                controller.report_game_over(Some(99.));
            }
        }
        controller.reset();

        let shown = controller.view().current().unwrap();
        assert_eq!(controller.state(), GameState::Ready);
        assert!(shown.visible);
        assert_eq!(shown.title, "Snake");
        assert_eq!(shown.hint, "터치하여 시작");
        assert!(!shown.retry);
        assert_eq!(shown.score, None);
    }
}

#[test]
fn test_reset_without_game_uses_generic_title() {
    let mut controller = mounted();
    controller.reset();
    assert_eq!(controller.presentation().title, "게임");
}

#[test]
fn test_discovered_emoji_and_image() {
    let mut controller = mounted();
    let mut frames = 0;
    let mut source = || {
        frames += 1;
        (frames == 3).then(|| Game::without_hooks(GameDescriptor::new("Snake").with_emoji("🐍")))
    };
    while controller.tick(&mut source) {}
    assert_eq!(controller.discovery_status(), DiscoveryStatus::Found);
    let shown = controller.view().current().unwrap();
    assert_eq!(shown.thumbnail, Thumbnail::Glyph("🐍".to_owned()));
    assert_eq!(shown.title, "Snake");

    let mut controller = mounted();
    let mut source = || {
        Some(Game::without_hooks(
            GameDescriptor::new("Tetris")
                .with_thumbnail("tetris.png")
                .with_emoji("🧱"),
        ))
    };
    assert!(!controller.tick(&mut source));
    assert_eq!(
        controller.view().current().unwrap().thumbnail,
        Thumbnail::Image {
            src: "tetris.png".to_owned(),
            alt: "Tetris".to_owned()
        }
    );
}

#[test]
fn test_discovery_logs_registration() {
    let mut controller = mounted();
    let mut source = || Some(Game::without_hooks(GameDescriptor::new("Snake")));
    controller.tick(&mut source);
    assert!(controller
        .log_history()
        .iter()
        .any(|line| line.contains("Game registered: Snake")));
}

#[test]
fn test_second_registration_ignored() {
    let (mut controller, calls) = with_recorder("Snake");
    let other = Calls::default();
    assert!(!controller.register_game(Game::new(
        GameDescriptor::new("Tetris"),
        Recorder(other.clone())
    )));
    controller.activate();
    assert_eq!(controller.presentation().title, "Snake");
    assert_eq!(calls.borrow().len(), 2);
    assert!(other.borrow().is_empty());

    // Discovery is already satisfied, so the global slot is never consulted.
    let mut source = || -> Option<Game> { panic!("slot read after registration") };
    assert!(!controller.tick(&mut source));
}

#[test]
fn test_custom_copy() {
    let config = WrapperConfig::from_json(
        r#"{
            "text": { "start_hint": "Tap to start", "retry_hint": "Tap to retry" },
            "score": { "group_digits": true }
        }"#,
    )
    .unwrap();
    let mut controller = OverlayController::new(NativeOverlay::new(), config);
    controller.initialize().unwrap();
    assert_eq!(controller.presentation().hint, "Tap to start");

    controller.activate();
    controller.report_game_over(Some(1_234_567.));
    assert_eq!(controller.presentation().hint, "Tap to retry");
    assert_eq!(controller.presentation().score.as_deref(), Some("1,234,567"));
}

#[derive(Debug, Clone)]
enum Op {
    Activate,
    GameOver(Option<u32>),
    Reset,
    Tick,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Activate),
        proptest::option::of(0u32..100_000).prop_map(Op::GameOver),
        Just(Op::Reset),
        Just(Op::Tick),
    ]
}

proptest! {
    #[test]
    fn test_visibility_follows_state(ops in proptest::collection::vec(op(), 0..64)) {
        let calls = Calls::default();
        let mut controller = mounted();
        let mut published = Some(Game::new(GameDescriptor::new("Snake"), Recorder(calls.clone())));
        let mut source = move || published.take();

        for op in ops {
            let before = controller.state();
            match op {
                Op::Activate => {
                    let started = controller.activate();
                    prop_assert_eq!(started, before != GameState::Playing);
                    prop_assert_eq!(controller.state(), GameState::Playing);
                }
                Op::GameOver(score) => {
                    controller.report_game_over(score.map(f64::from));
                    prop_assert_eq!(controller.state(), GameState::Dead);
                    prop_assert_eq!(
                        controller.presentation().score.clone(),
                        score.map(|s| s.to_string())
                    );
                }
                Op::Reset => {
                    controller.reset();
                    prop_assert_eq!(controller.state(), GameState::Ready);
                    prop_assert_eq!(controller.presentation().score.clone(), None);
                }
                Op::Tick => {
                    controller.tick(&mut source);
                }
            }

            let shown = controller.view().current().unwrap();
            prop_assert_eq!(shown, controller.presentation());
            prop_assert_eq!(shown.visible, controller.state() != GameState::Playing);
            if controller.state() != GameState::Playing {
                prop_assert_eq!(shown.retry, controller.state() == GameState::Dead);
            }
        }

        // Hooks always run as reset/start pairs.
        for pair in calls.borrow().chunks(2) {
            prop_assert_eq!(pair, &["reset", "start"][..]);
        }
    }
}
