use std::fmt;

/// Lifecycle of a single round as seen by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Ready,
    Playing,
    Dead,
}

impl GameState {
    /// The overlay covers the game in every state except [`GameState::Playing`].
    pub fn overlay_visible(self) -> bool {
        self != GameState::Playing
    }

    /// Whether an activation starts a new round from this state.
    pub fn accepts_activation(self) -> bool {
        matches!(self, GameState::Ready | GameState::Dead)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameState::Ready => "ready",
            GameState::Playing => "playing",
            GameState::Dead => "dead",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[test]
fn test_overlay_visibility() {
    assert!(GameState::Ready.overlay_visible());
    assert!(!GameState::Playing.overlay_visible());
    assert!(GameState::Dead.overlay_visible());
}

#[test]
fn test_activation() {
    assert!(GameState::Ready.accepts_activation());
    assert!(GameState::Dead.accepts_activation());
    assert!(!GameState::Playing.accepts_activation());
    assert_eq!(GameState::default(), GameState::Ready);
    assert_eq!(GameState::Dead.to_string(), "dead");
}
