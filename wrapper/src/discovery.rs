use crate::game::Game;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStatus {
    Pending,
    Found,
    TimedOut,
}

/// Somewhere a game might have been published, checked once per frame.
pub trait GameSource {
    fn look(&mut self) -> Option<Game>;
}

impl<F: FnMut() -> Option<Game>> GameSource for F {
    fn look(&mut self) -> Option<Game> {
        self()
    }
}

/// Result of one discovery frame.
#[derive(Debug)]
pub enum DiscoveryPoll {
    Found(Game),
    Waiting,
    TimedOut,
    /// Discovery already finished, nothing was checked.
    Idle,
}

/// Bounded per-frame search for a published game.
#[derive(Debug)]
pub struct Discovery {
    max_frames: Option<u32>,
    frames: u32,
    status: DiscoveryStatus,
}

impl Discovery {
    pub fn new(max_frames: Option<u32>) -> Self {
        Discovery {
            max_frames,
            frames: 0,
            status: DiscoveryStatus::Pending,
        }
    }

    pub fn status(&self) -> DiscoveryStatus {
        self.status
    }

    /// Frames checked so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Checks `source` once, unless discovery already finished.
    pub fn poll(&mut self, source: &mut dyn GameSource) -> DiscoveryPoll {
        if self.status != DiscoveryStatus::Pending {
            return DiscoveryPoll::Idle;
        }

        self.frames += 1;
        if let Some(game) = source.look() {
            self.status = DiscoveryStatus::Found;
            return DiscoveryPoll::Found(game);
        }

        match self.max_frames {
            Some(max) if self.frames >= max => {
                self.status = DiscoveryStatus::TimedOut;
                DiscoveryPoll::TimedOut
            }
            _ => DiscoveryPoll::Waiting,
        }
    }

    /// Marks discovery as satisfied by an explicit registration.
    pub fn resolve(&mut self) {
        self.status = DiscoveryStatus::Found;
    }
}

#[cfg(test)]
fn nothing() -> Option<Game> {
    None
}

#[test]
fn test_times_out() {
    let mut discovery = Discovery::new(Some(3));
    let mut source = nothing;
    assert!(matches!(discovery.poll(&mut source), DiscoveryPoll::Waiting));
    assert!(matches!(discovery.poll(&mut source), DiscoveryPoll::Waiting));
    assert!(matches!(discovery.poll(&mut source), DiscoveryPoll::TimedOut));
    assert_eq!(discovery.status(), DiscoveryStatus::TimedOut);
    assert!(matches!(discovery.poll(&mut source), DiscoveryPoll::Idle));
    assert_eq!(discovery.frames(), 3);
}

#[test]
fn test_unbounded() {
    let mut discovery = Discovery::new(None);
    let mut source = nothing;
    for _ in 0..10_000 {
        assert!(matches!(discovery.poll(&mut source), DiscoveryPoll::Waiting));
    }
    assert_eq!(discovery.status(), DiscoveryStatus::Pending);
}

#[test]
fn test_found_once() {
    use crate::game::GameDescriptor;

    let mut discovery = Discovery::new(Some(10));
    let mut published = None;
    let mut frame = 0;
    let mut source = || {
        frame += 1;
        if frame == 2 {
            published = Some(GameDescriptor::new("Snake"));
        }
        published.clone().map(Game::without_hooks)
    };
    assert!(matches!(discovery.poll(&mut source), DiscoveryPoll::Waiting));
    match discovery.poll(&mut source) {
        DiscoveryPoll::Found(game) => assert_eq!(game.descriptor().name(), Some("Snake")),
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(discovery.poll(&mut source), DiscoveryPoll::Idle));
    assert_eq!(discovery.status(), DiscoveryStatus::Found);
}
