use std::fmt;

/// Glyph shown when a game supplies neither an image nor an emoji.
pub const DEFAULT_GLYPH: &str = "🎮";

/// What the overlay shows in its thumbnail slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    Image { src: String, alt: String },
    Glyph(String),
}

impl Default for Thumbnail {
    fn default() -> Self {
        Thumbnail::Glyph(DEFAULT_GLYPH.to_owned())
    }
}

/// Display metadata published by an embedded game.
///
/// Empty strings count as absent, the same way the page scripts treat them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameDescriptor {
    pub name: Option<String>,
    pub thumbnail: Option<String>,
    pub emoji: Option<String>,
}

impl GameDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        GameDescriptor {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_thumbnail(mut self, src: impl Into<String>) -> Self {
        self.thumbnail = Some(src.into());
        self
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Reads `name`, `image` (falling back to `thumbnail`) and `emoji` through `field`.
    pub fn from_fields(field: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| field(key).filter(|s| !s.is_empty());
        GameDescriptor {
            name: read("name"),
            thumbnail: read("image").or_else(|| read("thumbnail")),
            emoji: read("emoji"),
        }
    }

    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    /// Image if present, else the emoji, else [`DEFAULT_GLYPH`].
    pub fn thumbnail_view(&self) -> Thumbnail {
        if let Some(src) = non_empty(&self.thumbnail) {
            return Thumbnail::Image {
                src: src.to_owned(),
                alt: self.name().unwrap_or_default().to_owned(),
            };
        }
        Thumbnail::Glyph(non_empty(&self.emoji).unwrap_or(DEFAULT_GLYPH).to_owned())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Optional lifecycle hooks of an embedded game.
///
/// Both default to doing nothing, which is how a game without the hook behaves.
pub trait GameHooks {
    fn reset(&mut self) {}
    fn start(&mut self) {}
}

/// A game with no hooks at all.
pub struct NoHooks;

impl GameHooks for NoHooks {}

/// A registered game: its descriptor plus the hooks the controller drives.
pub struct Game {
    descriptor: GameDescriptor,
    hooks: Box<dyn GameHooks>,
}

impl Game {
    pub fn new(descriptor: GameDescriptor, hooks: impl GameHooks + 'static) -> Self {
        Game {
            descriptor,
            hooks: Box::new(hooks),
        }
    }

    pub fn without_hooks(descriptor: GameDescriptor) -> Self {
        Game::new(descriptor, NoHooks)
    }

    pub fn descriptor(&self) -> &GameDescriptor {
        &self.descriptor
    }

    /// Runs `reset` then `start`.
    pub fn restart(&mut self) {
        self.hooks.reset();
        self.hooks.start();
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

#[test]
fn test_thumbnail_prefers_image() {
    let descriptor = GameDescriptor::new("Snake")
        .with_thumbnail("snake.png")
        .with_emoji("🐍");
    assert_eq!(
        descriptor.thumbnail_view(),
        Thumbnail::Image {
            src: "snake.png".to_owned(),
            alt: "Snake".to_owned()
        }
    );
}

#[test]
fn test_thumbnail_fallbacks() {
    let emoji = GameDescriptor::new("Snake").with_emoji("🐍");
    assert_eq!(emoji.thumbnail_view(), Thumbnail::Glyph("🐍".to_owned()));

    let bare = GameDescriptor::default();
    assert_eq!(bare.thumbnail_view(), Thumbnail::default());

    // Empty strings fall through like missing fields.
    let empty = GameDescriptor::new("").with_thumbnail("").with_emoji("");
    assert_eq!(empty.thumbnail_view(), Thumbnail::default());
    assert_eq!(empty.name(), None);
}

#[test]
fn test_from_fields() {
    use std::collections::HashMap;

    let fields = |pairs: &[(&str, &str)]| {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GameDescriptor::from_fields(move |key| map.get(key).cloned())
    };

    let both = fields(&[("name", "Snake"), ("image", "a.png"), ("thumbnail", "b.png")]);
    assert_eq!(both.thumbnail.as_deref(), Some("a.png"));

    let fallback = fields(&[("name", "Snake"), ("image", ""), ("thumbnail", "b.png")]);
    assert_eq!(fallback.thumbnail.as_deref(), Some("b.png"));

    let empty = fields(&[("name", ""), ("emoji", "")]);
    assert_eq!(empty, GameDescriptor::default());

    let emoji = fields(&[("emoji", "🐍")]);
    assert_eq!(emoji.thumbnail_view(), Thumbnail::Glyph("🐍".to_owned()));
}

#[test]
fn test_restart_order() {
    use std::{cell::RefCell, rc::Rc};

    struct Recorder(Rc<RefCell<Vec<&'static str>>>);
    impl GameHooks for Recorder {
        fn reset(&mut self) {
            self.0.borrow_mut().push("reset");
        }
        fn start(&mut self) {
            self.0.borrow_mut().push("start");
        }
    }

    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut game = Game::new(GameDescriptor::new("Snake"), Recorder(calls.clone()));
    game.restart();
    assert_eq!(*calls.borrow(), vec!["reset", "start"]);
}
