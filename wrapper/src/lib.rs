pub mod config;
pub mod controller;
pub mod discovery;
pub mod error;
pub mod game;
pub mod host;
pub mod log;
pub mod overlay;
#[cfg(target_arch = "wasm32")]
pub mod page;
pub mod presentation;
pub mod score;
pub mod state;

pub use controller::OverlayController;
pub use error::WrapperError;
pub use game::{Game, GameDescriptor, GameHooks, Thumbnail};
pub use state::GameState;
