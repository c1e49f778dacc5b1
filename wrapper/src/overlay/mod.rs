use crate::{error::WrapperError, presentation::Presentation};

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
mod web;

/// The visual overlay driven by the controller.
pub trait OverlayView {
    /// Builds the overlay. Called once per controller.
    fn mount(&mut self) -> Result<(), WrapperError>;
    fn render(&mut self, presentation: &Presentation);
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::NativeOverlay;
#[cfg(target_arch = "wasm32")]
pub use web::DomOverlay;
