use super::OverlayView;
use crate::{error::WrapperError, presentation::Presentation};

/// Headless overlay that remembers what it was told to show.
#[derive(Debug, Default)]
pub struct NativeOverlay {
    mounts: u32,
    renders: u32,
    current: Option<Presentation>,
}

impl NativeOverlay {
    pub fn new() -> Self {
        NativeOverlay::default()
    }

    /// Times [`OverlayView::mount`] ran.
    pub fn mounts(&self) -> u32 {
        self.mounts
    }

    pub fn renders(&self) -> u32 {
        self.renders
    }

    /// Last rendered presentation. `None` until the first render.
    pub fn current(&self) -> Option<&Presentation> {
        self.current.as_ref()
    }
}

impl OverlayView for NativeOverlay {
    fn mount(&mut self) -> Result<(), WrapperError> {
        self.mounts += 1;
        Ok(())
    }

    fn render(&mut self, presentation: &Presentation) {
        self.renders += 1;
        self.current = Some(presentation.clone());
    }
}
