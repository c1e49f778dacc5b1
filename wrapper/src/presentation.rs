use crate::{config::OverlayText, game::Thumbnail};

/// Everything the overlay shows at one moment.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub visible: bool,
    pub title: String,
    pub thumbnail: Thumbnail,
    pub hint: String,
    /// Hint uses the retry styling.
    pub retry: bool,
    /// Formatted score readout. `None` hides the readout.
    pub score: Option<String>,
}

impl Presentation {
    /// What the overlay shows before any game has been found.
    pub fn loading(text: &OverlayText) -> Self {
        Presentation {
            visible: true,
            title: text.loading.clone(),
            thumbnail: Thumbnail::default(),
            hint: text.start_hint.clone(),
            retry: false,
            score: None,
        }
    }
}
