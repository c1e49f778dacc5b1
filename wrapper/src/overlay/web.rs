use super::OverlayView;
use crate::{error::WrapperError, game::Thumbnail, presentation::Presentation};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

const STYLE_ID: &str = "game-wrapper-style";
const HIDDEN: &str = "hidden";
const RETRY: &str = "retry";

const STYLE: &str = r#"
.game-overlay-ui {
    position: fixed;
    inset: 0;
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    z-index: 9999;
    background: rgba(0, 0, 0, 0.75);
    backdrop-filter: blur(5px);
    -webkit-backdrop-filter: blur(5px);
    cursor: pointer;
    opacity: 1;
    transition: opacity 0.3s;
    font-family: 'Segoe UI', -apple-system, sans-serif;
    -webkit-tap-highlight-color: transparent;
}
.game-overlay-ui.hidden {
    opacity: 0;
    pointer-events: none;
}
.overlay-thumbnail {
    width: 120px;
    height: 120px;
    border-radius: 24px;
    background: rgba(255, 255, 255, 0.1);
    display: flex;
    align-items: center;
    justify-content: center;
    font-size: 60px;
    margin-bottom: 30px;
    box-shadow: 0 10px 40px rgba(0, 0, 0, 0.3);
    overflow: hidden;
}
.overlay-thumbnail img {
    width: 100%;
    height: 100%;
    object-fit: contain;
}
.overlay-title {
    font-size: 28px;
    font-weight: bold;
    color: #fff;
    margin-bottom: 15px;
    text-shadow: 0 2px 10px rgba(0, 0, 0, 0.5);
}
.overlay-text {
    font-size: 20px;
    color: rgba(255, 255, 255, 0.9);
    text-align: center;
    animation: overlay-pulse 2s ease-in-out infinite;
}
.overlay-text.retry {
    color: #ff6b6b;
}
.overlay-score {
    font-size: 48px;
    font-weight: bold;
    color: #00d4ff;
    margin: 20px 0;
    text-shadow: 0 0 20px rgba(0, 212, 255, 0.5);
}
.overlay-score.hidden {
    display: none;
}
@keyframes overlay-pulse {
    0%, 100% { opacity: 1; }
    50% { opacity: 0.5; }
}
"#;

fn dom_err(js: JsValue) -> WrapperError {
    WrapperError::Dom(format!("{:?}", js))
}

struct Nodes {
    root: HtmlElement,
    thumbnail: Element,
    title: Element,
    score: Element,
    text: Element,
}

/// Overlay built from plain DOM elements appended to `document.body`.
pub struct DomOverlay {
    document: Document,
    nodes: Option<Nodes>,
    shown: Option<Presentation>,
}

impl DomOverlay {
    pub fn new(document: Document) -> Self {
        DomOverlay {
            document,
            nodes: None,
            shown: None,
        }
    }

    /// The full-screen element that receives activations. `None` before mounting.
    pub fn root(&self) -> Option<&HtmlElement> {
        self.nodes.as_ref().map(|nodes| &nodes.root)
    }

    fn child(&self, parent: &Element, class: &str) -> Result<Element, WrapperError> {
        let element = self.document.create_element("div").map_err(dom_err)?;
        element.set_class_name(class);
        parent.append_child(&element).map_err(dom_err)?;
        Ok(element)
    }

    fn inject_style(&self) -> Result<(), WrapperError> {
        if self.document.get_element_by_id(STYLE_ID).is_some() {
            return Ok(());
        }
        let head = self.document.head().ok_or(WrapperError::NoDocument)?;
        let style = self.document.create_element("style").map_err(dom_err)?;
        style.set_id(STYLE_ID);
        style.set_text_content(Some(STYLE));
        head.append_child(&style).map_err(dom_err)?;
        Ok(())
    }

    fn show_thumbnail(&self, slot: &Element, thumbnail: &Thumbnail) {
        match thumbnail {
            Thumbnail::Glyph(glyph) => slot.set_text_content(Some(glyph)),
            Thumbnail::Image { src, alt } => {
                slot.set_text_content(None);
                let image = self
                    .document
                    .create_element("img")
                    .ok()
                    .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
                if let Some(image) = image {
                    image.set_src(src);
                    image.set_alt(alt);
                    let _ = slot.append_child(&image);
                }
            }
        }
    }
}

fn toggle(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

impl OverlayView for DomOverlay {
    fn mount(&mut self) -> Result<(), WrapperError> {
        if self.nodes.is_some() {
            return Ok(());
        }
        self.inject_style()?;

        let body = self.document.body().ok_or(WrapperError::NoDocument)?;
        let root = self
            .document
            .create_element("div")
            .map_err(dom_err)?
            .dyn_into::<HtmlElement>()
            .map_err(|el| dom_err(el.into()))?;
        root.set_class_name("game-overlay-ui");

        let thumbnail = self.child(&root, "overlay-thumbnail")?;
        let title = self.child(&root, "overlay-title")?;
        let score = self.child(&root, "overlay-score hidden")?;
        let text = self.child(&root, "overlay-text")?;
        body.append_child(&root).map_err(dom_err)?;

        self.nodes = Some(Nodes {
            root,
            thumbnail,
            title,
            score,
            text,
        });
        Ok(())
    }

    fn render(&mut self, presentation: &Presentation) {
        let Some(nodes) = &self.nodes else {
            return;
        };
        let first = self.shown.is_none();
        let prev = self.shown.take().unwrap_or_else(|| presentation.clone());

        if first || prev.visible != presentation.visible {
            toggle(&nodes.root, HIDDEN, !presentation.visible);
        }
        if first || prev.title != presentation.title {
            nodes.title.set_text_content(Some(&presentation.title));
        }
        if first || prev.thumbnail != presentation.thumbnail {
            self.show_thumbnail(&nodes.thumbnail, &presentation.thumbnail);
        }
        if first || prev.hint != presentation.hint || prev.retry != presentation.retry {
            nodes.text.set_text_content(Some(&presentation.hint));
            toggle(&nodes.text, RETRY, presentation.retry);
        }
        if first || prev.score != presentation.score {
            nodes.score.set_text_content(presentation.score.as_deref());
            toggle(&nodes.score, HIDDEN, presentation.score.is_none());
        }

        self.shown = Some(presentation.clone());
    }
}
