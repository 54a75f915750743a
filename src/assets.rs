//! Shared image assets
//!
//! The sprite sheet is loaded once and shared read-only by every sprite that
//! references it. Sprites hold a `Weak` handle and draw nothing until the
//! sheet reports ready.

use std::cell::Cell;
use std::rc::Rc;

/// The one shared sprite sheet image
#[derive(Debug)]
pub struct SpriteSheet {
    path: String,
    ready: Rc<Cell<bool>>,
    #[cfg(target_arch = "wasm32")]
    element: Option<web_sys::HtmlImageElement>,
}

impl SpriteSheet {
    /// Handle for an image that has not finished loading
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ready: Rc::new(Cell::new(false)),
            #[cfg(target_arch = "wasm32")]
            element: None,
        }
    }

    /// Browser-backed handle; `ready` is flipped by the element's load callback
    #[cfg(target_arch = "wasm32")]
    pub fn with_element(
        path: impl Into<String>,
        element: web_sys::HtmlImageElement,
        ready: Rc<Cell<bool>>,
    ) -> Self {
        Self {
            path: path.into(),
            ready,
            element: Some(element),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn element(&self) -> Option<&web_sys::HtmlImageElement> {
        self.element.as_ref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    /// Mark the image as decoded and drawable
    pub fn mark_ready(&self) {
        if !self.ready.replace(true) {
            log::info!("Sprite sheet ready: {}", self.path);
        }
    }
}

/// Sprite sheet regions used by the screens, as `(clip_x, clip_y, w, h)`
pub mod regions {
    pub type Region = (u32, u32, u32, u32);

    pub const SQUID: Region = (0, 0, 8, 8);
    pub const CRAB: Region = (8, 0, 11, 8);
    pub const OCTOPUS: Region = (19, 0, 12, 8);
    pub const SAUCER: Region = (31, 0, 16, 7);
    pub const CANNON: Region = (47, 0, 13, 8);
}
