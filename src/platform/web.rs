//! Browser bindings
//!
//! Everything here touches the DOM; the rest of the crate only sees the
//! `Surface`, `SurfaceProvider` and `FrameScheduler` traits and the
//! `Keyboard` hub.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent};

use crate::assets::SpriteSheet;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::game::{FrameScheduler, Game, InitError, SurfaceProvider};
use crate::input::{KeyCode, Keyboard};
use crate::settings::GameConfig;
use crate::surface::{Rect, Surface, TextStyle};

/// `Surface` over a canvas 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.ctx.set_font(&style.font);
        self.ctx.set_fill_style_str(&style.fill_style);
        self.ctx.set_text_align(style.align.as_str());
        if let Err(e) = self.ctx.fill_text(text, x, y) {
            log::warn!("fillText failed: {:?}", e);
        }
    }

    fn draw_image_region(&mut self, image: &SpriteSheet, src: Rect, dst: Rect) {
        let Some(element) = image.element() else {
            return;
        };
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                element, src.x, src.y, src.w, src.h, dst.x, dst.y, dst.w, dst.h,
            )
        {
            log::warn!("drawImage failed: {:?}", e);
        }
    }
}

/// Looks up the canvas by id and takes its 2D context
pub struct CanvasProvider {
    canvas_id: String,
}

impl CanvasProvider {
    pub fn new(canvas_id: impl Into<String>) -> Self {
        Self {
            canvas_id: canvas_id.into(),
        }
    }
}

impl SurfaceProvider for CanvasProvider {
    fn acquire_surface(&mut self) -> Result<Box<dyn Surface>, InitError> {
        let canvas: HtmlCanvasElement = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&self.canvas_id))
            .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| InitError::SurfaceUnavailable(self.canvas_id.clone()))?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(InitError::ContextUnavailable)?;

        canvas.set_width(SCREEN_WIDTH as u32);
        canvas.set_height(SCREEN_HEIGHT as u32);
        // Pixel art scales up with CSS
        ctx.set_image_smoothing_enabled(false);

        log::info!("Acquired canvas #{}", self.canvas_id);
        Ok(Box::new(CanvasSurface { ctx }))
    }
}

/// `requestAnimationFrame` as a `FrameScheduler`
pub struct AnimationFrames;

impl FrameScheduler for AnimationFrames {
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, frame loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| callback(time));
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }
}

/// Start loading the sprite sheet; sprites draw once `onload` fires
pub fn load_sprite_sheet(path: &str) -> Rc<SpriteSheet> {
    let element = match HtmlImageElement::new() {
        Ok(element) => element,
        Err(e) => {
            log::warn!("Could not create image element: {:?}", e);
            return Rc::new(SpriteSheet::new(path));
        }
    };
    let ready = Rc::new(Cell::new(false));

    {
        let ready = ready.clone();
        let path = path.to_string();
        let closure = Closure::<dyn FnMut()>::new(move || {
            ready.set(true);
            log::info!("Sprite sheet loaded: {}", path);
        });
        element.set_onload(Some(closure.as_ref().unchecked_ref::<js_sys::Function>()));
        closure.forget();
    }
    {
        let path = path.to_string();
        let closure = Closure::<dyn FnMut()>::new(move || {
            log::warn!("Sprite sheet failed to load: {}", path);
        });
        element.set_onerror(Some(closure.as_ref().unchecked_ref::<js_sys::Function>()));
        closure.forget();
    }

    element.set_src(path);
    Rc::new(SpriteSheet::with_element(path, element, ready))
}

/// Forward window `keyup` events into the keyboard hub
fn setup_input_handlers(keyboard: Keyboard) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
        if let Some(key) = KeyCode::from_key(&event.key()) {
            keyboard.key_up(key);
        }
    });
    let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Inline JSON config from `<script id="game-config">`, if present
pub fn load_config() -> GameConfig {
    let text = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(GameConfig::ELEMENT_ID))
        .and_then(|e| e.text_content());
    match text {
        Some(json) => GameConfig::from_json_or_default(&json),
        None => GameConfig::default(),
    }
}

/// Browser entry: configure logging, init the game, enter the frame loop
pub fn run() {
    console_error_panic_hook::set_once();
    // Trace level so config warnings show; the configured level is applied after
    if console_log::init_with_level(log::Level::Trace).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    let config = load_config();
    log::set_max_level(config.log_level().to_level_filter());

    log::info!("Space Invaders starting...");

    let sheet = load_sprite_sheet(&config.sprite_sheet);
    let canvas_id = config.canvas_id.clone();
    let game = Rc::new(RefCell::new(Game::new(config, sheet)));

    if let Err(e) = game.borrow_mut().init(&mut CanvasProvider::new(canvas_id)) {
        log::error!("Init failed: {}", e);
        return;
    }

    setup_input_handlers(game.borrow().keyboard().clone());

    if Game::start(&game, Rc::new(AnimationFrames)) {
        log::info!("Space Invaders running!");
    }
}
