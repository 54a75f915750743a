//! Game root and frame loop
//!
//! `Game` owns everything that lives for the whole process: the drawing
//! surface, the scene, the shared sprite sheet, the session and the clock.
//! The host hands it one timestamp per display refresh through `run`; `start`
//! keeps re-registering that call with a `FrameScheduler` for as long as the
//! host keeps calling back.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::assets::SpriteSheet;
use crate::clock::{FrameAdvance, FrameClock};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::Keyboard;
use crate::scene::{PlayingState, Scene, State, StateKind, WelcomeState};
use crate::session::Session;
use crate::settings::GameConfig;
use crate::surface::{Rect, Surface};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InitError {
    #[error("game is already initialized")]
    AlreadyInitialized,
    #[error("drawing surface `{0}` is unavailable")]
    SurfaceUnavailable(String),
    #[error("2d drawing context is unavailable")]
    ContextUnavailable,
}

/// Acquires the drawing surface during `Game::init`
pub trait SurfaceProvider {
    fn acquire_surface(&mut self) -> Result<Box<dyn Surface>, InitError>;
}

/// Host primitive that calls back once on the next visual frame
pub trait FrameScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>);
}

pub struct Game {
    config: GameConfig,
    surface: Option<Box<dyn Surface>>,
    scene: Scene,
    sprite_sheet: Rc<SpriteSheet>,
    session: Session,
    clock: FrameClock,
    keyboard: Keyboard,
    frames: u64,
}

impl Game {
    pub fn new(config: GameConfig, sprite_sheet: Rc<SpriteSheet>) -> Self {
        let keyboard = Keyboard::new();
        Self {
            clock: config.clock(),
            config,
            surface: None,
            scene: Scene::new(keyboard.clone()),
            sprite_sheet,
            session: Session::new(),
            keyboard,
            frames: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Host side of the keyboard; push key releases here
    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn sprite_sheet(&self) -> &Rc<SpriteSheet> {
        &self.sprite_sheet
    }

    /// Callbacks that ran the simulation (skipped frames excluded)
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Acquire the surface and enter the welcome screen
    ///
    /// Fails without side effects if already initialized or if the surface
    /// can't be acquired.
    pub fn init(&mut self, provider: &mut dyn SurfaceProvider) -> Result<(), InitError> {
        if self.is_initialized() {
            return Err(InitError::AlreadyInitialized);
        }
        let surface = provider.acquire_surface()?;
        self.surface = Some(surface);
        self.change_state(StateKind::Welcome);
        log::info!("Game initialized");
        Ok(())
    }

    /// Make a fresh screen of `kind` the live state
    pub fn change_state(&mut self, kind: StateKind) {
        let next: Box<dyn State> = match kind {
            StateKind::Welcome => Box::new(WelcomeState::new(&self.sprite_sheet)),
            StateKind::Playing => Box::new(PlayingState::new(&self.sprite_sheet)),
        };
        self.scene.set_state(Some(next));
    }

    /// One frame callback: drain due fixed steps, then draw once
    pub fn run(&mut self, tick_time: f64) -> FrameAdvance {
        let advance = self.clock.advance(tick_time);
        match advance {
            FrameAdvance::Skipped { dt } => {
                log::warn!("Dropped frame after {:.0} ms gap", dt);
            }
            FrameAdvance::Stepped(steps) => {
                let step = self.clock.step_ms();
                for _ in 0..steps {
                    if let Err(e) = self.scene.update(step, &mut self.session) {
                        log::error!("Update failed: {}", e);
                        break;
                    }
                }
                if steps > 1 {
                    log::debug!("Frame {} ran {} steps", self.frames, steps);
                }
                self.render();
                self.frames += 1;
            }
        }
        advance
    }

    fn render(&mut self) {
        let Some(surface) = self.surface.as_deref_mut() else {
            return;
        };
        surface.clear_rect(Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT));
        self.scene.render(surface);
    }

    /// Enter the frame loop; declines unless `init` succeeded
    pub fn start(game: &Rc<RefCell<Game>>, scheduler: Rc<dyn FrameScheduler>) -> bool {
        if !game.borrow().is_initialized() {
            log::error!("Game not initialized, not starting");
            return false;
        }
        log::info!("Game loop starting");
        schedule(game.clone(), scheduler);
        true
    }
}

fn schedule(game: Rc<RefCell<Game>>, scheduler: Rc<dyn FrameScheduler>) {
    let next = scheduler.clone();
    scheduler.request_frame(Box::new(move |tick_time| {
        game.borrow_mut().run(tick_time);
        schedule(game, next);
    }));
}

/// Scheduler driven by hand, for headless runs and tests
#[derive(Default)]
pub struct ManualScheduler {
    pending: RefCell<Option<Box<dyn FnOnce(f64)>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Invoke the pending callback, if any; returns whether one ran
    pub fn fire(&self, tick_time: f64) -> bool {
        let callback = self.pending.borrow_mut().take();
        match callback {
            Some(callback) => {
                callback(tick_time);
                true
            }
            None => false,
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) {
        *self.pending.borrow_mut() = Some(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use crate::session::PlayerCount;
    use crate::surface::RecordingSurface;

    /// Surface whose calls stay inspectable after being boxed into the game
    #[derive(Clone, Default)]
    struct SharedSurface(Rc<RefCell<RecordingSurface>>);

    impl Surface for SharedSurface {
        fn clear_rect(&mut self, rect: Rect) {
            self.0.borrow_mut().clear_rect(rect);
        }

        fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &crate::surface::TextStyle) {
            self.0.borrow_mut().fill_text(text, x, y, style);
        }

        fn draw_image_region(&mut self, image: &SpriteSheet, src: Rect, dst: Rect) {
            self.0.borrow_mut().draw_image_region(image, src, dst);
        }
    }

    struct Provider(Result<SharedSurface, InitError>);

    impl SurfaceProvider for Provider {
        fn acquire_surface(&mut self) -> Result<Box<dyn Surface>, InitError> {
            self.0
                .clone()
                .map(|s| Box::new(s) as Box<dyn Surface>)
        }
    }

    fn game() -> Game {
        Game::new(
            GameConfig::default(),
            Rc::new(SpriteSheet::new("sprites.png")),
        )
    }

    fn ready_game() -> (Game, SharedSurface) {
        let surface = SharedSurface::default();
        let mut game = game();
        game.init(&mut Provider(Ok(surface.clone()))).unwrap();
        (game, surface)
    }

    #[test]
    fn test_init_enters_welcome() {
        let (game, _) = ready_game();
        assert!(game.is_initialized());
        assert_eq!(game.scene().state_kind(), Some(StateKind::Welcome));
        assert_eq!(game.clock().step_ms(), crate::consts::FPS_STEP_MS);
        assert_eq!(game.config().canvas_id, "canvas");
        assert_eq!(game.sprite_sheet().path(), "sprites.png");
    }

    #[test]
    fn test_init_twice_fails() {
        let (mut game, _) = ready_game();
        let err = game
            .init(&mut Provider(Ok(SharedSurface::default())))
            .unwrap_err();
        assert_eq!(err, InitError::AlreadyInitialized);
    }

    #[test]
    fn test_init_failure_leaves_game_uninitialized() {
        let mut game = game();
        let err = game
            .init(&mut Provider(Err(InitError::SurfaceUnavailable("canvas".into()))))
            .unwrap_err();
        assert_eq!(err, InitError::SurfaceUnavailable("canvas".into()));
        assert!(!game.is_initialized());
        assert_eq!(game.scene().state_kind(), None);

        let err = game
            .init(&mut Provider(Err(InitError::ContextUnavailable)))
            .unwrap_err();
        assert_eq!(err, InitError::ContextUnavailable);

        // A later successful init still works
        game.init(&mut Provider(Ok(SharedSurface::default()))).unwrap();
        assert!(game.is_initialized());
    }

    #[test]
    fn test_stutter_frame_neither_updates_nor_draws() {
        let (mut game, surface) = ready_game();
        assert!(matches!(game.run(5000.0), FrameAdvance::Skipped { .. }));
        assert!(surface.0.borrow().calls.is_empty());
        assert_eq!(game.frames(), 0);
    }

    #[test]
    fn test_render_once_per_callback() {
        let (mut game, surface) = ready_game();
        game.run(5000.0);
        assert_eq!(game.run(5050.0), FrameAdvance::Stepped(3));

        let surface = surface.0.borrow();
        assert_eq!(surface.clear_count(), 1);
        assert!(matches!(
            surface.calls.first(),
            Some(crate::surface::DrawCall::Clear(_))
        ));
    }

    #[test]
    fn test_zero_step_callback_still_redraws() {
        let (mut game, surface) = ready_game();
        game.run(1000.0);
        assert_eq!(game.run(1005.0), FrameAdvance::Stepped(0));
        assert_eq!(surface.0.borrow().clear_count(), 1);
    }

    #[test]
    fn test_updates_happen_before_render() {
        let (mut game, surface) = ready_game();
        game.session_mut().player1_score = 42;
        game.run(1000.0);
        game.run(1020.0);

        assert!(surface.0.borrow().texts().contains(&"0042"));
    }

    #[test]
    fn test_start_requires_init() {
        let game = Rc::new(RefCell::new(game()));
        let scheduler = Rc::new(ManualScheduler::new());
        assert!(!Game::start(&game, scheduler.clone()));
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn test_loop_reschedules_every_frame() {
        let (game, surface) = ready_game();
        let game = Rc::new(RefCell::new(game));
        let scheduler = Rc::new(ManualScheduler::new());
        assert!(Game::start(&game, scheduler.clone()));

        let mut t = 1000.0;
        // Includes a stutter frame, which must not stop the loop
        for gap in [0.0, 20.0, 20.0, 250.0, 20.0] {
            t += gap;
            assert!(scheduler.fire(t));
            assert!(scheduler.has_pending());
        }
        assert_eq!(game.borrow().frames(), 3);
        assert_eq!(surface.0.borrow().clear_count(), 3);
    }

    #[test]
    fn test_keys_flow_through_loop() {
        let (mut game, _) = ready_game();
        game.run(1000.0);
        game.keyboard().key_up(KeyCode::DIGIT_2);
        game.run(1020.0);
        assert_eq!(game.session().player_count, PlayerCount::Two);
    }

    #[test]
    fn test_change_state_swaps_screens() {
        let (mut game, _) = ready_game();
        game.change_state(StateKind::Playing);
        assert_eq!(game.scene().state_kind(), Some(StateKind::Playing));
        assert_eq!(game.keyboard().subscriber_count(), 0);
    }
}
