//! Space Invaders entry point
//!
//! On the web this hands off to `platform::web`. Natively there is no window,
//! so the loop runs headless for a few seconds of synthetic frames and logs
//! what it drew.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    space_invaders::platform::web::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use space_invaders::assets::SpriteSheet;
    use space_invaders::game::ManualScheduler;
    use space_invaders::input::KeyCode;
    use space_invaders::platform::headless::{FrameCapture, drive};
    use space_invaders::{Game, GameConfig, StateKind};

    env_logger::init();
    log::info!("Space Invaders (headless) starting...");

    let config = GameConfig::default();
    let sheet = Rc::new(SpriteSheet::new(config.sprite_sheet.clone()));
    // Nothing to decode natively
    sheet.mark_ready();

    let game = Rc::new(RefCell::new(Game::new(config, sheet)));
    let mut capture = FrameCapture::new();
    if let Err(e) = game.borrow_mut().init(&mut capture) {
        log::error!("Init failed: {}", e);
        std::process::exit(1);
    }

    let scheduler = Rc::new(ManualScheduler::new());
    if !Game::start(&game, scheduler.clone()) {
        std::process::exit(1);
    }

    let report = drive(&game, &scheduler, &capture, 0.0, 60.0, 2000.0);
    log::info!(
        "Welcome: {} callbacks, {} frames, texts {:?}",
        report.callbacks,
        report.frames,
        report.last_texts
    );

    game.borrow().keyboard().key_up(KeyCode::DIGIT_2);
    // A tab-suspend sized gap, then a 144 Hz display
    let report = drive(&game, &scheduler, &capture, 2500.0, 144.0, 1000.0);
    log::info!(
        "Player count {}, {} callbacks, {} frames",
        game.borrow().session().player_count.as_number(),
        report.callbacks,
        report.frames
    );

    game.borrow_mut().change_state(StateKind::Playing);
    let report = drive(&game, &scheduler, &capture, 3500.0, 60.0, 2000.0);
    log::info!(
        "Playing: {} sprites, texts {:?}",
        report.last_sprites,
        report.last_texts
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
