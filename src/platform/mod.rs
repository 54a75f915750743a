//! Platform abstraction layer
//!
//! Binds the core to a host:
//! - `web`: `<canvas>` 2D context, `keyup` events, `requestAnimationFrame`
//! - `headless`: in-memory surface and hand-fired frames for native runs

pub mod headless;

#[cfg(target_arch = "wasm32")]
pub mod web;
