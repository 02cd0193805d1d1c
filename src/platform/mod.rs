//! Platform abstraction layer
//!
//! Browser host for the simulation (wasm32 only):
//! - Canvas 2D drawing surface
//! - Keyboard/mouse listeners feeding `InputState`
//! - Animation-frame loop and session teardown
//!
//! Native builds drive a `Session` directly (see the binary).

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub mod host;

#[cfg(target_arch = "wasm32")]
pub use host::{GameHandle, start_game};

/// Log a failed host call at debug level; returns true if it succeeded
///
/// Host calls have no recovery path; failures are only reported.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn check_call<T, E: std::fmt::Debug>(what: &str, result: Result<T, E>) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            log::debug!("{} failed: {:?}", what, err);
            false
        }
    }
}
