// Library exports for the frontends and tests
//
// # Concurrency model
//
// All engine work runs on one thread with cooperative scheduling: the native
// binary uses a tokio current-thread runtime with a `LocalSet`, the browser
// build uses `wasm_bindgen_futures::spawn_local`. State lives behind
// `parking_lot::Mutex` and atomics inside `Terminal`; locks are never held
// across an `.await`, so an in-flight reveal and a key handler can interleave
// at every suspension point without contention.

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod commands;
pub mod input;
pub mod run;
pub mod sequence;
pub mod surface;
pub mod terminal;
pub mod tokenizer;
pub mod typewriter;

#[cfg(not(target_arch = "wasm32"))]
pub mod app;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
#[cfg(not(target_arch = "wasm32"))]
pub mod debug;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use commands::{Command, CommandOutcome, CommandTable};
pub use input::{Key, KeyAction, ShadowChange, Submission};
pub use run::{RunCounter, RunToken};
pub use sequence::SequenceOutcome;
pub use surface::{CursorMode, Node, Surface};
pub use terminal::Terminal;
pub use tokenizer::{LinkTarget, Token, tokenize_line};
#[cfg(not(target_arch = "wasm32"))]
pub use typewriter::TokioSleeper;
pub use typewriter::{Sleeper, TypeOutcome, Typewriter};

pub mod config {
    //! Configuration re-exports from the termfolio-config crate.
    pub use termfolio_config::*;
}
