//! Character-by-character reveal of tokenized lines.

use crate::run::RunToken;
use crate::surface::{CursorMode, Origin, Surface};
use crate::tokenizer::{LinkTarget, Token, tokenize_line};
use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use termfolio_config::{DelayRange, TypingConfig};

/// Suspends the current task between characters.
///
/// The native frontend and tests sleep on the tokio timer; the browser
/// frontend sleeps on `setTimeout`.
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Sleeper backed by the tokio timer.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[cfg(not(target_arch = "wasm32"))]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            // Still give other tasks (redraw, key reader) a turn
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Which delay range applies to a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Text,
    Link,
}

/// Draws per-character delays uniformly from the configured ranges.
#[derive(Debug)]
pub struct Pacer {
    text: DelayRange,
    link: DelayRange,
    rng: SmallRng,
}

impl Pacer {
    pub fn new(config: &TypingConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => entropy_rng(),
        };
        Self {
            text: config.text_delay,
            link: config.link_delay,
            rng,
        }
    }

    pub fn next_delay(&mut self, kind: SpanKind) -> Duration {
        let range = match kind {
            SpanKind::Text => self.text,
            SpanKind::Link => self.link,
        };
        if range.min_ms >= range.max_ms {
            return range.min();
        }
        Duration::from_millis(self.rng.random_range(range.min_ms..=range.max_ms))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy_rng() -> SmallRng {
    SmallRng::from_rng(&mut rand::rng())
}

#[cfg(target_arch = "wasm32")]
fn entropy_rng() -> SmallRng {
    SmallRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64)
}

/// "Typing in progress" flag shared by all concurrent reveal calls.
///
/// Counts active calls, so a stale call bailing out never clears the flag
/// while a newer call is still typing.
#[derive(Debug, Default)]
pub struct TypingFlag {
    active: AtomicUsize,
}

impl TypingFlag {
    pub fn is_set(&self) -> bool {
        self.active.load(Ordering::SeqCst) > 0
    }

    pub fn hold(&self) -> TypingGuard<'_> {
        self.active.fetch_add(1, Ordering::SeqCst);
        TypingGuard { flag: self }
    }
}

/// Keeps the typing flag set until dropped.
#[derive(Debug)]
pub struct TypingGuard<'a> {
    flag: &'a TypingFlag,
}

impl Drop for TypingGuard<'_> {
    fn drop(&mut self) {
        self.flag.active.fetch_sub(1, Ordering::SeqCst);
    }
}

/// How a reveal call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOutcome {
    /// Every character was appended
    Completed,
    /// A newer run superseded this one; nothing further was appended
    Abandoned,
}

/// Reveals lines into a surface one character at a time.
pub struct Typewriter<S> {
    sleeper: S,
    pacer: Mutex<Pacer>,
    typing: TypingFlag,
}

impl<S: Sleeper> Typewriter<S> {
    pub fn new(sleeper: S, config: &TypingConfig) -> Self {
        Self {
            sleeper,
            pacer: Mutex::new(Pacer::new(config)),
            typing: TypingFlag::default(),
        }
    }

    pub fn is_typing(&self) -> bool {
        self.typing.is_set()
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    async fn pause(&self, kind: SpanKind) {
        let delay = self.pacer.lock().next_delay(kind);
        self.sleeper.sleep(delay).await;
    }

    /// Type one line into `surface` on behalf of `run`.
    ///
    /// Staleness is checked before every character; a stale run returns
    /// [`TypeOutcome::Abandoned`] without appending anything further.
    pub async fn type_line(
        &self,
        surface: &Mutex<Surface>,
        line: &str,
        run: &RunToken,
    ) -> TypeOutcome {
        let _typing = self.typing.hold();

        for token in tokenize_line(line) {
            if !run.is_current() {
                return TypeOutcome::Abandoned;
            }

            match token {
                Token::Text(text) => {
                    for ch in text.chars() {
                        if !run.is_current() {
                            return TypeOutcome::Abandoned;
                        }
                        {
                            let mut surface = surface.lock();
                            surface.push_char(ch, Origin::Output);
                            surface.set_cursor(CursorMode::Typing);
                        }
                        self.pause(SpanKind::Text).await;
                    }
                }
                Token::Link(value) => {
                    {
                        let mut surface = surface.lock();
                        surface.open_link(LinkTarget::classify(&value));
                        surface.set_cursor(CursorMode::Typing);
                    }
                    for ch in value.chars() {
                        if !run.is_current() {
                            return TypeOutcome::Abandoned;
                        }
                        {
                            let mut surface = surface.lock();
                            if !surface.push_link_char(ch) {
                                return TypeOutcome::Abandoned;
                            }
                            surface.set_cursor(CursorMode::Typing);
                        }
                        self.pause(SpanKind::Link).await;
                    }
                }
            }
        }

        log::trace!("Run {} typed {:?}", run.id(), line);
        TypeOutcome::Completed
    }
}
