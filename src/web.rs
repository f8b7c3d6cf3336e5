//! Browser frontend (wasm32 only).
//!
//! Mounts a [`Terminal`] into a page: the surface is projected as HTML into
//! an output container, physical keys arrive through a document `keydown`
//! listener, and software keyboards go through an off-screen text field that
//! mirrors the input buffer.

use crate::input::{Key, KeyAction, Submission};
use crate::terminal::Terminal;
use crate::typewriter::Sleeper;
use std::time::Duration;
use termfolio_config::Config;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement, KeyboardEvent};

/// Redraw poll interval (~60 fps)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

type WebTerminal = Terminal<TimeoutSleeper>;

/// Sleeper backed by `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutSleeper;

impl Sleeper for TimeoutSleeper {
    async fn sleep(&self, duration: Duration) {
        let ms = duration.as_millis().min(i32::MAX as u128) as i32;
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let scheduled = web_sys::window()
                .map(|window| {
                    window
                        .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                        .is_ok()
                })
                .unwrap_or(false);
            if !scheduled {
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        let _ = JsFuture::from(promise).await;
    }
}

/// Mount the terminal with the built-in content.
///
/// `output_id` names the container that receives rendered output;
/// `rerun_id` optionally names a control that restarts the boot sequence.
#[wasm_bindgen]
pub fn mount(output_id: &str, rerun_id: Option<String>) -> Result<(), JsValue> {
    mount_with(output_id, rerun_id.as_deref(), Config::default())
}

/// Mount the terminal with content supplied as a YAML config document.
#[wasm_bindgen(js_name = mountWithConfig)]
pub fn mount_with_config(
    output_id: &str,
    rerun_id: Option<String>,
    config_yaml: &str,
) -> Result<(), JsValue> {
    let config: Config =
        serde_yaml_ng::from_str(config_yaml).map_err(|e| JsValue::from_str(&e.to_string()))?;
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    mount_with(output_id, rerun_id.as_deref(), config)
}

fn mount_with(output_id: &str, rerun_id: Option<&str>, config: Config) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Some(level) = config.log_level.to_level_filter().to_level() {
        let _ = console_log::init_with_level(level);
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let output: HtmlElement = document
        .get_element_by_id(output_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id {output_id:?}")))?
        .dyn_into()?;
    let rerun = rerun_id.and_then(|id| document.get_element_by_id(id));
    let hidden = create_hidden_input(&document)?;

    let terminal = Terminal::new(&config, TimeoutSleeper);

    install_document_keys(&document, &terminal, &hidden)?;
    install_hidden_input(&terminal, &hidden)?;
    install_output_click(&output, &terminal, &hidden)?;
    if let Some(rerun) = rerun {
        install_rerun(&rerun, &terminal, &hidden)?;
    }

    hidden.set_value("");
    spawn_local(redraw_loop(terminal.clone(), output, hidden));
    spawn_local(async move {
        terminal.run_boot_sequence().await;
    });

    log::info!("termfolio {} mounted on #{}", crate::VERSION, output_id);
    Ok(())
}

/// Off-screen text field that brings up software keyboards on focus.
fn create_hidden_input(document: &Document) -> Result<HtmlInputElement, JsValue> {
    let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    input.set_type("text");
    input.set_attribute("autocomplete", "off")?;
    input.set_attribute("autocapitalize", "off")?;
    input.set_attribute("spellcheck", "false")?;
    input.set_attribute("aria-hidden", "true")?;

    let style = input.style();
    style.set_property("position", "absolute")?;
    style.set_property("left", "-9999px")?;
    style.set_property("opacity", "0")?;

    document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&input)?;
    Ok(input)
}

/// Make the hidden field hold exactly the input buffer, so the next
/// `input` event diffs against what is on screen.
fn sync_shadow(terminal: &WebTerminal, hidden: &HtmlInputElement) {
    let buffer = terminal.input_text();
    if hidden.value() != buffer {
        hidden.set_value(&buffer);
    }
}

fn spawn_submit(terminal: &WebTerminal, hidden: &HtmlInputElement, submission: Submission) {
    let terminal = terminal.clone();
    let hidden = hidden.clone();
    spawn_local(async move {
        let outcome = terminal.submit(submission).await;
        hidden.set_value("");
        if outcome.needs_prompt() {
            let _ = hidden.focus();
        }
    });
}

/// Physical keyboard. Keys aimed at the hidden field are left to its own
/// listeners so each keystroke is counted once.
fn install_document_keys(
    document: &Document,
    terminal: &WebTerminal,
    hidden: &HtmlInputElement,
) -> Result<(), JsValue> {
    let terminal = terminal.clone();
    let hidden = hidden.clone();
    let hidden_target: EventTarget = hidden.clone().into();

    let listener = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        if event.target().as_ref() == Some(&hidden_target) {
            return;
        }
        if event.ctrl_key() || event.meta_key() || event.alt_key() {
            return;
        }

        let action = terminal.handle_key(Key::from_dom(&event.key()));
        if action.prevents_default() {
            event.prevent_default();
        }
        match action {
            KeyAction::Submit(submission) => spawn_submit(&terminal, &hidden, submission),
            KeyAction::Echoed(_) | KeyAction::Erased(_) => sync_shadow(&terminal, &hidden),
            KeyAction::Ignored => {}
        }
    });
    document.add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

/// Software keyboard: mirror the field's value and submit on its Enter.
fn install_hidden_input(terminal: &WebTerminal, hidden: &HtmlInputElement) -> Result<(), JsValue> {
    {
        let terminal = terminal.clone();
        let field = hidden.clone();
        let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let change = terminal.handle_shadow_change(&field.value());
            if !change.is_empty() {
                log::trace!("Shadow input change: {:?}", change);
            }
        });
        hidden.add_event_listener_with_callback("input", listener.as_ref().unchecked_ref())?;
        listener.forget();
    }

    {
        let terminal = terminal.clone();
        let field = hidden.clone();
        let listener = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.key() != "Enter" {
                return;
            }
            if let KeyAction::Submit(submission) = terminal.handle_key(Key::Enter) {
                event.prevent_default();
                spawn_submit(&terminal, &field, submission);
            }
        });
        hidden.add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())?;
        listener.forget();
    }

    Ok(())
}

/// Clicking the output focuses the hidden field while a prompt is waiting.
fn install_output_click(
    output: &HtmlElement,
    terminal: &WebTerminal,
    hidden: &HtmlInputElement,
) -> Result<(), JsValue> {
    let terminal = terminal.clone();
    let hidden = hidden.clone();
    let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        if terminal.input_enabled() {
            let _ = hidden.focus();
        }
    });
    output.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

fn install_rerun(
    rerun: &Element,
    terminal: &WebTerminal,
    hidden: &HtmlInputElement,
) -> Result<(), JsValue> {
    let terminal = terminal.clone();
    let hidden = hidden.clone();
    let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        // The new run resets the buffer
        hidden.set_value("");
        let terminal = terminal.clone();
        spawn_local(async move {
            terminal.rerun().await;
        });
    });
    rerun.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

/// Re-project the surface into the container whenever it changed, and
/// realign the hidden field with the buffer.
async fn redraw_loop(terminal: WebTerminal, output: HtmlElement, hidden: HtmlInputElement) {
    let mut last_generation = None;
    loop {
        terminal.sleeper().sleep(FRAME_INTERVAL).await;

        let generation = terminal.generation();
        if last_generation == Some(generation) {
            continue;
        }
        last_generation = Some(generation);
        output.set_inner_html(&terminal.html());
        sync_shadow(&terminal, &hidden);
    }
}
