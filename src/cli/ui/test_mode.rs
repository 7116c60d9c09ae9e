//! Scripted terminal input for automated runs.
//!
//! When `WIZARD_TEST_TEXT_INPUTS` or `WIZARD_TEST_MENU_EVENTS` is set (or a
//! queue is installed from a test), prompts pop their answers from these
//! queues instead of reading the keyboard. Entries are separated by `|`;
//! menu entries are comma-separated key names such as `DOWN,ENTER`.

use once_cell::sync::Lazy;
use std::{
    collections::VecDeque,
    env,
    sync::{Mutex, MutexGuard, PoisonError},
};

pub const TEXT_INPUTS_ENV: &str = "WIZARD_TEST_TEXT_INPUTS";
pub const MENU_EVENTS_ENV: &str = "WIZARD_TEST_MENU_EVENTS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTestEvent {
    Up,
    Down,
    Home,
    End,
    Enter,
    Esc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTestInput {
    Value(String),
    Keep,
    Back,
    Help,
    Cancel,
    Escape,
}

struct Queue<T> {
    enabled: bool,
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    fn from_env(var: &str, parse: fn(&str) -> VecDeque<T>) -> Self {
        match env::var(var) {
            Ok(raw) => Self {
                enabled: true,
                items: parse(&raw),
            },
            Err(_) => Self {
                enabled: false,
                items: VecDeque::new(),
            },
        }
    }
}

static MENU_EVENTS: Lazy<Mutex<Queue<Vec<MenuTestEvent>>>> =
    Lazy::new(|| Mutex::new(Queue::from_env(MENU_EVENTS_ENV, parse_menu_sequences)));

static TEXT_INPUTS: Lazy<Mutex<Queue<TextTestInput>>> =
    Lazy::new(|| Mutex::new(Queue::from_env(TEXT_INPUTS_ENV, parse_text_sequences)));

fn lock<T>(queue: &Mutex<Queue<T>>) -> MutexGuard<'_, Queue<T>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn is_enabled() -> bool {
    lock(&MENU_EVENTS).enabled || lock(&TEXT_INPUTS).enabled
}

/// Next scripted key sequence for `label`, or `None` outside test mode.
///
/// Panics when the script runs dry: a scripted run must never fall through
/// to reading a real terminal.
pub fn next_menu_events(label: &str) -> Option<Vec<MenuTestEvent>> {
    let mut guard = lock(&MENU_EVENTS);
    if !guard.enabled {
        return None;
    }
    Some(
        guard
            .items
            .pop_front()
            .unwrap_or_else(|| panic!("Menu events exhausted before `{label}` menu rendered")),
    )
}

pub fn next_text_input(label: &str) -> Option<TextTestInput> {
    let mut guard = lock(&TEXT_INPUTS);
    if !guard.enabled {
        return None;
    }
    Some(
        guard
            .items
            .pop_front()
            .unwrap_or_else(|| panic!("Text inputs exhausted before prompt `{label}`")),
    )
}

fn parse_menu_event(token: &str) -> Option<MenuTestEvent> {
    match token.to_ascii_uppercase().as_str() {
        "UP" => Some(MenuTestEvent::Up),
        "DOWN" => Some(MenuTestEvent::Down),
        "HOME" => Some(MenuTestEvent::Home),
        "END" => Some(MenuTestEvent::End),
        "ENTER" | "RETURN" => Some(MenuTestEvent::Enter),
        "ESC" | "ESCAPE" => Some(MenuTestEvent::Esc),
        _ => None,
    }
}

fn parse_text_input(token: &str) -> TextTestInput {
    match token.to_ascii_uppercase().as_str() {
        "<ESC>" => TextTestInput::Escape,
        "<CANCEL>" => TextTestInput::Cancel,
        "<BACK>" => TextTestInput::Back,
        "<HELP>" => TextTestInput::Help,
        "<KEEP>" => TextTestInput::Keep,
        "<BLANK>" | "<EMPTY>" => TextTestInput::Value(String::new()),
        _ => TextTestInput::Value(token.to_string()),
    }
}

fn parse_menu_sequences(raw: &str) -> VecDeque<Vec<MenuTestEvent>> {
    raw.split('|')
        .map(|segment| {
            segment
                .split(',')
                .filter_map(|token| parse_menu_event(token.trim()))
                .collect::<Vec<_>>()
        })
        .filter(|events| !events.is_empty())
        .collect()
}

fn parse_text_sequences(raw: &str) -> VecDeque<TextTestInput> {
    raw.split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_text_input)
        .collect()
}

pub fn install_menu_events(events: Vec<Vec<MenuTestEvent>>) {
    let mut guard = lock(&MENU_EVENTS);
    guard.enabled = true;
    guard.items = events.into();
}

pub fn reset_menu_events() {
    let mut guard = lock(&MENU_EVENTS);
    guard.enabled = false;
    guard.items.clear();
}

pub fn install_text_inputs(inputs: Vec<TextTestInput>) {
    let mut guard = lock(&TEXT_INPUTS);
    guard.enabled = true;
    guard.items = inputs.into();
}

pub fn reset_text_inputs() {
    let mut guard = lock(&TEXT_INPUTS);
    guard.enabled = false;
    guard.items.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_tokens_map_to_commands() {
        let parsed: Vec<_> = parse_text_sequences("Ann| <back> |<BLANK>|<esc>").into();
        assert_eq!(
            parsed,
            vec![
                TextTestInput::Value("Ann".into()),
                TextTestInput::Back,
                TextTestInput::Value(String::new()),
                TextTestInput::Escape,
            ]
        );
    }

    #[test]
    fn menu_sequences_skip_unknown_keys() {
        let parsed: Vec<_> = parse_menu_sequences("DOWN,ENTER|bogus|ESC").into();
        assert_eq!(
            parsed,
            vec![
                vec![MenuTestEvent::Down, MenuTestEvent::Enter],
                vec![MenuTestEvent::Esc],
            ]
        );
    }
}
